use crate::core_impl::{Document, DocumentForm, NodeId};
use crate::field::{AttributeSource, FieldContext, FormContext};
use crate::field_state::FieldDisplayState;
use crate::form::SubmitDecision;
use crate::session::{SessionReport, ValidationMode};
use crate::validator::Validator;
use crate::{Error, Result};

/// A parsed document wired to a [`Validator`], driven like a user would.
///
/// Selectors are `#id` only.
#[derive(Debug)]
pub struct Page {
    document: Document,
    validator: Validator,
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        Self::with_validator(html, Validator::new())
    }

    pub fn with_validator(html: &str, validator: Validator) -> Result<Self> {
        let document = Document::from_html(html)?;
        Ok(Self {
            document,
            validator,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn validator_mut(&mut self) -> &mut Validator {
        &mut self.validator
    }

    pub fn select_one(&self, selector: &str) -> Result<NodeId> {
        let id = selector
            .strip_prefix('#')
            .filter(|id| !id.is_empty() && !id.contains(|ch: char| ch.is_whitespace()))
            .ok_or_else(|| Error::UnsupportedSelector(selector.to_string()))?;
        self.document
            .element_by_id(id)
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    fn select_control(&self, selector: &str) -> Result<NodeId> {
        let node = self.select_one(selector)?;
        if self.document.field(node).is_none() {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input, select or textarea".into(),
                actual: self.describe(node),
            });
        }
        Ok(node)
    }

    fn select_form(&self, selector: &str) -> Result<NodeId> {
        let node = self.select_one(selector)?;
        if self.document.form(node).is_none() {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "form".into(),
                actual: self.describe(node),
            });
        }
        Ok(node)
    }

    fn describe(&self, node: NodeId) -> String {
        let tag = self.document.tag_name(node).unwrap_or("non-element");
        match self.document.attr(node, "type") {
            Some(kind) if tag == "input" => format!("input[type={}]", kind.to_ascii_lowercase()),
            _ => tag.to_string(),
        }
    }

    fn is_disabled(&self, node: NodeId) -> bool {
        self.document
            .field(node)
            .is_some_and(|field| field.is_disabled())
    }

    /// Replaces the control's value and fires a change. Disabled controls
    /// ignore the input.
    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<Option<SessionReport>> {
        let target = self.select_control(selector)?;
        let tag = self.document.tag_name(target).unwrap_or_default();
        if tag != "input" && tag != "textarea" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: self.describe(target),
            });
        }
        if self.is_disabled(target) {
            return Ok(None);
        }
        self.document.set_value(target, text)?;
        self.change_node(target)
    }

    /// Fires a change only when the checked state actually flips.
    pub fn set_checked(&mut self, selector: &str, checked: bool) -> Result<Option<SessionReport>> {
        let target = self.select_control(selector)?;
        let kind = self.describe(target);
        if kind != "input[type=checkbox]" && kind != "input[type=radio]" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input[type=checkbox|radio]".into(),
                actual: kind,
            });
        }
        if self.is_disabled(target) || self.document.checked(target)? == checked {
            return Ok(None);
        }
        self.document.set_checked(target, checked)?;
        self.change_node(target)
    }

    pub fn select(&mut self, selector: &str, value: &str) -> Result<Option<SessionReport>> {
        let target = self.select_control(selector)?;
        if self.document.tag_name(target) != Some("select") {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "select".into(),
                actual: self.describe(target),
            });
        }
        if self.is_disabled(target) {
            return Ok(None);
        }
        self.document.select_option(target, value)?;
        self.change_node(target)
    }

    /// Fires a change on the control without touching its value.
    pub fn change(&mut self, selector: &str) -> Result<Option<SessionReport>> {
        let target = self.select_control(selector)?;
        self.change_node(target)
    }

    fn change_node(&mut self, target: NodeId) -> Result<Option<SessionReport>> {
        let Some(field) = self.document.field(target) else {
            return Ok(None);
        };
        let form = self
            .document
            .owning_form(target)
            .and_then(|form| self.document.form(form));
        self.validator
            .change(&field, form.as_ref().map(|form| form as &dyn FormContext))
    }

    /// One pass over the control, outside any change or submit.
    pub fn validate(
        &mut self,
        selector: &str,
        mode: Option<ValidationMode>,
    ) -> Result<SessionReport> {
        let target = self.select_control(selector)?;
        let field = self
            .document
            .field(target)
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))?;
        self.validator.validate(&field, mode)
    }

    /// Submits the form, optionally through an activating control such as a
    /// submit button.
    pub fn submit(
        &mut self,
        form_selector: &str,
        submitter_selector: Option<&str>,
    ) -> Result<SubmitDecision> {
        let form_node = self.select_form(form_selector)?;
        let submitter = submitter_selector
            .map(|selector| self.select_one(selector))
            .transpose()?;

        let form = self
            .document
            .form(form_node)
            .ok_or_else(|| Error::SelectorNotFound(form_selector.to_string()))?;
        let submitter = submitter.and_then(|node| self.document.element_ref(node));
        self.validator.submit(
            &form,
            submitter
                .as_ref()
                .map(|element| element as &dyn AttributeSource),
        )
    }

    pub fn display_state(&self, selector: &str) -> Result<FieldDisplayState> {
        let target = self.select_control(selector)?;
        Ok(self
            .validator
            .display_state(&self.document.field_key(target)))
    }

    pub fn is_dirty(&self, form_selector: &str) -> Result<bool> {
        let form = self.select_form(form_selector)?;
        Ok(self.validator.is_dirty(&self.document.form_key(form)))
    }

    /// Text to confirm before navigating away, if any dirty form asks for it.
    pub fn leave_warning(&self) -> Option<String> {
        let forms: Vec<DocumentForm<'_>> = self
            .document
            .forms()
            .into_iter()
            .filter_map(|node| self.document.form(node))
            .collect();
        let forms: Vec<&dyn FormContext> = forms
            .iter()
            .map(|form| form as &dyn FormContext)
            .collect();
        self.validator.unload_warning(&forms)
    }

    pub fn set_attribute(&mut self, selector: &str, name: &str, value: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.document.set_attribute(target, name, value)
    }

    pub fn remove_attribute(&mut self, selector: &str, name: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.document.remove_attribute(target, name)
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.validator.take_trace_logs()
    }

    pub fn assert_display(&self, selector: &str, expected: FieldDisplayState) -> Result<()> {
        let actual = self.display_state(selector)?;
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }
        Ok(())
    }

    pub fn assert_value(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.document.value(target)?;
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
            });
        }
        Ok(())
    }

    pub fn assert_checked(&self, selector: &str, expected: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.document.checked(target)?;
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }
        Ok(())
    }
}
