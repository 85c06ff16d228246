use crate::Result;
use crate::field::{AttributeSource, FieldContext, FieldKey, FormContext, FormKey};
use crate::field_state::FieldDisplayState;
use crate::session::{SessionReport, ValidationMode};
use crate::validator::Validator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    Proceed,
    /// Enabled controls left invalid, in document order.
    Cancel { invalid: Vec<FieldKey> },
}

impl SubmitDecision {
    pub fn is_proceed(&self) -> bool {
        matches!(self, Self::Proceed)
    }
}

impl Validator {
    /// Handles a submit attempt on `form`, activated by `submitter`.
    ///
    /// Every control is validated, failures included. Configuration errors do
    /// not stop the pass; the first one is returned once all controls ran and
    /// the form stays dirty.
    pub fn submit(
        &mut self,
        form: &dyn FormContext,
        submitter: Option<&dyn AttributeSource>,
    ) -> Result<SubmitDecision> {
        let form_key = form.key();
        let controls = form.controls();

        let submitter_opted_out = submitter
            .is_some_and(|control| control.has_attribute(&self.config.submitter_opt_out_attribute));
        if self.opts_out(form) || submitter_opted_out {
            for control in &controls {
                self.field_states.clear(&control.key());
            }
            self.trace.line(format!(
                "[submit] {form_key} opted out controls={}",
                controls.len()
            ));
            return Ok(SubmitDecision::Proceed);
        }

        let mut first_error = None;
        for control in &controls {
            if let Err(err) = self.validate(control.as_ref(), Some(ValidationMode::Submit)) {
                first_error.get_or_insert(err);
            }
        }
        if let Some(err) = first_error {
            self.trace
                .line(format!("[submit] {form_key} aborted: configuration error"));
            return Err(err);
        }

        let invalid = controls
            .iter()
            .filter(|control| !control.is_disabled())
            .map(|control| control.key())
            .filter(|key| self.field_states.get(key) == FieldDisplayState::Invalid)
            .collect::<Vec<_>>();

        if invalid.is_empty() {
            self.dirty_forms.remove(&form_key);
            self.trace.line(format!("[submit] {form_key} proceed"));
            Ok(SubmitDecision::Proceed)
        } else {
            self.trace
                .line(format!("[submit] {form_key} cancel invalid={}", invalid.len()));
            Ok(SubmitDecision::Cancel { invalid })
        }
    }

    /// Handles a change of `field`, owned by `form` when it sits in one.
    ///
    /// Returns `None` when the owning form opted out of validation.
    pub fn change(
        &mut self,
        field: &dyn FieldContext,
        form: Option<&dyn FormContext>,
    ) -> Result<Option<SessionReport>> {
        if form.is_some_and(|form| self.opts_out(form)) {
            return Ok(None);
        }

        let report = self.validate(field, Some(ValidationMode::Change))?;
        if let Some(form) = form {
            let form_key = form.key();
            self.trace.line(format!("[change] {form_key} dirty"));
            self.dirty_forms.insert(form_key);
        }
        Ok(Some(report))
    }

    pub fn is_dirty(&self, form: &FormKey) -> bool {
        self.dirty_forms.contains(form)
    }

    pub fn mark_clean(&mut self, form: &FormKey) {
        self.dirty_forms.remove(form);
    }

    pub(crate) fn opts_out(&self, form: &dyn FormContext) -> bool {
        form.has_attribute(&self.config.opt_out_attribute)
    }
}
