use crate::field::FormContext;
use crate::validator::Validator;

impl Validator {
    /// Warning to show before leaving the page, if any dirty form asked for one.
    ///
    /// Forms opt in with the leave directive in their rule-spec attribute.
    /// Each contributes its error text; forms without one share the default
    /// warning, which comes first.
    pub fn unload_warning(&self, forms: &[&dyn FormContext]) -> Option<String> {
        let mut custom = String::new();
        let mut needs_default = false;

        for form in forms {
            if !self.is_dirty(&form.key()) || self.opts_out(*form) || !self.wants_leave_guard(*form)
            {
                continue;
            }
            match form
                .attribute(&self.config.error_text_attribute)
                .filter(|text| !text.is_empty())
            {
                Some(text) => {
                    custom.push_str(&text);
                    custom.push('\n');
                }
                None => needs_default = true,
            }
        }

        let mut warning = String::new();
        if needs_default {
            warning.push_str(&self.config.default_leave_warning);
            warning.push('\n');
        }
        warning.push_str(&custom);
        if warning.is_empty() {
            None
        } else {
            Some(warning)
        }
    }

    fn wants_leave_guard(&self, form: &dyn FormContext) -> bool {
        form.attribute(&self.config.rule_attribute)
            .is_some_and(|spec| {
                spec.split_whitespace()
                    .any(|token| token == self.config.leave_directive)
            })
    }
}
