pub(crate) const DEFAULT_RULE_ATTRIBUTE: &str = "data-validate";
pub(crate) const DEFAULT_ERROR_TEXT_ATTRIBUTE: &str = "data-validate-error-text";
pub(crate) const DEFAULT_ERROR_TEXT: &str = "Value is invalid.";
pub(crate) const DEFAULT_OPT_OUT_ATTRIBUTE: &str = "novalidate";
pub(crate) const DEFAULT_SUBMITTER_OPT_OUT_ATTRIBUTE: &str = "formnovalidate";
pub(crate) const DEFAULT_LEAVE_DIRECTIVE: &str = "submitted";
pub(crate) const DEFAULT_LEAVE_WARNING: &str =
    "Any data changed in the forms may be lost if it was not submitted.";
pub(crate) const DEFAULT_TRACE_LOG_LIMIT: usize = 10_000;

/// Which spellings the `number` operator accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberFormat {
    /// Optional sign, digits, optional `.`/`,` fraction, optional exponent.
    /// `number:integer` accepts a non-negative exponent (`12e34`).
    #[default]
    AllowExponent,
    /// Optional sign, digits, optional `.`/`,` fraction. No exponent.
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceConfig {
    pub enabled: bool,
    pub log_limit: usize,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_limit: DEFAULT_TRACE_LOG_LIMIT,
        }
    }
}

/// Attribute names, default messages and policies used by a [`crate::Validator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Generic rule-spec attribute. Mode overrides are `<rule_attribute>-<mode>`.
    pub rule_attribute: String,
    pub error_text_attribute: String,
    /// Form attribute that turns validation off for the whole form.
    pub opt_out_attribute: String,
    /// Submit-control attribute that skips validation for that submission.
    pub submitter_opt_out_attribute: String,
    /// Notification text when a field has no error-text attribute.
    pub default_error_text: String,
    /// Token in a form's rule-spec attribute that asks for leave confirmation.
    pub leave_directive: String,
    pub default_leave_warning: String,
    pub number_format: NumberFormat,
    pub trace: TraceConfig,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            rule_attribute: DEFAULT_RULE_ATTRIBUTE.to_string(),
            error_text_attribute: DEFAULT_ERROR_TEXT_ATTRIBUTE.to_string(),
            opt_out_attribute: DEFAULT_OPT_OUT_ATTRIBUTE.to_string(),
            submitter_opt_out_attribute: DEFAULT_SUBMITTER_OPT_OUT_ATTRIBUTE.to_string(),
            default_error_text: DEFAULT_ERROR_TEXT.to_string(),
            leave_directive: DEFAULT_LEAVE_DIRECTIVE.to_string(),
            default_leave_warning: DEFAULT_LEAVE_WARNING.to_string(),
            number_format: NumberFormat::default(),
            trace: TraceConfig::default(),
        }
    }
}

impl ValidatorConfig {
    pub fn with_rule_attribute(mut self, name: impl Into<String>) -> Self {
        self.rule_attribute = name.into();
        self
    }

    pub fn with_error_text_attribute(mut self, name: impl Into<String>) -> Self {
        self.error_text_attribute = name.into();
        self
    }

    pub fn with_opt_out_attribute(mut self, name: impl Into<String>) -> Self {
        self.opt_out_attribute = name.into();
        self
    }

    pub fn with_submitter_opt_out_attribute(mut self, name: impl Into<String>) -> Self {
        self.submitter_opt_out_attribute = name.into();
        self
    }

    pub fn with_default_error_text(mut self, text: impl Into<String>) -> Self {
        self.default_error_text = text.into();
        self
    }

    pub fn with_leave_directive(mut self, directive: impl Into<String>) -> Self {
        self.leave_directive = directive.into();
        self
    }

    pub fn with_default_leave_warning(mut self, text: impl Into<String>) -> Self {
        self.default_leave_warning = text.into();
        self
    }

    pub fn with_number_format(mut self, format: NumberFormat) -> Self {
        self.number_format = format;
        self
    }

    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.trace.enabled = enabled;
        self
    }

    pub fn with_trace_log_limit(mut self, limit: usize) -> Self {
        self.trace.log_limit = limit.max(1);
        self
    }

    /// Attribute holding the rule-spec for `mode`, e.g. `data-validate-submit`.
    pub(crate) fn mode_rule_attribute(&self, mode: &str) -> String {
        format!("{}-{mode}", self.rule_attribute)
    }
}
