use std::fmt;

use crate::Result;
use crate::field::{FieldContext, FieldKey};
use crate::field_state::FieldDisplayState;
use crate::observer::NotifyError;
use crate::rule_parser::parse_rule_spec;
use crate::validator::Validator;

/// What triggered a pass. Selects the `<rule attribute>-<mode>` override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationMode {
    Change,
    Submit,
}

impl ValidationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Change => "change",
            Self::Submit => "submit",
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pass-scoped result slot handed to every operator.
///
/// Starts valid. Handlers can only fail it, so a failure recorded by one rule
/// cannot be undone by another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationState {
    mode: Option<ValidationMode>,
    valid: bool,
}

impl ValidationState {
    pub fn new(mode: Option<ValidationMode>) -> Self {
        Self { mode, valid: true }
    }

    pub fn mode(&self) -> Option<ValidationMode> {
        self.mode
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn fail(&mut self) {
        self.valid = false;
    }

    /// Fails the state unless `condition` holds.
    pub fn require(&mut self, condition: bool) {
        if !condition {
            self.fail();
        }
    }
}

/// The rule that failed a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub rule_index: usize,
    pub operator: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExemptReason {
    Disabled,
    NoRules,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Failed,
    Exempt(ExemptReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub verdict: Verdict,
    /// Set whenever the pass failed, even if the notification was suppressed.
    pub outcome: Option<ValidationOutcome>,
    /// Whether observers were told about this pass.
    pub notified: bool,
}

impl SessionReport {
    fn exempt(reason: ExemptReason) -> Self {
        Self {
            verdict: Verdict::Exempt(reason),
            outcome: None,
            notified: false,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.verdict != Verdict::Failed
    }
}

impl Validator {
    /// Runs one pass over `field`.
    ///
    /// Rules run in declaration order and stop at the first failure. An
    /// `Err` means the rule-spec itself is broken; the field's display state
    /// is left as it was.
    pub fn validate(
        &mut self,
        field: &dyn FieldContext,
        mode: Option<ValidationMode>,
    ) -> Result<SessionReport> {
        let key = field.key();
        let mode_label = mode.map(ValidationMode::as_str).unwrap_or("none");

        if field.is_disabled() {
            self.field_states.set(key.clone(), FieldDisplayState::Neutral);
            self.trace
                .line(format!("[validate] {key} mode={mode_label} exempt=disabled"));
            return Ok(SessionReport::exempt(ExemptReason::Disabled));
        }

        let Some(rule_spec) = self.effective_rule_spec(field, mode) else {
            self.trace
                .line(format!("[validate] {key} mode={mode_label} exempt=no-rules"));
            return Ok(SessionReport::exempt(ExemptReason::NoRules));
        };

        let rules = parse_rule_spec(&rule_spec);
        let mut state = ValidationState::new(mode);
        let mut failure = None;
        for (rule_index, rule) in rules.iter().enumerate() {
            let handled = match self
                .registry
                .dispatch(&rule.operator, field, &mut state, &rule.args)
            {
                Ok(handled) => handled,
                Err(err) => {
                    self.trace.line(format!(
                        "[validate] {key} rule={rule_index} operator={} error={err}",
                        rule.operator
                    ));
                    return Err(err);
                }
            };
            if !handled {
                self.trace.line(format!(
                    "[validate] {key} rule={rule_index} operator={} unregistered",
                    rule.operator
                ));
            }
            if !state.is_valid() {
                failure = Some(ValidationOutcome {
                    rule_index,
                    operator: rule.operator.clone(),
                    args: rule.args.clone(),
                });
                break;
            }
        }

        let report = match failure {
            Some(outcome) => self.record_failure(field, key, outcome),
            None => self.record_success(field, key),
        };
        Ok(report)
    }

    /// Mode override when present and non-empty, else the generic attribute.
    /// A spec holding only whitespace counts as present and yields no rules.
    fn effective_rule_spec(
        &self,
        field: &dyn FieldContext,
        mode: Option<ValidationMode>,
    ) -> Option<String> {
        let non_empty = |value: Option<String>| value.filter(|text| !text.is_empty());
        mode.and_then(|mode| {
            non_empty(field.attribute(&self.config.mode_rule_attribute(mode.as_str())))
        })
        .or_else(|| non_empty(field.attribute(&self.config.rule_attribute)))
    }

    fn record_failure(
        &mut self,
        field: &dyn FieldContext,
        key: FieldKey,
        outcome: ValidationOutcome,
    ) -> SessionReport {
        let previous = self
            .field_states
            .set(key.clone(), FieldDisplayState::Invalid);
        let notified = previous != FieldDisplayState::Invalid;
        self.trace.line(format!(
            "[validate] {key} invalid rule={} operator={} notified={notified}",
            outcome.rule_index, outcome.operator
        ));

        if notified {
            let message = field
                .attribute(&self.config.error_text_attribute)
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| self.config.default_error_text.clone());
            let mut failures: Vec<NotifyError> = Vec::new();
            for observer in &mut self.observers {
                if let Err(err) = observer.on_invalid(field, &outcome, &message) {
                    failures.push(err);
                }
            }
            for err in failures {
                tracing::warn!(target: "form_validate", field = %key, "{err}");
                self.trace.line(format!("[notify] {key} ignored: {err}"));
            }
        }

        SessionReport {
            verdict: Verdict::Failed,
            outcome: Some(outcome),
            notified,
        }
    }

    fn record_success(&mut self, field: &dyn FieldContext, key: FieldKey) -> SessionReport {
        self.field_states.set(key.clone(), FieldDisplayState::Valid);
        self.trace.line(format!("[validate] {key} valid"));
        for observer in &mut self.observers {
            observer.on_valid(field);
        }
        SessionReport {
            verdict: Verdict::Passed,
            outcome: None,
            notified: true,
        }
    }
}
