use super::OperatorHandler;
use crate::field::FieldContext;
use crate::js_regex::{RegexBuilder, RegexFlags};
use crate::session::ValidationState;
use crate::{Error, Result};

/// `regexp:<modifiers>:<pattern>`. Never enforces presence: an empty value or
/// an empty pattern passes. A pattern that does not compile is an error.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RegexpOperator;

impl OperatorHandler for RegexpOperator {
    fn evaluate(
        &self,
        field: &dyn FieldContext,
        state: &mut ValidationState,
        args: &[String],
    ) -> Result<()> {
        let modifiers = args.first().map(String::as_str).unwrap_or_default();
        let pattern = args.get(1).map(String::as_str).unwrap_or_default();
        let value = field.value();
        if value.is_empty() || pattern.is_empty() {
            return Ok(());
        }

        let flags = RegexFlags::parse(modifiers)
            .map_err(|err| Error::InvalidModifiers(format!("{modifiers}: {err}")))?;
        let invalid_pattern = |message: String| Error::InvalidPattern {
            pattern: pattern.to_string(),
            message,
        };
        let regex = RegexBuilder::new(pattern)
            .flags(flags)
            .build()
            .map_err(|err| invalid_pattern(err.to_string()))?;
        let matched = regex
            .is_match(&value)
            .map_err(|err| invalid_pattern(err.to_string()))?;
        state.require(matched);
        Ok(())
    }
}
