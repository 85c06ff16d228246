use super::OperatorHandler;
use crate::Result;
use crate::field::FieldContext;
use crate::session::ValidationState;
use crate::value_resolver::resolve_value;

/// `required[:#target]`: the (target) value must be present, checked, and
/// different from its placeholder.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RequiredOperator;

impl OperatorHandler for RequiredOperator {
    fn evaluate(
        &self,
        field: &dyn FieldContext,
        state: &mut ValidationState,
        args: &[String],
    ) -> Result<()> {
        let reference = args
            .first()
            .map(String::as_str)
            .filter(|token| !token.is_empty());
        let value = resolve_value(field, reference);
        state.require(!value.is_empty() && !value.matches_placeholder());
        Ok(())
    }
}
