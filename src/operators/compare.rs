use super::OperatorHandler;
use crate::compare::{CompareOperator, compare_values};
use crate::field::FieldContext;
use crate::session::ValidationState;
use crate::value_resolver::resolve_operand;
use crate::{Error, Result};

/// `eq`, `neq`, `lt`, `lte`, `gt`, `gte` with a literal or `#id` target.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CompareHandler {
    operator: CompareOperator,
}

impl CompareHandler {
    pub(crate) fn new(operator: CompareOperator) -> Self {
        Self { operator }
    }
}

impl OperatorHandler for CompareHandler {
    fn evaluate(
        &self,
        field: &dyn FieldContext,
        state: &mut ValidationState,
        args: &[String],
    ) -> Result<()> {
        let Some(token) = args.first() else {
            return Err(Error::MissingOperand {
                operator: self.operator.as_str().to_string(),
            });
        };
        let target = resolve_operand(field, token);
        state.require(compare_values(self.operator, &field.value(), &target));
        Ok(())
    }
}
