use crate::field::FieldContext;
use crate::session::ValidationOutcome;

/// Failure reported by an optional notification integration. Logged, never
/// allowed to change a validation result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("notification failed: {0}")]
pub struct NotifyError(pub String);

/// Receives `valid` / `invalid` notifications at the end of a pass.
pub trait ValidationObserver {
    fn on_valid(&mut self, _field: &dyn FieldContext) {}

    /// `message` is the field's error text or the configured default. Not
    /// called again while the field stays invalid.
    fn on_invalid(
        &mut self,
        field: &dyn FieldContext,
        outcome: &ValidationOutcome,
        message: &str,
    ) -> Result<(), NotifyError>;
}
