//! Operator registry and the built-in operators.
//!
//! Every operator, built-in or registered later, implements [`OperatorHandler`].
//! A handler may only fail the [`ValidationState`] it receives; returning
//! `Err` reports a broken rule-spec, not an invalid value.

use std::collections::HashMap;
use std::fmt;

use crate::Result;
use crate::compare::CompareOperator;
use crate::config::ValidatorConfig;
use crate::field::FieldContext;
use crate::session::ValidationState;

mod compare;
mod date;
mod number;
mod regexp;
mod required;

pub(crate) use compare::CompareHandler;
pub(crate) use date::DateOperator;
pub(crate) use number::NumberOperator;
pub(crate) use regexp::RegexpOperator;
pub(crate) use required::RequiredOperator;

const BUILTIN_OPERATOR_NAMES: [&str; 10] = [
    "required", "date", "number", "regexp", "eq", "neq", "lt", "lte", "gt", "gte",
];

pub fn builtin_operator_names() -> &'static [&'static str] {
    &BUILTIN_OPERATOR_NAMES
}

pub trait OperatorHandler {
    fn evaluate(
        &self,
        field: &dyn FieldContext,
        state: &mut ValidationState,
        args: &[String],
    ) -> Result<()>;
}

struct FnHandler<F>(F);

impl<F> OperatorHandler for FnHandler<F>
where
    F: Fn(&dyn FieldContext, &mut ValidationState, &[String]) -> Result<()>,
{
    fn evaluate(
        &self,
        field: &dyn FieldContext,
        state: &mut ValidationState,
        args: &[String],
    ) -> Result<()> {
        (self.0)(field, state, args)
    }
}

/// Maps operator names to handlers. Unknown names dispatch to nothing.
#[derive(Default)]
pub struct OperatorRegistry {
    handlers: HashMap<String, Box<dyn OperatorHandler>>,
}

impl OperatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins(config: &ValidatorConfig) -> Self {
        let mut registry = Self::new();
        registry.register("required", RequiredOperator);
        registry.register("date", DateOperator);
        registry.register("number", NumberOperator::new(config.number_format));
        registry.register("regexp", RegexpOperator);
        for operator in CompareOperator::ALL {
            registry.register(operator.as_str(), CompareHandler::new(operator));
        }
        registry
    }

    /// Installs `handler` under `name`, returning the handler it replaced.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: impl OperatorHandler + 'static,
    ) -> Option<Box<dyn OperatorHandler>> {
        self.handlers.insert(name.into(), Box::new(handler))
    }

    pub fn register_fn<F>(
        &mut self,
        name: impl Into<String>,
        handler: F,
    ) -> Option<Box<dyn OperatorHandler>>
    where
        F: Fn(&dyn FieldContext, &mut ValidationState, &[String]) -> Result<()> + 'static,
    {
        self.register(name, FnHandler(handler))
    }

    pub fn unregister(&mut self, name: &str) -> Option<Box<dyn OperatorHandler>> {
        self.handlers.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&dyn OperatorHandler> {
        self.handlers.get(name).map(Box::as_ref)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names = self.handlers.keys().map(String::as_str).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    /// Runs the handler for `operator`, if any. Returns whether one was found.
    pub(crate) fn dispatch(
        &self,
        operator: &str,
        field: &dyn FieldContext,
        state: &mut ValidationState,
        args: &[String],
    ) -> Result<bool> {
        let Some(handler) = self.handlers.get(operator) else {
            return Ok(false);
        };
        handler.evaluate(field, state, args)?;
        Ok(true)
    }
}

impl fmt::Debug for OperatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorRegistry")
            .field("operators", &self.names())
            .finish()
    }
}
