use std::collections::HashSet;
use std::fmt;

use crate::Result;
use crate::config::ValidatorConfig;
use crate::field::{FieldContext, FieldKey, FormKey};
use crate::field_state::{FieldDisplayState, FieldStates};
use crate::observer::ValidationObserver;
use crate::operators::{OperatorHandler, OperatorRegistry};
use crate::session::ValidationState;
use crate::trace::TraceState;

/// Owns everything a pass needs: operators, display states, dirty flags,
/// observers and the trace log.
pub struct Validator {
    pub(crate) config: ValidatorConfig,
    pub(crate) registry: OperatorRegistry,
    pub(crate) field_states: FieldStates,
    pub(crate) dirty_forms: HashSet<FormKey>,
    pub(crate) observers: Vec<Box<dyn ValidationObserver>>,
    pub(crate) trace: TraceState,
}

impl Validator {
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        let registry = OperatorRegistry::with_builtins(&config);
        let trace = TraceState::from_config(&config.trace);
        Self {
            config,
            registry,
            field_states: FieldStates::default(),
            dirty_forms: HashSet::new(),
            observers: Vec::new(),
            trace,
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn registry(&self) -> &OperatorRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut OperatorRegistry {
        &mut self.registry
    }

    pub fn register_operator(
        &mut self,
        name: impl Into<String>,
        handler: impl OperatorHandler + 'static,
    ) -> Option<Box<dyn OperatorHandler>> {
        self.registry.register(name, handler)
    }

    pub fn register_fn<F>(
        &mut self,
        name: impl Into<String>,
        handler: F,
    ) -> Option<Box<dyn OperatorHandler>>
    where
        F: Fn(&dyn FieldContext, &mut ValidationState, &[String]) -> Result<()> + 'static,
    {
        self.registry.register_fn(name, handler)
    }

    pub fn unregister_operator(&mut self, name: &str) -> Option<Box<dyn OperatorHandler>> {
        self.registry.unregister(name)
    }

    pub fn add_observer(&mut self, observer: impl ValidationObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn display_state(&self, key: &FieldKey) -> FieldDisplayState {
        self.field_states.get(key)
    }

    pub fn field_states(&self) -> &FieldStates {
        &self.field_states
    }

    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace.enabled = enabled;
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.trace.take()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("field_states", &self.field_states)
            .field("dirty_forms", &self.dirty_forms)
            .field("observers", &self.observers.len())
            .finish()
    }
}
