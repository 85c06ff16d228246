use std::collections::HashMap;
use std::fmt;

use crate::field::FieldKey;

/// What a field last displayed. Survives between passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldDisplayState {
    #[default]
    Neutral,
    Valid,
    Invalid,
}

impl FieldDisplayState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Valid => "valid",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for FieldDisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display state per field. Fields never validated are neutral.
#[derive(Debug, Clone, Default)]
pub struct FieldStates {
    states: HashMap<FieldKey, FieldDisplayState>,
}

impl FieldStates {
    pub fn get(&self, key: &FieldKey) -> FieldDisplayState {
        self.states.get(key).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn invalid_keys(&self) -> Vec<&FieldKey> {
        let mut keys = self
            .states
            .iter()
            .filter(|(_, state)| **state == FieldDisplayState::Invalid)
            .map(|(key, _)| key)
            .collect::<Vec<_>>();
        keys.sort();
        keys
    }

    /// Stores `state` and returns the one it replaced.
    pub(crate) fn set(&mut self, key: FieldKey, state: FieldDisplayState) -> FieldDisplayState {
        let previous = if state == FieldDisplayState::Neutral {
            self.states.remove(&key)
        } else {
            self.states.insert(key, state)
        };
        previous.unwrap_or_default()
    }

    pub(crate) fn clear(&mut self, key: &FieldKey) {
        self.states.remove(key);
    }
}
