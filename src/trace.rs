use std::collections::VecDeque;

use crate::config::TraceConfig;

#[derive(Debug)]
pub(crate) struct TraceState {
    pub(crate) enabled: bool,
    pub(crate) logs: VecDeque<String>,
    pub(crate) log_limit: usize,
}

impl TraceState {
    pub(crate) fn from_config(config: &TraceConfig) -> Self {
        Self {
            enabled: config.enabled,
            logs: VecDeque::new(),
            log_limit: config.log_limit.max(1),
        }
    }

    pub(crate) fn line(&mut self, line: String) {
        tracing::debug!(target: "form_validate", "{line}");
        if !self.enabled {
            return;
        }
        if self.logs.len() >= self.log_limit {
            self.logs.pop_front();
        }
        self.logs.push_back(line);
    }

    pub(crate) fn take(&mut self) -> Vec<String> {
        self.logs.drain(..).collect()
    }
}

impl Default for TraceState {
    fn default() -> Self {
        Self::from_config(&TraceConfig::default())
    }
}
