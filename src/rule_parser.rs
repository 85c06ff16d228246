/// One `operator:arg:arg` token of a rule-spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    pub operator: String,
    pub args: Vec<String>,
}

impl RuleSpec {
    pub fn new(operator: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            operator: operator.into(),
            args,
        }
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

/// Splits a rule-spec on whitespace, then every token on `:`.
///
/// Tokens without an operator name (`":x"`) are dropped. Empty arguments are
/// kept so positional arguments stay positional (`regexp::^a$`).
pub fn parse_rule_spec(src: &str) -> Vec<RuleSpec> {
    src.split_whitespace()
        .filter_map(|token| {
            let mut parts = token.split(':');
            let operator = parts.next().unwrap_or_default();
            if operator.is_empty() {
                return None;
            }
            Some(RuleSpec {
                operator: operator.to_string(),
                args: parts.map(str::to_string).collect(),
            })
        })
        .collect()
}
