use std::cmp::Ordering;
use std::fmt;

use crate::js_number::parse_js_number;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOperator {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CompareOperator {
    pub const ALL: [Self; 6] = [Self::Eq, Self::Neq, Self::Lt, Self::Lte, Self::Gt, Self::Gte];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "eq" => Some(Self::Eq),
            "neq" => Some(Self::Neq),
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Gte => "gte",
        }
    }

    fn accepts(self, ordering: Option<Ordering>) -> bool {
        let Some(ordering) = ordering else {
            return false;
        };
        match self {
            Self::Eq => ordering == Ordering::Equal,
            Self::Neq => ordering != Ordering::Equal,
            Self::Lt => ordering == Ordering::Less,
            Self::Lte => ordering != Ordering::Greater,
            Self::Gt => ordering == Ordering::Greater,
            Self::Gte => ordering != Ordering::Less,
        }
    }
}

impl fmt::Display for CompareOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two sides of a comparison after coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    /// Current value is empty; comparison rules do not constrain it.
    Skipped,
    Numeric { current: f64, target: f64 },
    /// Current value is text, target is a number: the text's length is compared.
    Length { length: usize, target: f64 },
    Text { current: String, target: String },
}

impl Comparison {
    /// `current` is expected trimmed; `target` is the resolved operand.
    pub fn coerce(current: &str, target: &str) -> Self {
        if current.is_empty() {
            return Self::Skipped;
        }

        let current_number = parse_js_number(current);
        let target_number = parse_js_number(target);
        match (current_number.is_nan(), target_number.is_nan()) {
            (false, false) => Self::Numeric {
                current: current_number,
                target: target_number,
            },
            (true, false) => Self::Length {
                length: current.chars().count(),
                target: target_number,
            },
            _ => Self::Text {
                current: current.to_string(),
                target: target.to_string(),
            },
        }
    }

    pub fn holds(&self, operator: CompareOperator) -> bool {
        let ordering = match self {
            Self::Skipped => return true,
            Self::Numeric { current, target } => current.partial_cmp(target),
            Self::Length { length, target } => (*length as f64).partial_cmp(target),
            // UTF-16 code units, so astral characters sort below U+E000..=U+FFFF.
            Self::Text { current, target } => {
                Some(current.encode_utf16().cmp(target.encode_utf16()))
            }
        };
        operator.accepts(ordering)
    }
}

/// Evaluates `current <operator> target` with the coercion rules of [`Comparison`].
pub fn compare_values(operator: CompareOperator, current: &str, target: &str) -> bool {
    Comparison::coerce(current.trim(), target).holds(operator)
}
