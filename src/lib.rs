//! Declarative field-validation rules for form controls.
//!
//! Every control carries a rule-spec such as `"required number:integer lt:100"`.
//! A [`Validator`] parses it on each pass, dispatches every rule to the handler
//! registered for its operator, stops at the first failure and records the
//! resulting [`FieldDisplayState`]. Forms are gated on submit by running a pass
//! over every control.
//!
//! ```
//! use form_validate::{FieldDisplayState, Page, Result};
//!
//! fn main() -> Result<()> {
//!     let mut page = Page::from_html(
//!         r#"<form id="f"><input id="age" data-validate="required number"></form>"#,
//!     )?;
//!     page.type_text("#age", "forty")?;
//!     page.assert_display("#age", FieldDisplayState::Invalid)?;
//!     page.type_text("#age", "40")?;
//!     page.assert_display("#age", FieldDisplayState::Valid)?;
//!     Ok(())
//! }
//! ```

mod compare;
mod config;
mod core_impl;
mod field;
mod field_state;
mod form;
mod js_number;
mod js_regex;
mod observer;
mod operators;
mod page;
mod rule_parser;
mod session;
mod trace;
mod unload_guard;
mod validator;
mod value_resolver;

pub use compare::{CompareOperator, Comparison, compare_values};
pub use config::{NumberFormat, TraceConfig, ValidatorConfig};
pub use core_impl::{Document, DocumentField, DocumentForm, ElementRef, NodeId};
pub use field::{AttributeSource, FieldContext, FieldKey, FieldKind, FormContext, FormKey};
pub use field_state::{FieldDisplayState, FieldStates};
pub use form::SubmitDecision;
pub use js_number::parse_js_number;
pub use observer::{NotifyError, ValidationObserver};
pub use operators::{OperatorHandler, OperatorRegistry, builtin_operator_names};
pub use page::Page;
pub use rule_parser::{RuleSpec, parse_rule_spec};
pub use session::{
    ExemptReason, SessionReport, ValidationMode, ValidationOutcome, ValidationState, Verdict,
};
pub use validator::Validator;
pub use value_resolver::{ResolvedValue, resolve_value};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("html parse error: {0}")]
    HtmlParse(String),
    #[error("invalid regexp pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
    #[error("invalid regexp modifiers: {0:?}")]
    InvalidModifiers(String),
    #[error("operator {operator} requires a comparison target")]
    MissingOperand { operator: String },
    #[error("selector not found: {0}")]
    SelectorNotFound(String),
    #[error("unsupported selector: {0}")]
    UnsupportedSelector(String),
    #[error("type mismatch for {selector}: expected {expected}, actual {actual}")]
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    #[error("assertion failed for {selector}: expected {expected}, actual {actual}")]
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
    },
}
