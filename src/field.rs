use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Checkbox,
    Radio,
    Select,
    TextArea,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Select => "select",
            Self::TextArea => "textarea",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identity of a field across passes. Display states are stored under it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldKey(String);

impl FieldKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormKey(String);

impl FormKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FormKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Declarative attributes of a control or form.
pub trait AttributeSource {
    fn attribute(&self, name: &str) -> Option<String>;

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
}

/// A validatable control as seen by operator handlers.
pub trait FieldContext: AttributeSource {
    fn key(&self) -> FieldKey;

    fn kind(&self) -> FieldKind;

    /// True when the control or one of its ancestors disables it.
    fn is_disabled(&self) -> bool;

    /// Current value, untrimmed. Checkboxes and radios report their `value`.
    fn raw_value(&self) -> String;

    fn value(&self) -> String {
        self.raw_value().trim().to_string()
    }

    fn is_checked(&self) -> bool;

    fn placeholder(&self) -> Option<String> {
        self.attribute("placeholder")
    }

    /// Value of the checked member of this control's radio group.
    fn checked_group_value(&self) -> Option<String>;

    /// Sibling control with the given identifier (no leading `#`).
    fn lookup(&self, id: &str) -> Option<Box<dyn FieldContext + '_>>;
}

/// A form whose controls are validated together on submit.
pub trait FormContext: AttributeSource {
    fn key(&self) -> FormKey;

    /// Validatable controls in document order.
    fn controls(&self) -> Vec<Box<dyn FieldContext + '_>>;
}
