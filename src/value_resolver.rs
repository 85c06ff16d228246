use crate::field::{FieldContext, FieldKind};

/// Value of a field as the presence check sees it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedValue {
    /// Trimmed text. For radios this is the group's checked value.
    pub text: String,
    /// `Some` only for checkboxes.
    pub checked: Option<bool>,
    /// Trimmed placeholder, `None` when absent or blank.
    pub placeholder: Option<String>,
}

impl ResolvedValue {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() || self.checked == Some(false)
    }

    pub fn matches_placeholder(&self) -> bool {
        self.placeholder
            .as_deref()
            .is_some_and(|placeholder| placeholder == self.text)
    }
}

/// Resolves `reference` relative to `field`.
///
/// `#id` names another field; a missing field resolves to an empty value.
/// Anything else, including no reference at all, means `field` itself.
pub fn resolve_value(field: &dyn FieldContext, reference: Option<&str>) -> ResolvedValue {
    match reference.and_then(|token| token.strip_prefix('#')) {
        Some(id) => field
            .lookup(id)
            .map(|target| extract(target.as_ref()))
            .unwrap_or_default(),
        None => extract(field),
    }
}

/// Comparison target: the referenced field's trimmed value for `#id`,
/// otherwise the literal token.
pub(crate) fn resolve_operand(field: &dyn FieldContext, token: &str) -> String {
    match token.strip_prefix('#') {
        Some(id) => field
            .lookup(id)
            .map(|target| target.value())
            .unwrap_or_default(),
        None => token.to_string(),
    }
}

fn extract(field: &dyn FieldContext) -> ResolvedValue {
    let placeholder = field
        .placeholder()
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty());

    match field.kind() {
        FieldKind::Radio => ResolvedValue {
            text: field
                .checked_group_value()
                .map(|value| value.trim().to_string())
                .unwrap_or_default(),
            checked: None,
            placeholder,
        },
        FieldKind::Checkbox => ResolvedValue {
            text: field.value(),
            checked: Some(field.is_checked()),
            placeholder,
        },
        FieldKind::Text | FieldKind::Select | FieldKind::TextArea => ResolvedValue {
            text: field.value(),
            checked: None,
            placeholder,
        },
    }
}
