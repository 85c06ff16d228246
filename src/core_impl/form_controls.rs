use super::dom::Element;
use super::*;
use crate::field::{AttributeSource, FieldContext, FieldKey, FieldKind, FormContext, FormKey};

fn input_type(element: &Element) -> Option<&str> {
    if !element.tag_name.eq_ignore_ascii_case("input") {
        return None;
    }
    Some(element.attrs.get("type").map(String::as_str).unwrap_or("text"))
}

pub(super) fn is_checkbox_or_radio_input(element: &Element) -> bool {
    input_type(element)
        .is_some_and(|kind| kind.eq_ignore_ascii_case("checkbox") || kind.eq_ignore_ascii_case("radio"))
}

pub(super) fn is_radio_input(dom: &Document, node_id: NodeId) -> bool {
    dom.element(node_id)
        .and_then(input_type)
        .is_some_and(|kind| kind.eq_ignore_ascii_case("radio"))
}

/// Button-like inputs submit or reset a form; they carry no value to check.
fn is_button_input(element: &Element) -> bool {
    input_type(element).is_some_and(|kind| {
        ["submit", "image", "reset", "button"]
            .iter()
            .any(|button| kind.eq_ignore_ascii_case(button))
    })
}

pub(super) fn field_kind(dom: &Document, node_id: NodeId) -> Option<FieldKind> {
    let element = dom.element(node_id)?;
    let tag = element.tag_name.as_str();
    if tag.eq_ignore_ascii_case("select") {
        return Some(FieldKind::Select);
    }
    if tag.eq_ignore_ascii_case("textarea") {
        return Some(FieldKind::TextArea);
    }
    let kind = input_type(element)?;
    if is_button_input(element) {
        None
    } else if kind.eq_ignore_ascii_case("checkbox") {
        Some(FieldKind::Checkbox)
    } else if kind.eq_ignore_ascii_case("radio") {
        Some(FieldKind::Radio)
    } else {
        Some(FieldKind::Text)
    }
}

/// Own `disabled` attribute, or a disabled ancestor fieldset unless the
/// control sits in that fieldset's first legend.
fn is_disabled_control(dom: &Document, node_id: NodeId) -> bool {
    if dom.attr(node_id, "disabled").is_some() {
        return true;
    }

    let mut cursor = dom.parent(node_id);
    let mut came_from = node_id;
    while let Some(ancestor) = cursor {
        let is_disabled_fieldset = dom
            .tag_name(ancestor)
            .is_some_and(|tag| tag.eq_ignore_ascii_case("fieldset"))
            && dom.attr(ancestor, "disabled").is_some();
        if is_disabled_fieldset {
            let first_legend = dom.children(ancestor).iter().copied().find(|child| {
                dom.tag_name(*child)
                    .is_some_and(|tag| tag.eq_ignore_ascii_case("legend"))
            });
            if first_legend != Some(came_from) {
                return true;
            }
        }
        came_from = ancestor;
        cursor = dom.parent(ancestor);
    }
    false
}

fn node_key(node_id: NodeId) -> String {
    format!("node:{}", node_id.index())
}

impl Document {
    /// A field view over `node_id`, if it is a validatable control.
    pub fn field(&self, node_id: NodeId) -> Option<DocumentField<'_>> {
        let kind = field_kind(self, node_id)?;
        Some(DocumentField {
            dom: self,
            node_id,
            kind,
        })
    }

    pub fn form(&self, node_id: NodeId) -> Option<DocumentForm<'_>> {
        self.tag_name(node_id)
            .is_some_and(|tag| tag.eq_ignore_ascii_case("form"))
            .then_some(DocumentForm { dom: self, node_id })
    }

    pub fn element_ref(&self, node_id: NodeId) -> Option<ElementRef<'_>> {
        self.element(node_id)
            .map(|_| ElementRef { dom: self, node_id })
    }

    /// Validatable controls under `form_node`, in document order.
    pub fn controls_of(&self, form_node: NodeId) -> Vec<NodeId> {
        self.descendants(form_node)
            .into_iter()
            .filter(|node| field_kind(self, *node).is_some())
            .collect()
    }

    pub fn field_key(&self, node_id: NodeId) -> FieldKey {
        FieldKey::new(node_key(node_id))
    }

    pub fn form_key(&self, node_id: NodeId) -> FormKey {
        FormKey::new(node_key(node_id))
    }
}

/// Attribute view over any element; used for submit buttons.
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    dom: &'a Document,
    node_id: NodeId,
}

impl ElementRef<'_> {
    pub fn node_id(&self) -> NodeId {
        self.node_id
    }
}

impl AttributeSource for ElementRef<'_> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.dom.attr(self.node_id, name).map(str::to_string)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DocumentField<'a> {
    dom: &'a Document,
    node_id: NodeId,
    kind: FieldKind,
}

impl DocumentField<'_> {
    pub fn node_id(&self) -> NodeId {
        self.node_id
    }
}

impl AttributeSource for DocumentField<'_> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.dom.attr(self.node_id, name).map(str::to_string)
    }
}

impl FieldContext for DocumentField<'_> {
    fn key(&self) -> FieldKey {
        self.dom.field_key(self.node_id)
    }

    fn kind(&self) -> FieldKind {
        self.kind
    }

    fn is_disabled(&self) -> bool {
        is_disabled_control(self.dom, self.node_id)
    }

    fn raw_value(&self) -> String {
        self.dom.value(self.node_id).unwrap_or_default()
    }

    fn is_checked(&self) -> bool {
        self.dom.checked(self.node_id).unwrap_or(false)
    }

    fn checked_group_value(&self) -> Option<String> {
        self.dom
            .radio_group(self.node_id)
            .into_iter()
            .find(|member| self.dom.checked(*member).unwrap_or(false))
            .and_then(|member| self.dom.value(member).ok())
    }

    fn lookup(&self, id: &str) -> Option<Box<dyn FieldContext + '_>> {
        let node_id = self.dom.element_by_id(id)?;
        let field = self.dom.field(node_id)?;
        Some(Box::new(field))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DocumentForm<'a> {
    dom: &'a Document,
    node_id: NodeId,
}

impl DocumentForm<'_> {
    pub fn node_id(&self) -> NodeId {
        self.node_id
    }
}

impl AttributeSource for DocumentForm<'_> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.dom.attr(self.node_id, name).map(str::to_string)
    }
}

impl FormContext for DocumentForm<'_> {
    fn key(&self) -> FormKey {
        self.dom.form_key(self.node_id)
    }

    fn controls(&self) -> Vec<Box<dyn FieldContext + '_>> {
        self.dom
            .controls_of(self.node_id)
            .into_iter()
            .filter_map(|node| self.dom.field(node))
            .map(|field| Box::new(field) as Box<dyn FieldContext + '_>)
            .collect()
    }
}
