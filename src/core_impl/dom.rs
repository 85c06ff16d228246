use super::form_controls::{is_checkbox_or_radio_input, is_radio_input};
use super::html::parse_html;
use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub(super) enum NodeType {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub(super) struct Node {
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
    pub(super) node_type: NodeType,
}

#[derive(Debug, Clone)]
pub(super) struct Element {
    pub(super) tag_name: String,
    pub(super) attrs: HashMap<String, String>,
    pub(super) value: String,
    pub(super) checked: bool,
}

/// In-memory element tree built from an HTML fragment.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    id_index: HashMap<String, NodeId>,
}

impl Document {
    pub fn from_html(html: &str) -> Result<Self> {
        parse_html(html)
    }

    pub(super) fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            node_type: NodeType::Document,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            id_index: HashMap::new(),
        }
    }

    fn create_node(&mut self, parent: Option<NodeId>, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            node_type,
        });
        if let Some(parent_id) = parent {
            self.nodes[parent_id.0].children.push(id);
        }
        id
    }

    pub(super) fn create_element(
        &mut self,
        parent: NodeId,
        tag_name: String,
        attrs: HashMap<String, String>,
    ) -> NodeId {
        let value = attrs.get("value").cloned().unwrap_or_default();
        let checked = attrs.contains_key("checked");
        let id_attr = attrs.get("id").cloned();
        let element = Element {
            tag_name,
            attrs,
            value,
            checked,
        };
        let id = self.create_node(Some(parent), NodeType::Element(element));
        if let Some(id_attr) = id_attr {
            self.id_index.entry(id_attr).or_insert(id);
        }
        id
    }

    pub(super) fn create_text(&mut self, parent: NodeId, text: String) -> NodeId {
        self.create_node(Some(parent), NodeType::Text(text))
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub(super) fn element(&self, node_id: NodeId) -> Option<&Element> {
        match &self.nodes.get(node_id.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(super) fn element_mut(&mut self, node_id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(node_id.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_or_err(&self, node_id: NodeId, what: &str) -> Result<&Element> {
        self.element(node_id)
            .ok_or_else(|| Error::TypeMismatch {
                selector: format!("node:{}", node_id.0),
                expected: what.to_string(),
                actual: "non-element node".into(),
            })
    }

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    pub fn tag_name(&self, node_id: NodeId) -> Option<&str> {
        self.element(node_id).map(|element| element.tag_name.as_str())
    }

    pub fn attr(&self, node_id: NodeId, name: &str) -> Option<&str> {
        self.element(node_id)
            .and_then(|element| element.attrs.get(name))
            .map(String::as_str)
    }

    pub fn set_attribute(&mut self, node_id: NodeId, name: &str, value: &str) -> Result<()> {
        let name = name.to_ascii_lowercase();
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::HtmlParse("attribute target is not an element".into()))?;
        let previous = element.attrs.insert(name.clone(), value.to_string());
        match name.as_str() {
            "id" => {
                if let Some(previous) = previous {
                    if self.id_index.get(&previous) == Some(&node_id) {
                        self.id_index.remove(&previous);
                    }
                }
                self.id_index.insert(value.to_string(), node_id);
            }
            "checked" => self.set_checked(node_id, true)?,
            _ => {}
        }
        Ok(())
    }

    pub fn remove_attribute(&mut self, node_id: NodeId, name: &str) -> Result<()> {
        let name = name.to_ascii_lowercase();
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::HtmlParse("attribute target is not an element".into()))?;
        let removed = element.attrs.remove(&name);
        if name == "id" {
            if let Some(removed) = removed {
                if self.id_index.get(&removed) == Some(&node_id) {
                    self.id_index.remove(&removed);
                }
            }
        }
        Ok(())
    }

    pub fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes.get(node_id.0)?.parent
    }

    pub fn children(&self, node_id: NodeId) -> &[NodeId] {
        self.nodes
            .get(node_id.0)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    pub fn find_ancestor_by_tag(&self, node_id: NodeId, tag: &str) -> Option<NodeId> {
        let mut cursor = self.parent(node_id);
        while let Some(current) = cursor {
            if self
                .tag_name(current)
                .is_some_and(|name| name.eq_ignore_ascii_case(tag))
            {
                return Some(current);
            }
            cursor = self.parent(current);
        }
        None
    }

    /// Element descendants of `node_id` in document order.
    pub fn descendants(&self, node_id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(node_id, &mut out);
        out
    }

    fn collect_descendants(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        for child in self.children(node_id) {
            if self.element(*child).is_some() {
                out.push(*child);
            }
            self.collect_descendants(*child, out);
        }
    }

    pub fn text_content(&self, node_id: NodeId) -> String {
        match self.nodes.get(node_id.0).map(|node| &node.node_type) {
            Some(NodeType::Text(text)) => text.clone(),
            Some(NodeType::Element(_) | NodeType::Document) => self
                .children(node_id)
                .iter()
                .map(|child| self.text_content(*child))
                .collect(),
            None => String::new(),
        }
    }

    pub fn value(&self, node_id: NodeId) -> Result<String> {
        let element = self.element_or_err(node_id, "form control")?;
        if element.tag_name.eq_ignore_ascii_case("select") {
            return Ok(self.select_value_from_options(node_id));
        }
        if is_checkbox_or_radio_input(element) && !element.attrs.contains_key("value") {
            return Ok("on".to_string());
        }
        Ok(element.value.clone())
    }

    pub fn set_value(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        if self
            .tag_name(node_id)
            .is_some_and(|tag| tag.eq_ignore_ascii_case("select"))
        {
            return self.select_option(node_id, value);
        }

        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::HtmlParse("value target is not an element".into()))?;
        if is_checkbox_or_radio_input(element) {
            element.attrs.insert("value".to_string(), value.to_string());
        }
        element.value = value.to_string();
        Ok(())
    }

    pub fn checked(&self, node_id: NodeId) -> Result<bool> {
        Ok(self.element_or_err(node_id, "checkable input")?.checked)
    }

    /// Checking a radio unchecks the other members of its group.
    pub fn set_checked(&mut self, node_id: NodeId, checked: bool) -> Result<()> {
        if checked && is_radio_input(self, node_id) {
            for member in self.radio_group(node_id) {
                if member != node_id {
                    if let Some(element) = self.element_mut(member) {
                        element.checked = false;
                    }
                }
            }
        }
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::HtmlParse("checked target is not an element".into()))?;
        element.checked = checked;
        Ok(())
    }

    /// Selects the first option whose value is `requested`. Unknown values
    /// leave the select with no selected option.
    pub fn select_option(&mut self, select_node: NodeId, requested: &str) -> Result<()> {
        if !self
            .tag_name(select_node)
            .is_some_and(|tag| tag.eq_ignore_ascii_case("select"))
        {
            return Err(Error::TypeMismatch {
                selector: format!("node:{}", select_node.0),
                expected: "select".into(),
                actual: self.tag_name(select_node).unwrap_or("non-element").into(),
            });
        }

        let options = self.select_options(select_node);
        let matched = options
            .iter()
            .copied()
            .find(|option| self.option_effective_value(*option) == requested);
        for option in options {
            if let Some(element) = self.element_mut(option) {
                if Some(option) == matched {
                    element
                        .attrs
                        .insert("selected".to_string(), "selected".to_string());
                } else {
                    element.attrs.remove("selected");
                }
            }
        }
        Ok(())
    }

    /// Value of the `selected` option, else the first option, else empty.
    fn select_value_from_options(&self, select_node: NodeId) -> String {
        let options = self.select_options(select_node);
        let Some(first) = options.first().copied() else {
            return String::new();
        };
        let selected = options
            .iter()
            .copied()
            .find(|option| self.attr(*option, "selected").is_some())
            .unwrap_or(first);
        self.option_effective_value(selected)
    }

    fn select_options(&self, select_node: NodeId) -> Vec<NodeId> {
        self.descendants(select_node)
            .into_iter()
            .filter(|node| {
                self.tag_name(*node)
                    .is_some_and(|tag| tag.eq_ignore_ascii_case("option"))
            })
            .collect()
    }

    fn option_effective_value(&self, option_node: NodeId) -> String {
        if let Some(value) = self.attr(option_node, "value") {
            return value.to_string();
        }
        self.text_content(option_node).trim().to_string()
    }

    /// Radios sharing `node_id`'s name within the same form (or outside any form).
    pub(super) fn radio_group(&self, node_id: NodeId) -> Vec<NodeId> {
        let Some(name) = self.attr(node_id, "name").filter(|name| !name.is_empty()) else {
            return vec![node_id];
        };
        let scope = self.find_ancestor_by_tag(node_id, "form");
        self.descendants(self.root)
            .into_iter()
            .filter(|candidate| {
                is_radio_input(self, *candidate)
                    && self.attr(*candidate, "name") == Some(name)
                    && self.find_ancestor_by_tag(*candidate, "form") == scope
            })
            .collect()
    }

    pub fn owning_form(&self, node_id: NodeId) -> Option<NodeId> {
        self.find_ancestor_by_tag(node_id, "form")
    }

    pub fn forms(&self) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|node| {
                self.tag_name(*node)
                    .is_some_and(|tag| tag.eq_ignore_ascii_case("form"))
            })
            .collect()
    }

    pub(super) fn initialize_form_control_values(&mut self) {
        for node in self.descendants(self.root) {
            let is_textarea = self
                .tag_name(node)
                .is_some_and(|tag| tag.eq_ignore_ascii_case("textarea"));
            if is_textarea {
                let text = self.text_content(node);
                if let Some(element) = self.element_mut(node) {
                    element.value = text;
                }
            }
        }
    }

    /// Keeps only the last checked radio of each group, as browsers do.
    pub(super) fn normalize_radio_groups(&mut self) -> Result<()> {
        for node in self.descendants(self.root).into_iter().rev() {
            if is_radio_input(self, node) && self.checked(node)? {
                self.set_checked(node, true)?;
            }
        }
        Ok(())
    }
}
