//! # Document Model
//!
//! A small arena-backed element tree. Nodes are addressed by [`NodeId`];
//! removed nodes keep their slot but are no longer reachable from the body.
//!
//! ```text
//! Document
//! └── body (connected)
//!     ├── button#menu_1
//!     └── ul.mdl-menu[for=menu_1]   ← inserted after the button
//!         ├── li.mdl-menu__item
//!         └── li.mdl-menu__item
//! ```

use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    UnknownNode(NodeId),
    /// `insert_after` needs a reference node that has a parent.
    Orphan(NodeId),
    /// The insertion would make a node its own ancestor.
    Cycle(NodeId),
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::UnknownNode(id) => write!(f, "unknown node {:?}", id),
            DomError::Orphan(id) => write!(f, "node {:?} has no parent", id),
            DomError::Cycle(id) => write!(f, "node {:?} cannot contain itself", id),
        }
    }
}

impl std::error::Error for DomError {}

pub struct Document {
    nodes: Vec<Element>,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Element {
                tag: "body".to_string(),
                ..Default::default()
            }],
            body: NodeId(0),
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Element {
            tag: tag.to_string(),
            ..Default::default()
        });
        id
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0)
    }

    pub fn element_mut(&mut self, node: NodeId) -> Result<&mut Element, DomError> {
        self.nodes.get_mut(node.0).ok_or(DomError::UnknownNode(node))
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.element(node).and_then(|e| e.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.element(node).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    /// True when `node` is reachable from the body.
    pub fn is_connected(&self, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == self.body {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_insert(parent, child)?;
        self.detach(child);
        self.element_mut(child)?.parent = Some(parent);
        self.element_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Place `node` immediately after `reference` under the same parent.
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) -> Result<(), DomError> {
        let parent = self
            .element(reference)
            .ok_or(DomError::UnknownNode(reference))?
            .parent
            .ok_or(DomError::Orphan(reference))?;
        self.check_insert(parent, node)?;
        self.detach(node);
        // Position is looked up after detaching, which may shift siblings.
        let siblings = &mut self.element_mut(parent)?.children;
        let position = siblings
            .iter()
            .position(|&sibling| sibling == reference)
            .map_or(siblings.len(), |index| index + 1);
        siblings.insert(position, node);
        self.element_mut(node)?.parent = Some(parent);
        Ok(())
    }

    /// Detach `node` (and its subtree) from the tree.
    pub fn remove(&mut self, node: NodeId) -> Result<(), DomError> {
        self.element(node).ok_or(DomError::UnknownNode(node))?;
        self.detach(node);
        Ok(())
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.element_mut(node)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)
            .and_then(|e| e.attributes.get(name))
            .map(String::as_str)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) -> Result<(), DomError> {
        let element = self.element_mut(node)?;
        if !element.classes.iter().any(|c| c == class) {
            element.classes.push(class.to_string());
        }
        Ok(())
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) -> Result<(), DomError> {
        self.element_mut(node)?.text = Some(text.to_string());
        Ok(())
    }

    /// `node` and every node below it, depth first.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            found.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        found
    }

    /// Serialized markup of `node` and its subtree.
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(element) = self.element(node) else {
            return;
        };
        out.push('<');
        out.push_str(&element.tag);
        if !element.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape(&element.classes.join(" "))));
        }
        for (name, value) in &element.attributes {
            out.push_str(&format!(" {}=\"{}\"", name, escape(value)));
        }
        out.push('>');
        if let Some(text) = &element.text {
            out.push_str(&escape(text));
        }
        for &child in &element.children {
            self.write_html(child, out);
        }
        out.push_str(&format!("</{}>", element.tag));
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.element(parent).ok_or(DomError::UnknownNode(parent))?;
        self.element(child).ok_or(DomError::UnknownNode(child))?;
        let mut cursor = Some(parent);
        while let Some(current) = cursor {
            if current == child {
                return Err(DomError::Cycle(child));
            }
            cursor = self.parent(current);
        }
        Ok(())
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        if let Some(element) = self.nodes.get_mut(parent.0) {
            element.children.retain(|&c| c != node);
        }
        if let Some(element) = self.nodes.get_mut(node.0) {
            element.parent = None;
        }
    }
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
