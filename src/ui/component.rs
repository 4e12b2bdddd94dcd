use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::dom::{Document, DomError, NodeId};

/// A fresh widget id such as `menu_3f2a...`.
pub fn generate_id(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}

/// A UI component rooted at a single node of a [`Document`].
///
/// # Attachment
///
/// `on_added_to_document` is called by whoever owns the document once the
/// widget's root node is connected. Implementations are not required to be
/// idempotent; the caller fires it once per attachment.
pub trait Widget {
    fn id(&self) -> &str;

    fn dom_node(&self) -> NodeId;

    /// Must not propagate failures: a widget that cannot finish rendering
    /// stays incomplete, the page keeps running.
    fn on_added_to_document(&mut self, document: &mut Document);
}

/// Declarative description of a child widget. Not modified after it is
/// handed to a parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildDescriptor {
    pub name: String,
    #[serde(default)]
    pub config: Value,
}

impl ChildDescriptor {
    pub fn new(name: impl Into<String>, config: Value) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }
}

/// Creates child widgets from descriptors and inserts them into `target`.
/// Returns once every child exists.
pub trait ChildMaterializer {
    fn create_children(
        &self,
        document: &mut Document,
        widgets: &[ChildDescriptor],
        target: NodeId,
    ) -> Result<Vec<NodeId>, WidgetError>;
}

/// Attaches extra visual behaviour to a subtree that already exists.
pub trait EnhancementHook {
    fn upgrade_element(&self, document: &mut Document, node: NodeId) -> Result<(), WidgetError>;
}

impl<F> EnhancementHook for F
where
    F: Fn(&mut Document, NodeId) -> Result<(), WidgetError>,
{
    fn upgrade_element(&self, document: &mut Document, node: NodeId) -> Result<(), WidgetError> {
        self(document, node)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetError {
    /// A collaborator was not supplied. Handled as a skipped step.
    MissingCollaborator(&'static str),
    UnknownWidgetType(String),
    InvalidWidgetConfig { name: String, message: String },
    Dom(DomError),
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetError::MissingCollaborator(what) => write!(f, "no {what} available"),
            WidgetError::UnknownWidgetType(name) => write!(f, "unknown widget type \"{name}\""),
            WidgetError::InvalidWidgetConfig { name, message } => {
                write!(f, "invalid config for {name}: {message}")
            }
            WidgetError::Dom(e) => write!(f, "document error: {e}"),
        }
    }
}

impl std::error::Error for WidgetError {}

impl From<DomError> for WidgetError {
    fn from(e: DomError) -> Self {
        WidgetError::Dom(e)
    }
}
