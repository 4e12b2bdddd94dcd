//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::{Cell, RefCell};

use crate::ui::component::{ChildDescriptor, ChildMaterializer, EnhancementHook, WidgetError};
use crate::ui::dom::{Document, NodeId};

/// Builds one `li` per descriptor and remembers every call.
#[derive(Default)]
pub struct RecordingMaterializer {
    calls: Cell<usize>,
    targets: RefCell<Vec<NodeId>>,
}

impl RecordingMaterializer {
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn targets(&self) -> Vec<NodeId> {
        self.targets.borrow().clone()
    }
}

impl ChildMaterializer for RecordingMaterializer {
    fn create_children(
        &self,
        document: &mut Document,
        widgets: &[ChildDescriptor],
        target: NodeId,
    ) -> Result<Vec<NodeId>, WidgetError> {
        self.calls.set(self.calls.get() + 1);
        self.targets.borrow_mut().push(target);
        widgets
            .iter()
            .map(|descriptor| -> Result<NodeId, WidgetError> {
                let node = document.create_element("li");
                document.set_text(node, &descriptor.name)?;
                document.append_child(target, node)?;
                Ok(node)
            })
            .collect()
    }
}

/// Always fails, as a registry does for an unknown widget type.
pub struct FailingMaterializer;

impl ChildMaterializer for FailingMaterializer {
    fn create_children(
        &self,
        _document: &mut Document,
        _widgets: &[ChildDescriptor],
        _target: NodeId,
    ) -> Result<Vec<NodeId>, WidgetError> {
        Err(WidgetError::UnknownWidgetType("Broken".to_string()))
    }
}

/// Remembers which nodes it was asked to upgrade.
#[derive(Default)]
pub struct RecordingHook {
    upgraded: RefCell<Vec<NodeId>>,
}

impl RecordingHook {
    pub fn upgraded(&self) -> Vec<NodeId> {
        self.upgraded.borrow().clone()
    }
}

impl EnhancementHook for RecordingHook {
    fn upgrade_element(&self, _document: &mut Document, node: NodeId) -> Result<(), WidgetError> {
        self.upgraded.borrow_mut().push(node);
        Ok(())
    }
}
