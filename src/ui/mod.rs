//! # UI Layer
//!
//! Documents, widgets and the attachment lifecycle.
//!
//! The pieces a widget depends on are traits in [`component`], so a page can
//! supply its own child materializer or enhancement hook, or none at all.
//!
//! ```text
//! Page ── mount/attach ──▶ Document
//!   │                         │ root connected
//!   └── on_added_to_document ─▶ DeferredComposite
//!                               ├── ChildMaterializer (WidgetRegistry)
//!                               └── EnhancementHook   (ComponentUpgrader)
//! ```

pub mod component;
pub mod components;
pub mod dom;
pub mod enhance;
pub mod page;

pub use component::{ChildDescriptor, ChildMaterializer, EnhancementHook, Widget, WidgetError};
pub use dom::{Document, DomError, NodeId};
pub use page::Page;
