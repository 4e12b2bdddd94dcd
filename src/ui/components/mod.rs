//! # Widgets
//!
//! - `deferred`: the lazily-rendered composite and its lifecycle
//! - `menu`: a button + deferred `ul` built on `deferred`
//! - `registry`: the default child materializer and its built-in widgets

pub mod deferred;
pub mod menu;
pub mod registry;

pub use deferred::{Collaborators, CompositeConfig, ContainerSpec, DeferredComposite, LifecycleState};
pub use menu::{MenuConfig, build_menu};
pub use registry::WidgetRegistry;
