//! # Core Navigation Logic
//!
//! This module contains waypost's navigation vocabulary and the logic that
//! turns navigation requests into browser actions.
//! It knows nothing about documents or widgets.
//!
//! ```text
//!       widget / service                       NavigationService
//!   ┌──────────────────────┐   MessageBus   ┌──────────────────────────┐
//!   │ NavigationVocabulary │ ─────────────▶ │ NavigationRequest        │
//!   │ publish_navigation() │   (sync, at    │   → NavigationResolver   │
//!   └──────────────────────┘   most once)   │   → NavigationAction     │
//!                                           │   → BrowsingContext      │
//!                                           └──────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`vocabulary`]: topic, path-type and target-type literals
//! - [`request`]: the `NavigationRequest` and its wire payload
//! - [`resolver`]: request → `NavigationAction`
//! - [`browser`]: the `BrowsingContext` that performs actions
//! - [`bus`]: publish/subscribe
//! - [`service`]: bus subscriber that resolves and performs
//! - [`config`]: settings and their override hierarchy

pub mod address;
pub mod browser;
pub mod bus;
pub mod config;
pub mod error;
pub mod request;
pub mod resolver;
pub mod service;
pub mod vocabulary;

pub use address::Address;
pub use browser::{BrowsingContext, SimulatedBrowser};
pub use bus::{Delivery, LocalBus, MessageBus, Payload};
pub use error::NavigationError;
pub use request::NavigationRequest;
pub use resolver::{AppRoots, NavigationAction, NavigationResolver};
pub use service::{NavigationService, publish_navigation};
pub use vocabulary::{DefaultVocabulary, NavigationVocabulary, PathType, TargetType, Topic};
