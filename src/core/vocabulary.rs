//! # Navigation Vocabulary
//!
//! The canonical names every publisher and subscriber of navigation intents
//! agrees on. Reference these instead of copying string literals around.
//!
//! ```text
//! topics        NAVIGATE_TO_PAGE  RELOAD_PAGE  POST_TO_PAGE
//! path types    PAGE_RELATIVE  CONTEXT_RELATIVE  FULL_PATH  HASH
//!               SHARE_PAGE_RELATIVE (deprecated, parsed as PAGE_RELATIVE)
//! target types  CURRENT  NEW
//! ```
//!
//! Components that request navigation implement [`NavigationVocabulary`].
//! Every accessor has a default; an implementor that overrides one wins over
//! the default for that attribute only.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::NavigationError;

// ── Literals ────────────────────────────────────────────────────────────────

pub mod topics {
    /// Request that the browser displays a new page.
    pub const NAVIGATE_TO_PAGE: &str = "NAVIGATE_TO_PAGE";
    /// Request that the current page be reloaded.
    pub const RELOAD_PAGE: &str = "RELOAD_PAGE";
    /// Request a form post to a page.
    pub const POST_TO_PAGE: &str = "POST_TO_PAGE";
}

/// URL is relative to the application page context (e.g. `/share/page`).
pub const PAGE_RELATIVE: &str = "PAGE_RELATIVE";
/// Deprecated spelling of [`PAGE_RELATIVE`].
pub const SHARE_PAGE_RELATIVE: &str = "SHARE_PAGE_RELATIVE";
/// URL is relative to the application context (e.g. `/share`).
pub const CONTEXT_RELATIVE: &str = "CONTEXT_RELATIVE";
/// URL is complete and used as-is.
pub const FULL_PATH: &str = "FULL_PATH";
/// URL replaces only the fragment of the current address.
pub const HASH: &str = "HASH";

/// Display in the current browsing context.
pub const CURRENT: &str = "CURRENT";
/// Display in an additional browsing context.
pub const NEW: &str = "NEW";

// ── Enumerations ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    NavigateToPage,
    ReloadPage,
    PostToPage,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::NavigateToPage, Topic::ReloadPage, Topic::PostToPage];

    pub fn as_str(self) -> &'static str {
        match self {
            Topic::NavigateToPage => topics::NAVIGATE_TO_PAGE,
            Topic::ReloadPage => topics::RELOAD_PAGE,
            Topic::PostToPage => topics::POST_TO_PAGE,
        }
    }
}

impl FromStr for Topic {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            topics::NAVIGATE_TO_PAGE => Ok(Topic::NavigateToPage),
            topics::RELOAD_PAGE => Ok(Topic::ReloadPage),
            topics::POST_TO_PAGE => Ok(Topic::PostToPage),
            other => Err(NavigationError::invalid("topic", other)),
        }
    }
}

/// How the `url` of a request relates to the application.
///
/// There is no variant for `SHARE_PAGE_RELATIVE`: the alias is
/// folded into [`PathType::PageRelative`] when parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PathType {
    #[default]
    PageRelative,
    ContextRelative,
    FullPath,
    Hash,
}

impl PathType {
    pub const ALL: [PathType; 4] = [
        PathType::PageRelative,
        PathType::ContextRelative,
        PathType::FullPath,
        PathType::Hash,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PathType::PageRelative => PAGE_RELATIVE,
            PathType::ContextRelative => CONTEXT_RELATIVE,
            PathType::FullPath => FULL_PATH,
            PathType::Hash => HASH,
        }
    }
}

impl FromStr for PathType {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PAGE_RELATIVE | SHARE_PAGE_RELATIVE => Ok(PathType::PageRelative),
            CONTEXT_RELATIVE => Ok(PathType::ContextRelative),
            FULL_PATH => Ok(PathType::FullPath),
            HASH => Ok(PathType::Hash),
            other => Err(NavigationError::invalid("pathType", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetType {
    #[default]
    Current,
    New,
}

impl TargetType {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetType::Current => CURRENT,
            TargetType::New => NEW,
        }
    }
}

impl FromStr for TargetType {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CURRENT => Ok(TargetType::Current),
            NEW => Ok(TargetType::New),
            other => Err(NavigationError::invalid("targetType", other)),
        }
    }
}

macro_rules! literal_traits {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let literal = String::deserialize(deserializer)?;
                literal.parse::<$ty>().map_err(serde::de::Error::custom)
            }
        }
    )*};
}

literal_traits!(Topic, PathType, TargetType);

// ── Capability ──────────────────────────────────────────────────────────────

/// Shared navigation names for any widget or service that requests or handles
/// navigation.
pub trait NavigationVocabulary {
    fn navigate_to_page_topic(&self) -> &str {
        topics::NAVIGATE_TO_PAGE
    }

    fn reload_page_topic(&self) -> &str {
        topics::RELOAD_PAGE
    }

    fn post_to_page_topic(&self) -> &str {
        topics::POST_TO_PAGE
    }

    #[deprecated(note = "use `page_relative_path` instead")]
    fn share_page_relative_path(&self) -> &str {
        SHARE_PAGE_RELATIVE
    }

    fn page_relative_path(&self) -> &str {
        PAGE_RELATIVE
    }

    fn context_relative_path(&self) -> &str {
        CONTEXT_RELATIVE
    }

    fn full_path(&self) -> &str {
        FULL_PATH
    }

    fn hash_path(&self) -> &str {
        HASH
    }

    fn current_target(&self) -> &str {
        CURRENT
    }

    fn new_target(&self) -> &str {
        NEW
    }

    /// The bus topic this component uses for `topic`.
    fn topic_name(&self, topic: Topic) -> &str {
        match topic {
            Topic::NavigateToPage => self.navigate_to_page_topic(),
            Topic::ReloadPage => self.reload_page_topic(),
            Topic::PostToPage => self.post_to_page_topic(),
        }
    }
}

/// The vocabulary with every default in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultVocabulary;

impl NavigationVocabulary for DefaultVocabulary {}
