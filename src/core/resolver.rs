//! # Navigation Resolver
//!
//! Turns a [`NavigationRequest`] into a [`NavigationAction`]. Pure: the
//! current address comes in as an argument and nothing is performed here.
//!
//! ```text
//! PAGE_RELATIVE     "dashboard"   →  /share/page/dashboard
//! CONTEXT_RELATIVE  "res/app.css" →  /share/res/app.css
//! FULL_PATH         "https://x"   →  https://x
//! HASH              "panel=info"  →  <current path and query>#panel=info
//! ```

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;
use serde_json::Value;

use super::address::Address;
use super::error::NavigationError;
use super::request::NavigationRequest;
use super::vocabulary::{PathType, TargetType, Topic};

/// The two roots relative paths are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRoots {
    /// e.g. `/share`
    pub context_root: String,
    /// e.g. `/share/page`
    pub page_root: String,
}

impl AppRoots {
    /// Build roots from an application context (`share` or `/share`) and the
    /// page segment (`page`).
    pub fn new(app_context: &str, page_segment: &str) -> Self {
        let context = app_context.trim_matches('/');
        let context_root = if context.is_empty() {
            String::new()
        } else {
            format!("/{context}")
        };
        let page_root = format!("{}/{}", context_root, page_segment.trim_matches('/'));
        Self {
            context_root,
            page_root,
        }
    }
}

impl Default for AppRoots {
    fn default() -> Self {
        AppRoots::new("share", "page")
    }
}

/// A concrete thing for a browsing context to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum NavigationAction {
    Navigate {
        address: String,
        target: TargetType,
    },
    Reload {
        address: String,
        target: TargetType,
    },
    Post {
        address: String,
        target: TargetType,
        parameters: BTreeMap<String, String>,
    },
}

impl NavigationAction {
    pub fn address(&self) -> &str {
        match self {
            NavigationAction::Navigate { address, .. }
            | NavigationAction::Reload { address, .. }
            | NavigationAction::Post { address, .. } => address,
        }
    }

    pub fn target(&self) -> TargetType {
        match self {
            NavigationAction::Navigate { target, .. }
            | NavigationAction::Reload { target, .. }
            | NavigationAction::Post { target, .. } => *target,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NavigationResolver {
    roots: AppRoots,
}

impl NavigationResolver {
    pub fn new(roots: AppRoots) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &AppRoots {
        &self.roots
    }

    /// Resolve `url` according to `path_type`. Same inputs, same output.
    pub fn resolve_address(&self, url: &str, path_type: PathType, current: &Address) -> String {
        match path_type {
            PathType::PageRelative => join_root(&self.roots.page_root, url),
            PathType::ContextRelative => join_root(&self.roots.context_root, url),
            PathType::FullPath => url.to_string(),
            PathType::Hash => current.with_fragment(url).to_string(),
        }
    }

    pub fn resolve(
        &self,
        request: &NavigationRequest,
        current: &Address,
    ) -> Result<NavigationAction, NavigationError> {
        let action = match request.topic {
            Topic::ReloadPage => NavigationAction::Reload {
                address: current.to_string(),
                target: request.target_type,
            },
            Topic::NavigateToPage => NavigationAction::Navigate {
                address: self.required_address(request, current)?,
                target: request.target_type,
            },
            Topic::PostToPage => NavigationAction::Post {
                address: self.required_address(request, current)?,
                target: request.target_type,
                parameters: request.parameters.clone(),
            },
        };
        debug!("Resolved {} request to {:?}", request.topic, action);
        Ok(action)
    }

    /// Parse and resolve a raw bus payload. Unrecognized literals fail before
    /// any action exists.
    pub fn resolve_payload(
        &self,
        topic: Topic,
        payload: &Value,
        current: &Address,
    ) -> Result<NavigationAction, NavigationError> {
        let request = NavigationRequest::from_payload(topic, payload)?;
        self.resolve(&request, current)
    }

    fn required_address(
        &self,
        request: &NavigationRequest,
        current: &Address,
    ) -> Result<String, NavigationError> {
        let url = request.url.as_deref().ok_or(NavigationError::MissingUrl {
            topic: request.topic.as_str(),
        })?;
        Ok(self.resolve_address(url, request.path_type, current))
    }
}

fn join_root(root: &str, url: &str) -> String {
    format!("{}/{}", root.trim_end_matches('/'), url.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolver() -> NavigationResolver {
        NavigationResolver::new(AppRoots::new("/share", "page"))
    }

    fn current() -> Address {
        Address::parse("https://host/share/page/home?x=1")
    }

    #[test]
    fn test_app_roots_normalize_slashes() {
        let roots = AppRoots::new("share/", "/page/");
        assert_eq!(roots.context_root, "/share");
        assert_eq!(roots.page_root, "/share/page");
        assert_eq!(AppRoots::new("", "page").page_root, "/page");
    }

    #[test]
    fn test_page_relative() {
        let resolved = resolver().resolve_address("dashboard", PathType::PageRelative, &current());
        assert_eq!(resolved, "/share/page/dashboard");
        let resolved = resolver().resolve_address("/dashboard", PathType::PageRelative, &current());
        assert_eq!(resolved, "/share/page/dashboard");
    }

    #[test]
    fn test_context_relative() {
        let resolved =
            resolver().resolve_address("res/app.css", PathType::ContextRelative, &current());
        assert_eq!(resolved, "/share/res/app.css");
    }

    #[test]
    fn test_full_path_is_verbatim() {
        let url = "https://example.com/a?b=c#d";
        assert_eq!(resolver().resolve_address(url, PathType::FullPath, &current()), url);
    }

    #[test]
    fn test_hash_changes_only_fragment() {
        let current = Address::parse("https://host/app/page?x=1");
        let resolved = resolver().resolve_address("panel=info", PathType::Hash, &current);
        assert_eq!(resolved, "https://host/app/page?x=1#panel=info");

        let current = Address::parse("https://host/app/page?x=1#old");
        let resolved = resolver().resolve_address("panel=info", PathType::Hash, &current);
        assert_eq!(resolved, "https://host/app/page?x=1#panel=info");
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let resolver = resolver();
        for path_type in PathType::ALL {
            let first = resolver.resolve_address("a/b", path_type, &current());
            let second = resolver.resolve_address("a/b", path_type, &current());
            assert_eq!(first, second, "{path_type} resolved differently twice");
        }
    }

    #[test]
    fn test_alias_resolves_like_page_relative() {
        let resolver = resolver();
        let canonical = json!({ "url": "site/x", "pathType": "PAGE_RELATIVE" });
        let alias = json!({ "url": "site/x", "pathType": "SHARE_PAGE_RELATIVE" });
        assert_eq!(
            resolver.resolve_payload(Topic::NavigateToPage, &canonical, &current()),
            resolver.resolve_payload(Topic::NavigateToPage, &alias, &current()),
        );
    }

    #[test]
    fn test_reload_targets_current_address() {
        let action = resolver().resolve(&NavigationRequest::reload(), &current()).unwrap();
        assert_eq!(
            action,
            NavigationAction::Reload {
                address: "https://host/share/page/home?x=1".into(),
                target: TargetType::Current,
            }
        );
    }

    #[test]
    fn test_post_keeps_parameters() {
        let request = NavigationRequest::new(Topic::PostToPage, "search")
            .with_target(TargetType::New)
            .with_parameter("term", "q");
        let action = resolver().resolve(&request, &current()).unwrap();
        match action {
            NavigationAction::Post {
                address,
                target,
                parameters,
            } => {
                assert_eq!(address, "/share/page/search");
                assert_eq!(target, TargetType::New);
                assert_eq!(parameters.get("term").map(String::as_str), Some("q"));
            }
            other => panic!("expected a post, got {other:?}"),
        }
    }

    #[test]
    fn test_navigate_without_url_fails() {
        let payload = json!({ "pathType": "PAGE_RELATIVE" });
        let err = resolver()
            .resolve_payload(Topic::NavigateToPage, &payload, &current())
            .unwrap_err();
        assert_eq!(err, NavigationError::MissingUrl { topic: "NAVIGATE_TO_PAGE" });
    }

    #[test]
    fn test_bogus_path_type_fails() {
        let payload = json!({ "url": "x", "pathType": "BOGUS" });
        let err = resolver()
            .resolve_payload(Topic::NavigateToPage, &payload, &current())
            .unwrap_err();
        assert!(matches!(err, NavigationError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_action_serializes_with_tag() {
        let action = NavigationAction::Navigate {
            address: "/share/page/x".into(),
            target: TargetType::New,
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["action"], "navigate");
        assert_eq!(json["target"], "NEW");
    }
}
