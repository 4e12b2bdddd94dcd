//! # Navigation Requests
//!
//! A request is what a publisher puts on the bus. On the wire it is a JSON
//! object of literals:
//!
//! ```text
//! { "url": "dashboard", "pathType": "PAGE_RELATIVE", "targetType": "CURRENT" }
//! ```
//!
//! `type` and `target` are accepted as older spellings of `pathType` and
//! `targetType`. Parsing is the one place where literals become enums, so it
//! is also where `SHARE_PAGE_RELATIVE` disappears.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Value, json};

use super::error::NavigationError;
use super::vocabulary::{PathType, TargetType, Topic};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub topic: Topic,
    /// Optional for `RELOAD_PAGE`, required otherwise.
    pub url: Option<String>,
    pub path_type: PathType,
    pub target_type: TargetType,
    /// Form fields for `POST_TO_PAGE`.
    pub parameters: BTreeMap<String, String>,
}

/// Wire shape before validation. Every field is optional so that missing
/// values can be told apart from unrecognized ones.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest {
    #[serde(default)]
    url: Option<String>,
    #[serde(default, alias = "type")]
    path_type: Option<String>,
    #[serde(default, alias = "target")]
    target_type: Option<String>,
    #[serde(default)]
    parameters: BTreeMap<String, String>,
}

impl NavigationRequest {
    pub fn new(topic: Topic, url: impl Into<String>) -> Self {
        Self {
            topic,
            url: Some(url.into()),
            path_type: PathType::default(),
            target_type: TargetType::default(),
            parameters: BTreeMap::new(),
        }
    }

    /// A `RELOAD_PAGE` request for the current context.
    pub fn reload() -> Self {
        Self {
            topic: Topic::ReloadPage,
            url: None,
            path_type: PathType::default(),
            target_type: TargetType::default(),
            parameters: BTreeMap::new(),
        }
    }

    pub fn with_path_type(mut self, path_type: PathType) -> Self {
        self.path_type = path_type;
        self
    }

    pub fn with_target(mut self, target_type: TargetType) -> Self {
        self.target_type = target_type;
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Parse a bus payload delivered on `topic`.
    ///
    /// Absent `pathType`/`targetType` fall back to `PAGE_RELATIVE`/`CURRENT`.
    /// Present but unrecognized literals are rejected.
    pub fn from_payload(topic: Topic, payload: &Value) -> Result<Self, NavigationError> {
        if !payload.is_object() {
            return Err(NavigationError::MalformedPayload(format!(
                "expected an object, got {payload}"
            )));
        }
        let wire = WireRequest::deserialize(payload)
            .map_err(|e| NavigationError::MalformedPayload(e.to_string()))?;

        let path_type = match wire.path_type {
            Some(literal) => literal.parse::<PathType>()?,
            None => PathType::default(),
        };
        let target_type = match wire.target_type {
            Some(literal) => literal.parse::<TargetType>()?,
            None => TargetType::default(),
        };

        Ok(Self {
            topic,
            url: wire.url,
            path_type,
            target_type,
            parameters: wire.parameters,
        })
    }

    /// The wire object for this request, using canonical literals only.
    pub fn to_payload(&self) -> Value {
        let mut payload = json!({
            "pathType": self.path_type.as_str(),
            "targetType": self.target_type.as_str(),
        });
        if let Some(url) = &self.url {
            payload["url"] = json!(url);
        }
        if !self.parameters.is_empty() {
            payload["parameters"] = json!(self.parameters);
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_payload_full() {
        let payload = json!({
            "url": "dashboard",
            "pathType": "CONTEXT_RELATIVE",
            "targetType": "NEW"
        });
        let request = NavigationRequest::from_payload(Topic::NavigateToPage, &payload).unwrap();
        assert_eq!(request.url.as_deref(), Some("dashboard"));
        assert_eq!(request.path_type, PathType::ContextRelative);
        assert_eq!(request.target_type, TargetType::New);
    }

    #[test]
    fn test_from_payload_defaults_missing_literals() {
        let payload = json!({ "url": "home" });
        let request = NavigationRequest::from_payload(Topic::NavigateToPage, &payload).unwrap();
        assert_eq!(request.path_type, PathType::PageRelative);
        assert_eq!(request.target_type, TargetType::Current);
    }

    #[test]
    fn test_from_payload_accepts_short_keys() {
        let payload = json!({ "url": "x", "type": "HASH", "target": "CURRENT" });
        let request = NavigationRequest::from_payload(Topic::NavigateToPage, &payload).unwrap();
        assert_eq!(request.path_type, PathType::Hash);
    }

    #[test]
    fn test_alias_is_normalized_on_entry() {
        let payload = json!({ "url": "x", "pathType": "SHARE_PAGE_RELATIVE" });
        let request = NavigationRequest::from_payload(Topic::NavigateToPage, &payload).unwrap();
        assert_eq!(request.path_type, PathType::PageRelative);
        assert_eq!(request.to_payload()["pathType"], "PAGE_RELATIVE");
    }

    #[test]
    fn test_unrecognized_path_type_rejected() {
        let payload = json!({ "url": "x", "pathType": "BOGUS" });
        let err = NavigationRequest::from_payload(Topic::NavigateToPage, &payload).unwrap_err();
        assert!(matches!(
            err,
            NavigationError::InvalidConfiguration { field: "pathType", .. }
        ));
    }

    #[test]
    fn test_unrecognized_target_rejected() {
        let payload = json!({ "url": "x", "targetType": "_blank" });
        let err = NavigationRequest::from_payload(Topic::NavigateToPage, &payload).unwrap_err();
        assert!(matches!(
            err,
            NavigationError::InvalidConfiguration { field: "targetType", .. }
        ));
    }

    #[test]
    fn test_non_object_payload_is_malformed() {
        let err = NavigationRequest::from_payload(Topic::ReloadPage, &json!("reload")).unwrap_err();
        assert!(matches!(err, NavigationError::MalformedPayload(_)));

        let err = NavigationRequest::from_payload(Topic::NavigateToPage, &json!({ "url": 42 }))
            .unwrap_err();
        assert!(matches!(err, NavigationError::MalformedPayload(_)));
    }

    #[test]
    fn test_to_payload_carries_parameters() {
        let request = NavigationRequest::new(Topic::PostToPage, "dp/ws/search")
            .with_parameter("term", "budget");
        let payload = request.to_payload();
        assert_eq!(payload["url"], "dp/ws/search");
        assert_eq!(payload["targetType"], "CURRENT");
        assert_eq!(payload["parameters"]["term"], "budget");
    }

    #[test]
    fn test_reload_payload_omits_absent_fields() {
        assert_eq!(
            NavigationRequest::reload().to_payload(),
            json!({ "pathType": "PAGE_RELATIVE", "targetType": "CURRENT" })
        );
    }
}
