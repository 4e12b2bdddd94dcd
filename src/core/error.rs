use std::fmt;

/// Errors raised while turning a navigation request into a browser action.
///
/// None of these are retried and none fall back to a default destination:
/// a request that fails here simply does not navigate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// A literal reached the resolver that is not part of the vocabulary.
    /// `field` names the attribute (`topic`, `pathType`, `targetType`).
    InvalidConfiguration { field: &'static str, value: String },
    /// The payload was not an object, or a field had the wrong JSON type.
    MalformedPayload(String),
    /// Navigate and post requests need a `url`.
    MissingUrl { topic: &'static str },
}

impl NavigationError {
    pub(crate) fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        NavigationError::InvalidConfiguration {
            field,
            value: value.into(),
        }
    }
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::InvalidConfiguration { field, value } => {
                write!(f, "invalid configuration: unrecognized {field} \"{value}\"")
            }
            NavigationError::MalformedPayload(msg) => write!(f, "malformed payload: {msg}"),
            NavigationError::MissingUrl { topic } => {
                write!(f, "a {topic} request was made without a url")
            }
        }
    }
}

impl std::error::Error for NavigationError {}
