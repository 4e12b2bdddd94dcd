//! Browser addresses, split at the fragment.
//!
//! ```text
//! https://host/share/page/home?x=1#panel=info
//! └──────────── base ────────────┘ └fragment┘
//! ```

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// Scheme, authority, path and query. May be a bare path (`/share/page`).
    base: String,
    fragment: Option<String>,
}

impl Address {
    pub fn parse(raw: &str) -> Self {
        match raw.split_once('#') {
            Some((base, fragment)) => Self {
                base: base.to_string(),
                fragment: Some(fragment.to_string()),
            },
            None => Self {
                base: raw.to_string(),
                fragment: None,
            },
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Path plus query, without scheme and authority.
    pub fn path_and_query(&self) -> &str {
        let origin_len = self.origin().len();
        &self.base[origin_len..]
    }

    /// `scheme://authority`, or empty for a bare path.
    pub fn origin(&self) -> &str {
        let Some(scheme_end) = scheme_len(&self.base) else {
            return "";
        };
        let Some(rest) = self.base[scheme_end..].strip_prefix("//") else {
            return "";
        };
        let authority_start = scheme_end + 2;
        match rest.find(|c: char| c == '/' || c == '?') {
            Some(offset) => &self.base[..authority_start + offset],
            None => &self.base,
        }
    }

    /// Same base, fragment replaced. A leading `#` on `fragment` is dropped.
    pub fn with_fragment(&self, fragment: &str) -> Self {
        Self {
            base: self.base.clone(),
            fragment: Some(fragment.trim_start_matches('#').to_string()),
        }
    }

    /// Where a browser positioned at `self` ends up when sent to `target`.
    pub fn join(&self, target: &str) -> Self {
        if scheme_len(target).is_some() {
            Address::parse(target)
        } else if let Some(fragment) = target.strip_prefix('#') {
            self.with_fragment(fragment)
        } else if target.starts_with('/') {
            Address::parse(&format!("{}{}", self.origin(), target))
        } else {
            Address::parse(target)
        }
    }
}

/// Length of a leading `scheme:`, colon included. A `://` later in the
/// string (inside a query, say) does not count.
fn scheme_len(raw: &str) -> Option<usize> {
    let colon = raw.find(':')?;
    let mut chars = raw[..colon].chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'));
    valid.then_some(colon + 1)
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.fragment {
            Some(fragment) => write!(f, "{}#{}", self.base, fragment),
            None => f.write_str(&self.base),
        }
    }
}

impl From<&str> for Address {
    fn from(raw: &str) -> Self {
        Address::parse(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_fragment() {
        let address = Address::parse("https://host/app/page?x=1#old");
        assert_eq!(address.base(), "https://host/app/page?x=1");
        assert_eq!(address.fragment(), Some("old"));
        assert_eq!(address.origin(), "https://host");
        assert_eq!(address.path_and_query(), "/app/page?x=1");
    }

    #[test]
    fn test_bare_path_has_no_origin() {
        let address = Address::parse("/share/page/home");
        assert_eq!(address.origin(), "");
        assert_eq!(address.path_and_query(), "/share/page/home");
    }

    #[test]
    fn test_with_fragment_keeps_base() {
        let address = Address::parse("https://host/app/page?x=1#old");
        assert_eq!(
            address.with_fragment("#panel=info").to_string(),
            "https://host/app/page?x=1#panel=info"
        );
    }

    #[test]
    fn test_join_absolute_path_keeps_origin() {
        let address = Address::parse("http://localhost:8080/share/page/home#x");
        assert_eq!(
            address.join("/share/page/dashboard").to_string(),
            "http://localhost:8080/share/page/dashboard"
        );
        assert_eq!(address.join("https://example.com").to_string(), "https://example.com");
        assert_eq!(
            address.join("#y").to_string(),
            "http://localhost:8080/share/page/home#y"
        );
    }

    #[test]
    fn test_url_in_query_is_not_a_scheme() {
        let address = Address::parse("https://host/share/page/home");
        assert_eq!(
            address
                .join("/share/page/login?redirect=https://example.com/x")
                .to_string(),
            "https://host/share/page/login?redirect=https://example.com/x"
        );

        let bare = Address::parse("/share/page/login?redirect=https://example.com/x");
        assert_eq!(bare.origin(), "");
        assert_eq!(bare.path_and_query(), bare.base());

        let no_path = Address::parse("https://host?next=https://example.com/x");
        assert_eq!(no_path.origin(), "https://host");
        assert_eq!(no_path.path_and_query(), "?next=https://example.com/x");
    }

    #[test]
    fn test_join_other_schemes() {
        let address = Address::parse("https://host/share/page/home");
        assert_eq!(address.join("mailto:team@example.com").to_string(), "mailto:team@example.com");
        assert_eq!(address.join("mailto:team@example.com").origin(), "");
    }
}
