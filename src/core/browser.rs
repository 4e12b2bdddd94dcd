//! # Browsing Contexts
//!
//! The far end of a navigation: something that can report where it is and
//! carry out a [`NavigationAction`]. `NEW` actions are fire-and-forget; the
//! caller gets no confirmation that the additional context loaded.

use std::collections::BTreeMap;

use log::info;
use serde::Serialize;

use super::address::Address;
use super::resolver::NavigationAction;
use super::vocabulary::TargetType;

pub trait BrowsingContext {
    fn current_address(&self) -> Address;

    fn perform(&mut self, action: NavigationAction);
}

/// A form submission recorded by [`SimulatedBrowser`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSubmission {
    pub address: String,
    pub target: TargetType,
    pub parameters: BTreeMap<String, String>,
}

/// In-memory browsing context. Used by the CLI and by tests.
#[derive(Debug, Clone, Serialize)]
pub struct SimulatedBrowser {
    #[serde(serialize_with = "serialize_address")]
    current: Address,
    /// Addresses pushed onto the current context's history, oldest first.
    pub history: Vec<String>,
    pub reloads: usize,
    /// Addresses opened in additional contexts.
    pub opened: Vec<String>,
    pub submissions: Vec<FormSubmission>,
}

fn serialize_address<S: serde::Serializer>(address: &Address, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(address)
}

impl SimulatedBrowser {
    pub fn new(start: &str) -> Self {
        Self {
            current: Address::parse(start),
            history: vec![start.to_string()],
            reloads: 0,
            opened: Vec::new(),
            submissions: Vec::new(),
        }
    }

    fn go(&mut self, address: &str) {
        self.current = self.current.join(address);
        self.history.push(self.current.to_string());
    }

    fn open(&mut self, address: &str) {
        let opened = self.current.join(address).to_string();
        info!("Opening additional browsing context at {}", opened);
        self.opened.push(opened);
    }
}

impl BrowsingContext for SimulatedBrowser {
    fn current_address(&self) -> Address {
        self.current.clone()
    }

    fn perform(&mut self, action: NavigationAction) {
        match action {
            NavigationAction::Navigate {
                address,
                target: TargetType::Current,
            } => {
                info!("Navigating to {}", address);
                self.go(&address);
            }
            NavigationAction::Navigate {
                address,
                target: TargetType::New,
            }
            | NavigationAction::Reload {
                address,
                target: TargetType::New,
            } => self.open(&address),
            NavigationAction::Reload {
                target: TargetType::Current,
                ..
            } => {
                info!("Reloading {}", self.current);
                self.reloads += 1;
            }
            NavigationAction::Post {
                address,
                target,
                parameters,
            } => {
                let resolved = self.current.join(&address).to_string();
                info!("Posting {} field(s) to {}", parameters.len(), resolved);
                if target == TargetType::Current {
                    self.go(&address);
                }
                self.submissions.push(FormSubmission {
                    address: resolved,
                    target,
                    parameters,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_navigation_pushes_history() {
        let mut browser = SimulatedBrowser::new("http://localhost/share/page/home");
        browser.perform(NavigationAction::Navigate {
            address: "/share/page/dashboard".into(),
            target: TargetType::Current,
        });
        assert_eq!(
            browser.current_address().to_string(),
            "http://localhost/share/page/dashboard"
        );
        assert_eq!(browser.history.len(), 2);
    }

    #[test]
    fn test_new_target_leaves_current_alone() {
        let mut browser = SimulatedBrowser::new("http://localhost/share/page/home");
        browser.perform(NavigationAction::Navigate {
            address: "https://example.com".into(),
            target: TargetType::New,
        });
        assert_eq!(
            browser.current_address().to_string(),
            "http://localhost/share/page/home"
        );
        assert_eq!(browser.opened, vec!["https://example.com".to_string()]);
    }

    #[test]
    fn test_reload_counts() {
        let mut browser = SimulatedBrowser::new("/share/page/home");
        browser.perform(NavigationAction::Reload {
            address: "/share/page/home".into(),
            target: TargetType::Current,
        });
        assert_eq!(browser.reloads, 1);
        assert_eq!(browser.history.len(), 1);
    }

    #[test]
    fn test_post_to_new_context_records_submission_only() {
        let mut browser = SimulatedBrowser::new("/share/page/home");
        browser.perform(NavigationAction::Post {
            address: "/share/page/search".into(),
            target: TargetType::New,
            parameters: BTreeMap::from([("term".to_string(), "q".to_string())]),
        });
        assert_eq!(browser.current_address().to_string(), "/share/page/home");
        assert_eq!(browser.submissions.len(), 1);
        assert_eq!(browser.submissions[0].address, "/share/page/search");
    }
}
