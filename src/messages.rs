//! User-facing message lookup.

use log::*;
use std::collections::HashMap;

pub const NO_INTERNET: &str = "no_internet";
pub const LIST_FETCH_FAILED: &str = "list_fetch_failed";
pub const DETAIL_FETCH_FAILED: &str = "detail_fetch_failed";

/// Resolves a message key to display text.
///
pub trait MessageProvider: Send + Sync {
    fn localize(&self, key: &str) -> String;
}

/// Built-in English messages, optionally overridden per key.
///
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    entries: HashMap<String, String>,
}

impl MessageCatalog {
    /// Return the catalog with the given overrides applied on top of the
    /// defaults.
    ///
    pub fn new(overrides: &HashMap<String, String>) -> Self {
        let mut entries: HashMap<String, String> = [
            (NO_INTERNET, "There is no internet connection"),
            (LIST_FETCH_FAILED, "Unable to load characters"),
            (DETAIL_FETCH_FAILED, "Unable to load character details"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        for (key, value) in overrides {
            entries.insert(key.to_owned(), value.to_owned());
        }
        MessageCatalog { entries }
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        MessageCatalog::new(&HashMap::new())
    }
}

impl MessageProvider for MessageCatalog {
    fn localize(&self, key: &str) -> String {
        match self.entries.get(key) {
            Some(message) => message.to_owned(),
            None => {
                warn!("No message registered for key '{}'", key);
                key.to_owned()
            }
        }
    }
}
