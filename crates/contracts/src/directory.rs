//! RecipientDirectory - Config Loader output
//!
//! Static recipient name to chat channel mapping.

use std::collections::HashMap;

/// Recipient directory
///
/// Built once at initialization and never mutated afterwards, so it can be
/// shared across concurrent flushes behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientDirectory {
    /// Recipient name -> channel id
    entries: HashMap<String, String>,
}

impl RecipientDirectory {
    /// Create directory from a name -> channel id map
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    /// Resolve a recipient name to its channel id
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Number of recipients
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no recipient is configured
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, channel id)` pairs in storage order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Recipient names, sorted (for diagnostics)
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RecipientDirectory {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
