use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Known protocol and the contract addresses attributed to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolEntry {
    /// Stable slug.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Lower-cased contract addresses.
    pub addresses: BTreeSet<String>,
}

impl ProtocolEntry {
    pub fn new(id: &str, name: &str, tags: &[&str], addresses: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            addresses: addresses.iter().map(|a| a.to_lowercase()).collect(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}
