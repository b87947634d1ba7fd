pub mod base;

use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::warn;

use crate::models::ProtocolEntry;

static REGISTRY: Lazy<ProtocolRegistry> =
    Lazy::new(|| ProtocolRegistry::from_entries(base::protocols()));

/// Process-wide registry of known Base protocols.
pub fn registry() -> &'static ProtocolRegistry {
    &REGISTRY
}

/// Looks up `address` in the built-in registry.
pub fn resolve_protocol_by_address(address: &str) -> Option<&'static ProtocolEntry> {
    REGISTRY.resolve(address)
}

/// Read-only address → protocol index.
#[derive(Debug, Clone, Default)]
pub struct ProtocolRegistry {
    entries: Vec<ProtocolEntry>,
    by_address: HashMap<String, usize>,
}

impl ProtocolRegistry {
    /// Indexes `entries` by address.
    ///
    /// An address claimed by more than one entry maps to the last one.
    pub fn from_entries(entries: Vec<ProtocolEntry>) -> Self {
        let mut by_address = HashMap::new();

        for (idx, entry) in entries.iter().enumerate() {
            for address in &entry.addresses {
                let key = address.to_lowercase();
                if let Some(prev) = by_address.insert(key, idx) {
                    if prev != idx {
                        warn!(
                            "Address {} claimed by both {} and {}; using {}",
                            address, entries[prev].id, entry.id, entry.id
                        );
                    }
                }
            }
        }

        Self { entries, by_address }
    }

    /// Case-insensitive exact match; unknown or empty addresses resolve to `None`.
    pub fn resolve(&self, address: &str) -> Option<&ProtocolEntry> {
        if address.is_empty() {
            return None;
        }
        self.by_address
            .get(&address.to_lowercase())
            .map(|&idx| &self.entries[idx])
    }

    pub fn entries(&self) -> &[ProtocolEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base::BaseContracts;

    #[test]
    fn test_resolve_is_case_insensitive() {
        let weth = resolve_protocol_by_address(BaseContracts::WETH).unwrap();
        assert_eq!(weth.name, "WETH");

        let upper = resolve_protocol_by_address(&BaseContracts::USDC.to_uppercase().replace("0X", "0x"));
        assert_eq!(upper.map(|p| p.id.as_str()), Some("usdc"));
    }

    #[test]
    fn test_unknown_and_empty_addresses() {
        assert!(resolve_protocol_by_address("").is_none());
        assert!(resolve_protocol_by_address("0x0000000000000000000000000000000000000001").is_none());
    }

    #[test]
    fn test_every_builtin_address_resolves_to_its_entry() {
        for entry in registry().entries() {
            for address in &entry.addresses {
                assert_eq!(registry().resolve(address).map(|p| &p.id), Some(&entry.id));
            }
        }
    }

    #[test]
    fn test_duplicate_address_last_entry_wins() {
        let shared = "0xAAAAaaaaAAAAaaaaAAAAaaaaAAAAaaaaAAAAaaaa";
        let registry = ProtocolRegistry::from_entries(vec![
            ProtocolEntry::new("first", "First", &[], &[shared]),
            ProtocolEntry::new("second", "Second", &["dex"], &[shared]),
        ]);

        let resolved = registry.resolve(shared).unwrap();
        assert_eq!(resolved.id, "second");
        assert!(resolved.has_tag("dex"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_empty_registry_resolves_nothing() {
        let empty = ProtocolRegistry::from_entries(Vec::new());
        assert!(empty.is_empty());
        assert!(empty.resolve(BaseContracts::WETH).is_none());
        assert!(!registry().is_empty());
    }
}
