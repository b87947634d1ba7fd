use crate::models::{ActivityScoreError, Result};

const ADDRESS_LEN: usize = 42;

/// `0x` followed by 40 hex digits, either case.
pub fn is_valid_address(address: &str) -> bool {
    address.len() == ADDRESS_LEN
        && address.starts_with("0x")
        && hex::decode(&address[2..]).is_ok()
}

/// Validates an EVM address and returns it lower-cased.
pub fn normalize_address(address: &str) -> Result<String> {
    if !is_valid_address(address) {
        return Err(ActivityScoreError::InvalidAddress(address.to_string()));
    }
    Ok(address.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_addresses() {
        assert!(is_valid_address("0x742d35Cc6634C0532925a3b844Bc9e7595f6e842"));
        assert!(is_valid_address("0x0000000000000000000000000000000000000000"));
    }

    #[test]
    fn test_invalid_addresses() {
        assert!(!is_valid_address(""));
        assert!(!is_valid_address("not_an_address"));
        // missing prefix
        assert!(!is_valid_address("742d35Cc6634C0532925a3b844Bc9e7595f6e84211"));
        // too short
        assert!(!is_valid_address("0x742d35Cc6634C0532925a3b844Bc9e7595f6e8"));
        // non-hex
        assert!(!is_valid_address("0x742d35Cc6634C0532925a3b844Bc9e7595f6e8zz"));
    }

    #[test]
    fn test_normalize_address_lowercases() {
        let addr = normalize_address("0x742d35Cc6634C0532925a3b844Bc9e7595f6e842").unwrap();
        assert_eq!(addr, "0x742d35cc6634c0532925a3b844bc9e7595f6e842");
        assert!(matches!(
            normalize_address("0x123"),
            Err(ActivityScoreError::InvalidAddress(_))
        ));
    }
}
