use serde::Deserialize;

use crate::constants::{
    APPLE_VERIFY_RECEIPT_PRODUCTION_URL, APPLE_VERIFY_RECEIPT_SANDBOX_URL, PRODUCTION_URL_ENV_VAR,
    SANDBOX_URL_ENV_VAR,
};

/// Endpoints receipts are verified against.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReceiptVerifierConfig {
    pub production_url: String,
    pub sandbox_url: String,
}

impl Default for ReceiptVerifierConfig {
    fn default() -> Self {
        Self {
            production_url: APPLE_VERIFY_RECEIPT_PRODUCTION_URL.to_owned(),
            sandbox_url: APPLE_VERIFY_RECEIPT_SANDBOX_URL.to_owned(),
        }
    }
}

impl ReceiptVerifierConfig {
    /// Apple's endpoints, overridable through the
    /// APPLE_VERIFY_RECEIPT_PRODUCTION_URL and APPLE_VERIFY_RECEIPT_SANDBOX_URL
    /// environment variables (e.g. to point at a local stub).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |key: &str, fallback: String| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(fallback)
        };
        Self {
            production_url: read(PRODUCTION_URL_ENV_VAR, defaults.production_url),
            sandbox_url: read(SANDBOX_URL_ENV_VAR, defaults.sandbox_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_defaults_are_apple_endpoints() {
        let config = ReceiptVerifierConfig::from_lookup(|_| None);
        assert_eq!(config, ReceiptVerifierConfig::default());
        assert_eq!(
            config.production_url,
            "https://buy.itunes.apple.com/verifyReceipt"
        );
        assert_eq!(
            config.sandbox_url,
            "https://sandbox.itunes.apple.com/verifyReceipt"
        );
    }

    #[test]
    fn test_overrides_skip_blank_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            (PRODUCTION_URL_ENV_VAR, "http://localhost:9000/verifyReceipt"),
            (SANDBOX_URL_ENV_VAR, "  "),
        ]);
        let config = ReceiptVerifierConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.production_url, "http://localhost:9000/verifyReceipt");
        assert_eq!(config.sandbox_url, APPLE_VERIFY_RECEIPT_SANDBOX_URL);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: ReceiptVerifierConfig =
            serde_json::from_str(r#"{"sandbox_url": "http://localhost/sandbox"}"#).unwrap();
        assert_eq!(config.production_url, APPLE_VERIFY_RECEIPT_PRODUCTION_URL);
        assert_eq!(config.sandbox_url, "http://localhost/sandbox");
    }
}
