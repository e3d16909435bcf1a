/// Status codes returned by the verifyReceipt endpoint.
///
/// https://developer.apple.com/documentation/appstorereceipts/status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyReceiptStatus {
    Valid,
    /// 21000
    UnreadableJson,
    /// 21002
    MalformedReceiptData,
    /// 21003
    NotAuthenticated,
    /// 21004
    SharedSecretMismatch,
    /// 21005
    ServerUnavailable,
    /// 21006
    SubscriptionExpired,
    /// 21007
    SandboxReceiptSentToProduction,
    /// 21008
    ProductionReceiptSentToSandbox,
    Unknown(i64),
}

impl VerifyReceiptStatus {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Valid,
            21000 => Self::UnreadableJson,
            21002 => Self::MalformedReceiptData,
            21003 => Self::NotAuthenticated,
            21004 => Self::SharedSecretMismatch,
            21005 => Self::ServerUnavailable,
            21006 => Self::SubscriptionExpired,
            21007 => Self::SandboxReceiptSentToProduction,
            21008 => Self::ProductionReceiptSentToSandbox,
            other => Self::Unknown(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::Valid => 0,
            Self::UnreadableJson => 21000,
            Self::MalformedReceiptData => 21002,
            Self::NotAuthenticated => 21003,
            Self::SharedSecretMismatch => 21004,
            Self::ServerUnavailable => 21005,
            Self::SubscriptionExpired => 21006,
            Self::SandboxReceiptSentToProduction => 21007,
            Self::ProductionReceiptSentToSandbox => 21008,
            Self::Unknown(code) => *code,
        }
    }

    /// Apple's description of the status.
    pub fn message(&self) -> String {
        let message = match self {
            Self::Valid => "The receipt is valid.",
            Self::UnreadableJson => "The App Store could not read the JSON object you provided.",
            Self::MalformedReceiptData => {
                "The data in the receipt-data property was malformed or missing."
            }
            Self::NotAuthenticated => "The receipt could not be authenticated.",
            Self::SharedSecretMismatch => {
                "The shared secret you provided does not match the shared secret on file for your account."
            }
            Self::ServerUnavailable => "The receipt server is not currently available.",
            Self::SubscriptionExpired => {
                "This receipt is valid but the subscription has expired. When this status code is returned to your server, the receipt data is also decoded and returned as part of the response."
            }
            Self::SandboxReceiptSentToProduction => {
                "This receipt is from the test environment, but it was sent to the production service for verification. Send it to the test environment service instead."
            }
            Self::ProductionReceiptSentToSandbox => {
                "This receipt is from the production receipt, but it was sent to the test environment service for verification. Send it to the production environment service instead."
            }
            Self::Unknown(code) => return format!("Unknown status code: {code}"),
        };
        message.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_round_trip() {
        for code in [0, 21000, 21002, 21003, 21004, 21005, 21006, 21007, 21008] {
            let status = VerifyReceiptStatus::from_code(code);
            assert!(!matches!(status, VerifyReceiptStatus::Unknown(_)));
            assert_eq!(status.code(), code);
        }
    }

    #[test]
    fn test_unknown_code_message() {
        let status = VerifyReceiptStatus::from_code(99999);
        assert_eq!(status, VerifyReceiptStatus::Unknown(99999));
        assert_eq!(status.message(), "Unknown status code: 99999");
    }

    #[test]
    fn test_21001_is_not_a_known_code() {
        assert_eq!(
            VerifyReceiptStatus::from_code(21001),
            VerifyReceiptStatus::Unknown(21001)
        );
    }

    #[test]
    fn test_sandbox_redirect_message() {
        assert_eq!(
            VerifyReceiptStatus::SandboxReceiptSentToProduction.message(),
            "This receipt is from the test environment, but it was sent to the production service for verification. Send it to the test environment service instead."
        );
    }
}
