use serde::{Deserialize, Deserializer};

use crate::domain::entities::raw_receipt::RawReceipt;

/// Response body of a verifyReceipt callout.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody
///
/// Fields not needed for verification (latest_receipt_info,
/// pending_renewal_info, ...) are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct VerifyReceiptResponseModel {
    /// Either 0 if the receipt is valid, or a status code if there is an
    /// error.
    #[serde(deserialize_with = "deserialize_status")]
    pub(crate) status: i64,
    /// A JSON representation of the receipt that was sent for verification.
    pub(crate) receipt: Option<RawReceipt>,
}

// Apple documents the status as a number, but string-encoded values have been
// observed in the wild.
fn deserialize_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawStatus {
        Number(i64),
        Text(String),
    }
    match RawStatus::deserialize(deserializer)? {
        RawStatus::Number(n) => Ok(n),
        RawStatus::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid status '{s}'"))),
    }
}
