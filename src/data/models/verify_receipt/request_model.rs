use serde::Serialize;

/// Request body of a verifyReceipt callout.
///
/// https://developer.apple.com/documentation/appstorereceipts/requestbody
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct VerifyReceiptRequestModel {
    /// The Base64-encoded receipt data.
    #[serde(rename = "receipt-data")]
    pub(crate) receipt_data: String,
    /// The app's shared secret, which is a hexadecimal string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) password: Option<String>,
}
