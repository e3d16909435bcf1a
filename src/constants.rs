/// Apple's legacy verifyReceipt endpoint for App Store builds.
///
/// https://developer.apple.com/documentation/appstorereceipts/verifyreceipt
pub const APPLE_VERIFY_RECEIPT_PRODUCTION_URL: &str = "https://buy.itunes.apple.com/verifyReceipt";

/// Apple's legacy verifyReceipt endpoint for sandbox / TestFlight builds.
pub const APPLE_VERIFY_RECEIPT_SANDBOX_URL: &str =
    "https://sandbox.itunes.apple.com/verifyReceipt";

pub(crate) const PRODUCTION_URL_ENV_VAR: &str = "APPLE_VERIFY_RECEIPT_PRODUCTION_URL";
pub(crate) const SANDBOX_URL_ENV_VAR: &str = "APPLE_VERIFY_RECEIPT_SANDBOX_URL";
