use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Whether the string looks like it is already base64 encoded: one or more
/// characters of the standard alphabet followed by at most two '=' padding
/// characters, with no whitespace anywhere.
///
/// This is only a shape check. Plain text that happens to be alphanumeric
/// passes too, and is then sent to Apple as-is.
pub(crate) fn is_base64_like(s: &str) -> bool {
    let body = s.trim_end_matches('=');
    let padding = s.len() - body.len();
    !body.is_empty()
        && padding <= 2
        && body
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/')
}

/// Value for the `receipt-data` request field.
pub(crate) fn encode_receipt_data(receipt: &str) -> String {
    if is_base64_like(receipt) {
        receipt.to_owned()
    } else {
        STANDARD.encode(receipt.as_bytes())
    }
}
