/// Receipt data as handed over by the client app.
///
/// Only textual receipts can be submitted to Apple; binary payloads are
/// rejected before any callout is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiptPayload {
    Text(String),
    Binary(Vec<u8>),
}

impl From<String> for ReceiptPayload {
    fn from(value: String) -> Self {
        ReceiptPayload::Text(value)
    }
}

impl From<&str> for ReceiptPayload {
    fn from(value: &str) -> Self {
        ReceiptPayload::Text(value.to_owned())
    }
}

impl From<Vec<u8>> for ReceiptPayload {
    fn from(value: Vec<u8>) -> Self {
        ReceiptPayload::Binary(value)
    }
}

/// The purchase the caller believes took place.
///
/// Each of `package_name`, `product_id` and `transaction_id` is only checked
/// against the verified receipt when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseClaim {
    pub receipt: ReceiptPayload,
    /// App-specific shared secret, required for auto-renewable subscription
    /// receipts.
    pub shared_secret: Option<String>,
    /// Expected bundle identifier of the app (e.g. 'com.some.thing').
    pub package_name: Option<String>,
    pub product_id: Option<String>,
    pub transaction_id: Option<String>,
}

impl PurchaseClaim {
    pub fn new(receipt: impl Into<ReceiptPayload>) -> Self {
        Self {
            receipt: receipt.into(),
            shared_secret: None,
            package_name: None,
            product_id: None,
            transaction_id: None,
        }
    }

    pub fn with_shared_secret(mut self, shared_secret: impl Into<String>) -> Self {
        self.shared_secret = Some(shared_secret.into());
        self
    }

    pub fn with_package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = Some(package_name.into());
        self
    }

    pub fn with_product_id(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }
}
