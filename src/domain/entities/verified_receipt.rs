use std::fmt;

use serde::Serialize;

use super::raw_receipt::RawReceipt;

/// Which verifyReceipt endpoint ultimately accepted the receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptEnvironment {
    Production,
    Sandbox,
}

impl fmt::Display for ReceiptEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiptEnvironment::Production => write!(f, "production"),
            ReceiptEnvironment::Sandbox => write!(f, "sandbox"),
        }
    }
}

/// One purchased product entry of the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub product_id: Option<String>,
    pub transaction_id: Option<String>,
}

/// A receipt Apple accepted with status 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifiedReceipt {
    pub raw_receipt: RawReceipt,
    /// In the same order as the receipt's `in_app` array.
    pub line_items: Vec<LineItem>,
    pub environment: ReceiptEnvironment,
}

impl VerifiedReceipt {
    pub fn bundle_id(&self) -> Option<&str> {
        self.raw_receipt.bundle_identifier()
    }

    pub(crate) fn has_product(&self, product_id: &str) -> bool {
        self.line_items
            .iter()
            .any(|item| item.product_id.as_deref() == Some(product_id))
    }

    /// Whether a single line item carries both ids.
    pub(crate) fn has_purchase(&self, product_id: &str, transaction_id: &str) -> bool {
        self.line_items.iter().any(|item| {
            item.product_id.as_deref() == Some(product_id)
                && item.transaction_id.as_deref() == Some(transaction_id)
        })
    }
}
