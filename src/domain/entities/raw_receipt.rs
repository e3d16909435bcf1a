use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::verified_receipt::LineItem;

/// The `receipt` object of a verifyReceipt response.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody/receipt
///
/// Only the fields used for reconciliation are pulled out; everything else
/// Apple sends is kept in `other`. They are held as raw JSON so that a
/// non-string value is reported as a mismatch rather than failing the parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReceipt {
    /// Bundle identifier, as sent in older (iOS 6 style) receipts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid: Option<Value>,
    /// Bundle identifier, as sent in iOS 7+ receipts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_app: Option<Vec<RawInAppEntry>>,

    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// An entry of the receipt's `in_app` array.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody/receipt/in_app
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawInAppEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<Value>,

    #[serde(flatten)]
    pub other: Map<String, Value>,
}

fn as_text(value: &Option<Value>) -> Option<&str> {
    value.as_ref().and_then(Value::as_str)
}

impl RawReceipt {
    /// Bundle identifier of the app the purchase was made in.
    ///
    /// `bid` wins over `bundle_id`. Each is looked up on the receipt itself
    /// first, then on the first `in_app` entry.
    pub fn bundle_identifier(&self) -> Option<&str> {
        let first_entry = self.in_app.as_ref().and_then(|entries| entries.first());
        as_text(&self.bid)
            .or_else(|| first_entry.and_then(|entry| as_text(&entry.bid)))
            .or_else(|| as_text(&self.bundle_id))
            .or_else(|| first_entry.and_then(|entry| as_text(&entry.bundle_id)))
    }

    /// One line item per `in_app` entry, in order. Empty when `in_app` is
    /// missing.
    pub fn line_items(&self) -> Vec<LineItem> {
        self.in_app
            .iter()
            .flatten()
            .map(|entry| LineItem {
                product_id: entry.product_id().map(str::to_owned),
                transaction_id: entry.transaction_id().map(str::to_owned),
            })
            .collect()
    }
}

impl RawInAppEntry {
    pub fn product_id(&self) -> Option<&str> {
        as_text(&self.product_id)
    }

    pub fn transaction_id(&self) -> Option<&str> {
        as_text(&self.transaction_id)
    }
}
