use thiserror::Error;

use crate::domain::entities::{
    verified_receipt::VerifiedReceipt, verify_receipt_status::VerifyReceiptStatus,
};

/// Failure of the HTTP layer underneath a verifyReceipt callout.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Callout failed to send: {0}")]
    Send(String),
    #[error("Received {status} status code with body: {body}")]
    HttpStatus { status: u16, body: String },
}

#[derive(Debug, Error)]
pub enum ReceiptVerificationError {
    #[error("Invalid purchase claim: {0}")]
    Validation(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// No async runtime was available to run the verification on.
    #[error("No Tokio runtime available: {0}")]
    Runtime(String),

    #[error("Failed to parse verifyReceipt response: {0}")]
    MalformedResponse(String),

    /// Non-zero status reported by Apple.
    #[error("{message}")]
    Service { code: i64, message: String },

    #[error("Empty in_app")]
    EmptyLineItems { receipt: Box<VerifiedReceipt> },

    #[error("Wrong bundle ID: {expected} (expected: {})", actual.as_deref().unwrap_or("null"))]
    BundleMismatch {
        expected: String,
        actual: Option<String>,
        receipt: Box<VerifiedReceipt>,
    },

    #[error("Wrong product ID: {expected}")]
    ProductMismatch {
        expected: String,
        receipt: Box<VerifiedReceipt>,
    },

    #[error("Wrong transaction ID: {expected}")]
    TransactionMismatch {
        expected: String,
        receipt: Box<VerifiedReceipt>,
    },
}

impl ReceiptVerificationError {
    pub(crate) fn service(status: VerifyReceiptStatus) -> Self {
        Self::Service {
            code: status.code(),
            message: status.message(),
        }
    }

    /// Typed status of a `Service` error.
    pub fn service_status(&self) -> Option<VerifyReceiptStatus> {
        match self {
            Self::Service { code, .. } => Some(VerifyReceiptStatus::from_code(*code)),
            _ => None,
        }
    }

    /// The verified receipt that failed reconciliation, if verification got
    /// that far.
    pub fn receipt(&self) -> Option<&VerifiedReceipt> {
        match self {
            Self::EmptyLineItems { receipt }
            | Self::BundleMismatch { receipt, .. }
            | Self::ProductMismatch { receipt, .. }
            | Self::TransactionMismatch { receipt, .. } => Some(&**receipt),
            _ => None,
        }
    }
}
