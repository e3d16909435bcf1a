use std::sync::Arc;

use tokio::runtime::Handle;

use crate::{
    config::ReceiptVerifierConfig,
    data::repositories::receipt_repository_impl::ReceiptRepositoryImpl,
    domain::{
        entities::{purchase_claim::PurchaseClaim, verified_receipt::VerifiedReceipt},
        repositories::receipt_repository::ReceiptRepository,
    },
    errors::ReceiptVerificationError,
};

/// Verifier backed by Apple's verifyReceipt endpoints over reqwest.
pub type DefaultReceiptVerificationUtil = ReceiptVerificationUtil<Box<dyn ReceiptRepository>>;

pub struct ReceiptVerificationUtil<R: ReceiptRepository> {
    receipt_repository: R,
}

impl<R: ReceiptRepository> ReceiptVerificationUtil<R> {
    pub fn with_repository(receipt_repository: R) -> Self {
        Self { receipt_repository }
    }

    pub async fn verify_payment(
        &self,
        claim: &PurchaseClaim,
    ) -> Result<VerifiedReceipt, ReceiptVerificationError> {
        self.receipt_repository.verify_payment(claim).await
    }
}

impl<R: ReceiptRepository + 'static> ReceiptVerificationUtil<R> {
    /// Runs `verify_payment` on the current Tokio runtime and hands the outcome
    /// to `on_complete` exactly once, from whichever worker finishes the
    /// callout.
    ///
    /// Outside a Tokio runtime nothing is sent; `on_complete` is called right
    /// away with `ReceiptVerificationError::Runtime`.
    pub fn verify_payment_with_callback<F>(self: &Arc<Self>, claim: PurchaseClaim, on_complete: F)
    where
        F: FnOnce(Result<VerifiedReceipt, ReceiptVerificationError>) + Send + 'static,
    {
        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                on_complete(Err(ReceiptVerificationError::Runtime(format!("{}", e))));
                return;
            }
        };
        let util = Arc::clone(self);
        handle.spawn(async move {
            on_complete(util.verify_payment(&claim).await);
        });
    }
}

impl DefaultReceiptVerificationUtil {
    pub fn new(config: ReceiptVerifierConfig) -> Self {
        Self::with_repository(Box::new(ReceiptRepositoryImpl::new(config)))
    }

    /// Apple's production and sandbox endpoints, unless overridden through
    /// the environment.
    pub fn from_env() -> Self {
        Self::new(ReceiptVerifierConfig::from_env())
    }
}
