use async_trait::async_trait;

use crate::{
    domain::entities::{purchase_claim::PurchaseClaim, verified_receipt::VerifiedReceipt},
    errors::ReceiptVerificationError,
};

#[async_trait]
pub trait ReceiptRepository: Send + Sync {
    /// Verifies the claim's receipt with Apple and checks that it matches the
    /// claimed bundle, product and transaction ids.
    ///
    /// Mismatch errors carry the verified receipt for inspection.
    async fn verify_payment(
        &self,
        claim: &PurchaseClaim,
    ) -> Result<VerifiedReceipt, ReceiptVerificationError>;
}

#[async_trait]
impl ReceiptRepository for Box<dyn ReceiptRepository> {
    async fn verify_payment(
        &self,
        claim: &PurchaseClaim,
    ) -> Result<VerifiedReceipt, ReceiptVerificationError> {
        (**self).verify_payment(claim).await
    }
}
