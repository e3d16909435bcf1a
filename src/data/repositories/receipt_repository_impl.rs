use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    config::ReceiptVerifierConfig,
    data::{
        datasources::{
            http_transport::ReqwestHttpTransport,
            utils::encode_receipt_data,
            verify_receipt_datasource::{
                ReceiptVerificationModel, VerifyReceiptDatasource, VerifyReceiptDatasourceImpl,
            },
        },
        models::verify_receipt::request_model::VerifyReceiptRequestModel,
    },
    domain::{
        entities::{
            purchase_claim::{PurchaseClaim, ReceiptPayload},
            verified_receipt::{ReceiptEnvironment, VerifiedReceipt},
            verify_receipt_status::VerifyReceiptStatus,
        },
        repositories::receipt_repository::ReceiptRepository,
    },
    errors::ReceiptVerificationError,
};

pub(crate) struct ReceiptRepositoryImpl<D: VerifyReceiptDatasource> {
    verify_receipt_datasource: D,
    config: ReceiptVerifierConfig,
}

#[async_trait]
impl<D: VerifyReceiptDatasource> ReceiptRepository for ReceiptRepositoryImpl<D> {
    async fn verify_payment(
        &self,
        claim: &PurchaseClaim,
    ) -> Result<VerifiedReceipt, ReceiptVerificationError> {
        let request = build_request(claim)?;
        let (model, environment) = self.verify_with_sandbox_fallback(&request).await?;
        reconcile(
            claim,
            VerifiedReceipt {
                raw_receipt: model.raw_receipt,
                line_items: model.line_items,
                environment,
            },
        )
    }
}

impl ReceiptRepositoryImpl<VerifyReceiptDatasourceImpl<ReqwestHttpTransport>> {
    pub(crate) fn new(config: ReceiptVerifierConfig) -> Self {
        Self::with_datasource(
            VerifyReceiptDatasourceImpl::new(ReqwestHttpTransport::new()),
            config,
        )
    }
}

impl<D: VerifyReceiptDatasource> ReceiptRepositoryImpl<D> {
    pub(crate) fn with_datasource(verify_receipt_datasource: D, config: ReceiptVerifierConfig) -> Self {
        Self {
            verify_receipt_datasource,
            config,
        }
    }

    async fn verify_with_sandbox_fallback(
        &self,
        request: &Value,
    ) -> Result<(ReceiptVerificationModel, ReceiptEnvironment), ReceiptVerificationError> {
        // As per Apple's documentation, always try production first. Only a
        // 21007 response (sandbox receipt) is retried against the sandbox, and
        // in that case the sandbox outcome replaces the production error.
        match self
            .verify_receipt_datasource
            .verify(&self.config.production_url, request)
            .await
        {
            Ok(model) => Ok((model, ReceiptEnvironment::Production)),
            Err(production_error)
                if production_error.service_status()
                    == Some(VerifyReceiptStatus::SandboxReceiptSentToProduction) =>
            {
                info!("sandbox receipt sent to production, retrying against sandbox");
                let model = self
                    .verify_receipt_datasource
                    .verify(&self.config.sandbox_url, request)
                    .await?;
                Ok((model, ReceiptEnvironment::Sandbox))
            }
            Err(production_error) => Err(production_error),
        }
    }
}

fn build_request(claim: &PurchaseClaim) -> Result<Value, ReceiptVerificationError> {
    let receipt = match &claim.receipt {
        ReceiptPayload::Text(receipt) => receipt,
        ReceiptPayload::Binary(_) => {
            return Err(ReceiptVerificationError::Validation(
                "Receipt must be a string".to_owned(),
            ))
        }
    };
    let model = VerifyReceiptRequestModel {
        receipt_data: encode_receipt_data(receipt),
        password: claim
            .shared_secret
            .as_ref()
            .filter(|secret| !secret.is_empty())
            .cloned(),
    };
    serde_json::to_value(&model)
        .map_err(|e| ReceiptVerificationError::Validation(format!("{:?}", e)))
}

/// Checks the verified receipt against the claim, failing on the first
/// mismatch. Claim fields that are absent are not checked.
fn reconcile(
    claim: &PurchaseClaim,
    receipt: VerifiedReceipt,
) -> Result<VerifiedReceipt, ReceiptVerificationError> {
    if receipt.line_items.is_empty() {
        warn!(environment = %receipt.environment, "verified receipt has no in_app entries");
        return Err(ReceiptVerificationError::EmptyLineItems {
            receipt: Box::new(receipt),
        });
    }

    if let Some(package_name) = &claim.package_name {
        let actual = receipt.bundle_id().map(str::to_owned);
        if actual.as_deref() != Some(package_name.as_str()) {
            warn!(expected = %package_name, actual = ?actual, "bundle id mismatch");
            return Err(ReceiptVerificationError::BundleMismatch {
                expected: package_name.clone(),
                actual,
                receipt: Box::new(receipt),
            });
        }
    }

    if let Some(product_id) = &claim.product_id {
        if !receipt.has_product(product_id) {
            warn!(expected = %product_id, "product id mismatch");
            return Err(ReceiptVerificationError::ProductMismatch {
                expected: product_id.clone(),
                receipt: Box::new(receipt),
            });
        }
    }

    if let (Some(product_id), Some(transaction_id)) = (&claim.product_id, &claim.transaction_id) {
        // Both ids must appear on the same line item.
        if !receipt.has_purchase(product_id, transaction_id) {
            warn!(product_id = %product_id, expected = %transaction_id, "transaction id mismatch");
            return Err(ReceiptVerificationError::TransactionMismatch {
                expected: transaction_id.clone(),
                receipt: Box::new(receipt),
            });
        }
    }

    Ok(receipt)
}
