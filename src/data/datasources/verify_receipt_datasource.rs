use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    data::{
        datasources::http_transport::HttpTransport,
        models::verify_receipt::response_model::VerifyReceiptResponseModel,
    },
    domain::entities::{
        raw_receipt::RawReceipt, verified_receipt::LineItem,
        verify_receipt_status::VerifyReceiptStatus,
    },
    errors::{ReceiptVerificationError, TransportError},
};

/// A status-0 verifyReceipt response, not yet tagged with the environment
/// that produced it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ReceiptVerificationModel {
    pub(crate) raw_receipt: RawReceipt,
    pub(crate) line_items: Vec<LineItem>,
}

#[async_trait]
pub(crate) trait VerifyReceiptDatasource: Send + Sync {
    /// verifyReceipt:
    /// https://developer.apple.com/documentation/appstorereceipts/verifyreceipt
    ///
    /// endpoint:
    ///   Production or sandbox verifyReceipt URL.
    /// request:
    ///   JSON request body, containing 'receipt-data' and optionally
    ///   'password'.
    async fn verify(
        &self,
        endpoint: &str,
        request: &Value,
    ) -> Result<ReceiptVerificationModel, ReceiptVerificationError>;
}

pub(crate) struct VerifyReceiptDatasourceImpl<T: HttpTransport> {
    transport: T,
}

#[async_trait]
impl<T: HttpTransport> VerifyReceiptDatasource for VerifyReceiptDatasourceImpl<T> {
    async fn verify(
        &self,
        endpoint: &str,
        request: &Value,
    ) -> Result<ReceiptVerificationModel, ReceiptVerificationError> {
        let response = self.transport.post_json(endpoint, request).await?;
        debug!(endpoint, status = response.status, "verifyReceipt callout returned");
        if response.status != 200 {
            warn!(endpoint, status = response.status, "verifyReceipt returned non-200 status code");
            return Err(TransportError::HttpStatus {
                status: response.status,
                body: response.body,
            }
            .into());
        }
        parse_response(&response.body)
    }
}

impl<T: HttpTransport> VerifyReceiptDatasourceImpl<T> {
    pub(crate) fn new(transport: T) -> Self {
        Self { transport }
    }
}

fn parse_response(body: &str) -> Result<ReceiptVerificationModel, ReceiptVerificationError> {
    let model: VerifyReceiptResponseModel = serde_json::from_str(body)
        .map_err(|e| ReceiptVerificationError::MalformedResponse(format!("{}", e)))?;
    let status = VerifyReceiptStatus::from_code(model.status);
    if status != VerifyReceiptStatus::Valid {
        return Err(ReceiptVerificationError::service(status));
    }
    let raw_receipt = model.receipt.ok_or_else(|| {
        ReceiptVerificationError::MalformedResponse("status 0 without a receipt".to_owned())
    })?;
    let line_items = raw_receipt.line_items();
    Ok(ReceiptVerificationModel {
        raw_receipt,
        line_items,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::data::datasources::http_transport::HttpResponse;

    struct StubTransport {
        response: Mutex<Option<Result<HttpResponse, TransportError>>>,
        calls: Mutex<Vec<(String, Value)>>,
    }

    impl StubTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                response: Mutex::new(Some(Ok(HttpResponse {
                    status,
                    body: body.to_owned(),
                }))),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                response: Mutex::new(Some(Err(TransportError::Send(
                    "connection refused".to_owned(),
                )))),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl HttpTransport for StubTransport {
        async fn post_json(
            &self,
            url: &str,
            body: &Value,
        ) -> Result<HttpResponse, TransportError> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_owned(), body.clone()));
            self.response.lock().unwrap().take().expect("single call")
        }
    }

    async fn verify_with(
        transport: StubTransport,
    ) -> Result<ReceiptVerificationModel, ReceiptVerificationError> {
        VerifyReceiptDatasourceImpl::new(transport)
            .verify("https://verify.test", &json!({ "receipt-data": "abc" }))
            .await
    }

    #[tokio::test]
    async fn test_request_is_posted_to_endpoint() {
        let transport = StubTransport::replying(200, r#"{"status":0,"receipt":{}}"#);
        let datasource = VerifyReceiptDatasourceImpl::new(transport);
        let request = json!({ "receipt-data": "abc", "password": "s3cret" });
        datasource.verify("https://verify.test", &request).await.unwrap();
        let calls = datasource.transport.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[("https://verify.test".to_owned(), request)]);
    }

    #[tokio::test]
    async fn test_line_items_follow_in_app_order() {
        let body = json!({
            "status": 0,
            "receipt": {
                "bundle_id": "com.x.app",
                "in_app": [
                    { "product_id": "p1", "transaction_id": "t1", "quantity": "1" },
                    { "product_id": "p2", "transaction_id": "t2" }
                ]
            }
        })
        .to_string();
        let model = verify_with(StubTransport::replying(200, &body)).await.unwrap();
        assert_eq!(
            model.line_items,
            vec![
                LineItem {
                    product_id: Some("p1".to_owned()),
                    transaction_id: Some("t1".to_owned()),
                },
                LineItem {
                    product_id: Some("p2".to_owned()),
                    transaction_id: Some("t2".to_owned()),
                },
            ]
        );
        assert_eq!(model.raw_receipt.bundle_identifier(), Some("com.x.app"));
    }

    #[tokio::test]
    async fn test_numeric_ids_do_not_fail_the_parse() {
        let body = r#"{"status":0,"receipt":{"bid":"com.x.app","in_app":[{"product_id":1001,"transaction_id":"t1"}]}}"#;
        let model = verify_with(StubTransport::replying(200, body)).await.unwrap();
        assert_eq!(
            model.line_items,
            vec![LineItem {
                product_id: None,
                transaction_id: Some("t1".to_owned()),
            }]
        );
    }

    #[tokio::test]
    async fn test_missing_in_app_yields_no_line_items() {
        let body = r#"{"status":0,"receipt":{"bid":"com.x.app"}}"#;
        let model = verify_with(StubTransport::replying(200, body)).await.unwrap();
        assert!(model.line_items.is_empty());
    }

    #[tokio::test]
    async fn test_non_zero_status_maps_to_service_error() {
        let err = verify_with(StubTransport::replying(200, r#"{"status":21003}"#))
            .await
            .unwrap_err();
        match err {
            ReceiptVerificationError::Service { code, message } => {
                assert_eq!(code, 21003);
                assert_eq!(message, "The receipt could not be authenticated.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_status_message() {
        let err = verify_with(StubTransport::replying(200, r#"{"status":99999}"#))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Unknown status code: 99999");
        assert_eq!(err.service_status(), Some(VerifyReceiptStatus::Unknown(99999)));
    }

    #[tokio::test]
    async fn test_non_200_carries_status_and_body() {
        let err = verify_with(StubTransport::replying(503, "try later"))
            .await
            .unwrap_err();
        assert!(matches!(
            &err,
            ReceiptVerificationError::Transport(TransportError::HttpStatus { status: 503, body })
                if body == "try later"
        ));
        assert_eq!(err.to_string(), "Received 503 status code with body: try later");
    }

    #[tokio::test]
    async fn test_send_failure_is_transport_error() {
        let err = verify_with(StubTransport::failing()).await.unwrap_err();
        assert!(matches!(
            err,
            ReceiptVerificationError::Transport(TransportError::Send(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_json_is_malformed_response() {
        let err = verify_with(StubTransport::replying(200, "<html>"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReceiptVerificationError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_success_without_receipt_is_malformed_response() {
        let err = verify_with(StubTransport::replying(200, r#"{"status":0}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, ReceiptVerificationError::MalformedResponse(_)));
    }
}
