use async_trait::async_trait;
use serde_json::Value;

use crate::errors::TransportError;

pub(crate) struct HttpResponse {
    pub(crate) status: u16,
    pub(crate) body: String,
}

/// POST-capable HTTP client the verifyReceipt datasource sends requests
/// through. Timeouts and connection policy belong to the implementation.
#[async_trait]
pub(crate) trait HttpTransport: Send + Sync {
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse, TransportError>;
}

pub(crate) struct ReqwestHttpTransport {
    client: reqwest::Client,
}

#[async_trait]
impl HttpTransport for ReqwestHttpTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::Send(format!("{:?}", e)))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Send(format!("failed to read body; {:?}", e)))?;
        Ok(HttpResponse { status, body })
    }
}

impl ReqwestHttpTransport {
    pub(crate) fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}
