use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::ApiError,
    protocol::{SubscribeRequest, SubscribeResponse},
};
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("subscription endpoint answered {status}: {error}")]
    Rejected { status: u16, error: String },
    #[error("subscription endpoint unreachable: {0}")]
    Network(String),
}

/// Where the waitlist form sends its submissions.
#[async_trait]
pub trait SubscriptionApi: Send + Sync {
    async fn subscribe(&self, request: &SubscribeRequest) -> Result<SubscribeResponse, SubmitError>;
}

/// HTTP client for the site's subscription endpoint.
#[derive(Clone)]
pub struct WaitlistClient {
    http: Client,
    endpoint: Url,
}

impl WaitlistClient {
    pub fn new(endpoint: Url) -> Self {
        Self::with_http_client(Client::new(), endpoint)
    }

    pub fn with_http_client(http: Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SubscriptionApi for WaitlistClient {
    async fn subscribe(&self, request: &SubscribeRequest) -> Result<SubscribeResponse, SubmitError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|error| SubmitError::Network(error.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let body = match response.json::<SubscribeResponse>().await {
                Ok(body) => body,
                Err(error) => {
                    warn!(
                        status = status.as_u16(),
                        %error,
                        "success body unreadable; treating as accepted"
                    );
                    SubscribeResponse::subscribed(request.form_location_or_unknown())
                }
            };
            info!(
                status = status.as_u16(),
                form_location = request.form_location_or_unknown(),
                "waitlist subscription accepted"
            );
            return Ok(body);
        }

        let error = match response.json::<ApiError>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string(),
        };
        warn!(status = status.as_u16(), %error, "waitlist subscription rejected");
        Err(SubmitError::Rejected {
            status: status.as_u16(),
            error,
        })
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
