//! Outbound calls to the email-marketing providers.
//!
//! Each provider gets its own request shape; the only thing they share is
//! how a response is read back and how failures are classified.

use reqwest::{Client, Response};
use serde_json::Value;
use shared::domain::{EmailAddress, Provider};
use thiserror::Error;
use tracing::warn;

use crate::config::Settings;

pub mod klaviyo;
pub mod mailerlite;

pub use klaviyo::KlaviyoClient;
pub use mailerlite::MailerLiteClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Subscribed,
    AlreadySubscribed,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} credentials are not configured")]
    MissingCredentials { provider: Provider },
    #[error("request to {provider} failed: {source}")]
    Transport {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },
    #[error("{provider} rejected the subscription with status {status}")]
    Rejected {
        provider: Provider,
        status: u16,
        details: Option<Value>,
    },
}

/// Add `email` to the list `provider` is configured with.
pub async fn forward(
    provider: Provider,
    http: &Client,
    settings: &Settings,
    email: &EmailAddress,
) -> Result<SubscribeOutcome, ProviderError> {
    match provider {
        Provider::Klaviyo => {
            KlaviyoClient::from_settings(http.clone(), settings)?
                .subscribe(email)
                .await
        }
        Provider::Mailerlite => {
            MailerLiteClient::from_settings(http.clone(), settings)?
                .subscribe(email)
                .await
        }
    }
}

/// Status plus the body parsed as JSON, when there is one.
pub(crate) async fn read_response(
    provider: Provider,
    response: Response,
) -> Result<(u16, Option<Value>), ProviderError> {
    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|source| ProviderError::Transport { provider, source })?;

    if text.trim().is_empty() {
        return Ok((status, None));
    }
    match serde_json::from_str(&text) {
        Ok(body) => Ok((status, Some(body))),
        Err(error) => {
            warn!(%provider, status, %error, "provider response is not JSON");
            Ok((status, None))
        }
    }
}

pub(crate) fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
