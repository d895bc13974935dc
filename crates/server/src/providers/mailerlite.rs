use reqwest::{header, Client, StatusCode};
use serde_json::{json, Value};
use shared::domain::{EmailAddress, Provider};
use tracing::{debug, info};

use super::{endpoint, read_response, ProviderError, SubscribeOutcome};
use crate::config::{credential, Settings};

const SUBSCRIBERS_PATH: &str = "/api/subscribers";

/// MailerLite's subscriber API, one group.
pub struct MailerLiteClient {
    http: Client,
    api_base: String,
    api_key: String,
    group_id: String,
}

impl MailerLiteClient {
    pub fn from_settings(http: Client, settings: &Settings) -> Result<Self, ProviderError> {
        let (Some(api_key), Some(group_id)) = (
            credential(&settings.mailerlite_api_key),
            credential(&settings.mailerlite_group_id),
        ) else {
            return Err(ProviderError::MissingCredentials {
                provider: Provider::Mailerlite,
            });
        };

        Ok(Self {
            http,
            api_base: settings.mailerlite_api_base.clone(),
            api_key: api_key.to_string(),
            group_id: group_id.to_string(),
        })
    }

    pub async fn subscribe(&self, email: &EmailAddress) -> Result<SubscribeOutcome, ProviderError> {
        info!(group_id = %self.group_id, "adding subscriber to MailerLite");
        let response = self
            .http
            .post(endpoint(&self.api_base, SUBSCRIBERS_PATH))
            .bearer_auth(&self.api_key)
            .header(header::ACCEPT, "application/json")
            .json(&json!({
                "email": email.as_str(),
                "groups": [self.group_id],
            }))
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                provider: Provider::Mailerlite,
                source,
            })?;

        let (status, details) = read_response(Provider::Mailerlite, response).await?;
        debug!(status, ?details, "MailerLite responded");
        if (200..300).contains(&status) {
            return Ok(SubscribeOutcome::Subscribed);
        }
        if is_existing_subscriber(status, details.as_ref()) {
            return Ok(SubscribeOutcome::AlreadySubscribed);
        }
        Err(ProviderError::Rejected {
            provider: Provider::Mailerlite,
            status,
            details,
        })
    }
}

fn is_existing_subscriber(status: u16, details: Option<&Value>) -> bool {
    status == StatusCode::UNPROCESSABLE_ENTITY.as_u16()
        && details
            .and_then(|body| body.get("message"))
            .and_then(Value::as_str)
            .is_some_and(|message| message.contains("already exists"))
}
