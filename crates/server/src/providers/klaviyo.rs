use reqwest::{header, Client};
use serde_json::{json, Value};
use shared::domain::{EmailAddress, Provider};
use tracing::{debug, info};

use super::{endpoint, read_response, ProviderError, SubscribeOutcome};
use crate::config::{credential, Settings};

const BULK_SUBSCRIBE_PATH: &str = "/api/profile-subscription-bulk-create-jobs/";

/// Klaviyo's server-side subscription API, one list.
///
/// Subscribing goes through a bulk-subscription job, which Klaviyo accepts
/// for addresses already on the list as well, so duplicates are not errors.
pub struct KlaviyoClient {
    http: Client,
    api_base: String,
    revision: String,
    private_key: String,
    list_id: String,
}

impl KlaviyoClient {
    pub fn from_settings(http: Client, settings: &Settings) -> Result<Self, ProviderError> {
        let (Some(private_key), Some(list_id)) = (
            credential(&settings.klaviyo_private_key),
            credential(&settings.klaviyo_list_id),
        ) else {
            return Err(ProviderError::MissingCredentials {
                provider: Provider::Klaviyo,
            });
        };

        Ok(Self {
            http,
            api_base: settings.klaviyo_api_base.clone(),
            revision: settings.klaviyo_revision.clone(),
            private_key: private_key.to_string(),
            list_id: list_id.to_string(),
        })
    }

    pub async fn subscribe(&self, email: &EmailAddress) -> Result<SubscribeOutcome, ProviderError> {
        info!(list_id = %self.list_id, "sending subscription job to Klaviyo");
        let response = self
            .http
            .post(endpoint(&self.api_base, BULK_SUBSCRIBE_PATH))
            .header(
                header::AUTHORIZATION,
                format!("Klaviyo-API-Key {}", self.private_key),
            )
            .header("revision", &self.revision)
            .json(&bulk_subscription_job(email, &self.list_id))
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                provider: Provider::Klaviyo,
                source,
            })?;

        let (status, details) = read_response(Provider::Klaviyo, response).await?;
        debug!(status, ?details, "Klaviyo responded");
        if (200..300).contains(&status) {
            Ok(SubscribeOutcome::Subscribed)
        } else {
            Err(ProviderError::Rejected {
                provider: Provider::Klaviyo,
                status,
                details,
            })
        }
    }
}

fn bulk_subscription_job(email: &EmailAddress, list_id: &str) -> Value {
    json!({
        "data": {
            "type": "profile-subscription-bulk-create-job",
            "attributes": {
                "profiles": {
                    "data": [
                        {
                            "type": "profile",
                            "attributes": { "email": email.as_str() }
                        }
                    ]
                }
            },
            "relationships": {
                "list": {
                    "data": { "type": "list", "id": list_id }
                }
            }
        }
    })
}
