use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::UNKNOWN_FORM_LOCATION;

pub const SUBSCRIBED_MESSAGE: &str = "Successfully subscribed to waitlist";
pub const ALREADY_SUBSCRIBED_MESSAGE: &str = "Email already subscribed to waitlist";

/// Body the page posts to the subscription endpoint.
///
/// Both fields are read leniently: a missing, null or non-string value
/// decodes to `None`, leaving the endpoint to answer with its own 400.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    #[serde(default, deserialize_with = "string_or_none")]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub form_location: Option<String>,
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

impl SubscribeRequest {
    pub fn new(email: impl Into<String>, form_location: Option<String>) -> Self {
        Self {
            email: Some(email.into()),
            form_location,
        }
    }

    /// Form location for logging and echoing, `"unknown"` when absent or blank.
    pub fn form_location_or_unknown(&self) -> &str {
        self.form_location
            .as_deref()
            .map(str::trim)
            .filter(|location| !location.is_empty())
            .unwrap_or(UNKNOWN_FORM_LOCATION)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_location: Option<String>,
}

impl SubscribeResponse {
    pub fn subscribed(form_location: impl Into<String>) -> Self {
        Self {
            success: true,
            message: SUBSCRIBED_MESSAGE.to_string(),
            form_location: Some(form_location.into()),
        }
    }

    pub fn already_subscribed(form_location: impl Into<String>) -> Self {
        Self {
            success: true,
            message: ALREADY_SUBSCRIBED_MESSAGE.to_string(),
            form_location: Some(form_location.into()),
        }
    }
}
