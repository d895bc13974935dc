use std::{fmt, str::FromStr, sync::LazyLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label used for submissions that do not say which form they came from.
pub const UNKNOWN_FORM_LOCATION: &str = "unknown";

static EMAIL_RE: LazyLock<Option<regex::Regex>> =
    LazyLock::new(|| regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Check an address against the loose `local@domain.tld` shape the site accepts.
pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(candidate))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid email address: {0:?}")]
pub struct InvalidEmail(pub String);

/// An email address that passed [`is_valid_email`]. The raw text is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(raw: impl Into<String>) -> Result<Self, InvalidEmail> {
        let raw = raw.into();
        if is_valid_email(&raw) {
            Ok(Self(raw))
        } else {
            Err(InvalidEmail(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = InvalidEmail;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Email-marketing provider a subscription is forwarded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    #[default]
    Klaviyo,
    #[serde(alias = "mailer_lite")]
    Mailerlite,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Klaviyo => "klaviyo",
            Provider::Mailerlite => "mailerlite",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown provider {0:?}; expected `klaviyo` or `mailerlite`")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "klaviyo" => Ok(Provider::Klaviyo),
            "mailerlite" | "mailer_lite" => Ok(Provider::Mailerlite),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}
