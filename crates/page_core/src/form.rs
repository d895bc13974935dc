//! Waitlist form submission: input checks, busy button, and the inline
//! feedback message shown under the form.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use shared::{domain::EmailAddress, protocol::SubscribeRequest};
use tracing::{info, warn};

use crate::client::{SubmitError, SubscriptionApi};

pub const EMPTY_EMAIL_MESSAGE: &str = "Please enter your email address.";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub const SUCCESS_MESSAGE: &str = "Thanks for joining the waitlist! Check your email for updates.";
pub const REJECTED_MESSAGE: &str = "Something went wrong. Please try again.";
pub const NETWORK_MESSAGE: &str = "Network error. Please check your connection and try again.";
pub const SUBMITTING_LABEL: &str = "Joining...";
pub const MESSAGE_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl FormMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == MessageKind::Success
    }
}

/// Trim and check what the visitor typed.
pub fn validate_email_input(raw: &str) -> Result<EmailAddress, FormMessage> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FormMessage::error(EMPTY_EMAIL_MESSAGE));
    }
    EmailAddress::parse(trimmed).map_err(|_| FormMessage::error(INVALID_EMAIL_MESSAGE))
}

/// The form's on-page elements.
pub trait FormView: Send + Sync {
    /// Show `message`, replacing any message already shown.
    fn show_message(&self, message: &FormMessage);
    fn clear_message(&self);
    fn set_submit_button(&self, enabled: bool, label: &str);
    /// Clear the email input.
    fn reset(&self);
}

pub struct WaitlistForm<A, V> {
    api: A,
    view: Arc<V>,
    form_location: Option<String>,
    submit_label: String,
    message_lifetime: Duration,
    message_generation: Arc<AtomicU64>,
}

impl<A, V> WaitlistForm<A, V>
where
    A: SubscriptionApi,
    V: FormView + 'static,
{
    pub fn new(api: A, view: V, form_location: Option<String>, submit_label: impl Into<String>) -> Self {
        Self {
            api,
            view: Arc::new(view),
            form_location,
            submit_label: submit_label.into(),
            message_lifetime: MESSAGE_LIFETIME,
            message_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn with_message_lifetime(mut self, lifetime: Duration) -> Self {
        self.message_lifetime = lifetime;
        self
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Run one submission and return the message shown for it.
    ///
    /// Invalid input never reaches the endpoint. Failures are not retried.
    pub async fn submit(&self, raw_email: &str) -> FormMessage {
        let email = match validate_email_input(raw_email) {
            Ok(email) => email,
            Err(message) => {
                self.show(&message);
                return message;
            }
        };

        self.view.set_submit_button(false, SUBMITTING_LABEL);
        let request = SubscribeRequest::new(email.as_str(), self.form_location.clone());
        let message = match self.api.subscribe(&request).await {
            Ok(response) => {
                info!(
                    form_location = request.form_location_or_unknown(),
                    reply = %response.message,
                    "joined waitlist"
                );
                FormMessage::success(SUCCESS_MESSAGE)
            }
            Err(error @ SubmitError::Rejected { .. }) => {
                warn!(%error, "waitlist signup rejected");
                FormMessage::error(REJECTED_MESSAGE)
            }
            Err(error @ SubmitError::Network(_)) => {
                warn!(%error, "waitlist signup failed to send");
                FormMessage::error(NETWORK_MESSAGE)
            }
        };

        self.show(&message);
        if message.is_success() {
            self.view.reset();
        }
        self.view.set_submit_button(true, &self.submit_label);
        message
    }

    fn show(&self, message: &FormMessage) {
        let generation = self.message_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.view.show_message(message);

        let view = Arc::clone(&self.view);
        let latest = Arc::clone(&self.message_generation);
        let lifetime = self.message_lifetime;
        tokio::spawn(async move {
            tokio::time::sleep(lifetime).await;
            if latest.load(Ordering::SeqCst) == generation {
                view.clear_message();
            }
        });
    }
}
