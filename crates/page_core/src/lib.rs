//! Behaviour behind the waitlist page: the image carousel, the signup form
//! and scroll-aware header links.

pub mod carousel;
pub mod client;
pub mod form;
pub mod scroll_nav;

pub use client::{SubmitError, SubscriptionApi, WaitlistClient};
pub use form::{FormMessage, FormView, MessageKind, WaitlistForm};
