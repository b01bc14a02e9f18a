//! Outbound notifications

pub mod webhook;

pub use webhook::{Embed, WebhookNotifier, WebhookPayload};
