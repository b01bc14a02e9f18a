//! Webhook notifier for the per-pass news feed
//!
//! Each configured URL receives one rich embed per pass. Delivery is best
//! effort: failures are logged and reported back, never retried.

use crate::core::config::AutowarConfig;
use crate::core::error::{AutowarError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Posts pass summaries to a list of webhook endpoints
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: Client,
    urls: Vec<String>,
    title: String,
}

impl WebhookNotifier {
    pub fn new(urls: Vec<String>, title: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            urls,
            title: title.into(),
        }
    }

    /// `None` when no webhook is configured
    pub fn from_config(config: &AutowarConfig) -> Option<Self> {
        if config.webhook_urls.is_empty() {
            return None;
        }
        Some(Self::new(config.webhook_urls.clone(), config.webhook_title.clone()))
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn payload(&self, message: &str) -> WebhookPayload {
        WebhookPayload {
            embeds: vec![Embed {
                title: self.title.clone(),
                kind: "rich".into(),
                description: message.into(),
            }],
        }
    }

    /// Send `message` to every URL, one request each.
    ///
    /// Returns the outcome per URL in configuration order.
    pub async fn send(&self, message: &str) -> Vec<(String, Result<()>)> {
        let payload = self.payload(message);
        let mut outcomes = Vec::with_capacity(self.urls.len());

        for url in &self.urls {
            let outcome = self.post(url, &payload).await;
            match &outcome {
                Ok(()) => tracing::debug!("Webhook delivered to {}", url),
                Err(e) => tracing::warn!("Webhook to {} failed: {}", url, e),
            }
            outcomes.push((url.clone(), outcome));
        }

        outcomes
    }

    async fn post(&self, url: &str, payload: &WebhookPayload) -> Result<()> {
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| AutowarError::Notify(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AutowarError::Notify(format!("{}: {}", status, error_text)));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        let notifier = WebhookNotifier::new(vec!["http://localhost/hook".into()], "Autowar Turn");
        let json = serde_json::to_value(notifier.payload("Davion invaded Tikonov\n")).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "embeds": [{
                    "title": "Autowar Turn",
                    "type": "rich",
                    "description": "Davion invaded Tikonov\n"
                }]
            })
        );
    }

    #[test]
    fn test_no_urls_means_no_notifier() {
        assert!(WebhookNotifier::from_config(&AutowarConfig::default()).is_none());

        let config = AutowarConfig {
            webhook_urls: vec!["http://localhost/a".into(), "http://localhost/b".into()],
            ..Default::default()
        };
        let notifier = WebhookNotifier::from_config(&config).unwrap();
        assert_eq!(notifier.urls().len(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_url_reports_failure() {
        // Port 9 (discard) on localhost is not expected to speak HTTP
        let notifier = WebhookNotifier::new(vec!["http://127.0.0.1:9/hook".into()], "Autowar Turn");
        let outcomes = notifier.send("line\n").await;
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].1.is_err());
    }
}
