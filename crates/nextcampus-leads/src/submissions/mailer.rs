use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::error;

use super::notification::{MailAddressing, Notification};
use super::outbound::{self, AdapterSetupError, OutboundFailure};
use super::retry::RetryPolicy;
use crate::config::{MailerConfig, Secret};

/// Synchronous acceptance from the email provider. Nothing tracks delivery beyond this.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub provider_id: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error(transparent)]
    Outbound(#[from] OutboundFailure),
}

/// Port for handing a notification to an email provider.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, notification: &Notification) -> Result<DeliveryReceipt, DeliveryError>;
}

#[derive(Debug, Serialize)]
struct ResendEmail<'a> {
    from: &'a str,
    to: &'a [String],
    reply_to: &'a str,
    subject: &'a str,
    text: &'a str,
    attachments: [ResendAttachment<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ResendAttachment<'a> {
    filename: &'a str,
    content: &'a str,
    content_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResendAccepted {
    id: Option<String>,
}

/// Resend transactional email client.
#[derive(Debug, Clone)]
pub struct ResendClient {
    http: Client,
    endpoint: String,
    api_key: Secret,
    retry: RetryPolicy,
}

impl ResendClient {
    pub fn from_config(
        config: &MailerConfig,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, AdapterSetupError> {
        let api_key = outbound::require_secret(config.api_key.as_ref(), "MAILER_API_KEY")?;

        Ok(Self {
            http: outbound::build_client(timeout)?,
            endpoint: format!("{}/emails", config.base_url.trim_end_matches('/')),
            api_key,
            retry,
        })
    }
}

impl From<&MailerConfig> for MailAddressing {
    fn from(config: &MailerConfig) -> Self {
        Self {
            from: config.from.clone(),
            to: config.to.clone(),
        }
    }
}

#[async_trait]
impl Notifier for ResendClient {
    async fn deliver(&self, notification: &Notification) -> Result<DeliveryReceipt, DeliveryError> {
        let email = ResendEmail {
            from: &notification.from,
            to: &notification.to,
            reply_to: &notification.reply_to,
            subject: &notification.subject,
            text: &notification.text,
            attachments: [ResendAttachment {
                filename: &notification.attachment.filename,
                content: &notification.attachment.content,
                content_type: &notification.attachment.content_type,
            }],
        };

        let response = outbound::send_with_retry(&self.retry, "email provider", || {
            self.http
                .post(&self.endpoint)
                .bearer_auth(self.api_key.expose())
                .json(&email)
        })
        .await
        .inspect_err(|err| {
            if let OutboundFailure::Status { status, detail, .. } = err {
                error!(%status, detail = %detail, "email provider rejected notification");
            }
        })?;

        let accepted = response.json::<ResendAccepted>().await.ok();
        Ok(DeliveryReceipt {
            provider_id: accepted.and_then(|body| body.id),
        })
    }
}
