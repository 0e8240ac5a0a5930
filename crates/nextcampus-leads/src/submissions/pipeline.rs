use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::converter::DocumentConverter;
use super::document::render_document;
use super::domain::Submission;
use super::error::SubmissionError;
use super::forms::{FormKind, FormProfile};
use super::mailer::Notifier;
use super::notification::{build_notification, MailAddressing};
use super::reference::SubmissionReference;

/// Successful outcome returned to the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgment {
    pub reference: SubmissionReference,
    pub message: &'static str,
    id_field: &'static str,
}

impl Acknowledgment {
    fn for_form(profile: &FormProfile, reference: SubmissionReference) -> Self {
        Self {
            reference,
            message: profile.success_message,
            id_field: profile.acknowledgment_field,
        }
    }

    /// `{"success": true, "message": ..., "submissionId" | "bookingId": ...}`
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        body.insert("success".to_string(), Value::Bool(true));
        body.insert("message".to_string(), Value::from(self.message));
        body.insert(
            self.id_field.to_string(),
            Value::from(self.reference.to_string()),
        );
        Value::Object(body)
    }
}

/// Render → convert → notify, shared by every form kind.
pub struct SubmissionPipeline<C, N> {
    converter: Arc<C>,
    notifier: Arc<N>,
    addressing: MailAddressing,
}

impl<C, N> SubmissionPipeline<C, N>
where
    C: DocumentConverter + 'static,
    N: Notifier + 'static,
{
    pub fn new(converter: Arc<C>, notifier: Arc<N>, addressing: MailAddressing) -> Self {
        Self {
            converter,
            notifier,
            addressing,
        }
    }

    /// Parse a raw request body, stamp it with `received_at`, then process it.
    pub async fn accept<F: FormKind>(
        &self,
        body: &[u8],
        received_at: DateTime<Utc>,
    ) -> Result<Acknowledgment, SubmissionError> {
        let submission = Submission::<F>::from_json(body, received_at)?;
        self.process(submission).await
    }

    pub async fn process<F: FormKind>(
        &self,
        submission: Submission<F>,
    ) -> Result<Acknowledgment, SubmissionError> {
        let profile = F::PROFILE;
        let reference = SubmissionReference::issue(profile.reference_prefix, submission.submitted_at);
        info!(
            form = profile.kind,
            reference = %reference,
            category = submission.applicant.label(),
            "submission parsed"
        );

        let document = render_document(&submission);
        debug!(reference = %reference, bytes = document.len(), "document rendered");

        let artifact = self.converter.convert(&document).await?;
        debug!(reference = %reference, bytes = artifact.len(), "document converted");

        let notification = build_notification(&submission, &artifact, &reference, &self.addressing);
        let receipt = self.notifier.deliver(&notification).await?;
        info!(
            form = profile.kind,
            reference = %reference,
            provider_id = receipt.provider_id.as_deref().unwrap_or("-"),
            "staff notified"
        );

        Ok(Acknowledgment::for_form(&profile, reference))
    }
}
