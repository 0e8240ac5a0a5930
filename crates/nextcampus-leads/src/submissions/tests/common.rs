use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::submissions::converter::{Artifact, ConversionError, DocumentConverter};
use crate::submissions::document::RenderedDocument;
use crate::submissions::domain::{ApplicantCategory, ContactDetails, Submission};
use crate::submissions::forms::{ApplicationForm, ConsultationForm, PreferredSlot};
use crate::submissions::mailer::{DeliveryError, DeliveryReceipt, Notifier};
use crate::submissions::notification::{MailAddressing, Notification};
use crate::submissions::outbound::OutboundFailure;
use crate::submissions::pipeline::SubmissionPipeline;

pub(super) const PDF_BYTES: &[u8] = b"%PDF-1.7 fake";

pub(super) fn received_at() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-03-10T14:30:00Z")
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

pub(super) fn contact(full_name: &str, email: &str) -> ContactDetails {
    ContactDetails {
        full_name: full_name.to_string(),
        email: email.to_string(),
        phone: "+44 7700 900123".to_string(),
    }
}

pub(super) fn home_application() -> Submission<ApplicationForm> {
    Submission {
        applicant: ApplicantCategory::Home,
        contact: contact("Jane Doe", "jane.doe@example.com"),
        details: ApplicationForm {
            highest_qualification: "A-Levels".to_string(),
            intended_level: "Undergraduate".to_string(),
            intended_subject: "Computer Science".to_string(),
            preferred_intake: "September 2025".to_string(),
            english_test: None,
            budget: None,
            ucas_status: None,
        },
        message: None,
        consent: true,
        submitted_at: received_at(),
    }
}

pub(super) fn international_application() -> Submission<ApplicationForm> {
    Submission {
        applicant: ApplicantCategory::International,
        contact: contact("Li Wei", "li.wei@example.com"),
        details: ApplicationForm {
            highest_qualification: "Bachelor's Degree".to_string(),
            intended_level: "Postgraduate".to_string(),
            intended_subject: "Data Science".to_string(),
            preferred_intake: "January 2026".to_string(),
            english_test: Some("IELTS 7.0".to_string()),
            budget: Some("£20,000 - £25,000".to_string()),
            ucas_status: Some("Not applicable".to_string()),
        },
        message: Some("Interested in scholarships".to_string()),
        consent: true,
        submitted_at: received_at(),
    }
}

pub(super) fn international_consultation() -> Submission<ConsultationForm> {
    Submission {
        applicant: ApplicantCategory::International,
        contact: contact("Amara Okafor", "amara@example.com"),
        details: ConsultationForm {
            topic: "Visa & CAS".to_string(),
            preferred_date_time: PreferredSlot("2025-03-12T10:00".to_string()),
        },
        message: Some("First line\nSecond line".to_string()),
        consent: true,
        submitted_at: received_at(),
    }
}

pub(super) fn application_payload() -> Value {
    json!({
        "applicantType": "home",
        "fullName": "Jane Doe",
        "email": "jane.doe@example.com",
        "phone": "+44 7700 900123",
        "highestQualification": "A-Levels",
        "intendedLevel": "Undergraduate",
        "intendedSubject": "Computer Science",
        "preferredIntake": "September 2025",
        "englishTest": "",
        "budget": "",
        "message": "",
        "consent": true
    })
}

pub(super) fn consultation_payload() -> Value {
    json!({
        "applicantType": "international",
        "fullName": "Amara Okafor",
        "email": "amara@example.com",
        "phone": "+234 800 000 0000",
        "topic": "Visa & CAS",
        "preferredDateTime": "2025-03-12T10:00",
        "message": "First line\nSecond line",
        "consent": true
    })
}

pub(super) fn addressing() -> MailAddressing {
    MailAddressing {
        from: "leads@nextcampus.uk".to_string(),
        to: "staff@nextcampus.uk".to_string(),
    }
}

#[derive(Default)]
pub(super) struct RecordingConverter {
    documents: Mutex<Vec<String>>,
}

impl RecordingConverter {
    pub(super) fn documents(&self) -> Vec<String> {
        self.documents.lock().expect("converter mutex").clone()
    }
}

#[async_trait]
impl DocumentConverter for RecordingConverter {
    async fn convert(&self, document: &RenderedDocument) -> Result<Artifact, ConversionError> {
        self.documents
            .lock()
            .expect("converter mutex")
            .push(document.as_str().to_string());
        Ok(Artifact::new(PDF_BYTES.to_vec()))
    }
}

pub(super) struct RejectingConverter;

#[async_trait]
impl DocumentConverter for RejectingConverter {
    async fn convert(&self, _document: &RenderedDocument) -> Result<Artifact, ConversionError> {
        Err(ConversionError::Outbound(OutboundFailure::Status {
            service: "document converter",
            status: StatusCode::UNAUTHORIZED,
            detail: "invalid api key hcti_secret_123".to_string(),
        }))
    }
}

pub(super) struct PanickingConverter;

#[async_trait]
impl DocumentConverter for PanickingConverter {
    async fn convert(&self, _document: &RenderedDocument) -> Result<Artifact, ConversionError> {
        panic!("converter exploded");
    }
}

#[derive(Default)]
pub(super) struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub(super) fn sent(&self) -> Vec<Notification> {
        self.sent.lock().expect("notifier mutex").clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn deliver(&self, notification: &Notification) -> Result<DeliveryReceipt, DeliveryError> {
        self.sent
            .lock()
            .expect("notifier mutex")
            .push(notification.clone());
        Ok(DeliveryReceipt {
            provider_id: Some("email-123".to_string()),
        })
    }
}

pub(super) struct RejectingNotifier;

#[async_trait]
impl Notifier for RejectingNotifier {
    async fn deliver(&self, _notification: &Notification) -> Result<DeliveryReceipt, DeliveryError> {
        Err(DeliveryError::Outbound(OutboundFailure::Status {
            service: "email provider",
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: "reply_to is invalid".to_string(),
        }))
    }
}

pub(super) fn pipeline<C, N>(converter: Arc<C>, notifier: Arc<N>) -> Arc<SubmissionPipeline<C, N>>
where
    C: DocumentConverter + 'static,
    N: Notifier + 'static,
{
    Arc::new(SubmissionPipeline::new(converter, notifier, addressing()))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}
