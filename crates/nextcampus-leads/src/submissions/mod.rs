//! Lead intake for the application and consultation forms.
//!
//! Each request is parsed into a [`Submission`], rendered to HTML, converted to a PDF
//! by an external service, and mailed to staff with the PDF attached. Nothing is
//! stored; every value lives only as long as the request.

pub mod converter;
pub mod document;
pub mod domain;
pub mod error;
pub mod forms;
pub mod mailer;
pub mod notification;
mod outbound;
pub mod pipeline;
pub mod reference;
pub mod retry;
pub mod router;
pub mod uk_time;

#[cfg(test)]
mod tests;

pub use converter::{
    Artifact, ConversionError, DocumentConverter, HtmlCssToImageClient, PageLayout,
};
pub use document::{render_document, RenderedDocument};
pub use domain::{ApplicantCategory, BadgeAccent, ContactDetails, Submission, SubmissionPayload};
pub use error::SubmissionError;
pub use forms::{ApplicationForm, ConsultationForm, FormKind, FormProfile, PreferredSlot};
pub use mailer::{DeliveryError, DeliveryReceipt, Notifier, ResendClient};
pub use notification::{
    attachment_filename, build_notification, compose_body, compose_subject, Attachment,
    MailAddressing, Notification,
};
pub use outbound::{AdapterSetupError, OutboundFailure};
pub use pipeline::{Acknowledgment, SubmissionPipeline};
pub use reference::SubmissionReference;
pub use retry::RetryPolicy;
pub use router::{cors_headers, submission_router, APPLICATION_PATH, CONSULTATION_PATH};
