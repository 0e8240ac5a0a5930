use super::converter::Artifact;
use super::domain::Submission;
use super::forms::{FieldPresence, FormKind};
use super::reference::SubmissionReference;
use super::uk_time;

/// Sender and staff recipient for lead notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailAddressing {
    pub from: String,
    pub to: String,
}

/// Outbound email envelope handed to a [`super::mailer::Notifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: String,
    pub subject: String,
    pub text: String,
    pub attachment: Attachment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    /// Base64-encoded file bytes.
    pub content: String,
    pub content_type: String,
}

pub fn build_notification<F: FormKind>(
    submission: &Submission<F>,
    artifact: &Artifact,
    reference: &SubmissionReference,
    addressing: &MailAddressing,
) -> Notification {
    Notification {
        from: addressing.from.clone(),
        to: vec![addressing.to.clone()],
        reply_to: submission.contact.email.clone(),
        subject: compose_subject(submission),
        text: compose_body(submission),
        attachment: Attachment {
            filename: attachment_filename(submission, reference),
            content: artifact.to_base64(),
            content_type: mime::APPLICATION_PDF.to_string(),
        },
    }
}

/// `[Apply][Home] Jane Doe – September 2025 – Computer Science`
pub fn compose_subject<F: FormKind>(submission: &Submission<F>) -> String {
    format!(
        "[{}][{}] {} – {}",
        F::PROFILE.subject_tag,
        submission.applicant.label(),
        submission.contact.full_name,
        submission.details.subject_detail()
    )
}

/// Plain-text mirror of the document. Optional lines follow the same presence rules.
pub fn compose_body<F: FormKind>(submission: &Submission<F>) -> String {
    let profile = F::PROFILE;
    let fields = submission.details.detail_fields();
    let mut blocks: Vec<String> = Vec::new();

    blocks.push(format!(
        "New {} {}",
        submission.applicant.label(),
        profile.summary_headline
    ));

    let mut details = vec![
        "Student Details:".to_string(),
        format!("- Name: {}", submission.contact.full_name),
        format!("- Email: {}", submission.contact.email),
        format!("- Phone: {}", submission.contact.phone),
    ];
    details.extend(
        fields
            .iter()
            .filter(|field| field.presence == FieldPresence::Required)
            .map(|field| format!("- {}: {}", field.summary_label, field.summary_value)),
    );
    blocks.push(details.join("\n"));

    let optional: Vec<String> = fields
        .iter()
        .filter(|field| field.presence == FieldPresence::Optional)
        .map(|field| format!("{}: {}", field.summary_label, field.summary_value))
        .collect();
    if !optional.is_empty() {
        blocks.push(optional.join("\n"));
    }

    if let Some(message) = &submission.message {
        blocks.push(format!("Message: {message}"));
    }

    blocks.push(format!(
        "Submitted: {} (UK Time)",
        uk_time::short_form(submission.submitted_at)
    ));
    blocks.push(profile.summary_closing.to_string());
    blocks.push(format!("---\nNext Campus UK\n{}", profile.summary_signature));

    blocks.join("\n\n")
}

/// `application-jane-doe-1741617000000-7.pdf`
pub fn attachment_filename<F: FormKind>(
    submission: &Submission<F>,
    reference: &SubmissionReference,
) -> String {
    let name = submission
        .contact
        .full_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    let name = if name.is_empty() {
        "submission".to_string()
    } else {
        name
    };

    format!("{}-{}-{}.pdf", F::PROFILE.kind, name, reference.suffix())
}
