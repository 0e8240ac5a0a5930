use super::common::*;
use crate::submissions::converter::Artifact;
use crate::submissions::notification::{
    attachment_filename, build_notification, compose_body, compose_subject,
};
use crate::submissions::reference::SubmissionReference;

#[test]
fn application_subject_names_intake_and_subject() {
    assert_eq!(
        compose_subject(&home_application()),
        "[Apply][Home] Jane Doe – September 2025 – Computer Science"
    );
}

#[test]
fn consultation_subject_names_topic() {
    assert_eq!(
        compose_subject(&international_consultation()),
        "[Consultation][International] Amara Okafor – Visa & CAS"
    );
}

#[test]
fn body_without_optionals_has_no_optional_lines() {
    let body = compose_body(&home_application());
    for prefix in ["English Test:", "Budget:", "UCAS Status:", "Message:"] {
        assert!(!body.contains(prefix), "unexpected {prefix}");
    }
    assert!(body.starts_with("New Home Student Application Received"));
    assert!(body.contains("- Subject: Computer Science"));
    assert!(body.contains("- Intake: September 2025"));
    assert!(body.contains("Submitted: 10/03/2025, 14:30:00 (UK Time)"));
}

#[test]
fn body_with_optionals_lists_them() {
    let body = compose_body(&international_application());
    assert!(body.contains("English Test: IELTS 7.0"));
    assert!(body.contains("Budget: £20,000 - £25,000"));
    assert!(body.contains("UCAS Status: Not applicable"));
    assert!(body.contains("Message: Interested in scholarships"));
}

#[test]
fn consultation_body_includes_topic_and_action_line() {
    let body = compose_body(&international_consultation());
    assert!(body.contains("- Topic: Visa & CAS"));
    assert!(body.contains("- Preferred Date/Time: 12/03/2025, 10:00:00 (UK Time)"));
    assert!(body.contains("ACTION REQUIRED"));
    assert!(body.ends_with("Automated Consultation System"));
}

#[test]
fn attachment_filename_is_normalised() {
    let mut submission = home_application();
    submission.contact.full_name = "  Mary  Anne O'Neil ".to_string();
    let reference = SubmissionReference::issue("APP", submission.submitted_at);

    let filename = attachment_filename(&submission, &reference);
    assert_eq!(
        filename,
        format!("application-mary-anne-o'neil-{}.pdf", reference.suffix())
    );
}

#[test]
fn notification_replies_to_submitter_and_attaches_pdf() {
    let submission = international_consultation();
    let reference = SubmissionReference::issue("CONSULT", submission.submitted_at);
    let artifact = Artifact::new(PDF_BYTES.to_vec());

    let notification = build_notification(&submission, &artifact, &reference, &addressing());

    assert_eq!(notification.reply_to, "amara@example.com");
    assert_eq!(notification.to, vec!["staff@nextcampus.uk".to_string()]);
    assert_eq!(notification.from, "leads@nextcampus.uk");
    assert_eq!(notification.attachment.content, artifact.to_base64());
    assert_eq!(notification.attachment.content_type, "application/pdf");
    assert!(notification
        .attachment
        .filename
        .starts_with("consultation-amara-okafor-"));
}
