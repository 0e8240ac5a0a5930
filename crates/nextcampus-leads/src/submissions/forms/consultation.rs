use serde::{Deserialize, Serialize};

use super::{DetailField, FieldPresence, FormKind, FormProfile};
use crate::submissions::uk_time;

/// Requested appointment time, kept exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferredSlot(pub String);

impl PreferredSlot {
    /// Document rendering; unparseable input is shown verbatim.
    pub fn long_display(&self) -> String {
        match uk_time::parse_client_instant(&self.0) {
            Some(instant) => format!("{} (UK Time)", uk_time::long_form(instant)),
            None => self.0.clone(),
        }
    }

    /// Email rendering; unparseable input is shown verbatim.
    pub fn short_display(&self) -> String {
        match uk_time::parse_client_instant(&self.0) {
            Some(instant) => format!("{} (UK Time)", uk_time::short_form(instant)),
            None => self.0.clone(),
        }
    }
}

/// Topic and slot captured by the free consultation booking form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationForm {
    pub topic: String,
    pub preferred_date_time: PreferredSlot,
}

impl FormKind for ConsultationForm {
    const PROFILE: FormProfile = FormProfile {
        kind: "consultation",
        subject_tag: "Consultation",
        reference_prefix: "CONSULT",
        acknowledgment_field: "bookingId",
        success_message: "Consultation request submitted successfully",
        failure_message:
            "Failed to process consultation request. Please try again or contact support.",
        brand_mark: "📅",
        document_title: "Consultation Booking Request",
        document_subtitle: "Free Educational Guidance Session",
        contact_section: "Contact Information",
        details_section: "Consultation Details",
        notice: Some(
            "Please contact the student within 24 hours to confirm the consultation appointment.",
        ),
        footer_note: "This consultation request was submitted through nextcampus.uk",
        summary_headline: "Student Consultation Request",
        summary_closing: "ACTION REQUIRED: Please contact the student within 24 hours to confirm the consultation appointment.",
        summary_signature: "Automated Consultation System",
    };

    fn subject_detail(&self) -> String {
        self.topic.clone()
    }

    fn detail_fields(&self) -> Vec<DetailField> {
        vec![
            DetailField::required("Topic", "Topic", &self.topic),
            DetailField {
                label: "Preferred Date/Time",
                summary_label: "Preferred Date/Time",
                value: self.preferred_date_time.long_display(),
                summary_value: self.preferred_date_time.short_display(),
                presence: FieldPresence::Required,
            },
        ]
    }
}
