//! Per-form field sets and copy. The pipeline, renderer, and notifier are generic over
//! [`FormKind`], so adding a field means touching exactly one form module.

mod application;
mod consultation;

pub use application::ApplicationForm;
pub use consultation::{ConsultationForm, PreferredSlot};

use serde::de::DeserializeOwned;

/// Static copy and identifiers that differ between the two forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormProfile {
    /// Lowercase name used in logs and attachment filenames.
    pub kind: &'static str,
    pub subject_tag: &'static str,
    pub reference_prefix: &'static str,
    /// Key under which the acknowledgment id is returned to the browser.
    pub acknowledgment_field: &'static str,
    pub success_message: &'static str,
    pub failure_message: &'static str,
    pub brand_mark: &'static str,
    pub document_title: &'static str,
    pub document_subtitle: &'static str,
    pub contact_section: &'static str,
    pub details_section: &'static str,
    pub notice: Option<&'static str>,
    pub footer_note: &'static str,
    pub summary_headline: &'static str,
    pub summary_closing: &'static str,
    pub summary_signature: &'static str,
}

/// Whether a detail field is always present or only when the submitter filled it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPresence {
    Required,
    Optional,
}

/// A single form-specific value as it appears in the document and the email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    pub label: &'static str,
    pub summary_label: &'static str,
    pub value: String,
    pub summary_value: String,
    pub presence: FieldPresence,
}

impl DetailField {
    pub(crate) fn required(label: &'static str, summary_label: &'static str, value: &str) -> Self {
        Self {
            label,
            summary_label,
            value: value.to_string(),
            summary_value: value.to_string(),
            presence: FieldPresence::Required,
        }
    }

    pub(crate) fn optional(
        label: &'static str,
        summary_label: &'static str,
        value: Option<&String>,
    ) -> Option<Self> {
        value.map(|value| Self {
            label,
            summary_label,
            value: value.clone(),
            summary_value: value.clone(),
            presence: FieldPresence::Optional,
        })
    }
}

/// Field set and template for one kind of form.
pub trait FormKind: DeserializeOwned + Send + Sync + 'static {
    const PROFILE: FormProfile;

    /// Distinguishing detail appended to the email subject after the submitter's name.
    fn subject_detail(&self) -> String;

    /// Form-specific fields in display order; absent optional fields are omitted.
    fn detail_fields(&self) -> Vec<DetailField>;
}
