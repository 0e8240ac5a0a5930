use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Two-valued classification driving badge styling and copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicantCategory {
    Home,
    International,
}

impl ApplicantCategory {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicantCategory::Home => "Home",
            ApplicantCategory::International => "International",
        }
    }

    pub const fn badge_label(self) -> &'static str {
        match self {
            ApplicantCategory::Home => "Home Student",
            ApplicantCategory::International => "International Student",
        }
    }

    pub const fn accent(self) -> BadgeAccent {
        match self {
            ApplicantCategory::Home => BadgeAccent {
                background: "#dbeafe",
                foreground: "#1e40af",
            },
            ApplicantCategory::International => BadgeAccent {
                background: "#fed7aa",
                foreground: "#ea580c",
            },
        }
    }
}

/// Badge colour pair rendered in the document header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeAccent {
    pub background: &'static str,
    pub foreground: &'static str,
}

/// Contact fields shared by every form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

/// Body exactly as posted by the web form, before the server stamps it.
///
/// Unknown keys (including any client-side `submittedAt`) are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload<F> {
    pub applicant_type: ApplicantCategory,
    #[serde(flatten)]
    pub contact: ContactDetails,
    #[serde(flatten)]
    pub details: F,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub message: Option<String>,
    #[serde(default)]
    pub consent: bool,
}

/// Request-scoped record of a form submission. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission<F> {
    pub applicant: ApplicantCategory,
    pub contact: ContactDetails,
    pub details: F,
    pub message: Option<String>,
    pub consent: bool,
    pub submitted_at: DateTime<Utc>,
}

impl<F> Submission<F> {
    /// Stamp a parsed payload with the server-observed receive time.
    pub fn received(payload: SubmissionPayload<F>, received_at: DateTime<Utc>) -> Self {
        let SubmissionPayload {
            applicant_type,
            contact,
            details,
            message,
            consent,
        } = payload;

        Self {
            applicant: applicant_type,
            contact,
            details,
            message,
            consent,
            submitted_at: received_at,
        }
    }
}

impl<F: DeserializeOwned> Submission<F> {
    /// Structural JSON parse of a raw request body followed by server stamping.
    pub fn from_json(body: &[u8], received_at: DateTime<Utc>) -> Result<Self, serde_json::Error> {
        let payload: SubmissionPayload<F> = serde_json::from_slice(body)?;
        Ok(Self::received(payload, received_at))
    }
}

/// Optional form inputs arrive as `""` when left untouched; treat blanks as absent.
pub(crate) fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
