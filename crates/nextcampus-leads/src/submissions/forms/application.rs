use serde::{Deserialize, Serialize};

use super::{DetailField, FormKind, FormProfile};
use crate::submissions::domain::deserialize_optional_text;

/// Academic intent captured by the university application form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationForm {
    pub highest_qualification: String,
    pub intended_level: String,
    pub intended_subject: String,
    pub preferred_intake: String,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub english_test: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub budget: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub ucas_status: Option<String>,
}

impl FormKind for ApplicationForm {
    const PROFILE: FormProfile = FormProfile {
        kind: "application",
        subject_tag: "Apply",
        reference_prefix: "APP",
        acknowledgment_field: "submissionId",
        success_message: "Application submitted successfully",
        failure_message: "Failed to process application. Please try again or contact support.",
        brand_mark: "🎓",
        document_title: "UK University Application",
        document_subtitle: "Student Application Form Submission",
        contact_section: "Personal Information",
        details_section: "Academic Information",
        notice: None,
        footer_note: "This application was submitted through nextcampus.uk",
        summary_headline: "Student Application Received",
        summary_closing: "Please find the complete application details in the attached PDF.",
        summary_signature: "Automated Application System",
    };

    fn subject_detail(&self) -> String {
        format!("{} – {}", self.preferred_intake, self.intended_subject)
    }

    fn detail_fields(&self) -> Vec<DetailField> {
        let mut fields = vec![
            DetailField::required(
                "Highest Qualification",
                "Qualification",
                &self.highest_qualification,
            ),
            DetailField::required("Intended Level", "Level", &self.intended_level),
            DetailField::required("Intended Subject", "Subject", &self.intended_subject),
            DetailField::required("Preferred Intake", "Intake", &self.preferred_intake),
        ];

        fields.extend(
            [
                DetailField::optional(
                    "English Test Score",
                    "English Test",
                    self.english_test.as_ref(),
                ),
                DetailField::optional("Budget Range", "Budget", self.budget.as_ref()),
                DetailField::optional("UCAS Status", "UCAS Status", self.ucas_status.as_ref()),
            ]
            .into_iter()
            .flatten(),
        );

        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submissions::forms::FieldPresence;

    fn form() -> ApplicationForm {
        ApplicationForm {
            highest_qualification: "A-Levels".to_string(),
            intended_level: "Undergraduate".to_string(),
            intended_subject: "Computer Science".to_string(),
            preferred_intake: "September 2025".to_string(),
            english_test: None,
            budget: None,
            ucas_status: None,
        }
    }

    #[test]
    fn subject_detail_names_intake_then_subject() {
        assert_eq!(form().subject_detail(), "September 2025 – Computer Science");
    }

    #[test]
    fn absent_optionals_are_not_listed() {
        let fields = form().detail_fields();
        assert_eq!(fields.len(), 4);
        assert!(fields
            .iter()
            .all(|field| field.presence == FieldPresence::Required));
    }

    #[test]
    fn present_optionals_follow_required_fields() {
        let mut form = form();
        form.budget = Some("£15k-£20k".to_string());
        let fields = form.detail_fields();
        let last = fields.last().expect("fields present");
        assert_eq!(last.label, "Budget Range");
        assert_eq!(last.presence, FieldPresence::Optional);
    }

    #[test]
    fn empty_optional_inputs_deserialize_as_absent() {
        let form: ApplicationForm = serde_json::from_str(
            r#"{"highestQualification":"BTEC","intendedLevel":"Foundation","intendedSubject":"Nursing","preferredIntake":"January 2026","englishTest":"","budget":null}"#,
        )
        .expect("parses");
        assert!(form.english_test.is_none());
        assert!(form.budget.is_none());
        assert!(form.ucas_status.is_none());
    }
}
