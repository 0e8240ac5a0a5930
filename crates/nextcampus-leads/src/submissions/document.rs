//! Staff-facing HTML record of a submission, later converted to PDF.
//!
//! Output is self-contained (inline styles only) and a pure function of the
//! submission, so rendering the same submission twice is byte-identical.

use super::domain::{ApplicantCategory, Submission};
use super::forms::FormKind;
use super::uk_time;

/// HTML document ready for conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument(String);

impl RenderedDocument {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

const BRAND_COLOR: &str = "#1e3a8a";

pub fn render_document<F: FormKind>(submission: &Submission<F>) -> RenderedDocument {
    let profile = F::PROFILE;
    let mut html = String::with_capacity(4096);

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str(&stylesheet(submission.applicant));
    html.push_str("</head>\n<body>\n");

    html.push_str(&format!(
        "<div class=\"header\">\n<div class=\"logo\">{} Next Campus</div>\n<div class=\"title\">{}</div>\n<div class=\"subtitle\">{}</div>\n<div style=\"margin-top: 15px;\"><span class=\"badge\">{}</span></div>\n</div>\n",
        profile.brand_mark,
        profile.document_title,
        profile.document_subtitle,
        submission.applicant.badge_label(),
    ));

    let contact = &submission.contact;
    html.push_str(&section_open(profile.contact_section));
    html.push_str(&field_row("Full Name", &escape_html(&contact.full_name)));
    html.push_str(&field_row("Email", &escape_html(&contact.email)));
    html.push_str(&field_row("Phone/WhatsApp", &escape_html(&contact.phone)));
    html.push_str("</div>\n");

    html.push_str(&section_open(profile.details_section));
    for field in submission.details.detail_fields() {
        html.push_str(&field_row(field.label, &escape_html(&field.value)));
    }
    html.push_str("</div>\n");

    if let Some(message) = &submission.message {
        html.push_str(&section_open("Additional Message"));
        html.push_str(&format!(
            "<div class=\"message\">{}</div>\n</div>\n",
            message_markup(message)
        ));
    }

    if let Some(notice) = profile.notice {
        html.push_str(&format!(
            "<div class=\"highlight\"><strong>Action Required:</strong> {notice}</div>\n"
        ));
    }

    html.push_str(&section_open("Submission Details"));
    html.push_str(&field_row(
        "Submitted",
        &format!("{} (UK Time)", uk_time::long_form(submission.submitted_at)),
    ));
    let consent = if submission.consent {
        "✅ Yes - Data processing consent provided"
    } else {
        "No - consent not recorded"
    };
    html.push_str(&field_row("Consent Given", consent));
    html.push_str("</div>\n");

    html.push_str(&format!(
        "<div class=\"footer\">\n<p><strong>Next Campus UK</strong> | Education Consultancy</p>\n<p>{}</p>\n</div>\n",
        profile.footer_note
    ));
    html.push_str("</body>\n</html>\n");

    RenderedDocument(html)
}

fn stylesheet(category: ApplicantCategory) -> String {
    let accent = category.accent();
    format!(
        "<style>
body {{ font-family: Arial, sans-serif; margin: 40px; color: #333; }}
.header {{ text-align: center; margin-bottom: 30px; border-bottom: 2px solid {BRAND_COLOR}; padding-bottom: 20px; }}
.logo {{ color: {BRAND_COLOR}; font-size: 24px; font-weight: bold; margin-bottom: 10px; }}
.title {{ color: {BRAND_COLOR}; font-size: 20px; margin-bottom: 5px; }}
.subtitle {{ color: #666; font-size: 14px; }}
.section {{ margin: 25px 0; }}
.section-title {{ color: {BRAND_COLOR}; font-size: 16px; font-weight: bold; margin-bottom: 15px; border-bottom: 1px solid #e5e7eb; padding-bottom: 5px; }}
.field {{ margin: 10px 0; display: flex; }}
.field-label {{ font-weight: bold; width: 180px; color: #374151; }}
.field-value {{ color: #111827; }}
.badge {{ display: inline-block; background: {}; color: {}; padding: 4px 12px; border-radius: 20px; font-size: 12px; font-weight: bold; text-transform: uppercase; }}
.message {{ background: #f9fafb; padding: 15px; border-radius: 8px; border-left: 4px solid {BRAND_COLOR}; }}
.highlight {{ background: #fef3c7; padding: 15px; border-radius: 8px; border-left: 4px solid #f59e0b; margin: 15px 0; }}
.footer {{ margin-top: 40px; padding-top: 20px; border-top: 1px solid #e5e7eb; font-size: 12px; color: #666; text-align: center; }}
</style>
",
        accent.background, accent.foreground
    )
}

fn section_open(title: &str) -> String {
    format!("<div class=\"section\">\n<div class=\"section-title\">{title}</div>\n")
}

/// `value` must already be escaped.
fn field_row(label: &str, value: &str) -> String {
    format!(
        "<div class=\"field\"><div class=\"field-label\">{label}:</div><div class=\"field-value\">{value}</div></div>\n"
    )
}

/// Escape first, then turn each line break into `<br>`.
pub(crate) fn message_markup(message: &str) -> String {
    escape_html(message)
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\n', "<br>")
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
