use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use nextcampus_leads::error::AppError;
use nextcampus_leads::submissions::{
    compose_body, compose_subject, render_document, ApplicationForm, ConsultationForm, FormKind,
    Submission,
};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum PreviewForm {
    Application,
    Consultation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum PreviewOutput {
    /// The HTML document sent for PDF conversion
    #[default]
    Html,
    /// The staff email subject and plain-text body
    Email,
}

#[derive(Args, Debug)]
pub(crate) struct PreviewArgs {
    /// Which form the JSON payload belongs to
    #[arg(long, value_enum)]
    pub(crate) form: PreviewForm,
    /// Path to a JSON payload shaped like the browser submission
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// What to print
    #[arg(long, value_enum, default_value_t = PreviewOutput::Html)]
    pub(crate) output: PreviewOutput,
}

pub(crate) fn run_preview(args: PreviewArgs) -> Result<(), AppError> {
    let body = std::fs::read(&args.input)?;
    let rendered = render_preview(args.form, args.output, &body, Utc::now())?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn render_preview(
    form: PreviewForm,
    output: PreviewOutput,
    body: &[u8],
    received_at: DateTime<Utc>,
) -> Result<String, AppError> {
    match form {
        PreviewForm::Application => render_form::<ApplicationForm>(output, body, received_at),
        PreviewForm::Consultation => render_form::<ConsultationForm>(output, body, received_at),
    }
}

fn render_form<F: FormKind>(
    output: PreviewOutput,
    body: &[u8],
    received_at: DateTime<Utc>,
) -> Result<String, AppError> {
    let submission = Submission::<F>::from_json(body, received_at)?;

    Ok(match output {
        PreviewOutput::Html => render_document(&submission).into_string(),
        PreviewOutput::Email => format!(
            "Subject: {}\n\n{}",
            compose_subject(&submission),
            compose_body(&submission)
        ),
    })
}
