use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use tracing::error;

use super::converter::DocumentConverter;
use super::error::SubmissionError;
use super::forms::{ApplicationForm, ConsultationForm, FormKind};
use super::mailer::Notifier;
use super::pipeline::SubmissionPipeline;

pub const APPLICATION_PATH: &str = "/api/v1/submit-application";
pub const CONSULTATION_PATH: &str = "/api/v1/submit-consultation";

/// Permissive CORS headers attached to every submission response.
pub fn cors_headers() -> [(HeaderName, &'static str); 3] {
    [
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            "authorization, x-client-info, apikey, content-type",
        ),
        (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
    ]
}

/// Router exposing one endpoint per form kind, all backed by the same pipeline.
pub fn submission_router<C, N>(pipeline: Arc<SubmissionPipeline<C, N>>) -> Router
where
    C: DocumentConverter + 'static,
    N: Notifier + 'static,
{
    Router::new()
        .route(
            APPLICATION_PATH,
            post(submit_handler::<ApplicationForm, C, N>)
                .options(preflight_handler)
                .fallback(method_not_allowed),
        )
        .route(
            CONSULTATION_PATH,
            post(submit_handler::<ConsultationForm, C, N>)
                .options(preflight_handler)
                .fallback(method_not_allowed),
        )
        .with_state(pipeline)
}

pub(crate) async fn preflight_handler() -> Response {
    (StatusCode::OK, cors_headers(), "ok").into_response()
}

pub(crate) async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        cors_headers(),
        "Method not allowed",
    )
        .into_response()
}

/// Outer error boundary: every failure past method dispatch becomes a generic 500.
pub(crate) async fn submit_handler<F, C, N>(
    State(pipeline): State<Arc<SubmissionPipeline<C, N>>>,
    body: Result<Bytes, BytesRejection>,
) -> Response
where
    F: FormKind,
    C: DocumentConverter + 'static,
    N: Notifier + 'static,
{
    let received_at = Utc::now();
    let outcome = match body {
        Ok(body) => {
            // A panic inside the pipeline surfaces as a JoinError rather than a dropped connection.
            let task = tokio::spawn(async move { pipeline.accept::<F>(&body, received_at).await });
            match task.await {
                Ok(outcome) => outcome,
                Err(join_error) => Err(SubmissionError::Unknown(join_error.to_string())),
            }
        }
        Err(rejection) => Err(SubmissionError::Unreadable(rejection)),
    };

    match outcome {
        Ok(acknowledgment) => {
            (StatusCode::OK, cors_headers(), Json(acknowledgment.to_json())).into_response()
        }
        Err(err) => {
            error!(
                form = F::PROFILE.kind,
                kind = err.kind(),
                error = %err,
                "submission failed"
            );
            let payload = json!({
                "success": false,
                "error": F::PROFILE.failure_message,
            });
            (StatusCode::INTERNAL_SERVER_ERROR, cors_headers(), Json(payload)).into_response()
        }
    }
}
