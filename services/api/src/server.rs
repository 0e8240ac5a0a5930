use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_submission_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use nextcampus_leads::config::AppConfig;
use nextcampus_leads::error::AppError;
use nextcampus_leads::submissions::{
    HtmlCssToImageClient, MailAddressing, ResendClient, RetryPolicy, SubmissionPipeline,
};
use nextcampus_leads::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let outbound = &config.outbound;
    let retry = RetryPolicy::from_config(&outbound.retry);
    let converter =
        HtmlCssToImageClient::from_config(&outbound.converter, outbound.timeout, retry.clone())?;
    let notifier = ResendClient::from_config(&outbound.mailer, outbound.timeout, retry.clone())?;
    let pipeline = Arc::new(SubmissionPipeline::new(
        Arc::new(converter),
        Arc::new(notifier),
        MailAddressing::from(&outbound.mailer),
    ));

    let app = with_submission_routes(pipeline)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        max_attempts = retry.max_attempts(),
        "lead intake service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
