use crate::cli::ServeArgs;
use crate::infra::{AppState, TemplateScenarioGenerator, UnavailableCodeEvaluator};
use crate::routes::with_assessment_routes;
use adaptive_assessment::config::AppConfig;
use adaptive_assessment::engine::AssessmentEngine;
use adaptive_assessment::error::AppError;
use adaptive_assessment::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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
        scenarios: Arc::new(TemplateScenarioGenerator::default()),
        code: Arc::new(UnavailableCodeEvaluator),
    };

    let engine = Arc::new(AssessmentEngine::new(config.engine.clone()));

    let app = with_assessment_routes(engine)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, engine = ?config.engine, "adaptive assessment service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
