use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use contacts::api::rest::routes::{ConcreteService, router};
use contacts::domain::clock::SystemClock;
use contacts::domain::service::Service;
use contacts::infra::storage::{SeaOrmContactsRepository, connect};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::field::Empty;

use crate::config::{AppConfig, ServerConfig};

/// Wrap the contacts router with the HTTP middleware stack.
///
/// Requests flow Trace -> Timeout -> `BodyLimit` -> routes.
pub fn build_app(service: Arc<ConcreteService>, cfg: &ServerConfig) -> Router {
    router(service, &cfg.api_prefix)
        .layer(DefaultBodyLimit::max(cfg.body_limit_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(cfg.request_timeout_secs),
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<axum::body::Body>| {
                    tracing::info_span!(
                        "http_request",
                        method = %req.method(),
                        uri = %req.uri().path(),
                        version = ?req.version(),
                        status = Empty,
                        latency_ms = Empty,
                    )
                })
                .on_response(
                    |res: &axum::http::Response<axum::body::Body>,
                     latency: Duration,
                     span: &tracing::Span| {
                        span.record("status", res.status().as_u16());
                        span.record("latency_ms", latency.as_millis());
                        tracing::info!(parent: span, "request completed");
                    },
                ),
        )
}

/// Connect to the database, build the service and serve until a shutdown
/// signal arrives.
///
/// # Errors
/// Returns an error if the database is unreachable, migrations fail or the
/// listener cannot be bound.
pub async fn run_server(config: AppConfig) -> Result<()> {
    let addr = config.bind_addr()?;

    let db = connect(&config.database).await?;
    let repo = Arc::new(SeaOrmContactsRepository::new(db.clone()));
    let service = Arc::new(Service::new(
        repo,
        Arc::new(SystemClock),
        config.contacts.clone().into(),
    ));
    let app = build_app(service, &config.server);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, api_prefix = %config.server.api_prefix, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(crate::signals::shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped, closing database pool");
    db.close().await.context("failed to close database pool")?;
    Ok(())
}
