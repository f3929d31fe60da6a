pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod schema;
pub mod store;
pub mod telemetry;

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::MatchedPath;
use axum::http::{header, HeaderValue, Method, Request};
use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;
use utoipa_swagger_ui::SwaggerUi;

use api::AppError;
use store::{RecipeStore, StoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecipeStore>,
    /// Include raw error details in 500 responses (development mode)
    pub expose_errors: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn RecipeStore>, expose_errors: bool) -> Self {
        Self {
            store,
            expose_errors,
        }
    }

    /// Log an unexpected failure and turn it into the generic 500 error.
    pub fn internal(&self, message: &'static str, err: impl Display) -> AppError {
        tracing::error!("{}: {}", message, err);
        AppError::Internal {
            message,
            detail: self.expose_errors.then(|| err.to_string()),
        }
    }

    /// Map a gateway failure: bad ids and rule violations are client errors,
    /// anything else is internal.
    pub fn store_error(&self, message: &'static str, err: StoreError) -> AppError {
        match err {
            StoreError::MalformedId(_) => AppError::MalformedId,
            StoreError::Validation(errors) => AppError::Validation(errors),
            other => self.internal(message, other),
        }
    }
}

/// CORS policy allowing the configured frontend origin.
pub fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    let origin = HeaderValue::from_str(origin)
        .map_err(|e| anyhow::anyhow!("Invalid CORS_ORIGIN {:?}: {}", origin, e))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60)))
}

/// Build the full application router.
pub fn app(state: AppState, cors: CorsLayer) -> Router {
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());
    let expose_errors = state.expose_errors;

    Router::new()
        .route("/health", get(api::health::health))
        .nest("/api/recipes", api::recipes::router())
        .merge(swagger_ui)
        .fallback(api::error::route_not_found)
        .method_not_allowed_fallback(api::error::route_not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(api::error::panic_response(
            expose_errors,
        )))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    // Health probes are noisy; keep them out of info logs
                    if matched_path == "/health" {
                        tracing::trace_span!("http_request")
                    } else {
                        tracing::info_span!(
                            "http_request",
                            method = %request.method(),
                            path = %matched_path,
                        )
                    }
                })
                .on_request(|_request: &Request<_>, _span: &Span| {})
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        if span.metadata().map(|m| m.level()) == Some(&tracing::Level::TRACE) {
                            return;
                        }
                        let status = response.status().as_u16();
                        if status >= 500 {
                            tracing::error!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request failed with server error"
                            );
                        } else {
                            tracing::info!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request completed"
                            );
                        }
                    },
                )
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: Duration,
                     _span: &Span| {
                        tracing::error!(
                            error = %error,
                            latency_ms = %latency.as_millis(),
                            "request failed"
                        );
                    },
                ),
        )
}
