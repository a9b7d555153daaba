use crate::config::Config;
use crate::ingest::{Clock, Ingestor, SystemClock};
use crate::storage::UploadStorage;
use axum::{
    Router,
    extract::{DefaultBodyLimit, Extension, Request, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{any, get},
};
use dropzone_utils::version_info::{RuntimeEnv, format_version_for_runtime_env};
use opentelemetry::{global, propagation::Extractor};
use tower_http::trace::TraceLayer;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub mod config;
pub mod ingest;
pub mod naming;
pub mod storage;
pub mod telemetry;
pub mod uploads;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState<S, C> {
    pub ingestor: Ingestor<S, C>,
}

impl<S, C> AppState<S, C>
where
    S: UploadStorage,
    C: Clock,
{
    pub fn new(storage: S, clock: C, config: &Config) -> Self {
        Self {
            ingestor: Ingestor::new(storage, clock, config.policy().clone()),
        }
    }
}

struct HeaderExtractor<'a>(&'a axum::http::HeaderMap);

impl<'a> Extractor for HeaderExtractor<'a> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(|k| k.as_str()).collect()
    }
}

/// Creates the service router, naming stored files with wall-clock time.
pub async fn routes<S>(storage: S, config: Config) -> Router
where
    S: UploadStorage,
{
    routes_with_clock(storage, SystemClock, config).await
}

/// Creates the service router with an explicit time source.
pub async fn routes_with_clock<S, C>(storage: S, clock: C, config: Config) -> Router
where
    S: UploadStorage,
    C: Clock,
{
    let state = AppState::new(storage, clock, &config);

    Router::new()
        .route("/is-health", get(health_check::<S, C>))
        .route(config.upload_path(), any(uploads::upload::<S, C>))
        .fallback(any(catch_all))
        .layer(DefaultBodyLimit::max(config.max_request_size()))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                // Check if the request has a trace context header
                let parent_context = global::get_text_map_propagator(|propagator| {
                    propagator.extract(&HeaderExtractor(request.headers()))
                });

                let span = tracing::info_span!(
                    "http_request",
                    http_request.method = ?request.method(),
                    http_request.uri = ?request.uri(),
                    http_request.version = ?request.version(),
                    http_request.user_agent = ?request.headers().get(axum::http::header::USER_AGENT),
                );

                span.set_parent(parent_context);

                span
            }),
        )
        .layer(Extension(config))
        .with_state(state)
}

async fn health_check<S, C>(
    State(state): State<AppState<S, C>>,
    Extension(config): Extension<Config>,
) -> impl IntoResponse
where
    S: UploadStorage,
    C: Clock,
{
    let mut response = if state.ingestor.storage().is_available().await {
        (StatusCode::OK, "OK").into_response()
    } else {
        (StatusCode::BAD_GATEWAY, "502").into_response()
    };

    if let Ok(env_value) = HeaderValue::from_str(&config.environment().to_string()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static("x-service-env"), env_value);
    }

    let runtime_env: RuntimeEnv = config.environment().into();
    if let Ok(version_value) = HeaderValue::from_str(&format_version_for_runtime_env(runtime_env))
    {
        response
            .headers_mut()
            .insert(HeaderName::from_static("x-service-version"), version_value);
    }

    response
}

async fn catch_all() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "nothing to see here")
}
