//! Subscriber setup.
//!
//! Local and test runs print human-readable lines. Prod emits Stackdriver JSON
//! correlated with Cloud Trace, joining traces started upstream through the
//! W3C `traceparent` header.

use crate::config::Config;
use anyhow::Context;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use std::env;
use tracing_stackdriver::CloudTraceConfiguration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,dropzone_services=debug";
const PROJECT_ENV: &str = "GOOGLE_CLOUD_PROJECT";

#[derive(Debug, PartialEq, Eq)]
enum LogFormat {
    Pretty,
    Stackdriver { project_id: String },
}

fn log_format(config: &Config, project_id: Option<String>) -> anyhow::Result<LogFormat> {
    if !config.is_prod() {
        return Ok(LogFormat::Pretty);
    }
    let project_id = project_id
        .with_context(|| format!("{PROJECT_ENV} environment variable is required in production"))?;
    Ok(LogFormat::Stackdriver { project_id })
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter());

    match log_format(config, env::var(PROJECT_ENV).ok())? {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Stackdriver { project_id } => {
            opentelemetry::global::set_text_map_propagator(TraceContextPropagator::new());

            registry
                .with(tracing_opentelemetry::layer())
                .with(
                    tracing_stackdriver::layer()
                        .with_cloud_trace(CloudTraceConfiguration { project_id }),
                )
                .init();
        }
    }

    Ok(())
}
