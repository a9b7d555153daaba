//! Version information populated at build time.
//!
//! Format: `{env}:{info}`
//! - Prod: `stable:{version}`
//! - Test/Local: `main:{commit}`

/// Environment a service determines at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Local,
    Test,
    Prod,
}

/// Build date in RFC3339 format.
pub fn build_date() -> &'static str {
    env!("BUILD_DATE")
}

/// Short git commit hash, or `unknown` outside a checkout.
pub fn build_commit() -> &'static str {
    env!("BUILD_COMMIT")
}

pub fn build_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Version label reported by services, e.g. in response headers.
pub fn format_version_for_runtime_env(env: RuntimeEnv) -> String {
    match env {
        RuntimeEnv::Local | RuntimeEnv::Test => format!("main:{}", build_commit()),
        RuntimeEnv::Prod => format!("stable:{}", build_version()),
    }
}
