use dropzone_utils::version_info::RuntimeEnv;
use dropzone_utils::{DEFAULT_ALLOWED_TYPES, DEFAULT_MAX_FILE_SIZE, UploadPolicy};
use serde::Deserialize;
use std::env::vars;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_UPLOAD_DIR: &str = "./uploads";
const DEFAULT_UPLOAD_PATH: &str = "/upload";
const DEFAULT_MAX_REQUEST_SIZE: usize = 64 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub enum Env {
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "test")]
    Test,
    #[serde(rename = "prod")]
    Prod,
}

impl From<&Env> for RuntimeEnv {
    fn from(env: &Env) -> Self {
        match env {
            Env::Local => RuntimeEnv::Local,
            Env::Test => RuntimeEnv::Test,
            Env::Prod => RuntimeEnv::Prod,
        }
    }
}

impl Display for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Env::Local => write!(f, "local"),
            Env::Test => write!(f, "test"),
            Env::Prod => write!(f, "prod"),
        }
    }
}

// The final, validated configuration struct.
#[derive(Debug, Clone)]
pub struct Config {
    env: Env,
    server_addr: String,
    port: u16,
    upload_dir: PathBuf,
    upload_path: String,
    policy: UploadPolicy,
    // Whole multipart body, across all files of one request
    max_request_size: usize,
}

// An intermediate struct for deserializing environment variables
// where most settings are optional.
#[derive(Deserialize)]
struct RawConfig {
    env: Env,
    server_addr: Option<String>,
    port: Option<u16>,
    upload_dir: Option<String>,
    upload_path: Option<String>,
    max_file_size: Option<u64>,
    // Comma-separated MIME types
    allowed_types: Option<String>,
    max_request_size: Option<usize>,
}

impl Config {
    /// Create a test configuration with default values.
    ///
    /// Available to unit and integration tests; not meant for production.
    pub fn new_for_test() -> Self {
        Self {
            env: Env::Local,
            server_addr: "127.0.0.1".to_owned(),
            port: 8080,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            upload_path: DEFAULT_UPLOAD_PATH.to_owned(),
            policy: UploadPolicy::default(),
            max_request_size: DEFAULT_MAX_REQUEST_SIZE,
        }
    }

    /// Test configuration with a custom policy and body limit.
    pub fn new_for_test_with_limits(policy: UploadPolicy, max_request_size: usize) -> Self {
        Self {
            policy,
            max_request_size,
            ..Self::new_for_test()
        }
    }

    #[cfg(test)]
    pub(crate) fn with_environment(mut self, env: Env) -> Self {
        self.env = env;
        self
    }

    pub fn environment(&self) -> &Env {
        &self.env
    }

    pub fn server_addr(&self) -> &str {
        &self.server_addr
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn is_local(&self) -> bool {
        matches!(self.env, Env::Local)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self.env, Env::Prod)
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Route the upload endpoint is mounted on.
    pub fn upload_path(&self) -> &str {
        &self.upload_path
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    pub fn max_request_size(&self) -> usize {
        self.max_request_size
    }

    /// Initializes configuration by reading from environment variables
    /// and applying environment-aware defaults.
    pub fn init() -> anyhow::Result<Self> {
        info!("Loading configuration from environment variables");

        let raw_config: RawConfig = serde_env::from_iter(vars())?;
        Self::from_raw(raw_config)
    }

    fn from_raw(raw_config: RawConfig) -> anyhow::Result<Self> {
        let RawConfig {
            env,
            server_addr,
            port,
            upload_dir,
            upload_path,
            max_file_size,
            allowed_types,
            max_request_size,
        } = raw_config;

        let server_addr = match server_addr {
            Some(addr) => {
                info!("Using provided SERVER_ADDR: {}", addr);
                addr
            }
            None => {
                let default_addr = match env {
                    Env::Local => "127.0.0.1",
                    _ => "0.0.0.0",
                };
                info!(
                    "SERVER_ADDR not set, defaulting to {} for {} environment",
                    default_addr, env
                );
                default_addr.to_owned()
            }
        };

        let port = match port {
            Some(port) => port,
            None if matches!(env, Env::Local | Env::Test) => {
                info!("PORT not set, defaulting to 8080 for {} environment", env);
                8080
            }
            None => anyhow::bail!("PORT must be set for {} environment", env),
        };

        let upload_path = upload_path.unwrap_or_else(|| DEFAULT_UPLOAD_PATH.to_owned());
        if !upload_path.starts_with('/') {
            anyhow::bail!("UPLOAD_PATH must start with '/', got {:?}", upload_path);
        }

        let allowed_types: Vec<String> = match allowed_types {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_owned)
                .collect(),
            None => DEFAULT_ALLOWED_TYPES.iter().map(|t| (*t).to_owned()).collect(),
        };
        if allowed_types.is_empty() {
            anyhow::bail!("ALLOWED_TYPES must name at least one MIME type");
        }

        let max_file_size = max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE);
        let max_request_size = max_request_size.unwrap_or(DEFAULT_MAX_REQUEST_SIZE);
        if (max_request_size as u64) < max_file_size {
            anyhow::bail!(
                "MAX_REQUEST_SIZE ({}) must not be smaller than MAX_FILE_SIZE ({})",
                max_request_size,
                max_file_size
            );
        }

        let upload_dir = PathBuf::from(upload_dir.unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_owned()));
        info!(
            upload_dir = %upload_dir.display(),
            upload_path = %upload_path,
            max_file_size,
            "Upload settings resolved"
        );

        Ok(Config {
            env,
            server_addr,
            port,
            upload_dir,
            upload_path,
            policy: UploadPolicy::new(allowed_types, max_file_size),
            max_request_size,
        })
    }
}
