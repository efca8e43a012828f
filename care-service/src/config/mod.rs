use serde::Deserialize;
use service_core::config::{self as core_config, get_env, get_env_parsed};
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct CareConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub analysis: AnalysisConfig,
    pub uploads: UploadConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

/// External image-analysis service used by the progress tracker.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Full URL the two images are posted to. `None` disables the tracker.
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    pub max_bytes: usize,
}

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

impl CareConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env, APP__ prefix and PORT)
        let common_config = core_config::Config::load()?;
        let is_prod = core_config::is_prod();

        Ok(CareConfig {
            common: common_config,
            mongodb: MongoConfig {
                uri: get_env("MONGODB_URL", Some("mongodb://localhost:27017"), is_prod)?,
                database: get_env("MONGODB_DATABASE", Some("care_portal"), is_prod)?,
            },
            analysis: AnalysisConfig {
                endpoint: env::var("ANALYSIS_SERVICE_URL")
                    .ok()
                    .filter(|url| !url.trim().is_empty()),
                timeout_secs: get_env_parsed("ANALYSIS_TIMEOUT_SECS", 60)?,
            },
            uploads: UploadConfig {
                max_bytes: get_env_parsed("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            },
        })
    }
}
