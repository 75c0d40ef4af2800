use crate::floor::NumberPolicy;
use std::path::PathBuf;

/// Floor engine configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | Directory holding the snapshot database |
/// | FLOOR_DB_FILE | floor.redb | Database file name inside WORK_DIR |
/// | LOG_LEVEL | info | Minimum tracing level |
/// | LOG_DIR | (unset) | Daily rolling log files, stdout when unset |
/// | TABLE_NUMBER_POLICY | permissive | `permissive` or `unique` |
/// | MENU_FILE | (unset) | JSON menu catalog replacing the built-in one |
/// | ENVIRONMENT | development | development / staging / production |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/var/lib/floor TABLE_NUMBER_POLICY=unique cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub db_file: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub number_policy: NumberPolicy,
    pub menu_file: Option<String>,
    /// development | staging | production
    pub environment: String,
}

impl Config {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            db_file: std::env::var("FLOOR_DB_FILE").unwrap_or_else(|_| "floor.redb".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: non_empty_var("LOG_DIR"),
            number_policy: number_policy_var(),
            menu_file: non_empty_var("MENU_FILE"),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override the storage location
    ///
    /// Mostly for tests
    pub fn with_overrides(work_dir: impl Into<String>, number_policy: NumberPolicy) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.number_policy = number_policy;
        config.menu_file = None;
        config
    }

    /// Full path of the snapshot database
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.db_file)
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn number_policy_var() -> NumberPolicy {
    match non_empty_var("TABLE_NUMBER_POLICY").map(|v| v.parse::<NumberPolicy>()) {
        Some(Ok(policy)) => policy,
        Some(Err(e)) => {
            tracing::warn!(error = %e, "Ignoring TABLE_NUMBER_POLICY");
            NumberPolicy::default()
        }
        None => NumberPolicy::default(),
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
