//! Configuration for spark-primer sessions.
//!
//! Use [`SessionConfig`] to configure a session from code or environment variables,
//! then create a session with [`SparkSession::from_config`](crate::SparkSession::from_config)
//! or merge it into a builder with
//! [`SparkSessionBuilder::with_config`](crate::SparkSessionBuilder::with_config).

use std::collections::HashMap;
use std::env;

/// Session config key for the application name.
pub const APP_NAME_KEY: &str = "spark.app.name";
/// Session config key for the master URL.
pub const MASTER_KEY: &str = "spark.master";
/// Session config key for column-name case sensitivity.
pub const CASE_SENSITIVE_KEY: &str = "spark.sql.caseSensitive";
/// Session config key for the default number of rows printed by `show`.
pub const SHOW_ROWS_KEY: &str = "spark.primer.showRows";
/// Session config key for truncating long cells in `show`.
pub const TRUNCATE_KEY: &str = "spark.primer.truncate";

const ENV_PREFIX: &str = "SPARK_PRIMER_";

pub const DEFAULT_APP_NAME: &str = "spark-primer";
pub const DEFAULT_MASTER: &str = "local[*]";
pub const DEFAULT_SHOW_ROWS: usize = 20;

/// Session configuration, independent of the builder.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub app_name: String,
    pub master: String,
    /// When false (default), column names are matched case-insensitively.
    pub case_sensitive: bool,
    pub show_rows: usize,
    pub truncate: bool,
    /// Additional `spark.*` keys passed straight into the session config.
    pub extra: HashMap<String, String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            app_name: DEFAULT_APP_NAME.to_string(),
            master: DEFAULT_MASTER.to_string(),
            case_sensitive: false,
            show_rows: DEFAULT_SHOW_ROWS,
            truncate: true,
            extra: HashMap::new(),
        }
    }
}

impl SessionConfig {
    /// Read overrides from `SPARK_PRIMER_*` environment variables.
    ///
    /// Recognized: `APP_NAME`, `MASTER`, `CASE_SENSITIVE`, `SHOW_ROWS`, `TRUNCATE`.
    /// Unparsable values keep the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(format!("{ENV_PREFIX}{key}")).ok())
    }

    /// Build a config from an arbitrary key lookup (keys without the env prefix).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = SessionConfig::default();
        if let Some(v) = lookup("APP_NAME").filter(|v| !v.trim().is_empty()) {
            config.app_name = v;
        }
        if let Some(v) = lookup("MASTER").filter(|v| !v.trim().is_empty()) {
            config.master = v;
        }
        if let Some(b) = lookup("CASE_SENSITIVE").as_deref().and_then(parse_bool) {
            config.case_sensitive = b;
        }
        if let Some(n) = lookup("SHOW_ROWS").and_then(|v| v.trim().parse::<usize>().ok()) {
            config.show_rows = n;
        }
        if let Some(b) = lookup("TRUNCATE").as_deref().and_then(parse_bool) {
            config.truncate = b;
        }
        config
    }

    /// Flatten into session config keys. Extras are applied last and may override.
    pub fn to_session_config(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert(APP_NAME_KEY.to_string(), self.app_name.clone());
        map.insert(MASTER_KEY.to_string(), self.master.clone());
        map.insert(
            CASE_SENSITIVE_KEY.to_string(),
            self.case_sensitive.to_string(),
        );
        map.insert(SHOW_ROWS_KEY.to_string(), self.show_rows.to_string());
        map.insert(TRUNCATE_KEY.to_string(), self.truncate.to_string());
        for (k, v) in &self.extra {
            map.insert(k.clone(), v.clone());
        }
        map
    }
}

/// Parse Spark-style boolean option values ("true", "1", "yes" and their opposites).
pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
