//! Builder for creating a SparkSession with configuration options.

use std::collections::HashMap;

use log::warn;

use crate::config::SessionConfig;

use super::{active_session, set_active_session, SparkSession};

/// Builder for creating a SparkSession with configuration options
#[derive(Clone)]
pub struct SparkSessionBuilder {
    app_name: Option<String>,
    master: Option<String>,
    config: HashMap<String, String>,
}

impl Default for SparkSessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SparkSessionBuilder {
    pub fn new() -> Self {
        SparkSessionBuilder {
            app_name: None,
            master: None,
            config: HashMap::new(),
        }
    }

    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    pub fn master(mut self, master: impl Into<String>) -> Self {
        self.master = Some(master.into());
        self
    }

    pub fn config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// Apply configuration from a [`SessionConfig`].
    /// App name and master are taken from the config unless already set on the builder.
    pub fn with_config(mut self, config: &SessionConfig) -> Self {
        if self.app_name.is_none() {
            self.app_name = Some(config.app_name.clone());
        }
        if self.master.is_none() {
            self.master = Some(config.master.clone());
        }
        for (k, v) in config.to_session_config() {
            self.config.insert(k, v);
        }
        self
    }

    /// Return the running session on this thread, or create and register a new one.
    ///
    /// When a session is reused, builder config keys are merged into it; a different
    /// app name or master is ignored (as in Spark) and logged.
    pub fn get_or_create(self) -> SparkSession {
        if let Some(existing) = active_session().filter(|s| !s.is_stopped()) {
            if let Some(name) = self.app_name.as_deref() {
                if name != existing.app_name() {
                    warn!(
                        "using existing SparkSession '{}'; app name '{}' ignored",
                        existing.app_name(),
                        name
                    );
                }
            }
            if let Some(master) = self.master.as_deref() {
                if master != existing.master() {
                    warn!(
                        "using existing SparkSession on '{}'; master '{}' ignored",
                        existing.master(),
                        master
                    );
                }
            }
            let mut config = self.config;
            config.remove(crate::config::APP_NAME_KEY);
            config.remove(crate::config::MASTER_KEY);
            existing.merge_config(&config);
            return existing;
        }
        let session = SparkSession::new(self.app_name, self.master, self.config);
        set_active_session(Some(session.clone()));
        session
    }
}
