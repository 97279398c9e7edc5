use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::validate::SchedulePolicy;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const MODEL_ENV: &str = "OPENAI_MODEL";
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";

/// Settings for the text-generation service.
///
/// The API key is only ever read from the environment and is never
/// serialized or printed.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub schedule_policy: SchedulePolicy,
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            schedule_policy: SchedulePolicy::default(),
            api_key: None,
        }
    }
}

impl ServiceConfig {
    /// Overlay `OPENAI_API_KEY`, `OPENAI_MODEL` and `OPENAI_BASE_URL`.
    ///
    /// Empty values are ignored.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(key) = read(API_KEY_ENV) {
            self.api_key = Some(key);
        }
        if let Some(model) = read(MODEL_ENV) {
            self.model = model;
        }
        if let Some(base_url) = read(BASE_URL_ENV) {
            self.base_url = base_url;
        }
        self
    }

    /// Overlay from the process environment.
    pub fn with_process_env(self) -> Self {
        self.with_env(|key| std::env::var(key).ok())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("schedule_policy", &self.schedule_policy)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}
