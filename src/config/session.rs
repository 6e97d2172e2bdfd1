//! Login session configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MIN_TTL_SECS: u64 = 60;
const MAX_TTL_SECS: u64 = 90 * 24 * 60 * 60;

/// Where server-side sessions live.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// Shared across processes; requires the `redis` section.
    Redis,
    /// Process-local; sessions are lost on restart.
    #[default]
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub backend: SessionBackend,

    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Session lifetime; also the cookie's Max-Age
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,

    /// Add `Secure` to the session cookie
    #[serde(default)]
    pub secure_cookie: bool,
}

impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        let valid_name = !self.cookie_name.is_empty()
            && self
                .cookie_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid_name {
            return Err(ValidationError::InvalidCookieName);
        }
        if !(MIN_TTL_SECS..=MAX_TTL_SECS).contains(&self.ttl_secs) {
            return Err(ValidationError::InvalidSessionTtl);
        }
        if production && !self.secure_cookie {
            return Err(ValidationError::InsecureCookieInProduction);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: SessionBackend::default(),
            cookie_name: default_cookie_name(),
            ttl_secs: default_ttl(),
            secure_cookie: false,
        }
    }
}

fn default_cookie_name() -> String {
    "portal_session".to_string()
}

fn default_ttl() -> u64 {
    // two weeks
    1_209_600
}
