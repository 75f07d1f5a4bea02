//! Per-call options for remote fetches.
//!
//! The library never loads configuration on its own; `FetchOptions` is a
//! plain serde struct so callers can embed it in their own config file.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Default cap on redirects followed by a single request.
pub const DEFAULT_MAX_REDIRECTIONS: u32 = 10;

/// Options for [`get_remote_file`](crate::network::get_remote_file) and
/// [`probe_remote_file`](crate::network::probe_remote_file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    /// Abort and fail if the whole request has not completed within this many seconds.
    pub timeout_secs: Option<f64>,
    /// Abort if the connection is not established within this many seconds.
    pub connect_timeout_secs: Option<f64>,
    /// Extra HTTP headers sent with the request.
    pub headers: HashMap<String, String>,
    /// Follow 3xx redirects.
    pub follow_redirects: bool,
    /// Upper bound on redirects when `follow_redirects` is set.
    pub max_redirections: u32,
    /// Fail once the response body grows beyond this many bytes (None = no limit).
    pub max_body_bytes: Option<u64>,
    /// Fixed User-Agent. When unset (and no `User-Agent` header is given) a
    /// browser string is picked at random per request.
    pub user_agent: Option<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            connect_timeout_secs: None,
            headers: HashMap::new(),
            follow_redirects: true,
            max_redirections: DEFAULT_MAX_REDIRECTIONS,
            max_body_bytes: None,
            user_agent: None,
        }
    }
}

impl FetchOptions {
    /// Parse options from a TOML document (every key optional).
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = Some(timeout.as_secs_f64());
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout_secs = Some(timeout.as_secs_f64());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_max_body_bytes(mut self, limit: u64) -> Self {
        self.max_body_bytes = Some(limit);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn without_redirects(mut self) -> Self {
        self.follow_redirects = false;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.and_then(secs_to_duration)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.and_then(secs_to_duration)
    }

    /// True if the caller already supplied a `User-Agent` header.
    pub(crate) fn has_user_agent_header(&self) -> bool {
        self.headers
            .keys()
            .any(|k| k.trim().eq_ignore_ascii_case("user-agent"))
    }
}

/// Non-positive, non-finite or unrepresentably large values mean "no timeout".
fn secs_to_duration(secs: f64) -> Option<Duration> {
    if secs > 0.0 {
        Duration::try_from_secs_f64(secs).ok()
    } else {
        None
    }
}
