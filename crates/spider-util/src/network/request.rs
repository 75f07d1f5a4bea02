//! Shared curl easy-handle setup for GET and HEAD.

use crate::config::FetchOptions;
use crate::error::{Error, Result};
use curl::easy::{Easy, List};
use std::time::Duration;

use super::user_agent;

/// Longest deadline handed to libcurl; fits a 32-bit `long` of milliseconds.
const MAX_CURL_TIMEOUT: Duration = Duration::from_millis(i32::MAX as u64);

/// Reject anything that is not an absolute http(s) URL with a host.
pub(super) fn validate_url(url: &str) -> Result<()> {
    let parsed = url::Url::parse(url).map_err(|e| Error::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(Error::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme {:?} (only http and https)", other),
            })
        }
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(Error::InvalidUrl {
            url: url.to_string(),
            reason: "missing host".to_string(),
        });
    }
    Ok(())
}

/// Validates `url` and returns an easy handle configured from `options`.
pub(super) fn prepare(url: &str, options: &FetchOptions) -> Result<Easy> {
    validate_url(url)?;
    configure(url, options).map_err(|e| Error::from_curl(url, e))
}

fn configure(url: &str, options: &FetchOptions) -> std::result::Result<Easy, curl::Error> {
    let mut easy = Easy::new();
    easy.url(url)?;
    easy.follow_location(options.follow_redirects)?;
    if options.follow_redirects {
        easy.max_redirections(options.max_redirections)?;
    }
    if let Some(t) = options.connect_timeout() {
        easy.connect_timeout(curl_timeout(t))?;
    }
    if let Some(t) = options.timeout() {
        easy.timeout(curl_timeout(t))?;
    }

    if !options.has_user_agent_header() {
        let ua = options
            .user_agent
            .as_deref()
            .unwrap_or_else(|| user_agent::random_user_agent());
        easy.useragent(ua)?;
    }

    // Build curl list for custom headers (e.g. "Name: value").
    let mut list = List::new();
    for (k, v) in &options.headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
    }
    if !options.headers.is_empty() {
        easy.http_headers(list)?;
    }
    Ok(easy)
}

/// libcurl counts whole milliseconds and reads 0 as "no timeout", so round
/// up to at least 1 ms and cap at [`MAX_CURL_TIMEOUT`].
fn curl_timeout(t: Duration) -> Duration {
    let ms = t.as_nanos().div_ceil(1_000_000).max(1);
    let ms = u64::try_from(ms).unwrap_or(u64::MAX);
    Duration::from_millis(ms).min(MAX_CURL_TIMEOUT)
}
