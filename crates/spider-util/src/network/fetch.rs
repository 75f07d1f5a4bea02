//! Single-shot HTTP GET into memory.

use crate::config::FetchOptions;
use crate::error::{Error, Result};

use super::request;

/// Downloads `url` with one GET and returns the full response body.
///
/// Redirects are followed unless disabled in `options`. The body is buffered
/// in memory; set `max_body_bytes` to bound it. Fails with a network error on
/// connection/DNS failure or a non-2xx final status, and with a timeout error
/// when `timeout_secs` elapses first. There is no retry.
pub fn get_remote_file(url: &str, options: &FetchOptions) -> Result<Vec<u8>> {
    let mut easy = request::prepare(url, options)?;
    let limit = options.max_body_bytes;

    let mut body: Vec<u8> = Vec::new();
    let mut over_limit = false;

    tracing::debug!(url, "GET");
    let performed = {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                if let Some(limit) = limit {
                    if body.len() as u64 + data.len() as u64 > limit {
                        over_limit = true;
                        return Ok(0); // abort transfer
                    }
                }
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(|e| Error::from_curl(url, e))?;
        transfer.perform()
    };

    if over_limit {
        return Err(Error::BodyTooLarge {
            url: url.to_string(),
            limit: limit.unwrap_or_default(),
        });
    }
    performed.map_err(|e| Error::from_curl(url, e))?;

    let status = easy.response_code().map_err(|e| Error::from_curl(url, e))?;
    if !(200..300).contains(&status) {
        tracing::debug!(url, status, "GET failed");
        return Err(Error::HttpStatus {
            method: "GET",
            url: url.to_string(),
            status,
        });
    }

    tracing::debug!(url, status, bytes = body.len(), "GET complete");
    Ok(body)
}
