//! HTTP HEAD probing: size and metadata without the body.

use crate::config::FetchOptions;
use crate::error::{Error, Result};
use std::str;

use super::{filename, request};

/// Metadata from a HEAD request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteFileInfo {
    /// Final URL after redirects.
    pub url: String,
    /// Final HTTP status.
    pub status: u32,
    /// Total size in bytes, if `Content-Length` is present.
    pub content_length: Option<u64>,
    pub content_type: Option<String>,
    /// `ETag` value without surrounding quotes.
    pub etag: Option<String>,
    pub last_modified: Option<String>,
    pub content_disposition: Option<String>,
    /// Suggested local file name (Content-Disposition, else URL path, else `download.bin`).
    pub file_name: String,
    /// Every header of the final response, in order received.
    pub headers: Vec<(String, String)>,
}

impl RemoteFileInfo {
    /// Case-insensitive header lookup (first occurrence).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Performs a HEAD request against `url` and returns parsed metadata.
///
/// Same options and error mapping as [`get_remote_file`](super::get_remote_file).
pub fn probe_remote_file(url: &str, options: &FetchOptions) -> Result<RemoteFileInfo> {
    let mut easy = request::prepare(url, options)?;
    let mut lines: Vec<String> = Vec::new();

    tracing::debug!(url, "HEAD");
    easy.nobody(true).map_err(|e| Error::from_curl(url, e))?;
    let performed = {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    let line = s.trim_end();
                    // A new status line starts the headers of the next hop after a redirect.
                    if line.starts_with("HTTP/") {
                        lines.clear();
                    }
                    lines.push(line.to_string());
                }
                true
            })
            .map_err(|e| Error::from_curl(url, e))?;
        transfer.perform()
    };
    performed.map_err(|e| Error::from_curl(url, e))?;

    let status = easy.response_code().map_err(|e| Error::from_curl(url, e))?;
    if !(200..300).contains(&status) {
        return Err(Error::HttpStatus {
            method: "HEAD",
            url: url.to_string(),
            status,
        });
    }
    let effective = easy
        .effective_url()
        .ok()
        .flatten()
        .unwrap_or(url)
        .to_string();

    let mut info = parse_headers(&lines);
    info.file_name = filename::derive_file_name(&effective, info.content_disposition.as_deref());
    info.url = effective;
    info.status = status;
    tracing::debug!(url, status, content_length = ?info.content_length, "HEAD complete");
    Ok(info)
}

/// Parse collected header lines into a `RemoteFileInfo` (url/status/file_name left empty).
fn parse_headers(lines: &[String]) -> RemoteFileInfo {
    let mut info = RemoteFileInfo::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() || line.starts_with("HTTP/") {
            continue;
        }
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        let value = value.trim();
        if name.eq_ignore_ascii_case("content-length") {
            info.content_length = value.parse::<u64>().ok();
        } else if name.eq_ignore_ascii_case("content-type") {
            info.content_type = Some(value.to_string());
        } else if name.eq_ignore_ascii_case("etag") {
            info.etag = Some(value.trim_matches('"').to_string());
        } else if name.eq_ignore_ascii_case("last-modified") {
            info.last_modified = Some(value.to_string());
        } else if name.eq_ignore_ascii_case("content-disposition") {
            info.content_disposition = Some(value.to_string());
        }
        info.headers.push((name.to_string(), value.to_string()));
    }

    info
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_headers_content_length_and_type() {
        let r = parse_headers(&lines(&[
            "HTTP/1.1 200 OK",
            "Content-Length: 12345",
            "Content-Type: application/pdf",
        ]));
        assert_eq!(r.content_length, Some(12345));
        assert_eq!(r.content_type.as_deref(), Some("application/pdf"));
        assert!(r.etag.is_none());
        assert_eq!(r.headers.len(), 2);
    }

    #[test]
    fn parse_headers_etag_and_last_modified() {
        let r = parse_headers(&lines(&[
            "ETag: \"abc-123\"",
            "Last-Modified: Wed, 21 Oct 2015 07:28:00 GMT",
        ]));
        assert_eq!(r.etag.as_deref(), Some("abc-123"));
        assert_eq!(
            r.last_modified.as_deref(),
            Some("Wed, 21 Oct 2015 07:28:00 GMT")
        );
    }

    #[test]
    fn parse_headers_bad_length_is_none() {
        let r = parse_headers(&lines(&["Content-Length: lots"]));
        assert_eq!(r.content_length, None);
    }

    #[test]
    fn header_lookup_ignores_case() {
        let r = parse_headers(&lines(&["X-Cache: HIT", "Server: test"]));
        assert_eq!(r.header("x-cache"), Some("HIT"));
        assert_eq!(r.header("SERVER"), Some("test"));
        assert_eq!(r.header("missing"), None);
    }
}
