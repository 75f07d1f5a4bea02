//! Error type shared by every helper.
//!
//! Each failure carries enough context (URL or path) to be reported as-is.
//! Callers that only need to branch on the failure class use [`Error::kind`].

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connection, DNS or transfer failure, or a non-success HTTP status.
    Network,
    /// The configured deadline elapsed before the transfer finished.
    Timeout,
    /// Malformed base64 input (or decoded bytes that are not UTF-8 when text was asked for).
    Decode,
    /// Path does not exist.
    NotFound,
    /// Path exists but is not a directory.
    NotADirectory,
    /// Path exists but cannot be read or listed.
    PermissionDenied,
    /// Caller-supplied value rejected before any I/O (URL, regex, options).
    InvalidInput,
    /// Any other local I/O failure.
    Io,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: curl::Error,
    },

    #[error("{method} {url} returned HTTP {status}")]
    HttpStatus {
        method: &'static str,
        url: String,
        status: u32,
    },

    #[error("response from {url} exceeds {limit} bytes")]
    BodyTooLarge { url: String, limit: u64 },

    #[error("request to {url} timed out")]
    Timeout {
        url: String,
        #[source]
        source: curl::Error,
    },

    #[error("invalid base64 input: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("decoded base64 is not valid UTF-8: {0}")]
    DecodeUtf8(#[from] std::string::FromUtf8Error),

    #[error("{} does not exist", .path.display())]
    NotFound { path: PathBuf },

    #[error("{} is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("permission denied: {}", .path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unknown base64 alphabet {0:?}")]
    UnknownAlphabet(String),

    #[error("invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid fetch options: {0}")]
    Config(#[from] toml::de::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Network { .. } | Error::HttpStatus { .. } | Error::BodyTooLarge { .. } => {
                ErrorKind::Network
            }
            Error::Timeout { .. } => ErrorKind::Timeout,
            Error::Decode(_) | Error::DecodeUtf8(_) => ErrorKind::Decode,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::NotADirectory { .. } => ErrorKind::NotADirectory,
            Error::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Error::InvalidUrl { .. }
            | Error::UnknownAlphabet(_)
            | Error::Pattern(_)
            | Error::Config(_) => ErrorKind::InvalidInput,
            Error::Io { .. } => ErrorKind::Io,
        }
    }

    /// HTTP status code, when the failure was a non-success response.
    pub fn http_status(&self) -> Option<u32> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Classify a curl error: operation timeouts become [`Error::Timeout`],
    /// everything else (connect, DNS, send/recv) is a network failure.
    pub(crate) fn from_curl(url: &str, e: curl::Error) -> Self {
        if e.is_operation_timedout() {
            Error::Timeout {
                url: url.to_string(),
                source: e,
            }
        } else {
            Error::Network {
                url: url.to_string(),
                source: e,
            }
        }
    }

    /// Map an I/O error on `path` into the filesystem taxonomy.
    pub(crate) fn from_io(path: &Path, e: io::Error) -> Self {
        let path = path.to_path_buf();
        match e.kind() {
            io::ErrorKind::NotFound => Error::NotFound { path },
            io::ErrorKind::PermissionDenied => Error::PermissionDenied { path, source: e },
            _ => Error::Io { path, source: e },
        }
    }
}
