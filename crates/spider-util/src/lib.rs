//! Small helpers for web-scraping workflows.
//!
//! Two independent groups of stateless functions:
//! - [`network`]: fetch remote files, compute digests, base64 encode/decode.
//! - [`storage`]: inspect local folders and text files.
//!
//! Every helper is a single self-contained call. Nothing is cached, retried,
//! or shared between calls.

pub mod config;
pub mod error;
pub mod logging;
pub mod network;
pub mod storage;

pub use config::FetchOptions;
pub use error::{Error, ErrorKind, Result};
pub use network::{
    base64_decode_file, base64_decode_to_string, base64_decode_with, base64_decoder,
    base64_encode_file, base64_encode_with, base64_encoder, get_remote_file, md5_file, md5_hash,
    md5_hash_salted, probe_remote_file, sha256_file, sha256_hash, Base64Alphabet, Md5Salt,
    RemoteFileInfo,
};
pub use storage::{
    file_name_cleanup, is_folder_empty, remove_duplicates_orderly, text_file_search,
    text_file_search_all, CleanupOptions, KeepOccurrence, SearchOptions,
};
