//! Network and encoding helpers.
//!
//! `get_remote_file` and `probe_remote_file` perform exactly one blocking
//! request per call (libcurl easy handle, no retries, no pooling). The digest
//! and base64 helpers are pure functions.

mod digest;
mod encoding;
mod fetch;
mod filename;
mod probe;
mod request;
mod user_agent;

pub use digest::{md5_file, md5_hash, md5_hash_salted, sha256_file, sha256_hash, Md5Salt};
pub use encoding::{
    base64_decode_file, base64_decode_to_string, base64_decode_with, base64_decoder,
    base64_encode_file, base64_encode_with, base64_encoder, Base64Alphabet,
};
pub use fetch::get_remote_file;
pub use filename::{derive_file_name, filename_from_url_path, parse_content_disposition_filename};
pub use probe::{probe_remote_file, RemoteFileInfo};
pub use user_agent::{random_user_agent, USER_AGENTS};
