//! Content digests rendered as lowercase hex.
//!
//! Text inputs are hashed as their UTF-8 bytes. MD5 is only suitable for
//! deduplication and cache keys, never for integrity against adversarial input.

use crate::error::{Error, Result};
use md5::Md5;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const BUF_SIZE: usize = 64 * 1024;

/// MD5 of `data` as 32 lowercase hex characters.
pub fn md5_hash(data: impl AsRef<[u8]>) -> String {
    hex::encode(Md5::digest(data.as_ref()))
}

/// SHA-256 of `data` as 64 lowercase hex characters.
pub fn sha256_hash(data: impl AsRef<[u8]>) -> String {
    hex::encode(Sha256::digest(data.as_ref()))
}

/// Salt applied by [`md5_hash_salted`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Md5Salt {
    pub prefix: Vec<u8>,
    pub suffix: Vec<u8>,
    /// Hash the hex digest of the salted input a second time, with the same salt.
    pub double: bool,
}

impl Md5Salt {
    pub fn new(prefix: impl AsRef<[u8]>, suffix: impl AsRef<[u8]>) -> Self {
        Self {
            prefix: prefix.as_ref().to_vec(),
            suffix: suffix.as_ref().to_vec(),
            double: false,
        }
    }

    pub fn double(mut self) -> Self {
        self.double = true;
        self
    }
}

/// MD5 of `prefix || data || suffix`.
///
/// With `salt.double`, `data` is first replaced by the hex string of its own
/// single salted digest.
pub fn md5_hash_salted(data: impl AsRef<[u8]>, salt: &Md5Salt) -> String {
    let once = salted(data.as_ref(), salt);
    if salt.double {
        salted(once.as_bytes(), salt)
    } else {
        once
    }
}

fn salted(data: &[u8], salt: &Md5Salt) -> String {
    let mut hasher = Md5::new();
    hasher.update(&salt.prefix);
    hasher.update(data);
    hasher.update(&salt.suffix);
    hex::encode(hasher.finalize())
}

/// MD5 of a file's contents, read in chunks.
pub fn md5_file(path: impl AsRef<Path>) -> Result<String> {
    digest_file::<Md5>(path.as_ref())
}

/// SHA-256 of a file's contents, read in chunks.
pub fn sha256_file(path: impl AsRef<Path>) -> Result<String> {
    digest_file::<Sha256>(path.as_ref())
}

fn digest_file<D: Digest>(path: &Path) -> Result<String> {
    let mut f = File::open(path).map_err(|e| Error::from_io(path, e))?;
    let mut hasher = D::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = f.read(&mut buf).map_err(|e| Error::from_io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    tracing::trace!("digested {}", path.display());
    Ok(hex::encode(hasher.finalize()))
}
