//! Base64 encoding with the three alphabets scrapers run into.

use crate::error::{Error, Result};
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::write::EncoderStringWriter;
use base64::Engine;
use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::str::FromStr;

/// RFC 3501 modified base64 (`+` `,`): never padded on output, padding optional on input.
const IMAP: GeneralPurpose = GeneralPurpose::new(
    &alphabet::IMAP_MUTF7,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// RFC 4648 section 5 (`-` `_`): padded on output, padding optional on input.
const URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Base64Alphabet {
    /// RFC 4648 section 4 (`+` `/`), padded, strict.
    #[default]
    Standard,
    /// RFC 3501 IMAP mailbox names (`+` `,`), unpadded.
    Imap,
    /// RFC 4648 section 5 URL and filename safe (`-` `_`).
    UrlSafe,
}

impl Base64Alphabet {
    fn engine(self) -> &'static GeneralPurpose {
        match self {
            Base64Alphabet::Standard => &STANDARD,
            Base64Alphabet::Imap => &IMAP,
            Base64Alphabet::UrlSafe => &URL_SAFE,
        }
    }
}

impl fmt::Display for Base64Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Base64Alphabet::Standard => "standard",
            Base64Alphabet::Imap => "rfc3501",
            Base64Alphabet::UrlSafe => "rfc4648-url",
        };
        f.write_str(name)
    }
}

impl FromStr for Base64Alphabet {
    type Err = Error;

    /// Accepts `standard`/`default`, `rfc3501`/`imap`, `rfc4648`/`url-safe`/`rfc4648-url` (any case).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "default" => Ok(Base64Alphabet::Standard),
            "rfc3501" | "imap" => Ok(Base64Alphabet::Imap),
            "rfc4648" | "rfc4648-url" | "url-safe" | "urlsafe" => Ok(Base64Alphabet::UrlSafe),
            other => Err(Error::UnknownAlphabet(other.to_string())),
        }
    }
}

/// Standard padded base64 of `data`.
pub fn base64_encoder(data: impl AsRef<[u8]>) -> String {
    base64_encode_with(data, Base64Alphabet::Standard)
}

/// Decodes standard padded base64; rejects characters outside the alphabet and bad padding.
pub fn base64_decoder(text: &str) -> Result<Vec<u8>> {
    base64_decode_with(text, Base64Alphabet::Standard)
}

pub fn base64_encode_with(data: impl AsRef<[u8]>, alphabet: Base64Alphabet) -> String {
    alphabet.engine().encode(data)
}

pub fn base64_decode_with(text: &str, alphabet: Base64Alphabet) -> Result<Vec<u8>> {
    base64_decode_with_bytes(text.as_bytes(), alphabet)
}

/// Decodes base64 and requires the result to be UTF-8 text.
pub fn base64_decode_to_string(text: &str, alphabet: Base64Alphabet) -> Result<String> {
    let bytes = base64_decode_with(text, alphabet)?;
    Ok(String::from_utf8(bytes)?)
}

/// Base64 text of a file's contents, streamed so the raw bytes are never
/// held in memory at once.
pub fn base64_encode_file(path: impl AsRef<Path>, alphabet: Base64Alphabet) -> Result<String> {
    let path = path.as_ref();
    let mut f = File::open(path).map_err(|e| Error::from_io(path, e))?;
    let mut writer = EncoderStringWriter::new(alphabet.engine());
    let n = io::copy(&mut f, &mut writer).map_err(|e| Error::from_io(path, e))?;
    tracing::trace!("encoded {} ({} bytes)", path.display(), n);
    Ok(writer.into_inner())
}

/// Decodes a file holding base64 text. Leading and trailing ASCII whitespace
/// (typically a final newline) is ignored.
pub fn base64_decode_file(path: impl AsRef<Path>, alphabet: Base64Alphabet) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let raw = fs::read(path).map_err(|e| Error::from_io(path, e))?;
    base64_decode_with_bytes(raw.trim_ascii(), alphabet)
}

fn base64_decode_with_bytes(text: &[u8], alphabet: Base64Alphabet) -> Result<Vec<u8>> {
    Ok(alphabet.engine().decode(text)?)
}
