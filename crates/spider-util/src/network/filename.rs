//! Suggested local file names for remote resources.

use crate::storage::{file_name_cleanup, CleanupOptions};

/// Fallback when neither Content-Disposition nor the URL path yield a usable name.
pub const DEFAULT_FILE_NAME: &str = "download.bin";

/// Derives a file name for saving the resource at `url`.
///
/// Prefers the Content-Disposition filename, else the last URL path segment.
/// The result goes through [`file_name_cleanup`], so it never contains a path
/// separator.
///
/// - `derive_file_name("https://example.com/archive.zip", None)` → `"archive.zip"`
/// - `derive_file_name("https://example.com/", Some("attachment; filename=\"a:b.pdf\""))` → `"a：b.pdf"`
pub fn derive_file_name(url: &str, content_disposition: Option<&str>) -> String {
    let candidate = content_disposition
        .and_then(parse_content_disposition_filename)
        .filter(|s| !s.trim().is_empty())
        .or_else(|| filename_from_url_path(url));

    let Some(raw) = candidate else {
        return DEFAULT_FILE_NAME.to_string();
    };

    let cleaned = file_name_cleanup(&raw, &CleanupOptions::default());
    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        DEFAULT_FILE_NAME.to_string()
    } else {
        cleaned
    }
}

/// Last non-empty path segment of `url`, percent-decoded.
///
/// Returns `None` if the URL cannot be parsed or the path is empty/root.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path().split('/').filter(|s| !s.is_empty()).last()?;
    let decoded = percent_decode(segment);
    if decoded.is_empty() || decoded == "." || decoded == ".." {
        return None;
    }
    Some(decoded)
}

/// Extracts the filename from a raw Content-Disposition header value.
///
/// The extended `filename*=charset'lang'pct-encoded` form (RFC 6266 / 5987)
/// takes precedence over plain `filename=`, which may be a token or a
/// quoted-string. Semicolons inside quotes do not split parameters.
pub fn parse_content_disposition_filename(header_value: &str) -> Option<String> {
    let params = disposition_params(header_value);
    let extended = params
        .iter()
        .filter(|(name, _)| name == "filename*")
        .find_map(|(_, value)| decode_ext_value(value));
    extended.or_else(|| {
        params
            .into_iter()
            .find(|(name, value)| name == "filename" && !value.is_empty())
            .map(|(_, value)| value)
    })
}

/// Splits `disposition-type; name=value; ...` into lowercase names and
/// unquoted values. The leading disposition type has no `=` and is skipped.
fn disposition_params(header_value: &str) -> Vec<(String, String)> {
    let mut params = Vec::new();
    let mut chars = header_value.chars().peekable();

    loop {
        let mut name = String::new();
        while let Some(c) = chars.next_if(|&c| c != '=' && c != ';') {
            name.push(c);
        }
        match chars.next() {
            None => break,
            Some(';') => continue,
            Some(_) => {}
        }

        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let mut value = String::new();
        if chars.next_if_eq(&'"').is_some() {
            while let Some(c) = chars.next() {
                match c {
                    '"' => break,
                    '\\' => value.extend(chars.next()),
                    _ => value.push(c),
                }
            }
            // anything between the closing quote and the next ';' is ignored
            while chars.next_if(|&c| c != ';').is_some() {}
        } else {
            while let Some(c) = chars.next_if(|&c| c != ';') {
                value.push(c);
            }
            value.truncate(value.trim_end().len());
        }
        chars.next();

        params.push((name.trim().to_ascii_lowercase(), value));
    }
    params
}

/// Decodes an RFC 5987 ext-value such as `UTF-8''na%C3%AFve.txt` or
/// `iso-8859-1'en'%A3rates`. Unknown charsets yield `None`.
fn decode_ext_value(value: &str) -> Option<String> {
    let mut parts = value.splitn(3, '\'');
    let charset = parts.next()?.trim();
    let _language = parts.next()?;
    let bytes = percent_decode_bytes(parts.next()?);

    let decoded = if charset.eq_ignore_ascii_case("utf-8") {
        String::from_utf8_lossy(&bytes).into_owned()
    } else if charset.eq_ignore_ascii_case("iso-8859-1") {
        bytes.iter().map(|&b| char::from(b)).collect()
    } else {
        return None;
    };
    (!decoded.is_empty()).then_some(decoded)
}

/// Lenient percent-decoding of a URL path segment.
fn percent_decode(input: &str) -> String {
    String::from_utf8_lossy(&percent_decode_bytes(input)).into_owned()
}

/// `%XX` escapes become bytes; malformed escapes are kept literally.
fn percent_decode_bytes(input: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut rest = input.as_bytes();
    while let Some((&b, tail)) = rest.split_first() {
        let escaped = match tail {
            [hi, lo, ..] if b == b'%' => hex::decode([*hi, *lo]).ok(),
            _ => None,
        };
        match escaped {
            Some(byte) => {
                out.extend(byte);
                rest = &tail[2..];
            }
            None => {
                out.push(b);
                rest = tail;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_url_path() {
        assert_eq!(
            filename_from_url_path("https://example.com/a/b/file.pdf").as_deref(),
            Some("file.pdf")
        );
        assert_eq!(
            filename_from_url_path("https://example.com/file.zip?token=abc").as_deref(),
            Some("file.zip")
        );
        assert_eq!(
            filename_from_url_path("https://example.com/My%20Report.pdf").as_deref(),
            Some("My Report.pdf")
        );
    }

    #[test]
    fn root_or_empty_path() {
        assert_eq!(filename_from_url_path("https://example.com/"), None);
        assert_eq!(filename_from_url_path("https://example.com"), None);
    }

    #[test]
    fn plain_filename_token_and_quoted() {
        assert_eq!(
            parse_content_disposition_filename("attachment; filename=photos.tar").as_deref(),
            Some("photos.tar")
        );
        assert_eq!(
            parse_content_disposition_filename("inline;filename=\"March; 2024.csv\"").as_deref(),
            Some("March; 2024.csv")
        );
        assert_eq!(
            parse_content_disposition_filename(r#"attachment; filename="say \"hi\".txt""#)
                .as_deref(),
            Some(r#"say "hi".txt"#)
        );
        assert_eq!(
            parse_content_disposition_filename("attachment; FileName = notes.md ; size=10")
                .as_deref(),
            Some("notes.md")
        );
    }

    #[test]
    fn extended_filename_wins() {
        assert_eq!(
            parse_content_disposition_filename(
                "attachment; filename*=UTF-8''%E6%8A%A5%E5%91%8A.pdf; filename=\"report.pdf\""
            )
            .as_deref(),
            Some("报告.pdf")
        );
        assert_eq!(
            parse_content_disposition_filename("attachment; filename*=iso-8859-1'en'%A3rates.xls")
                .as_deref(),
            Some("£rates.xls")
        );
    }

    #[test]
    fn unusable_extended_filename_falls_back() {
        assert_eq!(
            parse_content_disposition_filename(
                "attachment; filename*=koi8-r''%C1.txt; filename=plain.txt"
            )
            .as_deref(),
            Some("plain.txt")
        );
        assert_eq!(
            parse_content_disposition_filename("attachment; filename*=UTF-8''; filename=x.bin")
                .as_deref(),
            Some("x.bin")
        );
    }

    #[test]
    fn no_filename_parameter() {
        assert_eq!(parse_content_disposition_filename("inline"), None);
        assert_eq!(parse_content_disposition_filename("attachment; filename="), None);
        assert_eq!(parse_content_disposition_filename(""), None);
    }

    #[test]
    fn percent_decoding_is_lenient() {
        assert_eq!(percent_decode("100%25%20done"), "100% done");
        assert_eq!(percent_decode("50%"), "50%");
        assert_eq!(percent_decode("%zz%4"), "%zz%4");
    }

    #[test]
    fn derive_prefers_content_disposition() {
        assert_eq!(
            derive_file_name(
                "https://example.com/archive.zip",
                Some("attachment; filename=\"real-name.tar.gz\"")
            ),
            "real-name.tar.gz"
        );
    }

    #[test]
    fn derive_cleans_illegal_characters() {
        assert_eq!(
            derive_file_name("https://example.com/", Some("attachment; filename=\"a:b?.pdf\"")),
            "a：b？.pdf"
        );
        assert_eq!(
            derive_file_name("https://example.com/x%2Fy.txt", None),
            "x╱y.txt"
        );
    }

    #[test]
    fn derive_falls_back_to_default() {
        assert_eq!(derive_file_name("https://example.com/", None), "download.bin");
        assert_eq!(derive_file_name("https://example.com/..", None), "download.bin");
    }
}
