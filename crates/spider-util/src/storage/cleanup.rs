//! File-name cleanup that keeps names readable.
//!
//! Instead of stripping characters that filesystems reject, each one is
//! replaced by a similar-looking Unicode character so scraped titles survive
//! as file names.

/// Options for [`file_name_cleanup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Strip leading whitespace.
    pub trim_start: bool,
    /// Strip trailing whitespace.
    pub trim_end: bool,
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self {
            trim_start: true,
            trim_end: true,
        }
    }
}

/// Returns `name` with characters that are illegal in file names replaced.
///
/// - `|` `?` `*` `/` `\` `:` `>` `<` become `-` `？` `×` `╱` `╲` `：` `〉` `〈`
/// - `\n` and `\r` become `_`
/// - the HTML entity `&nbsp;` becomes a space
/// - straight double quotes alternate between `“` and `”`
pub fn file_name_cleanup(name: &str, options: &CleanupOptions) -> String {
    let name = name.replace("&nbsp;", " ");
    let mut out = String::with_capacity(name.len());
    let mut open_quote = true;

    for c in name.chars() {
        let replacement = match c {
            '|' => '-',
            '?' => '？',
            '*' => '×',
            '/' => '╱',
            '\\' => '╲',
            ':' => '：',
            '>' => '〉',
            '<' => '〈',
            '\n' | '\r' => '_',
            '"' => {
                let q = if open_quote { '“' } else { '”' };
                open_quote = !open_quote;
                q
            }
            other => other,
        };
        out.push(replacement);
    }

    let trimmed = match (options.trim_start, options.trim_end) {
        (true, true) => out.trim(),
        (true, false) => out.trim_start(),
        (false, true) => out.trim_end(),
        (false, false) => out.as_str(),
    };
    trimmed.to_string()
}
