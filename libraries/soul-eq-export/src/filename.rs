//! File name sanitization
//!
//! Profile names are user text and end up in file names, so characters that
//! are reserved on Windows, macOS or Linux are replaced.

/// Name used when nothing usable is left after sanitizing
pub const FALLBACK_NAME: &str = "Untitled";

const RESERVED: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Make a profile name safe to embed in a file name
///
/// Reserved characters and control characters become `_`. Surrounding
/// whitespace and trailing dots are removed.
pub fn sanitize_file_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if RESERVED.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    let trimmed = replaced
        .trim_start()
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace());
    if trimmed.is_empty() {
        return FALLBACK_NAME.to_string();
    }

    if trimmed != name {
        tracing::debug!("Sanitized profile name {:?} -> {:?}", name, trimmed);
    }
    trimmed.to_string()
}
