//! Storage name generation for uploaded files.
//!
//! Stored names are decoupled from what the client sent: the base name is
//! reduced to `[a-zA-Z0-9_-]`, capped at [`MAX_BASE_NAME_LEN`], and suffixed
//! with the upload's unix timestamp.

/// Longest sanitized base name kept before the timestamp suffix.
pub const MAX_BASE_NAME_LEN: usize = 100;

/// Splits a client-supplied name into base name and extension.
///
/// Any directory part (up to the last `/`) is dropped first. The extension is
/// whatever follows the last `.`, so `archive.tar.gz` yields
/// `("archive.tar", Some("gz"))` and `.env` yields `("", Some("env"))`.
pub fn split_name(original: &str) -> (&str, Option<&str>) {
    let basename = original.rsplit('/').next().unwrap_or(original);
    match basename.rfind('.') {
        Some(dot) => (&basename[..dot], Some(&basename[dot + 1..])),
        None => (basename, None),
    }
}

/// Replaces every byte outside `[a-zA-Z0-9_-]` with `_` and truncates.
///
/// Works on bytes, so one multi-byte character becomes several underscores.
pub fn sanitize_base_name(base: &str) -> String {
    base.bytes()
        .map(|b| {
            if b.is_ascii_alphanumeric() || b == b'_' || b == b'-' {
                char::from(b)
            } else {
                '_'
            }
        })
        .take(MAX_BASE_NAME_LEN)
        .collect()
}

/// Builds `{sanitized base}_{timestamp}.{lowercased extension}`.
///
/// A name without an extension still gets the trailing `.`.
pub fn safe_file_name(original: &str, timestamp: i64) -> String {
    let (base, extension) = split_name(original);
    let extension = extension.unwrap_or_default().to_ascii_lowercase();
    format!("{}_{timestamp}.{extension}", sanitize_base_name(base))
}

/// `name` with `_{counter}` inserted before the extension, used to find a
/// free name when `name` is already taken.
pub fn numbered_name(name: &str, counter: u64) -> String {
    match split_name(name) {
        (base, Some(extension)) => format!("{base}_{counter}.{extension}"),
        (base, None) => format!("{base}_{counter}"),
    }
}
