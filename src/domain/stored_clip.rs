use chrono::{DateTime, Utc};

/// An uploaded audio clip as it sits in the clip store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredClip {
    pub filename: String,
    pub size_bytes: u64,
    pub uploaded_at: DateTime<Utc>,
}

impl StoredClip {
    pub fn new(filename: impl Into<String>, size_bytes: u64, uploaded_at: DateTime<Utc>) -> Self {
        Self {
            filename: filename.into(),
            size_bytes,
            uploaded_at,
        }
    }
}

/// Reduces a client-supplied filename to a safe single path component.
///
/// Keeps ASCII alphanumerics, dots, dashes and underscores, maps whitespace
/// to underscores and drops everything else, including any directory parts.
/// Returns an empty string when nothing safe remains.
pub fn sanitize_filename(raw: &str) -> String {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or(raw);

    let mut cleaned: String = name
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    // No hidden or relative names
    while cleaned.starts_with('.') {
        cleaned.remove(0);
    }

    cleaned
}

/// Filename without its final extension, used to group result artifacts
/// belonging to one clip.
pub fn clip_stem(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => filename,
    }
}

/// True when a client-supplied name is a plain file name that cannot escape
/// the storage directory.
pub fn is_safe_path_component(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && !name.contains("..")
}
