use std::path::{Path, PathBuf};

pub const MARKDOWN_EXTENSION: &str = "md";

/// One file picked up by the walker, alive for a single conversion.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub dest: PathBuf,
    pub name: String,
    /// Title candidate derived from the file name.
    pub title: String,
}

impl SourceFile {
    pub fn new(path: &Path, dest: &Path) -> Self {
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        let title = fallback_title(path);

        Self {
            path: path.to_path_buf(),
            dest: dest.to_path_buf(),
            name,
            title,
        }
    }

    pub fn is_markdown(&self) -> bool {
        is_markdown(&self.path)
    }
}

pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e == MARKDOWN_EXTENSION)
        .unwrap_or(false)
}

/// File stem without `#`, which would otherwise break a `ref` target.
pub fn fallback_title(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().replace('#', ""))
        .unwrap_or_default();

    if stem.is_empty() {
        "untitled".to_string()
    } else {
        stem
    }
}

/// Every character outside `[A-Za-z0-9]` becomes `-`, then lowercase.
/// Leading and trailing hyphens are trimmed unless nothing would remain.
/// The trim exists so `My Title!` gives `my-title`; without it the rule
/// alone yields `my-title-`.
pub fn slugify(title: &str) -> String {
    let slug: String = title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();

    let trimmed = slug.trim_matches('-');
    if trimmed.is_empty() {
        slug
    } else {
        trimmed.to_string()
    }
}
