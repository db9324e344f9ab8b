use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Source vault and destination content root for one run.
#[derive(Debug, Clone)]
pub struct ConvertPaths {
    pub vault: PathBuf,
    pub content: PathBuf,
}

impl ConvertPaths {
    pub fn new(vault: impl Into<PathBuf>, content: impl Into<PathBuf>) -> Self {
        Self {
            vault: vault.into(),
            content: content.into(),
        }
    }

    /// Maps a path under the vault to the same relative path under the
    /// content root.
    pub fn mirror(&self, source: &Path) -> Option<PathBuf> {
        source
            .strip_prefix(&self.vault)
            .ok()
            .map(|rel| self.content.join(rel))
    }

    /// True when the content root sits inside the vault, which would make the
    /// walker descend into its own output.
    pub fn content_inside_vault(&self) -> bool {
        match (self.vault.canonicalize(), absolute(&self.content)) {
            (Ok(vault), Some(content)) => content.starts_with(vault),
            _ => false,
        }
    }

    /// True when the vault is the content root or sits inside it, so clearing
    /// the content root would delete the notes.
    pub fn vault_inside_content(&self) -> bool {
        match (self.vault.canonicalize(), absolute(&self.content)) {
            (Ok(vault), Some(content)) => vault.starts_with(content),
            _ => false,
        }
    }
}

/// Canonical form of a path that may not exist yet: the nearest existing
/// ancestor is canonicalized and the rest appended.
fn absolute(path: &Path) -> Option<PathBuf> {
    let mut existing = path;
    let mut rest = Vec::new();
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            return Some(rest.iter().rev().fold(canonical, |acc, part| acc.join(part)));
        }
        rest.push(existing.file_name()?.to_os_string());
        existing = existing.parent()?;
        if existing.as_os_str().is_empty() {
            existing = Path::new(".");
        }
    }
}

pub fn is_hidden(name: &OsStr) -> bool {
    name.to_str().map(|s| s.starts_with('.')).unwrap_or(false)
}
