//! Mirrors the vault into the content root.
//!
//! Directories are created synchronously as the walk reaches them, so a
//! folder always exists before any file under it is dispatched. Files are
//! converted on the blocking pool, one task each, and the run waits for all
//! of them before returning, even when the walk itself fails.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinSet;
use walkdir::WalkDir;

use super::{ConversionReport, ConvertError, FileOutcome, Pipeline};
use crate::core::note::SourceFile;
use crate::core::paths::is_hidden;

type FileTask = (PathBuf, Result<FileOutcome, ConvertError>);

pub async fn convert(pipeline: Arc<Pipeline>) -> Result<ConversionReport, ConvertError> {
    let ctx = pipeline.context();
    let vault = &ctx.paths.vault;
    let content = &ctx.paths.content;

    if !vault.is_dir() {
        return Err(ConvertError::Config(format!(
            "vault path is not a directory: {}",
            vault.display()
        )));
    }
    if ctx.paths.content_inside_vault() {
        return Err(ConvertError::Config(format!(
            "content path {} is inside the vault",
            content.display()
        )));
    }

    if ctx.clear_output_dir && ctx.paths.vault_inside_content() {
        return Err(ConvertError::Config(format!(
            "refusing to clear {}: the vault is inside it",
            content.display()
        )));
    }

    prepare_output(content, ctx.clear_output_dir)?;
    log::info!("Converting {} -> {}", vault.display(), content.display());

    let mut tasks: JoinSet<FileTask> = JoinSet::new();
    let walked = dispatch(&pipeline, &mut tasks);

    let mut report = ConversionReport::default();
    let mut task_error = None;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((path, outcome)) => {
                if let Err(e) = &outcome {
                    log::warn!("{}", e);
                }
                report.record(path, outcome);
            }
            Err(e) => {
                log::error!("conversion task failed: {}", e);
                task_error.get_or_insert(e);
            }
        }
    }

    walked?;
    if let Some(e) = task_error {
        return Err(ConvertError::Task(e));
    }

    report.sort();
    log::info!(
        "Converted {} notes, copied {} files, {} failed",
        report.converted.len(),
        report.copied.len(),
        report.failures.len()
    );
    Ok(report)
}

/// Walks the vault depth-first, creating folders and spawning file tasks.
fn dispatch(pipeline: &Arc<Pipeline>, tasks: &mut JoinSet<FileTask>) -> Result<(), ConvertError> {
    let paths = &pipeline.context().paths;

    let walker = WalkDir::new(&paths.vault)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e.file_name()));

    for entry in walker {
        let entry = entry?;
        let source = entry.path();
        let dest = paths.mirror(source).ok_or_else(|| {
            ConvertError::Config(format!("{} is outside the vault", source.display()))
        })?;

        let file_type = entry.file_type();
        if file_type.is_dir() {
            create_dir(&dest)?;
            continue;
        }
        if file_type.is_symlink() && source.is_dir() {
            log::warn!("Skipping symlinked directory {}", source.display());
            continue;
        }

        log::debug!("Dispatching {}", source.display());
        let file = SourceFile::new(source, &dest);
        let pipeline = Arc::clone(pipeline);
        tasks.spawn_blocking(move || {
            let outcome = pipeline.convert_file(&file);
            (file.path, outcome)
        });
    }

    Ok(())
}

fn create_dir(path: &Path) -> Result<(), ConvertError> {
    match fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => Err(ConvertError::io(path, e)),
    }
}

/// Empties `content` when asked to, then makes sure it exists. Only entries
/// inside `content` are removed.
fn prepare_output(content: &Path, clear: bool) -> Result<(), ConvertError> {
    if clear && content.is_dir() {
        let entries = fs::read_dir(content).map_err(|e| ConvertError::io(content, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| ConvertError::io(content, e))?;
            let path = entry.path();
            let is_dir = entry
                .file_type()
                .map_err(|e| ConvertError::io(&path, e))?
                .is_dir();

            log::debug!("Removing {}", path.display());
            let removed = if is_dir {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };
            removed.map_err(|e| ConvertError::io(&path, e))?;
        }
    }

    fs::create_dir_all(content).map_err(|e| ConvertError::io(content, e))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::pipeline::ConvertConfig;

    fn pipeline(vault: &Path, content: &Path, clear: bool) -> Arc<Pipeline> {
        Arc::new(Pipeline::hugo(&ConvertConfig {
            vault_dir: vault.to_path_buf(),
            content_dir: content.to_path_buf(),
            clear_output_dir: clear,
            use_git_dates: false,
        }))
    }

    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let dir = TempDir::new().unwrap();
        let vault = dir.path().join("vault");
        let content = dir.path().join("content");
        fs::create_dir(&vault).unwrap();
        (dir, vault, content)
    }

    #[tokio::test]
    async fn test_skips_hidden_entries() {
        let (_dir, vault, content) = setup();
        fs::create_dir_all(vault.join(".git/objects")).unwrap();
        fs::create_dir(vault.join(".obsidian")).unwrap();
        fs::write(vault.join(".obsidian/app.json"), "{}").unwrap();
        fs::write(vault.join(".hidden.md"), "x").unwrap();
        fs::write(vault.join("visible.md"), "x").unwrap();

        let report = convert(pipeline(&vault, &content, false)).await.unwrap();

        assert!(!content.join(".git").exists());
        assert!(!content.join(".obsidian").exists());
        assert!(!content.join(".hidden.md").exists());
        assert!(content.join("visible.md").exists());
        assert_eq!(report.total_files(), 1);
    }

    #[tokio::test]
    async fn test_clear_removes_stray_entries() {
        let (_dir, vault, content) = setup();
        fs::create_dir_all(content.join("stale/deep")).unwrap();
        fs::write(content.join("old.txt"), "old").unwrap();
        fs::write(content.join("stale/deep/x.md"), "old").unwrap();
        fs::write(vault.join("new.md"), "new").unwrap();

        convert(pipeline(&vault, &content, true)).await.unwrap();

        assert!(!content.join("old.txt").exists());
        assert!(!content.join("stale").exists());
        assert!(content.join("new.md").exists());
    }

    #[tokio::test]
    async fn test_without_clear_keeps_existing() {
        let (_dir, vault, content) = setup();
        fs::create_dir(&content).unwrap();
        fs::write(content.join("old.txt"), "old").unwrap();

        convert(pipeline(&vault, &content, false)).await.unwrap();

        assert!(content.join("old.txt").exists());
    }

    #[tokio::test]
    async fn test_creates_missing_content_root() {
        let (_dir, vault, content) = setup();
        let nested = content.join("posts/notes");
        fs::write(vault.join("a.md"), "a").unwrap();

        convert(pipeline(&vault, &nested, true)).await.unwrap();

        assert!(nested.join("a.md").exists());
    }

    #[tokio::test]
    async fn test_mirrors_nested_directories() {
        let (_dir, vault, content) = setup();
        fs::create_dir_all(vault.join("a/b/c")).unwrap();
        fs::create_dir(vault.join("empty")).unwrap();
        fs::write(vault.join("a/b/c/deep.md"), "deep").unwrap();
        fs::write(vault.join("a/pic.png"), [0u8, 159, 146, 150]).unwrap();

        let report = convert(pipeline(&vault, &content, false)).await.unwrap();

        assert!(content.join("a/b/c/deep.md").is_file());
        assert!(content.join("empty").is_dir());
        assert_eq!(fs::read(content.join("a/pic.png")).unwrap(), vec![0u8, 159, 146, 150]);
        assert_eq!(report.converted, vec![vault.join("a/b/c/deep.md")]);
        assert_eq!(report.copied, vec![vault.join("a/pic.png")]);
    }

    #[tokio::test]
    async fn test_bad_file_does_not_stop_siblings() {
        let (_dir, vault, content) = setup();
        fs::write(vault.join("bad.md"), "---\ntitle: [oops\n---\n").unwrap();
        fs::write(vault.join("unclosed.md"), "---\ntitle: x\n").unwrap();
        fs::write(vault.join("binary.md"), [0xffu8, 0xfe, 0x00]).unwrap();
        fs::write(vault.join("good.md"), "fine").unwrap();

        let report = convert(pipeline(&vault, &content, false)).await.unwrap();

        assert_eq!(report.converted, vec![vault.join("good.md")]);
        assert_eq!(report.failures.len(), 3);
        assert!(!report.is_success());
        assert!(content.join("good.md").exists());
        assert!(!content.join("bad.md").exists());
    }

    #[tokio::test]
    async fn test_missing_vault_is_config_error() {
        let (dir, _vault, content) = setup();
        let err = convert(pipeline(&dir.path().join("nope"), &content, true))
            .await
            .unwrap_err();

        assert!(matches!(err, ConvertError::Config(_)));
        assert!(!content.exists());
    }

    #[tokio::test]
    async fn test_content_inside_vault_rejected() {
        let (_dir, vault, _content) = setup();
        fs::write(vault.join("keep.md"), "x").unwrap();

        let err = convert(pipeline(&vault, &vault.join("out"), true))
            .await
            .unwrap_err();

        assert!(matches!(err, ConvertError::Config(_)));
        assert!(vault.join("keep.md").exists());
    }

    #[tokio::test]
    async fn test_clear_never_removes_vault_inside_content() {
        let (dir, _vault, _content) = setup();
        let site = dir.path().join("site");
        let vault = site.join("vault");
        fs::create_dir_all(&vault).unwrap();
        fs::write(vault.join("a.md"), "keep me").unwrap();

        let err = convert(pipeline(&vault, &site, true)).await.unwrap_err();

        assert!(matches!(err, ConvertError::Config(_)));
        assert_eq!(fs::read_to_string(vault.join("a.md")).unwrap(), "keep me");
    }

    #[tokio::test]
    async fn test_vault_inside_content_without_clear_is_allowed() {
        let (dir, _vault, _content) = setup();
        let site = dir.path().join("site");
        let vault = site.join("notes-src");
        fs::create_dir_all(&vault).unwrap();
        fs::write(vault.join("a.md"), "x").unwrap();

        convert(pipeline(&vault, &site, false)).await.unwrap();

        assert!(vault.join("a.md").exists());
        assert!(site.join("a.md").exists());
    }
}
