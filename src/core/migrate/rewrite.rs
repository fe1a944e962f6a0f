//! Content rewrite phase — apply the ordered rule list to matching files.

use crate::error::{Error, Result};
use crate::log_status;
use crate::migrate::MigrationSpec;
use crate::utils::io;
use serde::Serialize;
use std::path::Path;

/// An edit to a file's content.
#[derive(Debug, Clone, Serialize)]
pub struct FileEdit {
    /// File path relative to root.
    pub file: String,
    /// Number of replacements across all rules.
    pub replacements: usize,
}

/// Outcome of the rewrite phase.
#[derive(Debug, Clone, Default)]
pub struct RewriteReport {
    pub edits: Vec<FileEdit>,
    pub files_scanned: usize,
}

/// Rewrite every file under `root` whose name ends with the spec's
/// extension. Files whose content is unchanged by the rule list are not
/// written back. Aborts on the first read or write failure.
pub fn rewrite_tree(spec: &MigrationSpec, root: &Path, write: bool) -> Result<RewriteReport> {
    let mut report = RewriteReport::default();
    rewrite_dir(spec, root, root, write, &mut report)?;
    Ok(report)
}

fn rewrite_dir(
    spec: &MigrationSpec,
    dir: &Path,
    root: &Path,
    write: bool,
    report: &mut RewriteReport,
) -> Result<()> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| Error::list_failed(dir.display().to_string(), e.to_string()))?;

    for entry in entries {
        let entry = entry
            .map_err(|e| Error::list_failed(dir.display().to_string(), e.to_string()))?;
        let file_type = entry
            .file_type()
            .map_err(|e| Error::list_failed(entry.path().display().to_string(), e.to_string()))?;
        let path = entry.path();

        // Symlinks are neither followed nor rewritten.
        if file_type.is_dir() {
            rewrite_dir(spec, &path, root, write, report)?;
        } else if file_type.is_file() {
            let name = entry.file_name().to_string_lossy().to_string();
            if spec.matches_extension(&name) {
                rewrite_file(spec, &path, root, write, report)?;
            }
        }
    }

    Ok(())
}

fn rewrite_file(
    spec: &MigrationSpec,
    path: &Path,
    root: &Path,
    write: bool,
    report: &mut RewriteReport,
) -> Result<()> {
    report.files_scanned += 1;

    let content = io::read_text(path)?;

    let mut modified = content.clone();
    let mut replacements = 0;
    for rule in &spec.rules {
        let (next, count) = rule.apply(&modified);
        modified = next;
        replacements += count;
    }

    if modified != content {
        if write {
            io::write_text(path, &modified)?;
        }
        log_status!("rewrite", "{}", update_notice(write, path));
        report.edits.push(FileEdit {
            file: relative(path, root),
            replacements,
        });
    }

    Ok(())
}

fn update_notice(write: bool, path: &Path) -> String {
    if write {
        format!("Updated file: {}", path.display())
    } else {
        format!("Would update file: {}", path.display())
    }
}

fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}
