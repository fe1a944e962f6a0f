//! Slug migration engine — rewrite module references and rename paths.
//!
//! Given a `MigrationSpec` (hyphenated slug → underscore form), a run:
//! 1. Walks the tree rewriting matching files with the ordered rule list
//! 2. Walks the tree again, bottom-up, renaming files and directories
//!    whose names contain the slug
//!
//! Both phases abort on the first unrecovered error; there is no rollback
//! of changes already applied.

pub mod rename;
pub mod rewrite;
pub mod rules;

pub use rename::PathRename;
pub use rewrite::FileEdit;
pub use rules::{MigrationSpec, Rule};

use crate::error::{Error, Result};
use serde::Serialize;
use std::path::Path;

/// The full result of a migration run.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationResult {
    /// The hyphenated slug that was migrated.
    pub from: String,
    /// The underscore form it was migrated to.
    pub to: String,
    /// Number of files whose content was examined.
    pub files_scanned: usize,
    /// File content edits (applied or planned).
    pub edits: Vec<FileEdit>,
    /// File/directory renames (applied or planned).
    pub renames: Vec<PathRename>,
    /// Whether changes were written to disk.
    pub applied: bool,
}

/// Run the two-phase migration under `root`.
///
/// All content rewrites for the whole tree complete before any rename
/// begins. With `write` false, every edit and rename is computed and
/// reported but nothing on disk changes.
pub fn run(spec: &MigrationSpec, root: &Path, write: bool) -> Result<MigrationResult> {
    if !root.exists() {
        return Err(Error::root_not_found(root.display().to_string()));
    }
    if !root.is_dir() {
        return Err(Error::not_a_directory(root.display().to_string()));
    }

    let report = rewrite::rewrite_tree(spec, root, write)?;
    let renames = rename::rename_tree(spec, root, write)?;

    Ok(MigrationResult {
        from: spec.from.clone(),
        to: spec.to.clone(),
        files_scanned: report.files_scanned,
        edits: report.edits,
        renames,
        applied: write,
    })
}
