//! Path rename phase — bottom-up rename of slug-bearing files and
//! directories.
//!
//! Descendants are renamed before their ancestors so every rename operates
//! on a path whose parent components are still unchanged. Within one
//! directory listing, files are renamed before subdirectories.

use crate::error::{Error, Result};
use crate::log_status;
use crate::migrate::MigrationSpec;
use serde::Serialize;
use std::path::Path;

/// A file or directory rename.
#[derive(Debug, Clone, Serialize)]
pub struct PathRename {
    /// Original path relative to root.
    pub from: String,
    /// New path relative to root.
    pub to: String,
    /// "file" or "directory".
    pub kind: String,
}

/// Rename every entry under `root` whose name contains the slug. The root
/// directory itself is never renamed. Aborts on the first collision or
/// rename failure.
pub fn rename_tree(spec: &MigrationSpec, root: &Path, write: bool) -> Result<Vec<PathRename>> {
    let mut renames = Vec::new();
    rename_dir(spec, root, root, write, &mut renames)?;
    Ok(renames)
}

fn rename_dir(
    spec: &MigrationSpec,
    dir: &Path,
    root: &Path,
    write: bool,
    renames: &mut Vec<PathRename>,
) -> Result<()> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| Error::list_failed(dir.display().to_string(), e.to_string()))?;

    let mut files = Vec::new();
    let mut dirs = Vec::new();

    for entry in entries {
        let entry = entry
            .map_err(|e| Error::list_failed(dir.display().to_string(), e.to_string()))?;
        let file_type = entry
            .file_type()
            .map_err(|e| Error::list_failed(entry.path().display().to_string(), e.to_string()))?;

        // Symlinks are renamed like files but never descended into.
        if file_type.is_dir() {
            dirs.push(entry.path());
        } else {
            files.push(entry.path());
        }
    }

    // Process descendants first, while this directory's name is still
    // whatever the caller saw.
    for sub in &dirs {
        rename_dir(spec, sub, root, write, renames)?;
    }

    for file in &files {
        rename_entry(spec, file, root, write, "file", renames)?;
    }
    for sub in &dirs {
        rename_entry(spec, sub, root, write, "directory", renames)?;
    }

    Ok(())
}

fn rename_entry(
    spec: &MigrationSpec,
    path: &Path,
    root: &Path,
    write: bool,
    kind: &str,
    renames: &mut Vec<PathRename>,
) -> Result<()> {
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy().to_string(),
        None => return Ok(()),
    };

    let Some(new_name) = spec.renamed(&name) else {
        return Ok(());
    };

    let new_path = match path.parent() {
        Some(parent) => parent.join(&new_name),
        None => return Ok(()),
    };

    if write {
        if new_path.exists() {
            return Err(Error::rename_collision(
                path.display().to_string(),
                new_path.display().to_string(),
            ));
        }
        std::fs::rename(path, &new_path).map_err(|e| {
            Error::rename_failed(
                path.display().to_string(),
                new_path.display().to_string(),
                e.to_string(),
            )
        })?;
    }

    log_status!("rename", "{}", rename_notice(write, path, &new_path));
    renames.push(PathRename {
        from: relative(path, root),
        to: relative(&new_path, root),
        kind: kind.to_string(),
    });

    Ok(())
}

fn rename_notice(write: bool, from: &Path, to: &Path) -> String {
    if write {
        format!("Renamed {} -> {}", from.display(), to.display())
    } else {
        format!("Would rename {} -> {}", from.display(), to.display())
    }
}

fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn spec() -> MigrationSpec {
        MigrationSpec::new("pyenv-manager", "lua").unwrap()
    }

    #[test]
    fn renames_file_with_slug() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("pyenv-manager.lua"), "").unwrap();

        let renames = rename_tree(&spec(), dir.path(), true).unwrap();

        assert_eq!(renames.len(), 1);
        assert_eq!(renames[0].from, "pyenv-manager.lua");
        assert_eq!(renames[0].to, "pyenv_manager.lua");
        assert_eq!(renames[0].kind, "file");
        assert!(dir.path().join("pyenv_manager.lua").exists());
        assert!(!dir.path().join("pyenv-manager.lua").exists());
    }

    #[test]
    fn renames_only_exact_substring() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("pyenv-manager-plugin")).unwrap();

        let renames = rename_tree(&spec(), dir.path(), true).unwrap();

        // The trailing `-plugin` is untouched; only the exact slug changes.
        assert_eq!(renames[0].to, "pyenv_manager-plugin");
        assert!(dir.path().join("pyenv_manager-plugin").is_dir());
    }

    #[test]
    fn leaves_non_matching_names_alone() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("init.lua"), "").unwrap();
        std::fs::create_dir(dir.path().join("plugin")).unwrap();

        let renames = rename_tree(&spec(), dir.path(), true).unwrap();

        assert!(renames.is_empty());
        assert!(dir.path().join("init.lua").exists());
        assert!(dir.path().join("plugin").is_dir());
    }

    #[test]
    fn bottom_up_renames_descendants_before_ancestors() {
        let dir = TempDir::new().unwrap();
        let deep = dir.path().join("a").join("pyenv-manager").join("b");
        std::fs::create_dir_all(&deep).unwrap();
        std::fs::write(deep.join("pyenv-manager-file.lua"), "").unwrap();

        rename_tree(&spec(), dir.path(), true).unwrap();

        let resolved = dir
            .path()
            .join("a")
            .join("pyenv_manager")
            .join("b")
            .join("pyenv_manager-file.lua");
        assert!(resolved.exists(), "expected {} to exist", resolved.display());
    }

    #[test]
    fn fails_on_target_collision() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("pyenv-manager.lua"), "old").unwrap();
        std::fs::write(dir.path().join("pyenv_manager.lua"), "existing").unwrap();

        let err = rename_tree(&spec(), dir.path(), true).unwrap_err();
        assert_eq!(err.code.as_str(), "fs.rename_collision");

        // No rollback: the existing target is untouched.
        let content = std::fs::read_to_string(dir.path().join("pyenv_manager.lua")).unwrap();
        assert_eq!(content, "existing");
    }

    #[test]
    fn notice_wording_reflects_dry_run() {
        let from = Path::new("pyenv-manager");
        let to = Path::new("pyenv_manager");
        assert_eq!(
            rename_notice(true, from, to),
            "Renamed pyenv-manager -> pyenv_manager"
        );
        assert_eq!(
            rename_notice(false, from, to),
            "Would rename pyenv-manager -> pyenv_manager"
        );
    }

    #[test]
    fn dry_run_reports_renames_without_moving() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("pyenv-manager")).unwrap();

        let renames = rename_tree(&spec(), dir.path(), false).unwrap();

        assert_eq!(renames.len(), 1);
        assert_eq!(renames[0].kind, "directory");
        assert!(dir.path().join("pyenv-manager").is_dir());
        assert!(!dir.path().join("pyenv_manager").exists());
    }
}
