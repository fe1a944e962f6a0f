use clap::Args;
use serde::Serialize;

use reslug::migrate::{self, FileEdit, MigrationSpec, PathRename};

use crate::commands::CmdResult;

#[derive(Args)]
pub struct MigrateArgs {
    /// Root directory of the source tree to migrate
    pub path: String,

    /// Hyphenated slug to migrate to its underscore form
    #[arg(long, default_value = "pyenv-manager")]
    pub slug: String,

    /// File extension selecting which files get content rewriting
    #[arg(long, default_value = "lua")]
    pub extension: String,

    /// Report planned edits and renames without touching disk
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum MigrateOutput {
    #[serde(rename = "migrate")]
    Migrate {
        from: String,
        to: String,
        root: String,
        dry_run: bool,
        files_scanned: usize,
        total_edits: usize,
        total_renames: usize,
        edits: Vec<FileEdit>,
        renames: Vec<PathRename>,
        applied: bool,
    },
}

pub fn run(args: MigrateArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<MigrateOutput> {
    let spec = MigrationSpec::new(&args.slug, &args.extension)?;

    let root = shellexpand::tilde(&args.path).to_string();
    let root = std::path::PathBuf::from(root);

    let result = migrate::run(&spec, &root, !args.dry_run)?;

    Ok((
        MigrateOutput::Migrate {
            from: result.from,
            to: result.to,
            root: root.display().to_string(),
            dry_run: args.dry_run,
            files_scanned: result.files_scanned,
            total_edits: result.edits.len(),
            total_renames: result.renames.len(),
            edits: result.edits,
            renames: result.renames,
            applied: result.applied,
        },
        0,
    ))
}
