//! The migration pipeline, end to end.
//!
//! One call to [`run`] performs the whole one-shot migration, strictly in
//! this order:
//!
//! ```text
//! 1. discover layout      (fatal if root or manifest is missing)
//! 2. load manifest        (fatal if the top level is not a JSON array)
//! 3. create canonical dirs
//! 4. image sweep          (tree-wide, into assets/)
//! 5. script sweep         (tree-wide, into js/games/)
//! 6. process entries      (array order, field rewriting + targeted moves)
//! 7. save manifest        (single pretty-printed write)
//! ```
//!
//! Steps 1 and 2 run before any filesystem mutation, so a fatal abort
//! leaves the tree untouched. Everything is single-threaded and blocking;
//! there are no retries and no rollback. The pipeline is a fixed point:
//! running it again over its own output moves nothing and updates nothing.
//!
//! In dry-run mode steps 3 and 7 are skipped and every move in 4 through 6
//! is planned instead of performed; the returned [`Report`] is the same as
//! a real run's.

use crate::config::{Layout, LayoutError};
use crate::manifest::{self, ManifestError};
use crate::output::Report;
use crate::process;
use crate::relocate::{self, Mover};
use std::path::PathBuf;
use thiserror::Error;

/// Fatal pipeline failures. Per-entry problems are not errors; they end up
/// in the report's unresolved list instead.
#[derive(Error, Debug)]
pub enum FixError {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What to run on: the site root, the manifest file name inside it, and
/// whether to only plan.
#[derive(Debug, Clone)]
pub struct Options {
    pub root: PathBuf,
    pub manifest: PathBuf,
    pub dry_run: bool,
}

/// Run the full migration and return the report.
pub fn run(options: &Options) -> Result<Report, FixError> {
    let layout = Layout::discover(&options.root, &options.manifest)?;
    let mut entries = manifest::load(&layout.manifest_path)?;

    let mut mover = Mover::new(options.dry_run);
    let mut report = Report::new(options.dry_run);

    if !options.dry_run {
        layout.ensure_dirs()?;
    }

    relocate::sweep_images(&layout, &mut mover, &mut report)?;
    relocate::sweep_scripts(&layout, &mut mover, &mut report)?;
    process::process_entries(&layout, &mut entries, &mut mover, &mut report)?;

    if !options.dry_run {
        manifest::save(&layout.manifest_path, &entries)?;
    }

    Ok(report)
}
