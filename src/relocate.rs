//! File relocation: the safe mover, basename search, and bulk sweeps.
//!
//! All filesystem mutation funnels through [`Mover::safe_move`], which
//! enforces the one collision policy this tool has: a file already at the
//! destination always wins, and the source stays where it is. There is no
//! content comparison and no merging.
//!
//! The two bulk sweeps run before any manifest entry is touched. They walk
//! the whole tree once each and pull stray images into `assets/` and stray
//! scripts into `js/games/`, keyed purely by basename. Two sources sharing
//! a basename collide, and the second one loses silently.
//!
//! In dry-run mode the mover performs no I/O at all; planned destinations
//! are tracked in a claimed-set so that later existence checks within the
//! same run observe them, and the resulting report matches a real run.

use crate::config::Layout;
use crate::output::Report;
use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Image extensions relocated by the image sweep, lowercase.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];

/// The shared runtime script, never relocated.
const ENGINE_SCRIPT: &str = "engine.js";

/// What [`Mover::safe_move`] did with a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Source moved (or, in dry-run mode, planned) to the destination.
    Moved,
    /// Destination already occupied; source left in place.
    SkippedExisting,
}

/// Performs every move of the run, honoring the no-overwrite policy and
/// the dry-run mode.
pub struct Mover {
    dry_run: bool,
    /// Destinations planned so far in a dry run. Lets existence checks and
    /// collision handling behave exactly as they would after real moves.
    claimed: HashSet<PathBuf>,
}

impl Mover {
    pub fn new(dry_run: bool) -> Self {
        Mover {
            dry_run,
            claimed: HashSet::new(),
        }
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Whether a destination is occupied, counting planned dry-run moves.
    pub fn dst_exists(&self, path: &Path) -> bool {
        path.exists() || self.claimed.contains(path)
    }

    /// Move `src` to `dst`, creating destination parent directories.
    ///
    /// If the destination already exists the call is a silent no-op and the
    /// source is left in place. Works on files and directories; a rename
    /// that fails for a regular file (cross-device moves) falls back to
    /// copy-then-remove.
    pub fn safe_move(&mut self, src: &Path, dst: &Path) -> io::Result<MoveOutcome> {
        if self.dst_exists(dst) {
            return Ok(MoveOutcome::SkippedExisting);
        }
        if self.dry_run {
            self.claimed.insert(dst.to_path_buf());
            return Ok(MoveOutcome::Moved);
        }

        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }
        match fs::rename(src, dst) {
            Ok(()) => Ok(MoveOutcome::Moved),
            Err(_) if src.is_file() => {
                fs::copy(src, dst)?;
                fs::remove_file(src)?;
                Ok(MoveOutcome::Moved)
            }
            Err(err) => Err(err),
        }
    }

    /// Remove a directory if it is empty; failure (e.g. leftovers from a
    /// collision) is tolerated. No-op in dry-run mode.
    pub fn remove_dir_if_empty(&self, dir: &Path) {
        if !self.dry_run {
            let _ = fs::remove_dir(dir);
        }
    }
}

/// Find the first file under `root` whose name matches `basename` exactly.
///
/// Directory entries are visited in file-name order, so when several files
/// share the basename the lexicographically-first path wins, on every
/// platform.
pub fn find_by_basename(root: &Path, basename: &str) -> Option<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .find(|e| e.file_type().is_file() && e.file_name() == OsStr::new(basename))
        .map(|e| e.into_path())
}

/// Whether a walk entry should be pruned: `node_modules` and `.git`
/// segments are never touched, in any capitalization.
fn is_vendored(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|n| n.eq_ignore_ascii_case("node_modules") || n.eq_ignore_ascii_case(".git"))
}

fn has_extension_in(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(str::to_lowercase)
        .is_some_and(|ext| extensions.contains(&ext.as_str()))
}

/// Collect files under the root that satisfy `wanted`, pruning vendored
/// directories and the `exclude` subtree. Materialized before any move so
/// the walk never observes its own renames.
fn collect_strays(root: &Path, exclude: &Path, wanted: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_vendored(e) && e.path() != exclude)
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file() && wanted(e.path()))
        .map(|e| e.into_path())
        .collect()
}

/// Relocate every image in the tree into the canonical assets directory.
///
/// Files already inside `assets/` stay put. Moves are recorded in the
/// report; collisions are silent no-ops.
pub fn sweep_images(layout: &Layout, mover: &mut Mover, report: &mut Report) -> io::Result<()> {
    let strays = collect_strays(&layout.root, &layout.assets_dir, |p| {
        has_extension_in(p, IMAGE_EXTENSIONS)
    });

    for src in strays {
        let name = src.file_name().expect("walked file has a name").to_owned();
        let dst = layout.assets_dir.join(&name);
        if mover.safe_move(&src, &dst)? == MoveOutcome::Moved {
            report.moved_image(format!(
                "{} -> assets/{}",
                layout.display_rel(&src),
                name.to_string_lossy()
            ));
        }
    }
    Ok(())
}

/// Relocate every game script in the tree into the canonical scripts
/// directory.
///
/// `engine.js` is shared infrastructure and is never moved; files already
/// inside `js/games/` stay put.
pub fn sweep_scripts(layout: &Layout, mover: &mut Mover, report: &mut Report) -> io::Result<()> {
    let strays = collect_strays(&layout.root, &layout.scripts_dir, |p| {
        has_extension_in(p, &["js"])
            && p.file_name()
                .and_then(OsStr::to_str)
                .is_none_or(|n| !n.eq_ignore_ascii_case(ENGINE_SCRIPT))
    });

    for src in strays {
        let name = src.file_name().expect("walked file has a name").to_owned();
        let dst = layout.scripts_dir.join(&name);
        if mover.safe_move(&src, &dst)? == MoveOutcome::Moved {
            report.moved_script(format!(
                "{} -> js/games/{}",
                layout.display_rel(&src),
                name.to_string_lossy()
            ));
        }
    }
    Ok(())
}
