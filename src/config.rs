//! Site layout discovery and validation.
//!
//! The whole pipeline operates relative to one root directory, the site
//! root, which holds the games manifest and every asset the manifest refers
//! to. [`Layout`] captures that root plus the canonical destinations derived
//! from it, and is constructed exactly once at startup and passed by
//! reference through every component. There are no module-level path
//! globals.
//!
//! ## Canonical layout
//!
//! ```text
//! <root>/
//! ├── games.json           # manifest (JSON array of game entries)
//! ├── assets/              # every image, keyed by basename
//! ├── js/
//! │   ├── engine.js        # shared runtime, never relocated
//! │   └── games/           # every game script, keyed by basename
//! └── games/
//!     └── <slug>/          # one folder per iframe game
//!         └── index.html
//! ```
//!
//! Discovery fails fast with a typed error if the root or the manifest is
//! missing; the canonical subdirectories are created on demand.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Canonical image directory, relative to the site root.
pub const ASSETS_DIR: &str = "assets";
/// Canonical game-script directory, relative to the site root.
pub const SCRIPTS_DIR: &str = "js/games";
/// Canonical iframe-game directory, relative to the site root.
pub const GAMES_DIR: &str = "games";

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("site root not found: {0}")]
    MissingRoot(PathBuf),
    #[error("manifest not found: {0}")]
    MissingManifest(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolved site layout: the root directory, the manifest file, and the
/// canonical destination directories.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Site root directory. All relative manifest paths resolve against it.
    pub root: PathBuf,
    /// File name of the root directory, used to strip a redundant leading
    /// `<root_name>/` segment from manifest paths.
    pub root_name: String,
    /// The games manifest file inside the root.
    pub manifest_path: PathBuf,
    /// `<root>/assets`
    pub assets_dir: PathBuf,
    /// `<root>/js/games`
    pub scripts_dir: PathBuf,
    /// `<root>/games`
    pub games_dir: PathBuf,
}

impl Layout {
    /// Resolve and validate the layout for `root` with the given manifest
    /// file name.
    ///
    /// Fails if the root is not an existing directory or the manifest file
    /// is absent. Runs before any filesystem mutation, so a failure here
    /// leaves the tree untouched.
    pub fn discover(root: &Path, manifest: &Path) -> Result<Layout, LayoutError> {
        if !root.is_dir() {
            return Err(LayoutError::MissingRoot(root.to_path_buf()));
        }
        let manifest_path = root.join(manifest);
        if !manifest_path.is_file() {
            return Err(LayoutError::MissingManifest(manifest_path));
        }

        // Resolve through canonicalize so `--root .` still yields the real
        // directory name for prefix stripping.
        let root_name = root
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_default();

        Ok(Layout {
            root_name,
            manifest_path,
            assets_dir: root.join(ASSETS_DIR),
            scripts_dir: root.join(SCRIPTS_DIR),
            games_dir: root.join(GAMES_DIR),
            root: root.to_path_buf(),
        })
    }

    /// Create the canonical destination directories if absent.
    pub fn ensure_dirs(&self) -> Result<(), LayoutError> {
        fs::create_dir_all(&self.assets_dir)?;
        fs::create_dir_all(&self.scripts_dir)?;
        fs::create_dir_all(&self.games_dir)?;
        Ok(())
    }

    /// Resolve a normalized relative path against the site root.
    pub fn resolve(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Render an absolute path under the root as a forward-slash relative
    /// string for reporting. Paths outside the root are shown as-is.
    pub fn display_rel(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.to_string_lossy().replace('\\', "/")
    }
}
