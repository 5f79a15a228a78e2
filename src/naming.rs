//! Centralized name and path normalization.
//!
//! Manifest entries carry two kinds of strings that need taming before the
//! filesystem ever sees them: display names (turned into directory slugs)
//! and relative paths written by hand on various platforms (backslashes,
//! `./` prefixes, absolute-looking leading slashes, or a redundant copy of
//! the root folder name). This module provides both normalizations so every
//! caller agrees on the result.
//!
//! ## Slugs
//!
//! A slug is the filesystem-safe identity of a game, derived from its
//! display name:
//! - `"Neon Trail Riders"` → `"neon-trail-riders"` (per-game folder name)
//! - `"ROBO  Arena!!"` → `"robo-arena"`
//! - `"   "` → `"game"` (fallback, never empty)

/// Derive a filesystem-safe slug from a display name.
///
/// Lowercases, trims, replaces every maximal run of non-alphanumeric
/// characters with a single dash, and strips leading/trailing dashes.
/// The result contains only `[a-z0-9-]`. An input with no usable
/// characters yields the literal `"game"` so callers always get a valid
/// directory name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "game".to_string()
    } else {
        slug.to_string()
    }
}

/// Normalize a manifest-supplied relative path string.
///
/// Applied before resolving the string against the filesystem:
/// - backslashes become forward slashes
/// - surrounding whitespace is trimmed
/// - a leading `./` (with any number of slashes) is stripped
/// - leading slashes are stripped
/// - a leading `<root_name>/` segment is stripped, case-insensitively
///
/// Each prefix is stripped once, in that order. `root_name` is the file
/// name of the site root directory, so `"ARCADE/games/foo/index.html"`
/// and `"games/foo/index.html"` resolve identically.
pub fn normalize_rel(raw: &str, root_name: &str) -> String {
    let p = raw.replace('\\', "/");
    let mut p = p.trim();

    if let Some(rest) = p.strip_prefix("./") {
        p = rest.trim_start_matches('/');
    }
    p = p.trim_start_matches('/');

    let n = root_name.len();
    if n > 0
        && p.len() > n
        && p.is_char_boundary(n)
        && p[..n].eq_ignore_ascii_case(root_name)
        && p.as_bytes()[n] == b'/'
    {
        p = p[n + 1..].trim_start_matches('/');
    }
    p.to_string()
}

/// Extract the final path segment of a normalized relative path.
///
/// Returns `None` for strings with no usable file name (empty, `.`, `..`).
pub fn basename(rel: &str) -> Option<&str> {
    let trimmed = rel.trim_end_matches('/');
    let name = trimmed.rsplit('/').next()?;
    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name)
    }
}
