//! Report accumulation and CLI output formatting.
//!
//! The pipeline is silent while it works; everything it did (and could not
//! do) is collected into a [`Report`] and printed once at the end of the
//! run. Stdout is the only reporting channel and the format is fixed
//! human-readable text — there is no machine-readable output.
//!
//! # Output Format
//!
//! ```text
//! Moved images: 3
//!   - old/cover.png -> assets/cover.png
//!   - raw/shot.jpg -> assets/shot.jpg
//!   - img/thumb.gif -> assets/thumb.gif
//!
//! Moved scripts: 1
//!   - js/pong.js -> js/games/pong.js
//!
//! Updated entries: 2
//!   - Pong: updated
//!   - Baz: updated
//!
//! Unresolved (1), fix these manually:
//!   - Foo: missing thumb file 'foo.png'
//! ```
//!
//! The two move lists cap at 50 lines with an `(N more omitted)` note;
//! updated and unresolved lists are always shown in full. A clean run ends
//! with `All entries resolved` instead of the unresolved section.
//!
//! # Architecture
//!
//! [`format_report`] is pure (returns `Vec<String>`, no I/O) so tests can
//! assert on exact output; [`print_report`] is the stdout wrapper.

/// Move lists longer than this are truncated in the printed report.
const MOVE_LIST_LIMIT: usize = 50;

/// Accumulated outcome of one run: what moved, what changed, what could
/// not be fixed. Line order within each list is the order events happened.
#[derive(Debug, Default)]
pub struct Report {
    /// Whether this run only planned changes.
    pub dry_run: bool,
    /// Image relocations, as `<old> -> assets/<name>` lines.
    pub moved_images: Vec<String>,
    /// Script relocations, as `<old> -> js/games/<name>` lines.
    pub moved_scripts: Vec<String>,
    /// Manifest entries whose value changed, as `<name>: updated` lines.
    pub updated_entries: Vec<String>,
    /// Per-entry failures needing manual attention.
    pub unresolved: Vec<String>,
}

impl Report {
    pub fn new(dry_run: bool) -> Self {
        Report {
            dry_run,
            ..Report::default()
        }
    }

    pub fn moved_image(&mut self, line: String) {
        self.moved_images.push(line);
    }

    pub fn moved_script(&mut self, line: String) {
        self.moved_scripts.push(line);
    }

    pub fn updated(&mut self, line: String) {
        self.updated_entries.push(line);
    }

    pub fn unresolved(&mut self, line: String) {
        self.unresolved.push(line);
    }
}

/// Format a move list section, truncated at [`MOVE_LIST_LIMIT`] lines.
fn move_section(label: &str, moves: &[String]) -> Vec<String> {
    let mut lines = vec![format!("{label}: {}", moves.len())];
    for line in moves.iter().take(MOVE_LIST_LIMIT) {
        lines.push(format!("  - {line}"));
    }
    if moves.len() > MOVE_LIST_LIMIT {
        lines.push(format!("  ({} more omitted)", moves.len() - MOVE_LIST_LIMIT));
    }
    lines
}

/// Format the full report as display lines.
pub fn format_report(report: &Report) -> Vec<String> {
    let mut lines = Vec::new();

    if report.dry_run {
        lines.push("Dry run: changes below are planned, nothing was written".to_string());
        lines.push(String::new());
    }

    lines.extend(move_section("Moved images", &report.moved_images));
    lines.push(String::new());
    lines.extend(move_section("Moved scripts", &report.moved_scripts));
    lines.push(String::new());

    lines.push(format!("Updated entries: {}", report.updated_entries.len()));
    for entry in &report.updated_entries {
        lines.push(format!("  - {entry}"));
    }
    lines.push(String::new());

    if report.unresolved.is_empty() {
        lines.push("All entries resolved".to_string());
    } else {
        lines.push(format!(
            "Unresolved ({}), fix these manually:",
            report.unresolved.len()
        ));
        for entry in &report.unresolved {
            lines.push(format!("  - {entry}"));
        }
    }

    lines
}

/// Print the report to stdout.
pub fn print_report(report: &Report) {
    for line in format_report(report) {
        println!("{}", line);
    }
}
