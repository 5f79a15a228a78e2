use arcade_tidy::{output, pipeline};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "arcade-tidy")]
#[command(about = "Reorganize a web arcade's game assets into a canonical layout")]
#[command(long_about = "\
Reorganize a web arcade's game assets into a canonical layout

One-shot migration: walks the site root, pulls stray files into their
canonical directories, and rewrites the games manifest to match. Run it
from (or point it at) the directory that holds games.json.

Canonical layout:

  <root>/
  ├── games.json               # Manifest: JSON array of game entries
  ├── assets/                  # Every image, keyed by basename
  ├── js/
  │   ├── engine.js            # Shared runtime (never moved)
  │   └── games/               # Every game script, keyed by basename
  └── games/
      └── <slug>/              # One folder per iframe game
          └── index.html

Manifest fields rewritten per entry:
  thumb:   any image path       → assets/<basename>
  script:  any script path      → js/games/<basename>
  path:    iframe entries only  → games/<slug>/index.html

Files already at a destination are never overwritten; the source stays
put and the collision is silent. Entries whose files cannot be found
anywhere are listed as unresolved at the end of the report.

Use --dry-run to see every planned move and rewrite without touching
the filesystem or the manifest.")]
#[command(version = env!("BUILD_VERSION"))]
struct Cli {
    /// Site root directory containing the games manifest
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Manifest file name, resolved inside the root
    #[arg(long, default_value = "games.json")]
    manifest: PathBuf,

    /// Plan and report every change without writing anything
    #[arg(long)]
    dry_run: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let options = pipeline::Options {
        root: cli.root,
        manifest: cli.manifest,
        dry_run: cli.dry_run,
    };

    match pipeline::run(&options) {
        Ok(report) => {
            output::print_report(&report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
