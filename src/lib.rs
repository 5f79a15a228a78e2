//! # arcade-tidy
//!
//! A one-shot migration tool for web arcades whose asset tree has drifted:
//! thumbnails scattered through ad-hoc folders, game scripts next to their
//! prototypes, iframe games under whatever directory they were first
//! unzipped into — and a `games.json` manifest pointing at all of it with
//! hand-written relative paths.
//!
//! One run pulls every asset into a canonical layout and rewrites the
//! manifest to match:
//!
//! ```text
//! assets/<basename>           # every image
//! js/games/<basename>         # every game script (engine.js stays put)
//! games/<slug>/index.html     # one folder per iframe game
//! ```
//!
//! # Pipeline
//!
//! A single linear pass, no concurrency, no retries:
//!
//! ```text
//! 1. Discover   root + manifest → Layout      (fatal if either is missing)
//! 2. Load       games.json → Vec<Value>       (fatal if not a JSON array)
//! 3. Sweep      stray images → assets/, stray scripts → js/games/
//! 4. Process    each entry: resolve thumb, iframe path, script
//! 5. Save       manifest written back once, pretty-printed
//! 6. Report     moved / updated / unresolved lists on stdout
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `Layout` discovery: root, manifest, canonical directories |
//! | [`naming`] | Slug derivation and manifest path-string normalization |
//! | [`manifest`] | JSON array load/save, entries kept as raw values |
//! | [`relocate`] | Safe mover, basename search, bulk image/script sweeps |
//! | [`process`] | Per-entry field resolution and targeted relocation |
//! | [`output`] | Report accumulator and stdout formatting |
//! | [`pipeline`] | End-to-end driver tying the stages together |
//!
//! # Design Decisions
//!
//! ## Best-Effort, Not Transactional
//!
//! The tool mutates the filesystem as it goes and writes the manifest once
//! at the end. A crash mid-run leaves moved files with a stale manifest;
//! the cure is to run the tool again — every step is idempotent, and a
//! second run over a finished tree moves nothing and rewrites nothing.
//!
//! ## Destination Always Wins
//!
//! A file already at a computed destination is never overwritten, without
//! comparing contents. Moving is keyed purely by basename, so two stray
//! files with the same name collide and the second stays where it was.
//! The alternative (content hashing, renaming) would turn a dumb, auditable
//! migration into a merge tool.
//!
//! ## Raw JSON Values
//!
//! Manifest entries are `serde_json::Value`, not a typed struct. The tool
//! rewrites three known fields and must preserve everything else exactly,
//! including fields added by other tools it has never heard of. Deep
//! equality against a snapshot doubles as change detection for the report.
//!
//! ## Deterministic Search Order
//!
//! When a referenced file has to be hunted down by basename, directory
//! entries are visited in file-name order, so among duplicate basenames
//! the lexicographically-first path wins on every platform, every run.

pub mod config;
pub mod manifest;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod relocate;
