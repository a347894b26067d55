//! Dayshift - moment.js to Day.js codemod
//!
//! Dayshift is a CLI tool and library for mechanically migrating codebases
//! from moment.js to Day.js. It rewrites imports, call sites and type
//! references through a declarative rule table, and reports which Day.js
//! plugins and locale files each rewritten file needs — Day.js is modular
//! where moment.js is monolithic, so the call rewrite alone is not enough.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands)
//! - `config`: Configuration file loading and parsing
//! - `core`: The rewrite engine (rule table, matcher passes, pipeline)
//! - `issues`: Issue type definitions
//! - `report`: Cargo-style diagnostic printing
//! - `scanner`: Source file discovery

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod report;
pub mod scanner;
