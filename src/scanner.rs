//! Source file discovery.
//!
//! Walks the project for `.js/.jsx/.ts/.tsx` files, honoring include
//! directories (literal paths or glob patterns) and ignore patterns. This
//! is I/O plumbing around the engine: the pipeline itself never touches the
//! filesystem.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

use crate::config::{Config, TEST_FILE_PATTERNS};

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
pub struct ScanResult {
    pub files: HashSet<String>,
    pub skipped_count: usize,
}

/// Scan for migratable source files under `base_dir` per the config.
pub fn scan_files(base_dir: &str, config: &Config, verbose: bool) -> ScanResult {
    let mut files: HashSet<String> = HashSet::new();
    let mut skipped_count = 0;

    let (literal_ignore_paths, mut glob_patterns) =
        split_ignore_patterns(base_dir, &config.ignores, verbose);

    if config.ignore_test_files {
        for pattern in TEST_FILE_PATTERNS {
            if let Ok(pattern) = Pattern::new(pattern) {
                glob_patterns.push(pattern);
            }
        }
    }

    for dir in dirs_to_scan(base_dir, &config.includes, verbose) {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    skipped_count += 1;
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), err);
                    }
                    continue;
                }
            };
            let path = entry.path();
            let path_str = path.to_string_lossy();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }
            if glob_patterns.iter().any(|pattern| pattern.matches(&path_str)) {
                continue;
            }

            if path.is_file() && is_migratable_file(path) {
                files.insert(path_str.into());
            }
        }
    }

    ScanResult {
        files,
        skipped_count,
    }
}

/// Separate ignore patterns into literal path prefixes and glob patterns.
fn split_ignore_patterns(
    base_dir: &str,
    ignores: &[String],
    verbose: bool,
) -> (Vec<PathBuf>, Vec<Pattern>) {
    let mut literal_paths = Vec::new();
    let mut glob_patterns = Vec::new();

    for pattern in ignores {
        if is_glob_pattern(pattern) {
            match Pattern::new(pattern) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(err) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            pattern,
                            err
                        );
                    }
                }
            }
        } else {
            literal_paths.push(Path::new(base_dir).join(pattern));
        }
    }

    (literal_paths, glob_patterns)
}

/// Expand the include list to directories. Empty includes mean the whole
/// base directory.
fn dirs_to_scan(base_dir: &str, includes: &[String], verbose: bool) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![Path::new(base_dir).to_path_buf()];
    }

    let mut paths = Vec::new();
    for include in includes {
        if is_glob_pattern(include) {
            let full_pattern = Path::new(base_dir).join(include);
            match glob(&full_pattern.to_string_lossy()) {
                Ok(entries) => {
                    for entry in entries.flatten() {
                        if entry.is_dir() {
                            paths.push(entry);
                        }
                    }
                }
                Err(err) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid glob pattern '{}': {}",
                            "warning:".bold().yellow(),
                            include,
                            err
                        );
                    }
                }
            }
        } else {
            let path = Path::new(base_dir).join(include);
            if path.exists() {
                paths.push(path);
            } else if verbose {
                eprintln!(
                    "{} Include path does not exist: {}",
                    "warning:".bold().yellow(),
                    path.display()
                );
            }
        }
    }
    paths
}

fn is_migratable_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("tsx" | "ts" | "jsx" | "js")
    )
}
