//! Streaming history loader
//!
//! Finds export files in a directory, reads each JSON array and normalizes
//! every record into a `Play`.

use glob::Pattern;
use rayon::prelude::*;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::consts::HISTORY_FILE_PATTERNS;
use crate::core::{Play, Variant, normalize};
use crate::error::AppError;

/// Raw records of one export file, in file order
#[derive(Debug)]
pub(crate) struct RawBatch {
    pub(crate) file: PathBuf,
    pub(crate) records: Vec<Value>,
}

/// Loading result with statistics
#[derive(Debug)]
pub(crate) struct LoadResult {
    /// Plays in file order, then record order (not yet sorted by time)
    pub(crate) plays: Vec<Play>,
    pub(crate) file_count: usize,
    pub(crate) variants: BTreeMap<Variant, usize>,
    pub(crate) elapsed_ms: f64,
}

fn history_patterns() -> Vec<Pattern> {
    HISTORY_FILE_PATTERNS
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect()
}

fn is_history_file(path: &Path, patterns: &[Pattern]) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|s| s.to_str())
            .is_some_and(|name| patterns.iter().any(|p| p.matches(name)))
}

/// Export files directly inside `dir`, sorted by path
pub(crate) fn find_history_files(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    if !dir.is_dir() {
        return Err(AppError::MissingInputDirectory {
            path: dir.to_path_buf(),
        });
    }

    let list_error = |source: std::io::Error| AppError::ReadFile {
        path: dir.to_path_buf(),
        source,
    };
    let patterns = history_patterns();
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_error)? {
        let path = entry.map_err(list_error)?.path();
        if is_history_file(&path, &patterns) {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        return Err(AppError::EmptyInputSet {
            path: dir.to_path_buf(),
        });
    }
    Ok(files)
}

/// Read one export file: a JSON array of records
pub(crate) fn read_batch(path: &Path) -> Result<RawBatch, AppError> {
    let content = fs::read_to_string(path).map_err(|source| AppError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<Value> =
        serde_json::from_str(&content).map_err(|source| AppError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(RawBatch {
        file: path.to_path_buf(),
        records,
    })
}

/// Normalize every record of a batch; the first bad record aborts the batch
fn normalize_batch(batch: &RawBatch) -> Result<Vec<(Variant, Play)>, AppError> {
    let results: Vec<_> = batch.records.par_iter().map(normalize).collect();
    results
        .into_iter()
        .enumerate()
        .map(|(index, result)| {
            result.map_err(|source| AppError::Schema {
                file: batch.file.clone(),
                index,
                source,
            })
        })
        .collect()
}

/// Load plays from export files
pub(crate) struct DataLoader {
    quiet: bool,
    debug: bool,
}

impl DataLoader {
    pub(crate) fn new(quiet: bool, debug: bool) -> Self {
        Self { quiet, debug }
    }

    /// Discover → read (parallel) → normalize (parallel) → concatenate in file order.
    /// Any failure aborts the whole load.
    pub(crate) fn load(&self, dir: &Path) -> Result<LoadResult, AppError> {
        let load_start = Instant::now();

        let files = find_history_files(dir)?;
        if !self.quiet {
            eprintln!(
                "Scanning {} history files in {}...",
                files.len(),
                dir.display()
            );
        }

        let parse_start = Instant::now();
        let batches: Vec<Result<RawBatch, AppError>> =
            files.par_iter().map(|path| read_batch(path)).collect();
        let batches: Vec<RawBatch> = batches.into_iter().collect::<Result<_, _>>()?;
        let record_count: usize = batches.iter().map(|b| b.records.len()).sum();
        let parse_ms = parse_start.elapsed().as_secs_f64() * 1000.0;

        if !self.quiet {
            eprintln!("Parsed {record_count} records ({parse_ms:.2}ms)");
        }

        let normalize_start = Instant::now();
        let mut plays = Vec::with_capacity(record_count);
        let mut variants: BTreeMap<Variant, usize> = BTreeMap::new();
        for batch in &batches {
            let normalized = normalize_batch(batch)?;
            if self.debug && !self.quiet {
                eprintln!(
                    "[DEBUG] {}: {} records",
                    batch.file.display(),
                    normalized.len()
                );
            }
            for (variant, play) in normalized {
                *variants.entry(variant).or_default() += 1;
                plays.push(play);
            }
        }
        let normalize_ms = normalize_start.elapsed().as_secs_f64() * 1000.0;

        if self.debug && !self.quiet {
            eprintln!("[DEBUG] Normalized {} plays ({normalize_ms:.2}ms)", plays.len());
        }

        Ok(LoadResult {
            plays,
            file_count: files.len(),
            variants,
            elapsed_ms: load_start.elapsed().as_secs_f64() * 1000.0,
        })
    }
}
