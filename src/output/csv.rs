use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::{CumulativeSeries, PeriodLabel};
use crate::error::AppError;
use crate::output::format::format_minutes;

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Subject-by-period matrix: one row per subject in first-insertion order, one
/// column per axis label. Cells without a recorded value are left empty.
pub(crate) fn render_matrix(series: &CumulativeSeries, axis: &[PeriodLabel]) -> String {
    let columns: HashMap<&PeriodLabel, usize> =
        axis.iter().enumerate().map(|(i, l)| (l, i)).collect();

    let mut out = String::new();
    for label in axis {
        out.push(',');
        out.push_str(&csv_escape(label.as_str()));
    }
    out.push('\n');

    let mut row: Vec<Option<f64>> = vec![None; axis.len()];
    for subject in series.iter() {
        row.fill(None);
        for (label, value) in &subject.cells {
            if let Some(&col) = columns.get(label) {
                row[col] = Some(*value);
            }
        }

        out.push_str(&csv_escape(&subject.key));
        for cell in &row {
            out.push(',');
            if let Some(v) = cell {
                let _ = write!(out, "{}", format_minutes(*v));
            }
        }
        out.push('\n');
    }

    out
}

/// Rendered matrix waiting to be written
#[derive(Debug)]
pub(crate) struct MatrixFile {
    pub(crate) path: PathBuf,
    pub(crate) content: String,
}

impl MatrixFile {
    pub(crate) fn new(dir: &Path, name: &str, content: String) -> Self {
        MatrixFile {
            path: dir.join(name),
            content,
        }
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn write_error(path: &Path, source: io::Error) -> AppError {
    AppError::WriteOutput {
        path: path.to_path_buf(),
        source,
    }
}

fn remove_all(paths: &[PathBuf]) {
    for path in paths {
        let _ = fs::remove_file(path);
    }
}

/// Write already-rendered matrices as a set: every file is staged next to its
/// target first and only moved into place once all of them were written.
/// On failure no target from this call is left behind.
pub(crate) fn write_matrices(files: &[MatrixFile]) -> Result<(), AppError> {
    for file in files {
        if let Some(parent) = file.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| write_error(parent, source))?;
        }
    }

    let mut staged: Vec<PathBuf> = Vec::with_capacity(files.len());
    for file in files {
        let tmp = staging_path(&file.path);
        if let Err(source) = fs::write(&tmp, &file.content) {
            remove_all(&staged);
            let _ = fs::remove_file(&tmp);
            return Err(write_error(&file.path, source));
        }
        staged.push(tmp);
    }

    for file in files {
        if file.path.is_dir() {
            remove_all(&staged);
            return Err(write_error(
                &file.path,
                io::Error::new(io::ErrorKind::IsADirectory, "target is a directory"),
            ));
        }
    }

    for (i, (file, tmp)) in files.iter().zip(&staged).enumerate() {
        if let Err(source) = fs::rename(tmp, &file.path) {
            let placed: Vec<PathBuf> = files[..i].iter().map(|f| f.path.clone()).collect();
            remove_all(&placed);
            remove_all(&staged[i..]);
            return Err(write_error(&file.path, source));
        }
    }
    Ok(())
}
