use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Input directory not found: {}", path.display())]
    MissingInputDirectory { path: PathBuf },

    #[error(
        "No streaming history files in {} (expected names containing \"StreamingHistory\" or \"endsong\")",
        path.display()
    )]
    EmptyInputSet { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Record {index} in {}: {source}", file.display())]
    Schema {
        file: PathBuf,
        index: usize,
        source: SchemaMismatch,
    },

    #[error("No listening events to aggregate")]
    EmptyTimeline,

    #[error("Failed to write {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize JSON output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid date \"{input}\" (expected YYYYMMDD or YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },
}

/// A raw record that fits none of the known export layouts
#[derive(Debug, Error)]
#[error("record matches no known streaming history layout (fields: {})", fields.join(", "))]
pub(crate) struct SchemaMismatch {
    pub(crate) fields: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_display_date() {
        let e = AppError::InvalidDate {
            input: "abc".to_string(),
        };
        assert_eq!(
            e.to_string(),
            r#"Invalid date "abc" (expected YYYYMMDD or YYYY-MM-DD)"#
        );
    }

    #[test]
    fn app_error_display_timezone() {
        let e = AppError::InvalidTimezone {
            input: "Mars/Olympus".to_string(),
        };
        assert_eq!(e.to_string(), "Invalid timezone: Mars/Olympus");
    }

    #[test]
    fn app_error_display_missing_dir() {
        let e = AppError::MissingInputDirectory {
            path: PathBuf::from("nope"),
        };
        assert_eq!(e.to_string(), "Input directory not found: nope");
    }

    #[test]
    fn schema_error_lists_fields() {
        let e = AppError::Schema {
            file: PathBuf::from("endsong_0.json"),
            index: 4,
            source: SchemaMismatch {
                fields: vec!["ts".to_string(), "platform".to_string()],
            },
        };
        assert_eq!(
            e.to_string(),
            "Record 4 in endsong_0.json: record matches no known streaming history layout (fields: ts, platform)"
        );
    }

    #[test]
    fn empty_timeline_message() {
        assert_eq!(
            AppError::EmptyTimeline.to_string(),
            "No listening events to aggregate"
        );
    }

    #[test]
    fn json_error_is_not_swallowed() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e = AppError::from(source);
        assert!(e.to_string().starts_with("Failed to serialize JSON output: "));
    }
}
