/// Calendar day format used for `--since`/`--until` echoes and debug output: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Weekly bucket label, Monday-based week of year (not ISO): "Week 07 of 2021"
pub(crate) const PERIOD_FORMAT: &str = "Week %W of %Y";

/// Joins artist and title into a subject key
pub(crate) const SUBJECT_SEPARATOR: &str = " | ";

/// File name patterns that mark a streaming-history export file
pub(crate) const HISTORY_FILE_PATTERNS: &[&str] = &["*StreamingHistory*", "*endsong*"];

pub(crate) const SONGS_FILE: &str = "songsData.csv";
pub(crate) const ARTISTS_FILE: &str = "artistsData.csv";

pub(crate) const MS_PER_MINUTE: f64 = 60_000.0;
