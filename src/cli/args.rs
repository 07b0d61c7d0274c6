//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode};

use super::commands::{Commands, SubjectKind};

pub(crate) const DEFAULT_DATA_DIR: &str = "data";
pub(crate) const DEFAULT_OUTPUT_DIR: &str = ".";
pub(crate) const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Debug, Parser)]
#[command(name = "listenstats")]
#[command(
    about = "Weekly cumulative listening time per track and artist from a streaming history export",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Directory holding the StreamingHistory*/endsong* JSON files [default: data]
    #[arg(short, long, global = true, value_name = "DIR")]
    pub(crate) data_dir: Option<PathBuf>,

    /// Directory for songsData.csv and artistsData.csv [default: .]
    #[arg(short, long, global = true, value_name = "DIR")]
    pub(crate) output_dir: Option<PathBuf>,

    /// Only include plays from this date (YYYYMMDD or YYYY-MM-DD)
    #[arg(short, long, global = true)]
    pub(crate) since: Option<String>,

    /// Only include plays until this date (YYYYMMDD or YYYY-MM-DD)
    #[arg(short, long, global = true)]
    pub(crate) until: Option<String>,

    /// Timezone used to assign plays to days (e.g. "UTC", "local", "Europe/Berlin") [default: UTC]
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Rank artists or tracks (top)
    #[arg(short, long, global = true, value_enum, default_value = "artist")]
    pub(crate) by: SubjectKind,

    /// Number of ranked rows (top) [default: 10]
    #[arg(short = 'n', long, global = true)]
    pub(crate) limit: Option<usize>,

    /// Output the ranking as JSON (top)
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Suppress progress messages
    #[arg(short, long, global = true)]
    pub(crate) quiet: bool,

    /// Enable debug output (per-layout record counts, timings)
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        // For boolean flags, config only applies if CLI is false (default)
        if !self.quiet && config.quiet {
            self.quiet = true;
        }
        if !self.no_color && config.no_color {
            self.no_color = true;
        }
        if !self.debug && config.debug {
            self.debug = true;
        }

        if let Some(color) = config.color
            && self.color == ColorMode::Auto
        {
            self.color = match color {
                ConfigColorMode::Auto => ColorMode::Auto,
                ConfigColorMode::Always => ColorMode::Always,
                ConfigColorMode::Never => ColorMode::Never,
            };
        }

        // Optional values: only apply if CLI didn't set them
        if self.data_dir.is_none() {
            self.data_dir = config.data_dir.clone();
        }
        if self.output_dir.is_none() {
            self.output_dir = config.output_dir.clone();
        }
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }
        if self.limit.is_none() {
            self.limit = config.limit;
        }

        self
    }

    pub(crate) fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    pub(crate) fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    pub(crate) fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }
}
