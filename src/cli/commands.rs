//! CLI subcommand definitions

use clap::{Subcommand, ValueEnum};

/// Main CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub(crate) enum Commands {
    /// Write songsData.csv and artistsData.csv (default)
    Export,
    /// Print the top artists or tracks by total listening time
    Top,
}

/// Which matrix a ranking is read from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum SubjectKind {
    /// Rank artists and shows (default)
    #[default]
    Artist,
    /// Rank individual tracks and episodes
    Track,
}

impl SubjectKind {
    pub(crate) fn label(self) -> &'static str {
        match self {
            SubjectKind::Artist => "Artist",
            SubjectKind::Track => "Track",
        }
    }
}

/// Resolve the command to run; no subcommand means export
pub(crate) fn parse_command(cmd: Option<Commands>) -> Commands {
    cmd.unwrap_or(Commands::Export)
}
