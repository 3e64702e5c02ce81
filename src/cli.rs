//! CLI - Command line flags for Streamify
//!
//! Flags override the matching config file settings for one run.
//!
//! ```bash
//! streamify                      # search "avengers" on startup
//! streamify --query "dune" --dark
//! streamify --player vlc --config ./streamify.toml
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::player::PlayerType;

/// Streamify - movie discovery in the terminal
///
/// Search TMDB, keep a watch list, and play trailers.
#[derive(Parser, Debug, Default)]
#[command(
    name = "streamify",
    version,
    about = "Movie discovery in the terminal",
    after_help = "KEYS:\n\
                  /        Search (Enter to submit, ESC to leave)\n\
                  j/k      Move selection      Tab  Switch list\n\
                  a/d/w    Add, remove, toggle watch list\n\
                  t/Enter  Trailer             o    Cycle sort\n\
                  m        Dark mode           q    Quit"
)]
pub struct Cli {
    /// Path to config file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Query searched on startup
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Start in dark mode
    #[arg(long)]
    pub dark: bool,

    /// Player used for trailers
    #[arg(long, short = 'p', value_enum)]
    pub player: Option<PlayerType>,
}

impl Cli {
    /// Apply flag overrides on top of loaded config
    pub fn apply(&self, config: &mut Config) {
        if let Some(query) = &self.query {
            config.initial_query = query.clone();
        }
        if self.dark {
            config.dark_mode = true;
        }
        if let Some(player) = self.player {
            config.player = player;
        }
    }
}
