//! Local Player - trailer playback outside the terminal
//!
//! Hands a watch URL to mpv, VLC, or the system URL opener.

use std::process::Stdio;

use clap::ValueEnum;
use serde::Deserialize;
use thiserror::Error;
use tokio::process::{Child, Command};

/// Supported players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlayerType {
    /// mpv (plays YouTube URLs through yt-dlp)
    #[default]
    Mpv,
    /// VLC media player
    Vlc,
    /// System URL opener
    Browser,
}

impl PlayerType {
    /// Get the command name for this player
    pub fn command(&self) -> &'static str {
        match self {
            PlayerType::Mpv => "mpv",
            PlayerType::Vlc => {
                // On macOS, VLC is an app bundle - check for it
                #[cfg(target_os = "macos")]
                if std::path::Path::new("/Applications/VLC.app").exists() {
                    return "/Applications/VLC.app/Contents/MacOS/VLC";
                }
                "vlc"
            }
            PlayerType::Browser => opener_command(),
        }
    }

    /// Get a display name for this player
    pub fn display_name(&self) -> &'static str {
        match self {
            PlayerType::Mpv => "mpv",
            PlayerType::Vlc => "VLC",
            PlayerType::Browser => "browser",
        }
    }
}

impl std::fmt::Display for PlayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Platform command that opens a URL in the default browser
pub fn opener_command() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

/// Errors from local player operations
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Player '{0}' not found. Install it first.")]
    NotFound(String),
    #[error("Failed to start player: {0}")]
    StartFailed(#[from] std::io::Error),
}

/// Launches trailers in a local player
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalPlayer {
    player_type: PlayerType,
}

impl LocalPlayer {
    /// Create a new local player with the specified type
    pub fn new(player_type: PlayerType) -> Self {
        Self { player_type }
    }

    /// Get the player type
    pub fn player_type(&self) -> PlayerType {
        self.player_type
    }

    /// Start playback of `url`; returns the spawned child process
    pub fn play(&self, url: &str) -> Result<Child, PlayerError> {
        let mut cmd = Command::new(self.player_type.command());
        cmd.arg(url);

        match self.player_type {
            PlayerType::Mpv => {
                cmd.arg("--force-window=immediate");
            }
            PlayerType::Vlc => {
                cmd.arg("--no-video-title-show");
            }
            PlayerType::Browser => {}
        }

        spawn_detached(cmd, self.player_type.command())
    }

    /// Open `url` with the system opener regardless of the configured player
    pub fn open_in_browser(url: &str) -> Result<Child, PlayerError> {
        let mut cmd = Command::new(opener_command());
        cmd.arg(url);
        spawn_detached(cmd, opener_command())
    }
}

/// Spawn with output discarded so the child never writes over the TUI
fn spawn_detached(mut cmd: Command, program: &str) -> Result<Child, PlayerError> {
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::null());
    cmd.stderr(Stdio::null());

    cmd.spawn().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PlayerError::NotFound(program.to_string())
        } else {
            PlayerError::StartFailed(e)
        }
    })
}
