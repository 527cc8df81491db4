use anyhow::{Result, anyhow};
use ratatui::crossterm::{
    ExecutableCommand,
    cursor::MoveToColumn,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::{
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

pub mod app_core;
pub mod config;
pub mod domain;
pub mod engine;
pub mod key_handler;
pub mod player;
pub mod tui;
pub mod ui_state;

pub use config::Settings;
pub use player::PlaybackController;
pub use ui_state::ScreenState;

// ~30fps
pub const REFRESH_RATE: Duration = Duration::from_millis(33);

pub const CONFIG_DIRECTORY: &str = "kinescope";
pub const CONFIG_FILE: &str = "config.toml";

/// Render whole seconds as `MM:SS`.
///
/// Minutes are zero-padded to two digits but not bounded: 100 minutes renders
/// as `100:00`. Negative and NaN inputs render as `00:00`.
pub fn format_clock(seconds: f64) -> String {
    // `as` saturates, NaN becomes 0
    let total = seconds.max(0.0) as u64;
    let mins = total / 60;
    let secs = total % 60;

    format!("{mins:02}:{secs:02}")
}

pub fn expand_tilde<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy();

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    if path_str.starts_with("~/") || path_str.starts_with("~\\") {
        let home =
            dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory!"))?;
        return Ok(home.join(&path_str[2..]));
    }

    Err(anyhow!("Cannot expand {path_str}: only ~/ is supported"))
}

pub fn overwrite_line(message: &str) -> Result<()> {
    let mut stdout = std::io::stdout();
    stdout
        .execute(MoveToColumn(0))?
        .execute(Clear(ClearType::CurrentLine))?
        .execute(Print(message))?;
    stdout.flush()?;
    Ok(())
}
