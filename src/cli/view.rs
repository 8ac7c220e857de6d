//! View command handler.
//!
//! Implements the `view` subcommand: the interactive terminal list.

use super::{ListSource, load_list};
use crate::config::AppConfig;
use crate::tui::{ListApp, Theme, run_tui, set_theme};
use anyhow::{Context, Result};

/// Run the view command.
///
/// Returns the share string of the final view so the caller can print it
/// once the terminal has been restored.
pub fn run_view(config: &AppConfig, source: &ListSource) -> Result<String> {
    let list = load_list(config, source)?;
    set_theme(Theme::from_name(&config.display.theme));

    let mut app = ListApp::new(list, config.export.dir());
    run_tui(&mut app).context("terminal error")?;

    Ok(app.share_string())
}
