//! Full-screen TUI for the Pivot career advisor.

pub mod common;
pub mod effects;
pub mod events;
pub mod markdown;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;
pub mod views;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
use pivot_core::config::Config;
pub use runtime::TuiRuntime;

/// Runs the interactive advisor UI.
pub async fn run(config: &Config) -> Result<()> {
    // The workspace UI needs a real terminal to render
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The advisor UI requires a terminal.\n\
             Use `pivot careers` for non-interactive output."
        );
    }

    // Print pre-TUI info to stderr (will be replaced by alternate screen)
    let mut err = stderr();
    writeln!(err, "Pivot Career Advisor")?;
    writeln!(err, "Backend: {}", config.api.base_url)?;
    err.flush()?;

    let mut runtime = TuiRuntime::new(config.clone())?;
    runtime.run()?;

    // Print goodbye after TUI exits (terminal restored)
    writeln!(stderr(), "Goodbye!")?;

    Ok(())
}
