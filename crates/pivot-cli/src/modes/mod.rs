//! Runtime execution modes.
//!
//! - bare `pivot`: full-screen interactive advisor UI (optional feature)
//! - subcommands: non-interactive, handled in `cli::commands`

#[cfg(feature = "tui")]
pub use pivot_tui::run as run_advisor;

#[cfg(not(feature = "tui"))]
pub async fn run_advisor(_config: &pivot_core::config::Config) -> anyhow::Result<()> {
    anyhow::bail!("TUI support is disabled in this build (feature \"tui\").");
}
