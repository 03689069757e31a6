//! Terminal lifecycle management.
//!
//! Raw mode and the alternate screen are entered on startup and must be
//! unwound no matter how the process leaves the event loop, including panics.

use std::io::{self, Stdout};
use std::panic;

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Puts the terminal into raw mode on the alternate screen and hands back a
/// ratatui terminal over stdout.
///
/// Call `install_panic_hook()` first so a panic between setup and restore
/// still unwinds the terminal.
///
/// # Errors
/// Returns an error if raw mode or the alternate screen cannot be entered.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

/// Leaves the alternate screen and drops raw mode.
///
/// Safe to call more than once; both steps tolerate already being undone.
///
/// # Errors
/// Returns an error if the terminal refuses either step.
pub fn restore_terminal() -> Result<()> {
    // Alternate screen first, while raw mode is still active
    execute!(io::stdout(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")?;
    Ok(())
}

/// Chains a terminal restore in front of the default panic handler.
///
/// Must run BEFORE `setup_terminal()`.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore first so the panic message lands on a usable screen
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    // Terminal setup/restore needs a real TTY, so these guarantees are
    // checked by hand rather than in CI:
    // - restore on normal exit (Drop)
    // - restore on panic
}
