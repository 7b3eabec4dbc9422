use std::io;
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::config::WINDOW_TITLE;

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Raw-mode, alternate-screen terminal titled for the game.
///
/// The screen is handed back to the shell on drop, and by the panic hook from
/// [`TerminalSession::install_panic_hook`] when the loop unwinds.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    /// Takes over the terminal and wraps it in a ratatui backend.
    ///
    /// Any partial setup is undone before the error is returned.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let terminal = execute!(io::stdout(), EnterAlternateScreen, Hide, SetTitle(WINDOW_TITLE))
            .and_then(|()| Terminal::new(CrosstermBackend::new(io::stdout())));

        terminal.map(|terminal| Self { terminal }).inspect_err(|_| Self::restore())
    }

    /// Leaves raw mode and the alternate screen and shows the cursor.
    ///
    /// Safe to call more than once; failures are logged, not returned.
    pub fn restore() {
        if let Err(err) = disable_raw_mode() {
            tracing::error!(?err, "failed to disable raw mode");
        }
        if let Err(err) = execute!(io::stdout(), Show, LeaveAlternateScreen) {
            tracing::error!(?err, "failed to leave alternate screen");
        }
    }

    /// Chains a hook that restores the terminal before the default panic output.
    pub fn install_panic_hook() {
        let default_hook = panic::take_hook();

        panic::set_hook(Box::new(move |panic_info| {
            Self::restore();
            default_hook(panic_info);
        }));
    }

    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        Self::restore();
    }
}

#[cfg(test)]
mod tests {
    use super::TerminalSession;

    #[test]
    fn restore_without_session_does_not_panic() {
        TerminalSession::restore();
        TerminalSession::restore();
    }
}
