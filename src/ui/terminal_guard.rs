use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear as TermClear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use parking_lot::Mutex;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::Arc;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Puts the user's shell back the way it was, exactly once.
///
/// The same flag is shared with the panic hook, so a panic inside the
/// runtime loop prints its message on a sane terminal and the later drop
/// of the guard does nothing.
pub struct TerminalGuard {
    raw: Arc<Mutex<bool>>,
}

impl TerminalGuard {
    fn engage() -> Self {
        let raw = Arc::new(Mutex::new(true));
        let hook_flag = Arc::clone(&raw);
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            release(&hook_flag);
            previous(info);
        }));
        Self { raw }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        release(&self.raw);
    }
}

fn release(raw: &Mutex<bool>) {
    let mut raw = raw.lock();
    if !*raw {
        return;
    }
    *raw = false;

    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = stdout.execute(LeaveAlternateScreen);
    let _ = stdout.execute(Show);
}

/// Switch to raw mode on the alternate screen. Keep the guard alive for as
/// long as the UI runs.
pub fn setup_terminal() -> io::Result<(Tui, TerminalGuard)> {
    enable_raw_mode()?;
    // Engaged before anything else can fail so raw mode never leaks.
    let guard = TerminalGuard::engage();

    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(TermClear(ClearType::All))?;
    stdout.execute(Hide)?;

    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok((terminal, guard))
}
