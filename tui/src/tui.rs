use std::io;
use std::io::Stdout;
use std::io::stdout;

use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::backend::CrosstermBackend;

use crate::project_filter::ProjectFilterView;

pub type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// Raw-mode terminal. Dropping it restores the terminal.
pub struct Tui {
    pub terminal: Terminal,
}

impl Tui {
    pub fn init() -> io::Result<Self> {
        enable_raw_mode()?;
        set_panic_hook();
        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        Ok(Self { terminal })
    }

    pub fn enter_alt_screen(&mut self) -> io::Result<()> {
        execute!(self.terminal.backend_mut(), EnterAlternateScreen)?;
        self.terminal.clear()
    }

    pub fn leave_alt_screen(&mut self) -> io::Result<()> {
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
    }

    pub fn draw(&mut self, view: &ProjectFilterView) -> io::Result<()> {
        self.terminal
            .draw(|frame| frame.render_widget(view, frame.area()))?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(err) = restore() {
            tracing::warn!("failed to restore terminal: {err}");
        }
    }
}

pub fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, Show)
}

fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        hook(panic_info);
    }));
}

/// RAII guard that ensures we leave the alt-screen on scope exit.
pub(crate) struct AltScreenGuard<'a> {
    pub(crate) tui: &'a mut Tui,
}

impl<'a> AltScreenGuard<'a> {
    pub(crate) fn enter(tui: &'a mut Tui) -> Self {
        let _ = tui.enter_alt_screen();
        Self { tui }
    }
}

impl Drop for AltScreenGuard<'_> {
    fn drop(&mut self) {
        let _ = self.tui.leave_alt_screen();
    }
}
