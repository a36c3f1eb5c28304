pub mod demo;
pub mod human;

pub use demo::DemoMode;
pub use human::HumanMode;

use std::io::{Stderr, stderr};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::time::{Instant, Interval, interval_at};

pub(crate) type Tui = Terminal<CrosstermBackend<Stderr>>;

/// Frame period of the render timer (about 30 FPS)
pub(crate) const RENDER_INTERVAL: Duration = Duration::from_millis(33);

pub(crate) fn setup_terminal() -> Result<Tui> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stderr = stderr();
    execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

pub(crate) fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// A tick timer whose first tick is one period away
pub(crate) fn tick_timer(period: Duration) -> Interval {
    interval_at(Instant::now() + period, period)
}

/// Restarts `timer` with a new period when the grid's simulation period
/// changed since the last tick
pub(crate) fn follow_period(timer: &mut Interval, current: &mut Duration, period: Duration) {
    if period != *current {
        *current = period;
        *timer = tick_timer(period);
    }
}
