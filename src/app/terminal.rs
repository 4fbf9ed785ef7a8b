use std::io;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};

use crate::app::error::StartupError;

/// Keeps the terminal in overlay mode; dropping it restores the terminal.
///
/// The restore runs exactly once, either through [`TerminalGuard::restore`]
/// or on drop.
pub struct TerminalGuard {
    active: bool,
    restore: fn() -> io::Result<()>,
}

impl TerminalGuard {
    fn new(restore: fn() -> io::Result<()>) -> Self {
        Self {
            active: true,
            restore,
        }
    }

    /// Restore explicitly so the caller can see the error
    pub fn restore(mut self) -> io::Result<()> {
        self.active = false;
        (self.restore)()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active && let Err(e) = (self.restore)() {
            log::error!("Failed to restore terminal: {}", e);
        }
    }
}

/// Initialize the terminal for the overlay
pub fn init_terminal() -> Result<TerminalGuard, StartupError> {
    // Armed first so a half-initialized terminal is restored too
    let guard = TerminalGuard::new(restore_terminal);

    execute!(
        io::stdout(),
        EnterAlternateScreen,
        Hide,
        Clear(ClearType::All),
        MoveTo(0, 0)
    )
    .map_err(StartupError::Terminal)?;
    enable_raw_mode().map_err(StartupError::Terminal)?;

    Ok(guard)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> io::Result<()> {
    execute!(io::stdout(), Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static EXPLICIT: AtomicUsize = AtomicUsize::new(0);
    static DROPPED: AtomicUsize = AtomicUsize::new(0);
    static FAILING: AtomicUsize = AtomicUsize::new(0);

    fn count_explicit() -> io::Result<()> {
        EXPLICIT.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn count_dropped() -> io::Result<()> {
        DROPPED.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn count_failing() -> io::Result<()> {
        FAILING.fetch_add(1, Ordering::SeqCst);
        Err(io::Error::other("not a terminal"))
    }

    #[test]
    fn test_explicit_restore_is_not_repeated_on_drop() {
        let guard = TerminalGuard::new(count_explicit);
        assert!(guard.restore().is_ok());
        assert_eq!(EXPLICIT.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_restores_active_guard() {
        {
            let _guard = TerminalGuard::new(count_dropped);
            assert_eq!(DROPPED.load(Ordering::SeqCst), 0);
        }
        assert_eq!(DROPPED.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_restore_error_reaches_caller_once() {
        let guard = TerminalGuard::new(count_failing);
        let err = guard.restore().unwrap_err();
        assert_eq!(err.to_string(), "not a terminal");
        assert_eq!(FAILING.load(Ordering::SeqCst), 1);
    }
}
