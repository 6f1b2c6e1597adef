//! Terminal capability traits and lifecycle helpers.

use crate::core::cell::CellBlock;
use crate::core::geometry::Rect;
use crate::core::key::Key;

/// Visible terminal area, read once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TerminalSize {
    pub columns: u16,
    pub rows: u16,
}

impl TerminalSize {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self { columns, rows }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0, 0, i32::from(self.columns), i32::from(self.rows))
    }
}

/// Puts a started terminal back into its normal mode. Safe to call from any
/// thread, including a signal-handling one.
pub type RestoreHandle = Box<dyn Fn() + Send + Sync + 'static>;

/// Minimal terminal interface the toolkit drives.
///
/// A "dumb" terminal only supports cursor moves and bulk writes; a terminal that
/// can read back and address individual cells also returns `Some` from
/// [`Terminal::as_cell_access`].
pub trait Terminal {
    /// Enter the interactive mode (raw input, hidden echo).
    fn start(&mut self) -> std::io::Result<()> {
        Ok(())
    }

    /// Restore the terminal state captured by `start`.
    fn stop(&mut self) -> std::io::Result<()> {
        Ok(())
    }

    /// Block until the next key arrives.
    fn read_key(&mut self) -> std::io::Result<Key>;

    fn size(&self) -> TerminalSize;

    fn window_width(&self) -> u16 {
        self.size().columns
    }

    fn window_height(&self) -> u16 {
        self.size().rows
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> std::io::Result<()>;

    fn write_raw(&mut self, data: &str) -> std::io::Result<()>;

    fn set_cursor_visible(&mut self, _visible: bool) -> std::io::Result<()> {
        Ok(())
    }

    /// Cell-level read/write, when the terminal supports it.
    fn as_cell_access(&mut self) -> Option<&mut dyn CellAccess> {
        None
    }

    /// Out-of-band restore for a started terminal that changed the tty mode.
    fn restore_handle(&self) -> Option<RestoreHandle> {
        None
    }
}

impl<T: Terminal + ?Sized> Terminal for &mut T {
    fn start(&mut self) -> std::io::Result<()> {
        (**self).start()
    }

    fn stop(&mut self) -> std::io::Result<()> {
        (**self).stop()
    }

    fn read_key(&mut self) -> std::io::Result<Key> {
        (**self).read_key()
    }

    fn size(&self) -> TerminalSize {
        (**self).size()
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> std::io::Result<()> {
        (**self).move_cursor(x, y)
    }

    fn write_raw(&mut self, data: &str) -> std::io::Result<()> {
        (**self).write_raw(data)
    }

    fn set_cursor_visible(&mut self, visible: bool) -> std::io::Result<()> {
        (**self).set_cursor_visible(visible)
    }

    fn as_cell_access(&mut self) -> Option<&mut dyn CellAccess> {
        (**self).as_cell_access()
    }

    fn restore_handle(&self) -> Option<RestoreHandle> {
        (**self).restore_handle()
    }
}

/// Cell-level read-before-write access to the screen.
pub trait CellAccess {
    /// Current contents of `rect`. Cells outside the screen read as blanks.
    fn get_region(&self, rect: Rect) -> CellBlock;

    /// Write `cells` with their top-left corner at `(x, y)`. Cells outside the
    /// screen are dropped.
    fn set_region(&mut self, x: i32, y: i32, cells: &CellBlock) -> std::io::Result<()>;
}

/// RAII guard that starts the terminal and stops it on drop.
pub struct TerminalGuard<T: Terminal> {
    terminal: Option<T>,
}

impl<T: Terminal> TerminalGuard<T> {
    pub fn start(mut terminal: T) -> std::io::Result<Self> {
        terminal.start()?;
        Ok(Self {
            terminal: Some(terminal),
        })
    }

    pub fn terminal(&self) -> &T {
        self.terminal
            .as_ref()
            .expect("terminal already taken from guard")
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        self.terminal
            .as_mut()
            .expect("terminal already taken from guard")
    }

    /// Consume the guard without stopping the terminal.
    pub fn into_inner(mut self) -> T {
        self.terminal
            .take()
            .expect("terminal already taken from guard")
    }
}

impl<T: Terminal> Drop for TerminalGuard<T> {
    fn drop(&mut self) {
        if let Some(terminal) = self.terminal.as_mut() {
            if let Err(err) = terminal.stop() {
                tracing::warn!(error = %err, "failed to restore terminal state");
            }
        }
    }
}
