//! Cell access for any terminal through a mirror of what was written.
//!
//! `get_region` reads the mirror; `set_region` updates it and emits cursor
//! moves, SGR color changes and glyphs through the wrapped terminal. Only cells
//! that differ from the mirror are sent.

use std::io;

use crate::core::cell::{Cell, CellBlock};
use crate::core::geometry::Rect;
use crate::core::key::Key;
use crate::core::style::{CellColor, Color};
use crate::core::terminal::{CellAccess, RestoreHandle, Terminal, TerminalSize};

pub struct ShadowTerminal<T: Terminal> {
    inner: T,
    size: TerminalSize,
    mirror: Vec<Cell>,
}

impl<T: Terminal> ShadowTerminal<T> {
    /// Wraps `inner`, assuming its screen starts blank.
    pub fn new(inner: T) -> Self {
        let size = inner.size();
        Self {
            inner,
            size,
            mirror: vec![Cell::BLANK; cell_count(size)],
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= i32::from(self.size.columns) || y >= i32::from(self.size.rows) {
            return None;
        }
        Some(y as usize * usize::from(self.size.columns) + x as usize)
    }

    // The mirror is reset on resize; the next draw repopulates it.
    fn sync_size(&mut self) {
        let size = self.inner.size();
        if size != self.size {
            self.size = size;
            self.mirror = vec![Cell::BLANK; cell_count(size)];
        }
    }
}

fn cell_count(size: TerminalSize) -> usize {
    usize::from(size.columns) * usize::from(size.rows)
}

fn fg_code(color: Color) -> u8 {
    match color {
        Color::Default => 39,
        Color::Black => 30,
        Color::DarkRed => 31,
        Color::DarkGreen => 32,
        Color::DarkYellow => 33,
        Color::DarkBlue => 34,
        Color::DarkMagenta => 35,
        Color::DarkCyan => 36,
        Color::Gray => 37,
        Color::DarkGray => 90,
        Color::Red => 91,
        Color::Green => 92,
        Color::Yellow => 93,
        Color::Blue => 94,
        Color::Magenta => 95,
        Color::Cyan => 96,
        Color::White => 97,
    }
}

fn bg_code(color: Color) -> u8 {
    fg_code(color) + 10
}

/// SGR sequence selecting `color`.
pub fn sgr(color: CellColor) -> String {
    format!("\x1b[{};{}m", fg_code(color.fg), bg_code(color.bg))
}

impl<T: Terminal> Terminal for ShadowTerminal<T> {
    fn start(&mut self) -> io::Result<()> {
        self.inner.start()
    }

    fn stop(&mut self) -> io::Result<()> {
        self.inner.write_raw("\x1b[0m")?;
        self.inner.stop()
    }

    fn read_key(&mut self) -> io::Result<Key> {
        self.inner.read_key()
    }

    fn size(&self) -> TerminalSize {
        self.inner.size()
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> io::Result<()> {
        self.inner.move_cursor(x, y)
    }

    // Bulk text bypasses the mirror; callers mixing both keep the mirror stale.
    fn write_raw(&mut self, data: &str) -> io::Result<()> {
        self.inner.write_raw(data)
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        self.inner.set_cursor_visible(visible)
    }

    fn as_cell_access(&mut self) -> Option<&mut dyn CellAccess> {
        self.sync_size();
        Some(self)
    }

    fn restore_handle(&self) -> Option<RestoreHandle> {
        self.inner.restore_handle()
    }
}

impl<T: Terminal> CellAccess for ShadowTerminal<T> {
    fn get_region(&self, rect: Rect) -> CellBlock {
        let mut block = CellBlock::blank(rect.width.max(0) as usize, rect.height.max(0) as usize);
        for row in 0..rect.height.max(0) {
            for col in 0..rect.width.max(0) {
                if let Some(idx) = self.index(rect.x + col, rect.y + row) {
                    block.set(col as usize, row as usize, self.mirror[idx]);
                }
            }
        }
        block
    }

    fn set_region(&mut self, x: i32, y: i32, cells: &CellBlock) -> io::Result<()> {
        let mut color: Option<CellColor> = None;
        for row in 0..cells.height() {
            let screen_y = y + row as i32;
            // Column the terminal cursor sits on after the last glyph, if known.
            let mut cursor: Option<i32> = None;
            for (col, cell) in cells.row(row).iter().enumerate() {
                let screen_x = x + col as i32;
                let Some(idx) = self.index(screen_x, screen_y) else {
                    continue;
                };
                if self.mirror[idx] == *cell {
                    continue;
                }
                self.mirror[idx] = *cell;
                if cell.is_continuation() {
                    cursor = cursor.map(|_| screen_x + 1);
                    continue;
                }
                if cursor != Some(screen_x) {
                    self.inner.move_cursor(screen_x as u16, screen_y as u16)?;
                }
                let mut out = String::new();
                if color != Some(cell.color) {
                    out.push_str(&sgr(cell.color));
                    color = Some(cell.color);
                }
                out.push(cell.ch);
                self.inner.write_raw(&out)?;
                cursor = Some(screen_x + 1);
            }
        }
        if color.is_some() {
            self.inner.write_raw("\x1b[0m")?;
        }
        Ok(())
    }
}
