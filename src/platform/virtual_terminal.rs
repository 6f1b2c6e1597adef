//! In-memory terminal with a scripted key queue and a readable cell screen.
//!
//! Used by tests and headless hosts. Raw writes are interpreted as plain text
//! (CR, LF and lazy wrapping at the right margin; CSI sequences are logged but
//! not interpreted). Cell access reads and writes the screen directly.

use std::collections::VecDeque;
use std::io;

use unicode_width::UnicodeWidthChar;

use crate::core::cell::{Cell, CellBlock, WIDE_CONTINUATION};
use crate::core::geometry::Rect;
use crate::core::key::Key;
use crate::core::terminal::{CellAccess, Terminal, TerminalSize};

#[derive(Debug, Clone)]
pub struct VirtualTerminal {
    size: TerminalSize,
    screen: Vec<Cell>,
    keys: VecDeque<Key>,
    writes: String,
    cursor: (u16, u16),
    cursor_visible: bool,
    started: bool,
    cell_access: bool,
}

impl VirtualTerminal {
    /// A blank screen with cell access.
    pub fn new(columns: u16, rows: u16) -> Self {
        let size = TerminalSize::new(columns, rows);
        Self {
            size,
            screen: vec![Cell::BLANK; cell_count(size)],
            keys: VecDeque::new(),
            writes: String::new(),
            cursor: (0, 0),
            cursor_visible: true,
            started: false,
            cell_access: true,
        }
    }

    /// A blank screen that only supports cursor moves and raw writes.
    pub fn dumb(columns: u16, rows: u16) -> Self {
        Self {
            cell_access: false,
            ..Self::new(columns, rows)
        }
    }

    pub fn with_keys(mut self, keys: impl IntoIterator<Item = Key>) -> Self {
        self.keys.extend(keys);
        self
    }

    pub fn push_key(&mut self, key: Key) {
        self.keys.push_back(key);
    }

    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }

    /// Resizes the screen, keeping the overlapping cells.
    pub fn set_size(&mut self, columns: u16, rows: u16) {
        let old = self.size;
        let mut screen = vec![Cell::BLANK; usize::from(columns) * usize::from(rows)];
        for y in 0..rows.min(old.rows) {
            for x in 0..columns.min(old.columns) {
                screen[usize::from(y) * usize::from(columns) + usize::from(x)] =
                    self.screen[usize::from(y) * usize::from(old.columns) + usize::from(x)];
            }
        }
        self.size = TerminalSize::new(columns, rows);
        self.screen = screen;
        self.cursor = (
            self.cursor.0.min(columns.saturating_sub(1)),
            self.cursor.1.min(rows.saturating_sub(1)),
        );
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<Cell> {
        self.index(i32::from(x), i32::from(y)).map(|idx| self.screen[idx])
    }

    /// One screen row as text. Wide glyph continuations are skipped.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.size.rows {
            return String::new();
        }
        let start = usize::from(y) * usize::from(self.size.columns);
        self.screen[start..start + usize::from(self.size.columns)]
            .iter()
            .filter(|cell| !cell.is_continuation())
            .map(|cell| cell.ch)
            .collect()
    }

    pub fn screen_text(&self) -> Vec<String> {
        (0..self.size.rows).map(|y| self.row_text(y)).collect()
    }

    /// Puts text on the screen without touching the cursor or the write log.
    pub fn write_text(&mut self, x: u16, y: u16, text: &str) {
        let mut col = i32::from(x);
        for ch in text.chars() {
            col += self.put_char(col, i32::from(y), ch);
        }
    }

    /// Everything passed to `write_raw`, plus the CSI moves of `move_cursor`.
    pub fn writes(&self) -> &str {
        &self.writes
    }

    pub fn take_writes(&mut self) -> String {
        std::mem::take(&mut self.writes)
    }

    pub fn cursor(&self) -> (u16, u16) {
        self.cursor
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= i32::from(self.size.columns) || y >= i32::from(self.size.rows) {
            return None;
        }
        Some(y as usize * usize::from(self.size.columns) + x as usize)
    }

    fn put(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(idx) = self.index(x, y) {
            self.screen[idx] = cell;
        }
    }

    /// Writes one glyph with the default color. Returns the columns it took.
    fn put_char(&mut self, x: i32, y: i32, ch: char) -> i32 {
        let width = UnicodeWidthChar::width(ch).unwrap_or(0) as i32;
        if width == 0 {
            return 0;
        }
        self.put(x, y, Cell::new(ch, Default::default()));
        if width == 2 {
            self.put(x + 1, y, Cell::new(WIDE_CONTINUATION, Default::default()));
        }
        width
    }

    fn print(&mut self, ch: char) {
        let columns = self.size.columns;
        let (mut x, mut y) = self.cursor;
        if x >= columns {
            x = 0;
            y = (y + 1).min(self.size.rows.saturating_sub(1));
        }
        let width = self.put_char(i32::from(x), i32::from(y), ch) as u16;
        self.cursor = (x.saturating_add(width), y);
    }
}

fn cell_count(size: TerminalSize) -> usize {
    usize::from(size.columns) * usize::from(size.rows)
}

impl Terminal for VirtualTerminal {
    fn start(&mut self) -> io::Result<()> {
        self.started = true;
        Ok(())
    }

    fn stop(&mut self) -> io::Result<()> {
        self.started = false;
        Ok(())
    }

    fn read_key(&mut self) -> io::Result<Key> {
        self.keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted keys left"))
    }

    fn size(&self) -> TerminalSize {
        self.size
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> io::Result<()> {
        self.writes
            .push_str(&format!("\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1));
        self.cursor = (
            x.min(self.size.columns.saturating_sub(1)),
            y.min(self.size.rows.saturating_sub(1)),
        );
        Ok(())
    }

    fn write_raw(&mut self, data: &str) -> io::Result<()> {
        self.writes.push_str(data);
        let mut chars = data.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\r' => self.cursor.0 = 0,
                '\n' => {
                    self.cursor.1 = (self.cursor.1 + 1).min(self.size.rows.saturating_sub(1));
                }
                '\x1b' => {
                    if chars.peek() == Some(&'[') {
                        chars.next();
                        for next in chars.by_ref() {
                            if ('\x40'..='\x7e').contains(&next) {
                                break;
                            }
                        }
                    }
                }
                ch if ch.is_control() => {}
                ch => self.print(ch),
            }
        }
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        self.cursor_visible = visible;
        Ok(())
    }

    fn as_cell_access(&mut self) -> Option<&mut dyn CellAccess> {
        if self.cell_access {
            Some(self)
        } else {
            None
        }
    }
}

impl CellAccess for VirtualTerminal {
    fn get_region(&self, rect: Rect) -> CellBlock {
        let mut block = CellBlock::blank(rect.width.max(0) as usize, rect.height.max(0) as usize);
        for row in 0..rect.height.max(0) {
            for col in 0..rect.width.max(0) {
                if let Some(idx) = self.index(rect.x + col, rect.y + row) {
                    block.set(col as usize, row as usize, self.screen[idx]);
                }
            }
        }
        block
    }

    fn set_region(&mut self, x: i32, y: i32, cells: &CellBlock) -> io::Result<()> {
        for row in 0..cells.height() {
            for (col, cell) in cells.row(row).iter().enumerate() {
                self.put(x + col as i32, y + row as i32, *cell);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::VirtualTerminal;
    use crate::core::geometry::Rect;
    use crate::core::key::Key;
    use crate::core::terminal::{CellAccess, Terminal};

    #[test]
    fn raw_writes_wrap_lazily_and_skip_csi() {
        let mut terminal = VirtualTerminal::new(4, 2);
        terminal.write_raw("\x1b[31mabcd").unwrap();
        assert_eq!(terminal.cursor(), (4, 0));
        terminal.write_raw("ef").unwrap();
        assert_eq!(terminal.screen_text(), vec!["abcd", "ef  "]);
    }

    #[test]
    fn regions_outside_the_screen_read_blank_and_drop_writes() {
        let mut terminal = VirtualTerminal::new(3, 1);
        terminal.write_text(0, 0, "xyz");
        let block = terminal.get_region(Rect::new(2, 0, 3, 1));
        assert_eq!(block.row_text(0), "z  ");
        terminal.set_region(-1, 0, &block).unwrap();
        assert_eq!(terminal.row_text(0), "  z");
    }

    #[test]
    fn scripted_keys_run_out_with_eof() {
        let mut terminal = VirtualTerminal::new(1, 1).with_keys([Key::Enter]);
        assert_eq!(terminal.read_key().unwrap(), Key::Enter);
        let err = terminal.read_key().unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn dumb_variant_has_no_cell_access() {
        let mut terminal = VirtualTerminal::dumb(2, 2);
        assert!(terminal.as_cell_access().is_none());
    }
}
