//! Plain backend: a character grid the size of the terminal.

use std::io;

use unicode_width::UnicodeWidthChar;

use crate::core::cell::WIDE_CONTINUATION;
use crate::core::control::ControlId;
use crate::core::terminal::{Terminal, TerminalSize};
use crate::render::backend::{Backend, BackendKind};
use crate::runtime::control_registry::ControlRegistry;

/// Grid of optional glyphs. Unset cells flush as blanks.
#[derive(Debug)]
pub struct PlainBackend {
    size: TerminalSize,
    grid: Vec<Option<char>>,
}

impl PlainBackend {
    pub fn new(size: TerminalSize) -> Self {
        Self {
            size,
            grid: vec![None; cell_count(size)],
        }
    }

    fn columns(&self) -> i32 {
        i32::from(self.size.columns)
    }

    fn rows(&self) -> i32 {
        i32::from(self.size.rows)
    }

    fn put(&mut self, x: i32, y: i32, ch: char) {
        if x < 0 || y < 0 || x >= self.columns() || y >= self.rows() {
            return;
        }
        let idx = (y * self.columns() + x) as usize;
        self.grid[idx] = Some(ch);
    }

    fn blit(&mut self, x: i32, y: i32, lines: &[String]) {
        for (row, line) in lines.iter().enumerate() {
            let mut col = x;
            for ch in line.chars() {
                let width = UnicodeWidthChar::width(ch).unwrap_or(0) as i32;
                if width == 0 {
                    continue;
                }
                self.put(col, y + row as i32, ch);
                if width == 2 {
                    self.put(col + 1, y + row as i32, WIDE_CONTINUATION);
                }
                col += width;
            }
        }
    }

    fn compose(&mut self, registry: &ControlRegistry, roots: &[ControlId]) {
        for root in roots {
            for id in registry.subtree(*root) {
                if let Some(control) = registry.control(id) {
                    let geometry = control.geometry();
                    self.blit(geometry.x(), geometry.y(), &control.render_text());
                }
            }
        }
    }

    /// Text the next flush would write, one string per terminal row.
    pub fn grid_rows(&self) -> Vec<String> {
        let columns = usize::from(self.size.columns);
        if columns == 0 {
            return Vec::new();
        }
        self.grid
            .chunks(columns)
            .map(|row| {
                row.iter()
                    .filter(|cell| **cell != Some(WIDE_CONTINUATION))
                    .map(|cell| cell.unwrap_or(' '))
                    .collect()
            })
            .collect()
    }
}

fn cell_count(size: TerminalSize) -> usize {
    usize::from(size.columns) * usize::from(size.rows)
}

impl Backend for PlainBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Plain
    }

    fn resize(&mut self, size: TerminalSize) {
        self.size = size;
        self.grid = vec![None; cell_count(size)];
    }

    fn draw(&mut self, registry: &ControlRegistry, roots: &[ControlId], _terminal: &mut dyn Terminal) {
        self.compose(registry, roots);
    }

    fn refresh(
        &mut self,
        registry: &ControlRegistry,
        roots: &[ControlId],
        _id: ControlId,
        _terminal: &mut dyn Terminal,
    ) {
        self.compose(registry, roots);
    }

    fn update_item(
        &mut self,
        registry: &ControlRegistry,
        roots: &[ControlId],
        _id: ControlId,
        _item: usize,
        _terminal: &mut dyn Terminal,
    ) -> bool {
        self.compose(registry, roots);
        true
    }

    fn flush(&mut self, terminal: &mut dyn Terminal) -> io::Result<()> {
        let out = self.grid_rows().join("\r\n");
        terminal.move_cursor(0, 0)?;
        terminal.write_raw(&out)?;
        tracing::trace!(bytes = out.len(), "plain grid flushed");
        self.grid.fill(None);
        Ok(())
    }

    // The next draw recomposes the screen without the removed controls.
    fn forget(
        &mut self,
        _registry: &ControlRegistry,
        _id: ControlId,
        _terminal: &mut dyn Terminal,
    ) -> io::Result<()> {
        Ok(())
    }

    fn clear(&mut self, terminal: &mut dyn Terminal) -> io::Result<()> {
        self.grid.fill(None);
        self.flush(terminal)
    }
}

#[cfg(test)]
mod tests {
    use super::PlainBackend;
    use crate::core::terminal::TerminalSize;

    #[test]
    fn wide_glyphs_take_two_columns() {
        let mut backend = PlainBackend::new(TerminalSize::new(4, 1));
        backend.blit(0, 0, &["你a".to_string()]);
        assert_eq!(backend.grid_rows(), vec!["你a "]);
    }

    #[test]
    fn blits_outside_the_screen_are_dropped() {
        let mut backend = PlainBackend::new(TerminalSize::new(3, 2));
        backend.blit(-1, 1, &["abcd".to_string()]);
        assert_eq!(backend.grid_rows(), vec!["   ", "bcd"]);
    }
}
