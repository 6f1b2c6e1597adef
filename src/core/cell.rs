//! Cells and rectangular cell blocks exchanged with cell-addressable terminals.

use unicode_width::UnicodeWidthChar;

use crate::core::style::{CellColor, Color};

/// Placeholder stored in the cell right of a double-width glyph.
pub const WIDE_CONTINUATION: char = '\0';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub ch: char,
    pub color: CellColor,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        color: CellColor::new(Color::Default, Color::Default),
    };

    pub fn new(ch: char, color: CellColor) -> Self {
        Self { ch, color }
    }

    pub fn is_continuation(&self) -> bool {
        self.ch == WIDE_CONTINUATION
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Row-major block of cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellBlock {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl CellBlock {
    pub fn filled(width: usize, height: usize, cell: Cell) -> Self {
        Self {
            width,
            height,
            cells: vec![cell; width * height],
        }
    }

    pub fn blank(width: usize, height: usize) -> Self {
        Self::filled(width, height, Cell::BLANK)
    }

    /// Builds a block from text rows, padding short rows with blanks. The block is
    /// as wide as `width`; a double-width glyph takes its cell plus a continuation
    /// cell, zero-width chars are dropped.
    pub fn from_rows<'a, I>(rows: I, width: usize, color: CellColor) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut cells = Vec::new();
        let mut height = 0;
        for row in rows {
            let mut count = 0;
            for ch in row.chars() {
                let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
                if ch_width == 0 {
                    continue;
                }
                if count + ch_width > width {
                    break;
                }
                cells.push(Cell::new(ch, color));
                if ch_width == 2 {
                    cells.push(Cell::new(WIDE_CONTINUATION, color));
                }
                count += ch_width;
            }
            cells.extend(std::iter::repeat(Cell::new(' ', color)).take(width - count));
            height += 1;
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, col: usize, row: usize) -> Option<&Cell> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells.get(row * self.width + col)
    }

    pub fn set(&mut self, col: usize, row: usize, cell: Cell) {
        if col < self.width && row < self.height {
            self.cells[row * self.width + col] = cell;
        }
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        if row >= self.height {
            return &[];
        }
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    pub fn row_text(&self, row: usize) -> String {
        self.row(row)
            .iter()
            .filter(|cell| !cell.is_continuation())
            .map(|cell| cell.ch)
            .collect()
    }

    pub fn recolor(&mut self, color: CellColor) {
        for cell in self.cells.iter_mut() {
            cell.color = color;
        }
    }
}
