//! Glyphs and colors attached to controls.

use crate::core::geometry::{Edge, EdgeKind, Edges};

/// Abstract terminal colors. Mapping them to a concrete palette is the
/// terminal adapter's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    DarkBlue,
    DarkGreen,
    DarkCyan,
    DarkRed,
    DarkMagenta,
    DarkYellow,
    Gray,
    DarkGray,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellColor {
    pub fg: Color,
    pub bg: Color,
}

impl CellColor {
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self { fg, bg }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
}

/// Per-edge glyphs and colors plus the fill used for unused content cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoration {
    pub border_glyph: Edges<char>,
    pub border_color: Edges<CellColor>,
    pub padding_glyph: Edges<char>,
    pub padding_color: Edges<CellColor>,
    pub fill_glyph: char,
    pub content_color: CellColor,
}

impl Default for Decoration {
    fn default() -> Self {
        Self {
            border_glyph: Edges::uniform('#'),
            border_color: Edges::default(),
            padding_glyph: Edges::uniform(' '),
            padding_color: Edges::default(),
            fill_glyph: ' ',
            content_color: CellColor::default(),
        }
    }
}

impl Decoration {
    pub fn with_border_glyph(mut self, glyph: char) -> Self {
        self.border_glyph = Edges::uniform(glyph);
        self
    }

    pub fn with_fill_glyph(mut self, glyph: char) -> Self {
        self.fill_glyph = glyph;
        self
    }

    pub fn glyph(&self, kind: EdgeKind, edge: Edge) -> char {
        match kind {
            EdgeKind::Border => self.border_glyph.get(edge),
            EdgeKind::Padding => self.padding_glyph.get(edge),
        }
    }

    pub fn color(&self, kind: EdgeKind, edge: Edge) -> CellColor {
        match kind {
            EdgeKind::Border => self.border_color.get(edge),
            EdgeKind::Padding => self.padding_color.get(edge),
        }
    }
}
