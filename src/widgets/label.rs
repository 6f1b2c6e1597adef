//! Static text control.

use crate::core::control::{compose_regions, compose_text, Control, ContentRow, Region};
use crate::core::geometry::Geometry;
use crate::core::style::{Alignment, Decoration};
use crate::core::text::{display_width, fit_line};

#[derive(Debug, Clone)]
pub struct Label {
    geometry: Geometry,
    decoration: Decoration,
    lines: Vec<String>,
    alignment: Alignment,
}

impl Label {
    /// A label sized to its text: as wide as the widest line, one row per line.
    pub fn new(x: i32, y: i32, text: impl Into<String>) -> Self {
        let lines = split_lines(&text.into());
        let width = lines.iter().map(|line| display_width(line)).max().unwrap_or(0);
        let height = lines.len().max(1);
        Self {
            geometry: Geometry::new(x, y, width as i32, height as i32),
            decoration: Decoration::default(),
            lines,
            alignment: Alignment::Left,
        }
    }

    pub fn with_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            geometry: Geometry::new(x, y, width, height),
            decoration: Decoration::default(),
            lines: Vec::new(),
            alignment: Alignment::Left,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Replaces the text without resizing the label.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.lines = split_lines(&text.into());
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    fn fitted_lines(&self) -> Vec<String> {
        let width = self.geometry.content_width() as usize;
        self.lines
            .iter()
            .take(self.geometry.content_height() as usize)
            .map(|line| fit_line(line, width, self.alignment, self.decoration.fill_glyph))
            .collect()
    }

    fn first_char(&self) -> Option<char> {
        self.lines.iter().find_map(|line| line.chars().next())
    }
}

fn split_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.lines().map(str::to_string).collect()
}

impl Control for Label {
    fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn geometry_mut(&mut self) -> &mut Geometry {
        &mut self.geometry
    }

    fn decoration(&self) -> &Decoration {
        &self.decoration
    }

    fn decoration_mut(&mut self) -> &mut Decoration {
        &mut self.decoration
    }

    fn render_text(&self) -> Vec<String> {
        compose_text(
            &self.geometry,
            &self.decoration,
            &self.fitted_lines(),
            self.first_char(),
        )
    }

    fn render_regions(&self) -> Vec<Region> {
        let color = self.decoration.content_color;
        let rows: Vec<ContentRow> = self
            .fitted_lines()
            .into_iter()
            .map(|line| ContentRow::new(line, color))
            .collect();
        compose_regions(&self.geometry, &self.decoration, &rows, self.first_char())
    }
}
