//! Control contract and the frame helpers every control renders through.

use crate::core::cell::{Cell, CellBlock};
use crate::core::geometry::{Edge, EdgeKind, Geometry, Rect};
use crate::core::style::{CellColor, Decoration};
use crate::core::text::truncate_to_width;

/// Stable handle of a control owned by a [`ControlRegistry`].
///
/// Handles are never reused within one registry.
///
/// [`ControlRegistry`]: crate::runtime::control_registry::ControlRegistry
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ControlId(u64);

impl ControlId {
    pub fn raw(self) -> u64 {
        self.0
    }

    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Renderable rectangular widget.
pub trait Control {
    fn geometry(&self) -> &Geometry;

    fn geometry_mut(&mut self) -> &mut Geometry;

    fn decoration(&self) -> &Decoration;

    fn decoration_mut(&mut self) -> &mut Decoration;

    /// Plain-text rows, top to bottom, each at most `width` columns wide.
    fn render_text(&self) -> Vec<String>;

    /// Rectangles for diffed rendering: decoration edges plus content rows.
    fn render_regions(&self) -> Vec<Region>;

    /// The content row currently showing `item`, for targeted updates.
    fn item_region(&self, _item: usize) -> Option<Region> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegionKey {
    Border(Edge),
    Padding(Edge),
    Content(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub key: RegionKey,
    pub rect: Rect,
    pub cells: CellBlock,
    /// Item displayed by a content row, when the row belongs to a list.
    pub item: Option<usize>,
}

/// One content row handed to the frame helpers: text already fitted to the
/// content width, its colors, and the item it shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRow {
    pub text: String,
    pub color: CellColor,
    pub item: Option<usize>,
}

impl ContentRow {
    pub fn new(text: impl Into<String>, color: CellColor) -> Self {
        Self {
            text: text.into(),
            color,
            item: None,
        }
    }

    pub fn for_item(text: impl Into<String>, color: CellColor, item: usize) -> Self {
        Self {
            text: text.into(),
            color,
            item: Some(item),
        }
    }
}

fn first_border_glyph(geometry: &Geometry, decoration: &Decoration) -> Option<char> {
    Edge::ALL
        .iter()
        .find(|edge| geometry.has_border(**edge))
        .map(|edge| decoration.border_glyph.get(*edge))
}

/// Glyph for a control that only has room for one cell.
fn single_cell_glyph(geometry: &Geometry, decoration: &Decoration, first_char: Option<char>) -> char {
    first_border_glyph(geometry, decoration)
        .or(first_char)
        .unwrap_or(decoration.fill_glyph)
}

fn is_single_cell(geometry: &Geometry) -> bool {
    geometry.width() == 1 && geometry.height() == 1
}

/// Composes the text rows of a control.
///
/// Order: top border, top padding, content rows, filler rows, bottom padding,
/// bottom border. `rows` must already be fitted to the content width; missing
/// rows are filled with the fill glyph. `first_char` is the first character of the
/// raw content, used when the control is a single cell.
pub fn compose_text(
    geometry: &Geometry,
    decoration: &Decoration,
    rows: &[String],
    first_char: Option<char>,
) -> Vec<String> {
    if let Err(err) = geometry.ensure_renderable() {
        tracing::trace!(%err, "skipping text render");
        return Vec::new();
    }
    if is_single_cell(geometry) {
        return vec![single_cell_glyph(geometry, decoration, first_char).to_string()];
    }

    let width = geometry.width() as usize;
    let height = geometry.height() as usize;
    let border = geometry.border();
    let padding = geometry.padding();
    let content_width = geometry.content_width() as usize;
    let inner_width = width
        .saturating_sub(usize::from(border.left))
        .saturating_sub(usize::from(border.right));

    let wrap = |middle: String| -> String {
        let mut line = String::new();
        if border.left {
            line.push(decoration.border_glyph.left);
        }
        line.push_str(&middle);
        if border.right {
            line.push(decoration.border_glyph.right);
        }
        let (kept, _) = truncate_to_width(&line, width);
        kept.to_string()
    };
    let padding_row = |edge: Edge| -> String {
        wrap(std::iter::repeat(decoration.padding_glyph.get(edge)).take(inner_width).collect())
    };
    let border_row =
        |edge: Edge| -> String { std::iter::repeat(decoration.border_glyph.get(edge)).take(width).collect() };

    let mut out = Vec::with_capacity(height);
    if border.top {
        out.push(border_row(Edge::Top));
    }
    if padding.top {
        out.push(padding_row(Edge::Top));
    }
    let filler: String = std::iter::repeat(decoration.fill_glyph)
        .take(content_width)
        .collect();
    for row in 0..geometry.content_height() as usize {
        let content = rows.get(row).cloned().unwrap_or_else(|| filler.clone());
        let mut middle = String::new();
        if padding.left {
            middle.push(decoration.padding_glyph.left);
        }
        middle.push_str(&content);
        if padding.right {
            middle.push(decoration.padding_glyph.right);
        }
        out.push(wrap(middle));
    }
    if padding.bottom {
        out.push(padding_row(Edge::Bottom));
    }
    if border.bottom {
        out.push(border_row(Edge::Bottom));
    }
    out.truncate(height);
    out
}

/// Composes the regions of a control: decoration edges first, then one region
/// per content row.
pub fn compose_regions(
    geometry: &Geometry,
    decoration: &Decoration,
    rows: &[ContentRow],
    first_char: Option<char>,
) -> Vec<Region> {
    if let Err(err) = geometry.ensure_renderable() {
        tracing::trace!(%err, "skipping region render");
        return Vec::new();
    }
    if is_single_cell(geometry) && !geometry.border().any() {
        let glyph = single_cell_glyph(geometry, decoration, first_char);
        let color = rows.first().map_or(decoration.content_color, |row| row.color);
        return vec![Region {
            key: RegionKey::Content(0),
            rect: geometry.rect(),
            cells: CellBlock::from_rows([glyph.to_string().as_str()], 1, color),
            item: rows.first().and_then(|row| row.item),
        }];
    }

    let mut regions: Vec<Region> = geometry
        .edge_rects()
        .into_iter()
        .map(|(kind, edge, rect)| {
            let glyph = decoration.glyph(kind, edge);
            let color = decoration.color(kind, edge);
            let cells = CellBlock::filled(
                rect.width as usize,
                rect.height as usize,
                Cell::new(glyph, color),
            );
            let key = match kind {
                EdgeKind::Border => RegionKey::Border(edge),
                EdgeKind::Padding => RegionKey::Padding(edge),
            };
            Region {
                key,
                rect,
                cells,
                item: None,
            }
        })
        .collect();

    for row in 0..geometry.content_height() as usize {
        regions.extend(content_region(geometry, decoration, rows.get(row), row));
    }
    regions
}

/// Region for content row `row`, or `None` when the row lies outside the
/// content area.
pub fn content_region(
    geometry: &Geometry,
    decoration: &Decoration,
    content: Option<&ContentRow>,
    row: usize,
) -> Option<Region> {
    let content_rect = geometry.content_rect();
    if content_rect.width <= 0 || row >= content_rect.height as usize {
        return None;
    }
    let width = content_rect.width as usize;
    let rect = Rect::new(content_rect.x, content_rect.y + row as i32, content_rect.width, 1);
    let (cells, item) = match content {
        Some(content) => (
            CellBlock::from_rows([content.text.as_str()], width, content.color),
            content.item,
        ),
        None => (
            CellBlock::filled(
                width,
                1,
                Cell::new(decoration.fill_glyph, decoration.content_color),
            ),
            None,
        ),
    };
    Some(Region {
        key: RegionKey::Content(row),
        rect,
        cells,
        item,
    })
}
