//! Box model shared by every control.
//!
//! Edges are half-open: a control covers columns `x..x + width` and rows
//! `y..y + height`, so `right()` and `bottom()` name the first column/row past the
//! control. All clamping goes through the free functions at the bottom of this
//! module; `Geometry` only decides which axis and edge a request touches.

use crate::error::CapacityError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    fn is_horizontal_axis(self) -> bool {
        matches!(self, Edge::Left | Edge::Right)
    }
}

/// One edge or all four of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSelector {
    Edge(Edge),
    All,
}

impl EdgeSelector {
    fn edges(self) -> &'static [Edge] {
        match self {
            EdgeSelector::Edge(Edge::Top) => &[Edge::Top],
            EdgeSelector::Edge(Edge::Right) => &[Edge::Right],
            EdgeSelector::Edge(Edge::Bottom) => &[Edge::Bottom],
            EdgeSelector::Edge(Edge::Left) => &[Edge::Left],
            EdgeSelector::All => &Edge::ALL,
        }
    }
}

impl From<Edge> for EdgeSelector {
    fn from(edge: Edge) -> Self {
        EdgeSelector::Edge(edge)
    }
}

/// A value per edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

impl<T: Copy> Edges<T> {
    pub fn uniform(value: T) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn get(&self, edge: Edge) -> T {
        match edge {
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
        }
    }

    pub fn set(&mut self, edge: Edge, value: T) {
        match edge {
            Edge::Top => self.top = value,
            Edge::Right => self.right = value,
            Edge::Bottom => self.bottom = value,
            Edge::Left => self.left = value,
        }
    }
}

impl Edges<bool> {
    pub fn any(&self) -> bool {
        self.top || self.right || self.bottom || self.left
    }

    fn horizontal_count(&self) -> i32 {
        i32::from(self.left) + i32::from(self.right)
    }

    fn vertical_count(&self) -> i32 {
        i32::from(self.top) + i32::from(self.bottom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: width.max(0),
            height: height.max(0),
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn area(&self) -> i32 {
        self.width.max(0) * self.height.max(0)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Overlap of two rectangles; empty when they do not touch.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }
}

/// Position, size and edge decoration flags of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    rect: Rect,
    border: Edges<bool>,
    padding: Edges<bool>,
}

impl Geometry {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            border: Edges::default(),
            padding: Edges::default(),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn x(&self) -> i32 {
        self.rect.x
    }

    pub fn y(&self) -> i32 {
        self.rect.y
    }

    pub fn width(&self) -> i32 {
        self.rect.width
    }

    pub fn height(&self) -> i32 {
        self.rect.height
    }

    pub fn left(&self) -> i32 {
        self.rect.x
    }

    pub fn top(&self) -> i32 {
        self.rect.y
    }

    pub fn right(&self) -> i32 {
        self.rect.right()
    }

    pub fn bottom(&self) -> i32 {
        self.rect.bottom()
    }

    pub fn border(&self) -> Edges<bool> {
        self.border
    }

    pub fn padding(&self) -> Edges<bool> {
        self.padding
    }

    pub fn has_border(&self, edge: Edge) -> bool {
        self.border.get(edge)
    }

    pub fn has_padding(&self, edge: Edge) -> bool {
        self.padding.get(edge)
    }

    /// Columns taken by active border and padding edges.
    pub fn decoration_columns(&self) -> i32 {
        self.border.horizontal_count() + self.padding.horizontal_count()
    }

    /// Rows taken by active border and padding edges.
    pub fn decoration_rows(&self) -> i32 {
        self.border.vertical_count() + self.padding.vertical_count()
    }

    pub fn content_width(&self) -> i32 {
        (self.rect.width - self.decoration_columns()).max(0)
    }

    pub fn content_height(&self) -> i32 {
        (self.rect.height - self.decoration_rows()).max(0)
    }

    /// Rectangle left for content once border and padding are taken out.
    pub fn content_rect(&self) -> Rect {
        let x = self.rect.x + i32::from(self.border.left) + i32::from(self.padding.left);
        let y = self.rect.y + i32::from(self.border.top) + i32::from(self.padding.top);
        Rect::new(x, y, self.content_width(), self.content_height())
    }

    pub fn ensure_renderable(&self) -> Result<(), CapacityError> {
        if self.rect.is_empty() {
            return Err(CapacityError {
                width: self.rect.width,
                height: self.rect.height,
            });
        }
        Ok(())
    }

    pub fn set_position(&mut self, x: i32, y: i32, parent: Option<Rect>) {
        self.set_left(x, parent);
        self.set_top(y, parent);
    }

    pub fn set_left(&mut self, x: i32, parent: Option<Rect>) {
        let (pos, size) = clamp_near_edge(x, self.rect.width, parent.map(|p| (p.x, p.right())));
        self.rect.x = pos;
        self.rect.width = size;
    }

    pub fn set_top(&mut self, y: i32, parent: Option<Rect>) {
        let (pos, size) = clamp_near_edge(y, self.rect.height, parent.map(|p| (p.y, p.bottom())));
        self.rect.y = pos;
        self.rect.height = size;
    }

    pub fn set_right(&mut self, right: i32, parent: Option<Rect>) {
        self.rect.width = clamp_far_edge(self.rect.x, right, parent.map(|p| p.right()));
    }

    pub fn set_bottom(&mut self, bottom: i32, parent: Option<Rect>) {
        self.rect.height = clamp_far_edge(self.rect.y, bottom, parent.map(|p| p.bottom()));
    }

    pub fn set_width(&mut self, width: i32, parent: Option<Rect>) {
        self.rect.width = clamp_size(
            self.rect.x,
            width,
            parent.map(|p| (p.width, p.right())),
        );
    }

    pub fn set_height(&mut self, height: i32, parent: Option<Rect>) {
        self.rect.height = clamp_size(
            self.rect.y,
            height,
            parent.map(|p| (p.height, p.bottom())),
        );
    }

    pub fn add_border(&mut self, selector: impl Into<EdgeSelector>, parent: Option<Rect>) {
        for &edge in selector.into().edges() {
            if !self.border.get(edge) {
                self.border.set(edge, true);
                self.grow(edge, 1, parent);
            }
        }
    }

    pub fn remove_border(&mut self, selector: impl Into<EdgeSelector>, parent: Option<Rect>) {
        for &edge in selector.into().edges() {
            if self.border.get(edge) {
                self.border.set(edge, false);
                self.grow(edge, -1, parent);
            }
        }
    }

    pub fn add_padding(&mut self, selector: impl Into<EdgeSelector>, parent: Option<Rect>) {
        for &edge in selector.into().edges() {
            if !self.padding.get(edge) {
                self.padding.set(edge, true);
                self.grow(edge, 1, parent);
            }
        }
    }

    pub fn remove_padding(&mut self, selector: impl Into<EdgeSelector>, parent: Option<Rect>) {
        for &edge in selector.into().edges() {
            if self.padding.get(edge) {
                self.padding.set(edge, false);
                self.grow(edge, -1, parent);
            }
        }
    }

    fn grow(&mut self, edge: Edge, delta: i32, parent: Option<Rect>) {
        if edge.is_horizontal_axis() {
            self.set_width(self.rect.width + delta, parent);
        } else {
            self.set_height(self.rect.height + delta, parent);
        }
    }

    /// Decoration rectangles in border-then-padding order, skipping empty ones.
    pub fn edge_rects(&self) -> Vec<(EdgeKind, Edge, Rect)> {
        let r = self.rect;
        let b = self.border;
        let p = self.padding;
        let bt = i32::from(b.top);
        let bb = i32::from(b.bottom);
        let bl = i32::from(b.left);
        let br = i32::from(b.right);
        let pt = i32::from(p.top);
        let pb = i32::from(p.bottom);
        let pl = i32::from(p.left);
        let pr = i32::from(p.right);

        let inner_rows = r.height - bt - bb;
        let inner_cols = r.width - bl - br;
        let content_rows = inner_rows - pt - pb;

        let mut out = Vec::new();
        let mut push = |kind: EdgeKind, edge: Edge, rect: Rect| {
            if !rect.is_empty() {
                out.push((kind, edge, rect));
            }
        };

        if b.top {
            push(EdgeKind::Border, Edge::Top, Rect::new(r.x, r.y, r.width, 1));
        }
        if b.right && r.width > bl {
            push(
                EdgeKind::Border,
                Edge::Right,
                Rect::new(r.right() - 1, r.y + bt, 1, inner_rows),
            );
        }
        if b.bottom && r.height > bt {
            push(
                EdgeKind::Border,
                Edge::Bottom,
                Rect::new(r.x, r.bottom() - 1, r.width, 1),
            );
        }
        if b.left {
            push(EdgeKind::Border, Edge::Left, Rect::new(r.x, r.y + bt, 1, inner_rows));
        }
        if p.top && inner_rows > 0 {
            push(
                EdgeKind::Padding,
                Edge::Top,
                Rect::new(r.x + bl, r.y + bt, inner_cols, 1),
            );
        }
        if p.right && inner_cols > pl {
            push(
                EdgeKind::Padding,
                Edge::Right,
                Rect::new(r.right() - br - 1, r.y + bt + pt, 1, content_rows),
            );
        }
        if p.bottom && inner_rows > pt {
            push(
                EdgeKind::Padding,
                Edge::Bottom,
                Rect::new(r.x + bl, r.bottom() - bb - 1, inner_cols, 1),
            );
        }
        if p.left && inner_cols > 0 {
            push(
                EdgeKind::Padding,
                Edge::Left,
                Rect::new(r.x + bl, r.y + bt + pt, 1, content_rows),
            );
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeKind {
    Border,
    Padding,
}

/// Moves a near edge (left/top) keeping the size where the parent allows it.
///
/// Returns the resolved `(position, size)`.
pub fn clamp_near_edge(pos: i32, size: i32, parent: Option<(i32, i32)>) -> (i32, i32) {
    let size = size.max(0);
    let Some((near, far)) = parent else {
        return (pos, size);
    };
    if pos < near {
        let overflow = near - pos;
        let size = (size - overflow).max(0);
        return (near, size.min((far - near).max(0)));
    }
    let pos = pos.min(far);
    let size = if pos + size > far { far - pos } else { size };
    (pos, size.max(0))
}

/// Resolves a far edge (right/bottom) request into a size measured from `pos`.
pub fn clamp_far_edge(pos: i32, far_edge: i32, parent_far: Option<i32>) -> i32 {
    let far_edge = match parent_far {
        Some(limit) => far_edge.min(limit),
        None => far_edge,
    };
    (far_edge - pos).max(0)
}

/// Resolves a size request against the parent's interior size and far edge.
pub fn clamp_size(pos: i32, size: i32, parent: Option<(i32, i32)>) -> i32 {
    let size = size.max(0);
    let Some((parent_size, parent_far)) = parent else {
        return size;
    };
    let size = size.min(parent_size.max(0));
    if pos + size > parent_far {
        clamp_far_edge(pos, parent_far, Some(parent_far))
    } else {
        size
    }
}
