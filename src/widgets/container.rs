//! Container control: a decorated frame that lays out child controls.
//!
//! Children live in the [`ControlRegistry`]; a container only keeps their ids
//! in insertion order. Layout runs when a child is attached, see
//! [`ControlRegistry::add`].
//!
//! [`ControlRegistry`]: crate::runtime::control_registry::ControlRegistry
//! [`ControlRegistry::add`]: crate::runtime::control_registry::ControlRegistry::add

use crate::core::control::{compose_regions, compose_text, Control, ControlId, Region, RegionKey};
use crate::core::geometry::Geometry;
use crate::core::style::Decoration;

/// Layout policy applied when children are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutPolicy {
    /// Grow the container to its widest child.
    pub auto_width: bool,
    /// Force every child to the container's interior width.
    pub propagate_width: bool,
    /// Stack children vertically from the interior origin.
    pub auto_position: bool,
    /// Size the container to the sum of its children's heights.
    pub auto_height: bool,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            auto_width: true,
            propagate_width: true,
            auto_position: true,
            auto_height: true,
        }
    }
}

impl LayoutPolicy {
    /// No automatic layout: children keep their own position and size, clamped
    /// to the interior.
    pub fn manual() -> Self {
        Self {
            auto_width: false,
            propagate_width: false,
            auto_position: false,
            auto_height: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Container {
    geometry: Geometry,
    decoration: Decoration,
    layout: LayoutPolicy,
    children: Vec<ControlId>,
}

impl Container {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            geometry: Geometry::new(x, y, width, height),
            decoration: Decoration::default(),
            layout: LayoutPolicy::default(),
            children: Vec::new(),
        }
    }

    pub fn with_layout(mut self, layout: LayoutPolicy) -> Self {
        self.layout = layout;
        self
    }

    pub fn layout(&self) -> LayoutPolicy {
        self.layout
    }

    pub fn set_layout(&mut self, layout: LayoutPolicy) {
        self.layout = layout;
    }

    pub fn children(&self) -> &[ControlId] {
        &self.children
    }

    pub(crate) fn push_child(&mut self, id: ControlId) {
        self.children.push(id);
    }

    pub(crate) fn remove_child(&mut self, id: ControlId) -> bool {
        let before = self.children.len();
        self.children.retain(|child| *child != id);
        before != self.children.len()
    }
}

impl Control for Container {
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
        compose_text(&self.geometry, &self.decoration, &[], None)
    }

    // The interior belongs to the children; only the frame is tracked.
    fn render_regions(&self) -> Vec<Region> {
        compose_regions(&self.geometry, &self.decoration, &[], None)
            .into_iter()
            .filter(|region| !matches!(region.key, RegionKey::Content(_)))
            .collect()
    }
}
