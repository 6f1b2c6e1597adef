//! Arena owning every control, with parent links and container layout.

use crate::core::control::{Control, ControlId};
use crate::core::geometry::{EdgeSelector, Geometry, Rect};
use crate::widgets::{Container, Label, Menu, TextInput, Widget};

struct Node {
    widget: Widget,
    parent: Option<ControlId>,
}

/// Owns controls by [`ControlId`].
///
/// Semantics:
/// - IDs are unique within a registry and never reused.
/// - A control has at most one parent, always a container.
/// - Once attached, a control's edges never lie outside its parent's interior.
#[derive(Default)]
pub struct ControlRegistry {
    entries: Vec<Option<Node>>,
    next_id: u64,
}

fn index(id: ControlId) -> Option<usize> {
    id.raw().try_into().ok()
}

impl ControlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a detached control.
    pub fn insert(&mut self, widget: impl Into<Widget>) -> ControlId {
        let id = ControlId::from_raw(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .expect("control id overflowed u64");
        let idx = index(id).expect("control id overflowed usize");
        if self.entries.len() <= idx {
            self.entries.resize_with(idx + 1, || None);
        }
        self.entries[idx] = Some(Node {
            widget: widget.into(),
            parent: None,
        });
        id
    }

    fn node(&self, id: ControlId) -> Option<&Node> {
        self.entries.get(index(id)?).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: ControlId) -> Option<&mut Node> {
        self.entries.get_mut(index(id)?).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: ControlId) -> bool {
        self.node(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: ControlId) -> Option<&Widget> {
        self.node(id).map(|node| &node.widget)
    }

    pub fn get_mut(&mut self, id: ControlId) -> Option<&mut Widget> {
        self.node_mut(id).map(|node| &mut node.widget)
    }

    pub fn control(&self, id: ControlId) -> Option<&dyn Control> {
        self.get(id).map(Widget::as_control)
    }

    pub fn geometry(&self, id: ControlId) -> Option<Geometry> {
        self.control(id).map(|control| *control.geometry())
    }

    pub fn container(&self, id: ControlId) -> Option<&Container> {
        self.get(id).and_then(Widget::as_container)
    }

    fn container_mut(&mut self, id: ControlId) -> Option<&mut Container> {
        self.get_mut(id).and_then(Widget::as_container_mut)
    }

    pub fn menu(&self, id: ControlId) -> Option<&Menu> {
        self.get(id).and_then(Widget::as_menu)
    }

    pub fn menu_mut(&mut self, id: ControlId) -> Option<&mut Menu> {
        self.get_mut(id).and_then(Widget::as_menu_mut)
    }

    pub fn label_mut(&mut self, id: ControlId) -> Option<&mut Label> {
        self.get_mut(id).and_then(Widget::as_label_mut)
    }

    pub fn text_input(&self, id: ControlId) -> Option<&TextInput> {
        self.get(id).and_then(Widget::as_text_input)
    }

    pub fn text_input_mut(&mut self, id: ControlId) -> Option<&mut TextInput> {
        self.get_mut(id).and_then(Widget::as_text_input_mut)
    }

    pub fn parent(&self, id: ControlId) -> Option<ControlId> {
        self.node(id).and_then(|node| node.parent)
    }

    /// Children in insertion order. Empty for anything but a container.
    pub fn children(&self, id: ControlId) -> Vec<ControlId> {
        self.container(id)
            .map(|container| container.children().to_vec())
            .unwrap_or_default()
    }

    /// Interior of the parent container, or `None` for a detached control.
    pub fn parent_interior(&self, id: ControlId) -> Option<Rect> {
        let parent = self.parent(id)?;
        self.control(parent)
            .map(|control| control.geometry().content_rect())
    }

    /// `id` followed by its descendants, depth first in insertion order.
    pub fn subtree(&self, id: ControlId) -> Vec<ControlId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if !self.contains(next) {
                continue;
            }
            out.push(next);
            stack.extend(self.children(next).into_iter().rev());
        }
        out
    }

    /// Attaches `child` to `container` and runs the container layout.
    ///
    /// Returns `false` when `container` is not a container, `child` is unknown or
    /// already attached, or the attachment would create a cycle.
    pub fn add(&mut self, container: ControlId, child: ControlId) -> bool {
        if container == child || self.parent(child).is_some() || !self.contains(child) {
            return false;
        }
        if self.subtree(child).contains(&container) {
            return false;
        }
        let Some(target) = self.container_mut(container) else {
            return false;
        };
        target.push_child(child);
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(container);
        }

        self.reflow(container);
        let mut ancestor = self.parent(container);
        while let Some(id) = ancestor {
            self.reflow(id);
            ancestor = self.parent(id);
        }
        tracing::trace!(container = container.raw(), child = child.raw(), "control attached");
        true
    }

    /// Detaches `child` from `container` and drops it with its subtree.
    pub fn remove(&mut self, container: ControlId, child: ControlId) -> Option<Widget> {
        if self.parent(child) != Some(container) {
            return None;
        }
        self.container_mut(container)?.remove_child(child);
        self.take_subtree(child)
    }

    /// Drops a control wherever it lives.
    pub fn discard(&mut self, id: ControlId) -> Option<Widget> {
        match self.parent(id) {
            Some(parent) => self.remove(parent, id),
            None => self.take_subtree(id),
        }
    }

    fn take_subtree(&mut self, id: ControlId) -> Option<Widget> {
        for descendant in self.subtree(id).into_iter().skip(1) {
            if let Some(entry) = index(descendant).and_then(|idx| self.entries.get_mut(idx)) {
                *entry = None;
            }
        }
        let entry = self.entries.get_mut(index(id)?)?;
        entry.take().map(|node| node.widget)
    }

    // Layout: stretch, stack, clamp, then size to the children.
    fn reflow(&mut self, id: ControlId) {
        let Some(container) = self.container(id) else {
            return;
        };
        let policy = container.layout();
        let children = container.children().to_vec();
        let own = *container.geometry();
        if children.is_empty() {
            return;
        }
        // An auto-sizing parent grows after this container does, so it is not a
        // bound on that axis yet.
        let own_parent = self.parent_interior(id);
        let parent_policy = self
            .parent(id)
            .and_then(|parent| self.container(parent))
            .map(Container::layout);
        let width_bound = match parent_policy {
            Some(parent) if parent.auto_width => None,
            _ => own_parent,
        };
        let height_bound = match parent_policy {
            Some(parent) if parent.auto_height => None,
            _ => own_parent,
        };

        if policy.auto_width {
            let widest = children
                .iter()
                .filter_map(|child| self.geometry(*child))
                .map(|geometry| geometry.width())
                .max()
                .unwrap_or(0);
            let wanted = widest + own.decoration_columns();
            if wanted > own.width() {
                self.apply(id, |geometry, parent| geometry.set_width(wanted, parent), width_bound);
            }
        }
        if policy.auto_height {
            // Room for every child before stacking, so stacking does not squash them.
            let wanted = self.children_height(&children) + own.decoration_rows();
            self.apply(id, |geometry, parent| geometry.set_height(wanted, parent), height_bound);
        }

        let Some(interior) = self.control(id).map(|c| c.geometry().content_rect()) else {
            return;
        };
        let bound = Some(interior);
        if policy.propagate_width {
            for child in &children {
                self.apply(*child, |geometry, parent| geometry.set_width(interior.width, parent), bound);
            }
        }
        if policy.auto_position {
            let mut next_top = interior.y;
            for child in &children {
                self.apply(
                    *child,
                    |geometry, parent| {
                        geometry.set_left(interior.x, parent);
                        geometry.set_top(next_top, parent);
                    },
                    bound,
                );
                if let Some(geometry) = self.geometry(*child) {
                    next_top = geometry.bottom();
                }
            }
        }
        for child in &children {
            self.apply(*child, clamp_into, bound);
        }
        if policy.auto_height {
            let wanted = self.children_height(&children) + own.decoration_rows();
            self.apply(id, |geometry, parent| geometry.set_height(wanted, parent), height_bound);
        }
        for child in &children {
            self.settle(*child);
        }
    }

    fn children_height(&self, children: &[ControlId]) -> i32 {
        children
            .iter()
            .filter_map(|child| self.geometry(*child))
            .map(|geometry| geometry.height())
            .sum()
    }

    fn apply(
        &mut self,
        id: ControlId,
        f: impl FnOnce(&mut Geometry, Option<Rect>),
        parent: Option<Rect>,
    ) {
        if let Some(widget) = self.get_mut(id) {
            f(widget.as_control_mut().geometry_mut(), parent);
        }
    }

    /// Restores invariants below `id` after its geometry changed.
    fn settle(&mut self, id: ControlId) {
        if let Some(menu) = self.menu_mut(id) {
            menu.revalidate_window();
            return;
        }
        let Some(container) = self.container(id) else {
            return;
        };
        let policy = container.layout();
        let interior = container.geometry().content_rect();
        let bound = Some(interior);
        for child in container.children().to_vec() {
            if policy.propagate_width {
                self.apply(child, |geometry, parent| geometry.set_width(interior.width, parent), bound);
            }
            self.apply(child, clamp_into, bound);
            self.settle(child);
        }
    }

    fn mutate(&mut self, id: ControlId, f: impl FnOnce(&mut Geometry, Option<Rect>)) -> bool {
        if !self.contains(id) {
            return false;
        }
        let parent = self.parent_interior(id);
        self.apply(id, f, parent);
        self.settle(id);
        true
    }

    pub fn set_position(&mut self, id: ControlId, x: i32, y: i32) -> bool {
        self.mutate(id, |geometry, parent| geometry.set_position(x, y, parent))
    }

    pub fn set_left(&mut self, id: ControlId, x: i32) -> bool {
        self.mutate(id, |geometry, parent| geometry.set_left(x, parent))
    }

    pub fn set_top(&mut self, id: ControlId, y: i32) -> bool {
        self.mutate(id, |geometry, parent| geometry.set_top(y, parent))
    }

    pub fn set_right(&mut self, id: ControlId, right: i32) -> bool {
        self.mutate(id, |geometry, parent| geometry.set_right(right, parent))
    }

    pub fn set_bottom(&mut self, id: ControlId, bottom: i32) -> bool {
        self.mutate(id, |geometry, parent| geometry.set_bottom(bottom, parent))
    }

    pub fn set_width(&mut self, id: ControlId, width: i32) -> bool {
        self.mutate(id, |geometry, parent| geometry.set_width(width, parent))
    }

    pub fn set_height(&mut self, id: ControlId, height: i32) -> bool {
        self.mutate(id, |geometry, parent| geometry.set_height(height, parent))
    }

    pub fn add_border(&mut self, id: ControlId, selector: impl Into<EdgeSelector>) -> bool {
        let selector = selector.into();
        self.mutate(id, |geometry, parent| geometry.add_border(selector, parent))
    }

    pub fn remove_border(&mut self, id: ControlId, selector: impl Into<EdgeSelector>) -> bool {
        let selector = selector.into();
        self.mutate(id, |geometry, parent| geometry.remove_border(selector, parent))
    }

    pub fn add_padding(&mut self, id: ControlId, selector: impl Into<EdgeSelector>) -> bool {
        let selector = selector.into();
        self.mutate(id, |geometry, parent| geometry.add_padding(selector, parent))
    }

    pub fn remove_padding(&mut self, id: ControlId, selector: impl Into<EdgeSelector>) -> bool {
        let selector = selector.into();
        self.mutate(id, |geometry, parent| geometry.remove_padding(selector, parent))
    }
}

/// Re-applies the current position and size through the clamp rules.
fn clamp_into(geometry: &mut Geometry, parent: Option<Rect>) {
    let rect = geometry.rect();
    geometry.set_left(rect.x, parent);
    geometry.set_top(rect.y, parent);
    geometry.set_width(geometry.width(), parent);
    geometry.set_height(geometry.height(), parent);
}

#[cfg(test)]
mod tests {
    use super::ControlRegistry;
    use crate::core::geometry::{EdgeSelector, Rect};
    use crate::widgets::{Container, Label, LayoutPolicy, Menu};

    #[test]
    fn auto_width_tracks_widest_child_and_propagates() {
        let mut registry = ControlRegistry::new();
        let container = registry.insert(Container::new(0, 0, 0, 0));
        let labels: Vec<_> = ["abc", "abcdefg", "abcde"]
            .into_iter()
            .map(|text| registry.insert(Label::new(0, 0, text)))
            .collect();
        for label in &labels {
            assert!(registry.add(container, *label));
        }

        let geometry = registry.geometry(container).unwrap();
        assert_eq!(geometry.width(), 7);
        assert_eq!(geometry.height(), 3);
        for (row, label) in labels.iter().enumerate() {
            let child = registry.geometry(*label).unwrap();
            assert_eq!(child.width(), 7);
            assert_eq!(child.y(), row as i32);
        }
    }

    #[test]
    fn stacking_starts_inside_the_container_decoration() {
        let mut registry = ControlRegistry::new();
        let container = registry.insert(Container::new(5, 5, 0, 0));
        registry.add_border(container, EdgeSelector::All);
        let label = registry.insert(Label::new(0, 0, "abcd"));
        registry.add(container, label);

        assert_eq!(registry.geometry(container).unwrap().rect(), Rect::new(5, 5, 6, 3));
        assert_eq!(registry.geometry(label).unwrap().rect(), Rect::new(6, 6, 4, 1));
    }

    #[test]
    fn oversized_child_is_clamped_to_the_container() {
        let mut registry = ControlRegistry::new();
        let container =
            registry.insert(Container::new(0, 0, 10, 10).with_layout(LayoutPolicy::manual()));
        let label = registry.insert(Label::with_size(2, 0, 4, 1));
        registry.add(container, label);

        registry.set_width(label, 15);
        let child = registry.geometry(label).unwrap();
        assert_eq!(child.right(), 10);
        assert!(child.width() <= 10);
    }

    #[test]
    fn container_width_changes_reach_children() {
        let mut registry = ControlRegistry::new();
        let container = registry.insert(Container::new(0, 0, 0, 0));
        let label = registry.insert(Label::new(0, 0, "abcdef"));
        registry.add(container, label);

        registry.set_width(container, 4);
        assert_eq!(registry.geometry(label).unwrap().width(), 4);
    }

    #[test]
    fn nested_containers_grow_their_ancestors() {
        let mut registry = ControlRegistry::new();
        let outer = registry.insert(Container::new(0, 0, 0, 0));
        let inner = registry.insert(Container::new(0, 0, 0, 0));
        registry.add(outer, inner);
        let label = registry.insert(Label::new(0, 0, "hello\nworld"));
        registry.add(inner, label);

        assert_eq!(registry.geometry(outer).unwrap().rect(), Rect::new(0, 0, 5, 2));
        assert_eq!(registry.subtree(outer), vec![outer, inner, label]);
    }

    #[test]
    fn remove_drops_the_whole_subtree() {
        let mut registry = ControlRegistry::new();
        let root = registry.insert(Container::new(0, 0, 20, 20).with_layout(LayoutPolicy::manual()));
        let group = registry.insert(Container::new(0, 0, 0, 0));
        let menu = registry.insert(Menu::new(["a", "b"]).unwrap());
        registry.add(root, group);
        registry.add(group, menu);

        assert!(registry.remove(root, group).is_some());
        assert!(!registry.contains(menu));
        assert!(registry.children(root).is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn attach_rejects_cycles_and_second_parents() {
        let mut registry = ControlRegistry::new();
        let a = registry.insert(Container::new(0, 0, 0, 0));
        let b = registry.insert(Container::new(0, 0, 0, 0));
        assert!(registry.add(a, b));
        assert!(!registry.add(b, a));
        assert!(!registry.add(a, b));
        let label = registry.insert(Label::new(0, 0, "x"));
        assert!(!registry.add(label, a));
    }
}
