//! Property tests for the box model, container clamping and menu navigation.

use clui::core::control::Control;
use clui::{Container, ControlRegistry, Edge, Geometry, Label, LayoutPolicy, Menu, Rect};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Decorate {
    AddBorder(Edge),
    RemoveBorder(Edge),
    AddPadding(Edge),
    RemovePadding(Edge),
}

fn edge() -> impl Strategy<Value = Edge> {
    prop_oneof![
        Just(Edge::Top),
        Just(Edge::Right),
        Just(Edge::Bottom),
        Just(Edge::Left)
    ]
}

fn decorate() -> impl Strategy<Value = Decorate> {
    prop_oneof![
        edge().prop_map(Decorate::AddBorder),
        edge().prop_map(Decorate::RemoveBorder),
        edge().prop_map(Decorate::AddPadding),
        edge().prop_map(Decorate::RemovePadding),
    ]
}

fn count(flags: [bool; 4]) -> i32 {
    flags.iter().filter(|flag| **flag).count() as i32
}

proptest! {
    #[test]
    fn content_size_is_total_minus_active_edges(
        width in 0i32..30,
        height in 0i32..30,
        ops in prop::collection::vec(decorate(), 0..24),
    ) {
        let mut geometry = Geometry::new(0, 0, width, height);
        for op in ops {
            match op {
                Decorate::AddBorder(edge) => geometry.add_border(edge, None),
                Decorate::RemoveBorder(edge) => geometry.remove_border(edge, None),
                Decorate::AddPadding(edge) => geometry.add_padding(edge, None),
                Decorate::RemovePadding(edge) => geometry.remove_padding(edge, None),
            }
        }
        let border = geometry.border();
        let padding = geometry.padding();
        let columns = count([border.left, border.right, padding.left, padding.right]);
        let rows = count([border.top, border.bottom, padding.top, padding.bottom]);
        prop_assert_eq!(geometry.content_width(), (geometry.width() - columns).max(0));
        prop_assert_eq!(geometry.content_height(), (geometry.height() - rows).max(0));
    }

    #[test]
    fn attached_children_stay_inside_the_parent(
        x in -20i32..40,
        y in -20i32..40,
        width in 0i32..60,
        height in 0i32..60,
    ) {
        let mut registry = ControlRegistry::new();
        let parent = registry.insert(Container::new(5, 5, 10, 10).with_layout(LayoutPolicy::manual()));
        let child = registry.insert(Label::with_size(6, 6, 2, 2));
        registry.add(parent, child);

        registry.set_position(child, x, y);
        registry.set_width(child, width);
        registry.set_height(child, height);

        let inner = Rect::new(5, 5, 10, 10);
        let rect = registry.geometry(child).unwrap().rect();
        prop_assert!(rect.x >= inner.x && rect.y >= inner.y);
        prop_assert!(rect.right() <= inner.right() && rect.bottom() <= inner.bottom());
        prop_assert!(rect.width >= 0 && rect.height >= 0);
    }

    #[test]
    fn auto_width_matches_the_widest_child(widths in prop::collection::vec(0i32..40, 1..8)) {
        let mut registry = ControlRegistry::new();
        let container = registry.insert(Container::new(0, 0, 0, 0));
        for width in &widths {
            let label = registry.insert(Label::with_size(0, 0, *width, 1));
            registry.add(container, label);
        }
        let widest = widths.iter().copied().max().unwrap_or(0);
        prop_assert_eq!(registry.geometry(container).unwrap().width(), widest);
    }

    #[test]
    fn next_n_times_returns_to_the_start(
        len in 1usize..30,
        rows in 0i32..12,
        start in 0usize..30,
    ) {
        let items: Vec<String> = (0..len).map(|i| format!("item{i}")).collect();
        let mut menu = Menu::new(&items).unwrap();
        menu.geometry_mut().set_height(rows, None);
        menu.revalidate_window();
        menu.set_active(start % len);
        let origin = menu.active();

        for _ in 0..len {
            menu.next();
            if menu.rows() > 0 {
                prop_assert!(menu.in_window(menu.active()));
            }
        }
        prop_assert_eq!(menu.active(), origin);

        for _ in 0..len {
            menu.previous();
        }
        prop_assert_eq!(menu.active(), origin);
    }

    #[test]
    fn paging_keeps_the_active_item_visible(
        len in 1usize..40,
        rows in 1i32..10,
        pages in prop::collection::vec(any::<bool>(), 0..20),
    ) {
        let items: Vec<String> = (0..len).map(|i| i.to_string()).collect();
        let mut menu = Menu::new(&items).unwrap();
        menu.geometry_mut().set_height(rows, None);
        menu.revalidate_window();
        for down in pages {
            if down {
                menu.page_down();
            } else {
                menu.page_up();
            }
            prop_assert!(menu.in_window(menu.active()));
        }
    }

    #[test]
    fn multiselect_results_are_sorted_and_unique(toggles in prop::collection::vec(0usize..6, 0..30)) {
        let mut menu = Menu::new(["a", "b", "c", "d", "e", "f"])
            .unwrap()
            .with_mode(clui::MenuMode::MultiSelect);
        for item in toggles {
            menu.set_active(item);
            menu.toggle_select();
        }
        let clui::MenuOutcome::Selected(picked) = menu.confirm() else {
            panic!("multi-select confirm always selects");
        };
        prop_assert!(picked.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(picked.iter().all(|item| *item < 6));
    }
}
