use clui::{
    Container, ControlRegistry, Edge, EdgeSelector, Label, LayoutPolicy, Menu, Rect,
};

fn root(registry: &mut ControlRegistry) -> clui::ControlId {
    registry.insert(Container::new(0, 0, 40, 20).with_layout(LayoutPolicy::manual()))
}

#[test]
fn titled_menu_stacks_under_its_label() {
    let mut registry = ControlRegistry::new();
    let root = root(&mut registry);
    let frame = registry.insert(Container::new(2, 1, 0, 0));
    assert!(registry.add(root, frame));

    let title = registry.insert(Label::new(0, 0, "Pick"));
    registry.add_border(title, EdgeSelector::All);
    registry.remove_border(title, Edge::Bottom);
    registry.add_padding(title, Edge::Left);
    registry.add_padding(title, Edge::Right);
    let menu = registry.insert(Menu::new(["alpha", "beta"]).unwrap());
    registry.add_border(menu, EdgeSelector::All);
    registry.add_padding(menu, Edge::Left);
    registry.add_padding(menu, Edge::Right);

    assert!(registry.add(frame, title));
    assert!(registry.add(frame, menu));

    assert_eq!(registry.geometry(frame).unwrap().rect(), Rect::new(2, 1, 11, 6));
    assert_eq!(registry.geometry(title).unwrap().rect(), Rect::new(2, 1, 11, 2));
    assert_eq!(registry.geometry(menu).unwrap().rect(), Rect::new(2, 3, 11, 4));
    assert_eq!(registry.menu(menu).unwrap().rows(), 2);
}

#[test]
fn auto_width_is_the_widest_child() {
    let mut registry = ControlRegistry::new();
    let container = registry.insert(Container::new(0, 0, 0, 0));
    for width in [3, 9, 4] {
        let label = registry.insert(Label::with_size(0, 0, width, 1));
        registry.add(container, label);
    }
    let geometry = registry.geometry(container).unwrap();
    assert_eq!(geometry.width(), 9);
    assert_eq!(geometry.height(), 3);
}

#[test]
fn auto_width_never_shrinks_a_wider_container() {
    let mut registry = ControlRegistry::new();
    let container = registry.insert(Container::new(0, 0, 12, 0));
    let label = registry.insert(Label::new(0, 0, "abc"));
    registry.add(container, label);
    assert_eq!(registry.geometry(container).unwrap().width(), 12);
    assert_eq!(registry.geometry(label).unwrap().width(), 12);
}

#[test]
fn children_that_do_not_fit_are_cut_at_the_container_bottom() {
    let mut registry = ControlRegistry::new();
    let root = registry.insert(Container::new(0, 0, 20, 4).with_layout(LayoutPolicy::manual()));
    let stack = registry.insert(Container::new(0, 0, 0, 0));
    registry.add(root, stack);
    let first = registry.insert(Label::with_size(0, 0, 5, 3));
    let second = registry.insert(Label::with_size(0, 0, 5, 3));
    registry.add(stack, first);
    registry.add(stack, second);

    let stack_rect = registry.geometry(stack).unwrap().rect();
    assert_eq!(stack_rect.bottom(), 4);
    let second_rect = registry.geometry(second).unwrap().rect();
    assert_eq!(second_rect.y, 3);
    assert_eq!(second_rect.bottom(), 4);
}

#[test]
fn moving_a_child_past_the_near_edge_truncates_it() {
    let mut registry = ControlRegistry::new();
    let parent = registry.insert(Container::new(5, 5, 10, 10).with_layout(LayoutPolicy::manual()));
    let child = registry.insert(Label::with_size(6, 6, 4, 2));
    registry.add(parent, child);

    registry.set_left(child, 3);
    let rect = registry.geometry(child).unwrap().rect();
    assert_eq!(rect.x, 5);
    assert_eq!(rect.width, 2);

    registry.set_right(child, 40);
    assert_eq!(registry.geometry(child).unwrap().right(), 15);
}

#[test]
fn empty_auto_height_container_has_no_height() {
    let mut registry = ControlRegistry::new();
    let container = registry.insert(Container::new(0, 0, 0, 0));
    assert_eq!(registry.geometry(container).unwrap().height(), 0);
    assert!(registry.children(container).is_empty());
}
