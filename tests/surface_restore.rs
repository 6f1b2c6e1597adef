use clui::core::control::Control;
use clui::{
    read_menu, BackendKind, Container, EdgeSelector, Key, Keybindings, Label, Menu, MenuMode,
    MenuOutcome, Surface, VirtualTerminal,
};

fn striped(columns: u16, rows: u16) -> VirtualTerminal {
    let mut terminal = VirtualTerminal::new(columns, rows);
    for row in 0..rows {
        let glyph = if row % 2 == 0 { "=" } else { "-" };
        terminal.write_text(0, row, &glyph.repeat(usize::from(columns)));
    }
    terminal
}

fn bordered_menu(items: &[&str]) -> Menu {
    let mut menu = Menu::new(items.iter().copied()).unwrap();
    menu.geometry_mut().add_border(EdgeSelector::All, None);
    menu
}

#[test]
fn removing_a_drawn_control_restores_its_regions() {
    let mut surface = Surface::with_backend(striped(12, 6), BackendKind::Diffed);
    let before = surface.terminal().screen_text();

    let mut label = Label::new(2, 1, "hello\nworld");
    label.geometry_mut().add_border(EdgeSelector::All, None);
    label.geometry_mut().add_padding(EdgeSelector::All, None);
    let root = surface.root();
    let id = surface.add(root, label).unwrap();
    surface.draw();
    surface.flush().unwrap();
    assert_ne!(surface.terminal().screen_text(), before);

    surface.remove(id).unwrap();
    surface.flush().unwrap();
    assert_eq!(surface.terminal().screen_text(), before);
}

#[test]
fn clear_restores_every_control() {
    let mut surface = Surface::with_backend(striped(10, 4), BackendKind::Diffed);
    let before = surface.terminal().screen_text();
    let root = surface.root();
    let group = surface.add(root, Container::new(1, 0, 0, 0)).unwrap();
    surface.add(group, Label::new(0, 0, "abc")).unwrap();
    surface.add(group, Menu::new(["x", "y"]).unwrap()).unwrap();
    surface.draw();
    surface.flush().unwrap();

    surface.clear().unwrap();
    assert_eq!(surface.terminal().screen_text(), before);
}

#[test]
fn second_draw_writes_nothing_new() {
    let mut surface = Surface::with_backend(VirtualTerminal::new(10, 4), BackendKind::Diffed);
    let root = surface.root();
    surface.add(root, Label::new(0, 0, "static")).unwrap();
    surface.draw();
    surface.flush().unwrap();
    let first = surface.terminal().screen_text();

    surface.draw();
    surface.flush().unwrap();
    assert_eq!(surface.terminal().screen_text(), first);
}

#[test]
fn menu_navigation_redraws_rows_in_place() {
    let terminal = VirtualTerminal::new(8, 5).with_keys([Key::Down, Key::Char(' '), Key::Enter]);
    let mut surface = Surface::with_backend(terminal, BackendKind::Diffed);
    let root = surface.root();
    let menu = surface
        .add(root, bordered_menu(&["ab", "cd", "ef"]).with_mode(MenuMode::MultiSelect))
        .unwrap();
    surface.draw();
    surface.flush().unwrap();
    assert_eq!(
        surface.terminal().screen_text(),
        vec!["######  ", "#> ab#  ", "#  cd#  ", "#  ef#  ", "######  "]
    );

    let outcome = read_menu(&mut surface, menu, &Keybindings::default()).unwrap();
    assert_eq!(outcome, MenuOutcome::Selected(vec![1]));
    assert_eq!(surface.terminal().row_text(1), "#  ab#  ");
    assert_eq!(surface.terminal().row_text(2), "#>*cd#  ");
}

#[test]
fn find_overlay_restores_the_row_it_covered() {
    let terminal = VirtualTerminal::new(8, 5).with_keys([
        Key::Down,
        Key::Char('/'),
        Key::Char('e'),
        Key::Enter,
        Key::Enter,
    ]);
    let mut surface = Surface::with_backend(terminal, BackendKind::Diffed);
    let root = surface.root();
    let menu = surface.add(root, bordered_menu(&["ab", "cd", "ef"])).unwrap();
    surface.draw();
    surface.flush().unwrap();

    let outcome = read_menu(&mut surface, menu, &Keybindings::default()).unwrap();
    assert_eq!(outcome, MenuOutcome::Selected(vec![2]));
    assert_eq!(
        surface.terminal().screen_text(),
        vec!["######  ", "#  ab#  ", "#  cd#  ", "#> ef#  ", "######  "]
    );
    assert_eq!(surface.roots().len(), 1);
}

#[test]
fn find_overlay_on_the_plain_backend_is_repainted_away() {
    let terminal = VirtualTerminal::dumb(8, 5).with_keys([
        Key::Char('/'),
        Key::Char('z'),
        Key::Enter,
        Key::Escape,
    ]);
    let mut surface = Surface::with_backend(terminal, BackendKind::Diffed);
    assert_eq!(surface.backend_kind(), BackendKind::Plain);
    let root = surface.root();
    let menu = surface.add(root, bordered_menu(&["ab", "cd", "ef"])).unwrap();
    surface.draw();
    surface.flush().unwrap();

    let outcome = read_menu(&mut surface, menu, &Keybindings::default()).unwrap();
    assert_eq!(outcome, MenuOutcome::Cancelled);
    assert_eq!(surface.terminal().row_text(3), "#  ef#  ");
}

#[test]
fn moving_a_drawn_control_still_restores_the_original_screen() {
    let mut surface = Surface::with_backend(striped(12, 4), BackendKind::Diffed);
    let before = surface.terminal().screen_text();

    let mut label = Label::new(2, 0, "xy");
    label.geometry_mut().add_border(EdgeSelector::All, None);
    let root = surface.root();
    let id = surface.add(root, label).unwrap();
    surface.draw();
    surface.flush().unwrap();

    assert!(surface.registry_mut().set_left(id, 3));
    surface.refresh(id);
    surface.flush().unwrap();

    surface.remove(id).unwrap();
    surface.flush().unwrap();
    assert_eq!(surface.terminal().screen_text(), before);
}

#[test]
fn terminal_shrink_clamps_and_still_restores() {
    let mut surface = Surface::with_backend(striped(10, 4), BackendKind::Diffed);
    let mut label = Label::new(2, 0, "abcd");
    label.geometry_mut().add_border(EdgeSelector::All, None);
    let root = surface.root();
    let id = surface.add(root, label).unwrap();
    surface.draw();
    surface.flush().unwrap();

    surface.terminal_mut().set_size(6, 4);
    surface.draw();
    surface.flush().unwrap();
    assert_eq!(surface.registry().geometry(id).unwrap().right(), 6);
    assert_eq!(surface.terminal().row_text(1), "--#ab#");

    surface.remove(id).unwrap();
    surface.flush().unwrap();
    assert_eq!(surface.terminal().screen_text(), striped(6, 4).screen_text());
}
