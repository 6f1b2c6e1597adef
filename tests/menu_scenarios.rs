use clui::{
    select, CluiError, ConfigurationError, Key, MenuMode, MenuOptions, Selection, VirtualTerminal,
};

fn keys(terminal: VirtualTerminal, keys: &[Key]) -> VirtualTerminal {
    terminal.with_keys(keys.iter().copied())
}

fn typed(text: &str) -> Vec<Key> {
    text.chars().map(Key::Char).collect()
}

fn display(item: &&str) -> String {
    item.to_string()
}

#[test]
fn down_twice_then_confirm_returns_the_third_item() {
    let mut terminal = keys(VirtualTerminal::new(20, 10), &[Key::Down, Key::Down, Key::Enter]);
    let options = MenuOptions {
        height: Some(5),
        ..MenuOptions::default()
    };
    let items = ["1", "2", "3", "4", "5"];

    let picked = select(&mut terminal, items, display, &options).unwrap();
    assert_eq!(picked, Selection::Items(vec!["3"]));
    assert!(!terminal.is_started());
}

#[test]
fn find_moves_to_the_first_match_after_the_active_item() {
    let mut script = vec![Key::Char('/')];
    script.extend(typed("ra"));
    script.extend([Key::Enter, Key::Char('n'), Key::Enter]);
    let mut terminal = keys(VirtualTerminal::new(20, 10), &script);

    let picked = select(
        &mut terminal,
        ["Alpha", "Bravo", "Charlie"],
        display,
        &MenuOptions::default(),
    )
    .unwrap();
    assert_eq!(picked, Selection::Items(vec!["Bravo"]));
}

#[test]
fn invalid_find_pattern_is_a_silent_miss() {
    let mut script = vec![Key::Char('/')];
    script.extend(typed("(un"));
    script.extend([Key::Enter, Key::Enter]);
    let mut terminal = keys(VirtualTerminal::new(20, 10), &script);

    let picked = select(&mut terminal, ["a(un", "b"], display, &MenuOptions::default()).unwrap();
    assert_eq!(picked, Selection::Items(vec!["a(un"]));
}

#[test]
fn aborted_find_leaves_the_active_item_alone() {
    let mut script = vec![Key::Down, Key::Char('/')];
    script.extend(typed("a"));
    script.extend([Key::Escape, Key::Enter]);
    let mut terminal = keys(VirtualTerminal::new(20, 10), &script);

    let picked = select(&mut terminal, ["a", "b"], display, &MenuOptions::default()).unwrap();
    assert_eq!(picked, Selection::Items(vec!["b"]));
}

#[test]
fn multiselect_toggles_and_returns_list_order() {
    let script = [
        Key::Char(' '),
        Key::Down,
        Key::Down,
        Key::Char(' '),
        Key::Up,
        Key::Char(' '),
        Key::Up,
        Key::Char(' '),
        Key::Enter,
    ];
    let mut terminal = keys(VirtualTerminal::new(20, 10), &script);
    let options = MenuOptions {
        mode: MenuMode::MultiSelect,
        ..MenuOptions::default()
    };

    let picked = select(&mut terminal, ["a", "b", "c"], display, &options).unwrap();
    assert_eq!(picked, Selection::Items(vec!["b", "c"]));
}

#[test]
fn list_mode_returns_every_item() {
    let mut terminal = keys(VirtualTerminal::new(20, 10), &[Key::Down, Key::Char(' ')]);
    let options = MenuOptions {
        mode: MenuMode::List,
        ..MenuOptions::default()
    };
    let picked = select(&mut terminal, ["a", "b"], display, &options).unwrap();
    assert_eq!(picked, Selection::Items(vec!["a", "b"]));
}

#[test]
fn cancel_is_distinct_from_an_empty_confirmation() {
    let mut cancelled = keys(VirtualTerminal::new(20, 10), &[Key::Escape]);
    let options = MenuOptions {
        mode: MenuMode::MultiSelect,
        ..MenuOptions::default()
    };
    assert_eq!(
        select(&mut cancelled, ["a"], display, &options).unwrap(),
        Selection::Cancelled
    );

    let mut confirmed = keys(VirtualTerminal::new(20, 10), &[Key::Enter]);
    assert_eq!(
        select(&mut confirmed, ["a"], display, &options).unwrap(),
        Selection::Items(Vec::new())
    );
}

#[test]
fn empty_item_list_is_rejected_before_the_terminal_starts() {
    let mut terminal = VirtualTerminal::new(20, 10);
    let items: [&str; 0] = [];
    let err = select(&mut terminal, items, display, &MenuOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        CluiError::Configuration(ConfigurationError::EmptyItems)
    ));
    assert!(terminal.writes().is_empty());
}

#[test]
fn position_outside_the_terminal_is_rejected() {
    let mut terminal = VirtualTerminal::new(20, 10);
    let options = MenuOptions {
        y: 10,
        ..MenuOptions::default()
    };
    let err = select(&mut terminal, ["a"], display, &options).unwrap_err();
    assert!(matches!(
        err,
        CluiError::Configuration(ConfigurationError::InvalidPosition { y: 10, .. })
    ));
}

#[test]
fn running_out_of_keys_surfaces_as_io_error_and_stops_the_terminal() {
    let mut terminal = keys(VirtualTerminal::new(20, 10), &[Key::Down]);
    let err = select(&mut terminal, ["a", "b"], display, &MenuOptions::default()).unwrap_err();
    assert!(matches!(err, CluiError::Io(_)));
    assert!(!terminal.is_started());
}

#[test]
fn session_restores_the_screen_it_drew_over() {
    let mut terminal = VirtualTerminal::new(16, 6);
    for row in 0..6 {
        terminal.write_text(0, row, "................");
    }
    let before = terminal.screen_text();
    let mut terminal = keys(terminal, &[Key::Down, Key::Char(' '), Key::Enter]);
    let options = MenuOptions {
        title: Some("Listing".to_string()),
        mode: MenuMode::MultiSelect,
        x: 2,
        y: 1,
        ..MenuOptions::default()
    };

    let picked = select(&mut terminal, ["one", "two", "three"], display, &options).unwrap();
    assert_eq!(picked, Selection::Items(vec!["two"]));
    assert_eq!(terminal.screen_text(), before);
    assert!(terminal.is_cursor_visible());
}

#[test]
fn dumb_terminal_runs_on_the_plain_backend() {
    let mut script = vec![Key::Char('/')];
    script.extend(typed("c"));
    script.extend([Key::Enter, Key::Enter]);
    let mut terminal = keys(VirtualTerminal::dumb(20, 8), &script);

    let picked = select(&mut terminal, ["a", "b", "c"], display, &MenuOptions::default()).unwrap();
    assert_eq!(picked, Selection::Items(vec!["c"]));
    assert!(terminal.screen_text().iter().all(|row| row.trim().is_empty()));
}
