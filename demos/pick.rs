//! Pick lines from a menu on the real terminal.
//!
//! `cargo run --example pick -- alpha bravo charlie` shows the arguments, or a
//! built-in list without any. Space toggles, Enter confirms, `/` finds.
//! Set `CLUI_WRITE_LOG=/tmp/clui.log` to capture the redraw trace.

#[cfg(unix)]
fn main() -> clui::Result<()> {
    use clui::logging::init_logging;
    use clui::{
        select, Alignment, EnvConfig, MenuMode, MenuOptions, ProcessTerminal, Selection,
        ShadowTerminal, Terminal,
    };

    const FALLBACK_ITEMS: [&str; 12] = [
        "Alpha", "Bravo", "Charlie", "Delta", "Echo", "Foxtrot", "Golf", "Hotel", "India",
        "Juliett", "Kilo", "Lima",
    ];

    let config = EnvConfig::from_env();
    init_logging(&config)?;

    let mut items: Vec<String> = std::env::args().skip(1).collect();
    if items.is_empty() {
        items = FALLBACK_ITEMS.iter().map(|item| item.to_string()).collect();
    }

    // The shadow mirror starts blank, so the screen has to match it.
    let mut terminal = ShadowTerminal::new(ProcessTerminal::new());
    terminal.write_raw("\x1b[2J")?;

    let options = MenuOptions {
        mode: MenuMode::MultiSelect,
        title: Some("pick".to_string()),
        title_alignment: Alignment::Center,
        x: 2,
        y: 1,
        height: Some(8),
        ..MenuOptions::default()
    };
    match select(terminal, items, |item| item.clone(), &options)? {
        Selection::Items(picked) => {
            for item in picked {
                println!("{item}");
            }
        }
        Selection::Cancelled => std::process::exit(1),
    }
    Ok(())
}

#[cfg(not(unix))]
fn main() {
    eprintln!("pick needs a unix terminal");
}
