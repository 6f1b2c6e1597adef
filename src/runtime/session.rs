//! One-call host entry point: show a titled menu, return the chosen items.

use crate::core::control::{Control, ControlId};
use crate::core::geometry::{Edge, EdgeSelector};
use crate::core::keybindings::{Keybindings, KeybindingsConfig};
use crate::core::style::{Alignment, Decoration};
use crate::core::terminal::{Terminal, TerminalGuard, TerminalSize};
use crate::error::{ConfigurationError, Result};
#[cfg(unix)]
use crate::platform::process_terminal::{install_signal_handlers, SignalHookGuard};
use crate::runtime::menu_loop::read_menu;
use crate::runtime::surface::Surface;
use crate::widgets::{Container, Label, Menu, MenuColors, MenuGlyphs, MenuMode, MenuOutcome};

/// Host configuration for [`select`].
#[derive(Debug, Clone)]
pub struct MenuOptions {
    pub mode: MenuMode,
    /// Shown in a label above the menu.
    pub title: Option<String>,
    pub title_alignment: Alignment,
    /// Alignment of the item text.
    pub alignment: Alignment,
    pub colors: MenuColors,
    pub glyphs: MenuGlyphs,
    pub decoration: Decoration,
    /// Top-left corner of the layout.
    pub x: i32,
    pub y: i32,
    /// Outer menu width. Defaults to the widest item plus decoration.
    pub width: Option<i32>,
    /// Outer menu height. Defaults to every item, up to the terminal height.
    pub height: Option<i32>,
    pub no_border: bool,
    pub no_padding: bool,
    pub keybindings: KeybindingsConfig,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            mode: MenuMode::Default,
            title: None,
            title_alignment: Alignment::Center,
            alignment: Alignment::Left,
            colors: MenuColors::default(),
            glyphs: MenuGlyphs::default(),
            decoration: Decoration::default(),
            x: 0,
            y: 0,
            width: None,
            height: None,
            no_border: false,
            no_padding: false,
            keybindings: KeybindingsConfig::default(),
        }
    }
}

impl MenuOptions {
    /// Rejects non-positive size overrides and a position outside `size`.
    pub fn validate(&self, size: TerminalSize) -> std::result::Result<(), ConfigurationError> {
        if let Some(width) = self.width.filter(|width| *width <= 0) {
            return Err(ConfigurationError::InvalidWidth(width));
        }
        if let Some(height) = self.height.filter(|height| *height <= 0) {
            return Err(ConfigurationError::InvalidHeight(height));
        }
        let inside = size.rect().contains(self.x, self.y);
        if !inside {
            return Err(ConfigurationError::InvalidPosition {
                x: self.x,
                y: self.y,
                columns: size.columns,
                rows: size.rows,
            });
        }
        Ok(())
    }

    fn decorate(&self, control: &mut dyn Control, skip_bottom: bool) {
        *control.decoration_mut() = self.decoration;
        let geometry = control.geometry_mut();
        if !self.no_border {
            geometry.add_border(EdgeSelector::All, None);
            if skip_bottom {
                geometry.remove_border(Edge::Bottom, None);
            }
        }
        if !self.no_padding {
            geometry.add_padding(Edge::Left, None);
            geometry.add_padding(Edge::Right, None);
        }
    }
}

/// What the user picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    /// Chosen items in list order. Empty when confirmed with nothing selected.
    Items(Vec<T>),
    Cancelled,
}

/// Shows `items` in a menu on `terminal` and blocks until the user confirms or
/// cancels. `display` renders each item as one line.
///
/// The terminal is started for the duration of the call and stopped on every
/// exit path. Whatever the menu covered is restored before returning. A
/// terminal that offers a [`restore_handle`](Terminal::restore_handle) is also
/// restored when SIGINT, SIGTERM or SIGHUP ends the process mid-session.
pub fn select<T, I, F>(
    terminal: T,
    items: I,
    display: F,
    options: &MenuOptions,
) -> Result<Selection<I::Item>>
where
    T: Terminal,
    I: IntoIterator,
    F: Fn(&I::Item) -> String,
{
    let items: Vec<I::Item> = items.into_iter().collect();
    let menu = build_menu(items.iter().map(&display), options)?;
    options.validate(terminal.size())?;
    let keybindings = Keybindings::new(options.keybindings.clone());

    let mut guard = TerminalGuard::start(terminal)?;
    #[cfg(unix)]
    let signals = install_cleanup(guard.terminal());
    let outcome = {
        let mut surface = Surface::new(guard.terminal_mut());
        let menu = build_layout(&mut surface, menu, options)?;
        surface.draw();
        surface.flush()?;
        let outcome = read_menu(&mut surface, menu, &keybindings);
        let cleared = surface.clear();
        let shown = surface.terminal_mut().set_cursor_visible(true);
        let outcome = outcome?;
        cleared?;
        shown?;
        outcome
    };
    guard.into_inner().stop()?;
    #[cfg(unix)]
    drop(signals);

    tracing::debug!(?outcome, "menu session finished");
    Ok(match outcome {
        MenuOutcome::Cancelled => Selection::Cancelled,
        MenuOutcome::Selected(indices) => Selection::Items(take_indices(items, &indices)),
    })
}

fn build_menu<S: AsRef<str>>(
    labels: impl IntoIterator<Item = S>,
    options: &MenuOptions,
) -> std::result::Result<Menu, ConfigurationError> {
    let mut menu = Menu::new(labels)?
        .with_mode(options.mode)
        .with_colors(options.colors)
        .with_glyphs(options.glyphs)
        .with_alignment(options.alignment);
    options.decorate(&mut menu, false);
    let geometry = menu.geometry_mut();
    if let Some(width) = options.width {
        geometry.set_width(width, None);
    }
    if let Some(height) = options.height {
        geometry.set_height(height, None);
    }
    Ok(menu)
}

/// A stacking container at the requested corner holding the optional title and
/// the menu. Returns the menu id.
fn build_layout<T: Terminal>(
    surface: &mut Surface<T>,
    menu: Menu,
    options: &MenuOptions,
) -> std::result::Result<ControlId, ConfigurationError> {
    let root = surface.root();
    let frame = surface
        .add(root, Container::new(options.x, options.y, 0, 0))
        .ok_or(ConfigurationError::UnknownControl {
            id: root.raw(),
            expected: "container",
        })?;
    if let Some(title) = &options.title {
        let mut label = Label::new(0, 0, title.as_str()).with_alignment(options.title_alignment);
        options.decorate(&mut label, true);
        surface.add(frame, label);
    }
    surface
        .add(frame, menu)
        .ok_or(ConfigurationError::UnknownControl {
            id: frame.raw(),
            expected: "container",
        })
}

/// Signal handlers that put the tty back if the process dies mid-session.
/// They stay installed until the returned guard drops.
#[cfg(unix)]
fn install_cleanup<T: Terminal>(terminal: &T) -> Option<SignalHookGuard> {
    let restore = terminal.restore_handle()?;
    match install_signal_handlers(restore) {
        Ok(guard) => Some(guard),
        Err(err) => {
            tracing::warn!(error = %err, "signal cleanup not installed");
            None
        }
    }
}

fn take_indices<T>(items: Vec<T>, indices: &[usize]) -> Vec<T> {
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    indices
        .iter()
        .filter_map(|idx| slots.get_mut(*idx).and_then(Option::take))
        .collect()
}
