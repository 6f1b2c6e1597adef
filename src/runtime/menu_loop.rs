//! Blocking keyboard loops for menus and text inputs.
//!
//! Every key is followed by its redraw and a flush before the next read, so the
//! screen always shows the state after the last key.

use crate::core::control::{Control, ControlId};
use crate::core::geometry::Rect;
use crate::core::keybindings::{Action, Keybindings};
use crate::core::terminal::Terminal;
use crate::error::{ConfigurationError, Result};
use crate::runtime::surface::Surface;
use crate::widgets::{InputStep, MenuOutcome, MenuStep, TextInput};

const FIND_PROMPT: &str = "/";

fn unknown(id: ControlId, expected: &'static str) -> ConfigurationError {
    ConfigurationError::UnknownControl {
        id: id.raw(),
        expected,
    }
}

/// Runs `menu` until it is confirmed or cancelled.
pub fn read_menu<T: Terminal>(
    surface: &mut Surface<T>,
    menu: ControlId,
    keybindings: &Keybindings,
) -> Result<MenuOutcome> {
    if surface.registry().menu(menu).is_none() {
        return Err(unknown(menu, "menu").into());
    }
    surface.terminal_mut().set_cursor_visible(false)?;
    loop {
        let key = surface.terminal_mut().read_key()?;
        let Some(action) = keybindings.action_for(&key, &Action::MENU) else {
            tracing::trace!(key = %key, "key not bound to a menu action");
            continue;
        };
        let step = surface
            .registry_mut()
            .menu_mut(menu)
            .ok_or_else(|| unknown(menu, "menu"))?
            .handle(action);
        tracing::trace!(?action, ?step, "menu step");

        match step {
            MenuStep::Continue => {}
            MenuStep::Redraw => {
                surface.refresh(menu);
                surface.flush()?;
            }
            MenuStep::RedrawItem(item) => {
                if !surface.update_item(menu, item) {
                    surface.refresh(menu);
                }
                surface.flush()?;
            }
            MenuStep::OpenFind => {
                if let Some(pattern) = read_find_pattern(surface, menu, keybindings)? {
                    let state = surface
                        .registry_mut()
                        .menu_mut(menu)
                        .ok_or_else(|| unknown(menu, "menu"))?;
                    if state.find(&pattern).is_none() {
                        tracing::debug!(pattern = %pattern, "find: no match");
                    }
                }
                surface.refresh(menu);
                surface.flush()?;
                surface.terminal_mut().set_cursor_visible(false)?;
            }
            MenuStep::Finish(outcome) => return Ok(outcome),
        }
    }
}

/// Edits `input` until submit (`Some(value)`) or abort (`None`). The hardware
/// cursor follows the edit position.
pub fn read_text_input<T: Terminal>(
    surface: &mut Surface<T>,
    input: ControlId,
    keybindings: &Keybindings,
) -> Result<Option<String>> {
    place_cursor(surface, input)?;
    loop {
        let key = surface.terminal_mut().read_key()?;
        let step = surface
            .registry_mut()
            .text_input_mut(input)
            .ok_or_else(|| unknown(input, "text input"))?
            .handle_key(&key, keybindings);
        match step {
            InputStep::Submit(value) => return Ok(Some(value)),
            InputStep::Abort => return Ok(None),
            InputStep::Continue(true) => {
                surface.refresh(input);
                surface.flush()?;
                place_cursor(surface, input)?;
            }
            InputStep::Continue(false) => {}
        }
    }
}

fn place_cursor<T: Terminal>(surface: &mut Surface<T>, input: ControlId) -> Result<()> {
    let field = surface
        .registry()
        .text_input(input)
        .ok_or_else(|| unknown(input, "text input"))?;
    let (column, row) = (screen_coord(field.cursor_column()), screen_coord(field.cursor_row()));
    let terminal = surface.terminal_mut();
    terminal.move_cursor(column, row)?;
    terminal.set_cursor_visible(true)?;
    Ok(())
}

fn screen_coord(value: i32) -> u16 {
    u16::try_from(value.max(0)).unwrap_or(u16::MAX)
}

/// The row the find field covers: the last content row of the menu, or its
/// last row when it has no content area.
pub fn find_overlay_rect(menu: &dyn Control) -> Rect {
    let geometry = menu.geometry();
    let content = geometry.content_rect();
    if content.is_empty() {
        let rect = geometry.rect();
        return Rect::new(rect.x, (rect.bottom() - 1).max(rect.y), rect.width, 1);
    }
    Rect::new(content.x, content.bottom() - 1, content.width, 1)
}

/// Shows the find field over `menu`, reads a pattern, then removes the field
/// and restores what it covered. An empty entry counts as no entry.
fn read_find_pattern<T: Terminal>(
    surface: &mut Surface<T>,
    menu: ControlId,
    keybindings: &Keybindings,
) -> Result<Option<String>> {
    let control = surface
        .registry()
        .control(menu)
        .ok_or_else(|| unknown(menu, "menu"))?;
    let rect = find_overlay_rect(control);
    let decoration = *control.decoration();
    let field = TextInput::new(rect.x, rect.y, rect.width)
        .with_prompt(FIND_PROMPT)
        .with_decoration(decoration);

    let overlay = surface.add_overlay(field);
    surface.draw();
    surface.flush()?;
    let entered = read_text_input(surface, overlay, keybindings);
    let removed = surface.remove(overlay).and_then(|_| surface.flush());
    let entered = entered?;
    removed?;

    Ok(entered.filter(|pattern| !pattern.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::{find_overlay_rect, read_menu, read_text_input};
    use crate::core::geometry::{EdgeSelector, Rect};
    use crate::core::control::Control;
    use crate::core::key::Key;
    use crate::core::keybindings::Keybindings;
    use crate::platform::virtual_terminal::VirtualTerminal;
    use crate::render::backend::BackendKind;
    use crate::runtime::surface::Surface;
    use crate::widgets::{Menu, MenuOutcome, TextInput};

    #[test]
    fn find_field_covers_the_last_content_row() {
        let mut menu = Menu::new(["a", "b", "c"]).unwrap();
        menu.geometry_mut().add_border(EdgeSelector::All, None);
        assert_eq!(find_overlay_rect(&menu), Rect::new(1, 3, 3, 1));
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let terminal = VirtualTerminal::new(10, 4).with_keys([Key::Char('z'), Key::Down, Key::Enter]);
        let mut surface = Surface::with_backend(terminal, BackendKind::Diffed);
        let root = surface.root();
        let menu = surface.add(root, Menu::new(["a", "b"]).unwrap()).unwrap();
        surface.draw();
        surface.flush().unwrap();

        let outcome = read_menu(&mut surface, menu, &Keybindings::default()).unwrap();
        assert_eq!(outcome, MenuOutcome::Selected(vec![1]));
    }

    #[test]
    fn text_input_loop_returns_submitted_value() {
        let terminal = VirtualTerminal::new(10, 2).with_keys([
            Key::Char('a'),
            Key::Char('b'),
            Key::Backspace,
            Key::Char('c'),
            Key::Enter,
        ]);
        let mut surface = Surface::with_backend(terminal, BackendKind::Diffed);
        let input = surface.add_overlay(TextInput::new(0, 1, 6).with_prompt("/"));
        surface.draw();
        surface.flush().unwrap();

        let value = read_text_input(&mut surface, input, &Keybindings::default()).unwrap();
        assert_eq!(value.as_deref(), Some("ac"));
        assert_eq!(surface.terminal().row_text(1), "/ac       ");
        assert_eq!(surface.terminal().cursor(), (3, 1));
    }

    #[test]
    fn missing_menu_is_a_configuration_error() {
        let mut surface = Surface::with_backend(VirtualTerminal::new(4, 4), BackendKind::Plain);
        let root = surface.root();
        assert!(read_menu(&mut surface, root, &Keybindings::default()).is_err());
    }
}
