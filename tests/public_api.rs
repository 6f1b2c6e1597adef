#![allow(unused_imports)]

use clui::{
    display_width, fit_line, parse_key, read_menu, read_text_input, select, truncate_to_width,
    Action, Alignment, Backend, BackendKind, CapacityError, Cell, CellAccess, CellBlock, CellColor,
    CluiError, Color, Container, Control, ControlId, ControlRegistry, ConfigurationError,
    Decoration, Edge, EdgeSelector, Edges, EnvConfig, Geometry, InputStep, Key, KeyBinding,
    KeySequenceSplitter, Keybindings, KeybindingsConfig, Label, LayoutPolicy, Menu, MenuColors,
    MenuGlyphs, MenuMode, MenuOptions, MenuOutcome, MenuStep, Rect, Region, RegionKey, Result,
    SearchPatternError, Selection, ShadowTerminal, Surface, Terminal, TerminalGuard, TerminalSize,
    TextInput, VirtualTerminal, Widget, DEFAULT_KEYBINDINGS,
};

#[cfg(unix)]
use clui::{install_signal_handlers, ProcessTerminal, SignalHookGuard};

#[test]
fn public_api_exports_compile() {}

#[test]
fn shadowed_virtual_terminal_drives_the_diffed_backend() {
    let shadow = ShadowTerminal::new(VirtualTerminal::dumb(10, 3));
    let mut surface = Surface::with_backend(shadow, BackendKind::Diffed);
    assert_eq!(surface.backend_kind(), BackendKind::Diffed);

    let root = surface.root();
    surface.add(root, Label::new(1, 1, "shadow")).unwrap();
    surface.draw();
    surface.flush().unwrap();
    assert_eq!(surface.terminal().inner().row_text(1), " shadow   ");
}
