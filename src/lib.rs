//! Terminal widget toolkit.
//!
//! Controls share one box model (position, size, per-edge border and padding
//! clamped against the parent container) and are composed onto a [`Surface`].
//! A surface renders through one of two backends:
//! - [`BackendKind::Plain`] recomposes a character grid and writes it in one go.
//! - [`BackendKind::Diffed`] captures the cells under every region first, rewrites
//!   only regions whose contents changed, and restores the captured cells when a
//!   control is removed.
//!
//! [`Menu`] adds keyboard navigation, paging, regex find and multi-select on top;
//! [`select`] wires a titled menu to a terminal in one call.
//!
//! # Invariants
//! - Once attached, a control's edges never lie outside its parent's interior.
//! - The active menu item is always inside the display window.
//! - Every processed key is followed by its redraw before the next key is read.

#![allow(clippy::too_many_arguments, clippy::type_complexity)]

pub mod config;
pub mod error;
pub mod logging;

pub mod core;
pub mod platform;
pub mod render;
pub mod runtime;
pub mod widgets;

/// Box model.
pub use crate::core::geometry::{Edge, EdgeSelector, Edges, Geometry, Rect};

/// Control contract and region types.
pub use crate::core::control::{Control, ControlId, Region, RegionKey};

/// Cells, colors and decorations.
pub use crate::core::cell::{Cell, CellBlock};
pub use crate::core::style::{Alignment, CellColor, Color, Decoration};

/// Keyboard input and keybindings.
pub use crate::core::key::{parse_key, Key, KeySequenceSplitter};
pub use crate::core::keybindings::{
    Action, KeyBinding, Keybindings, KeybindingsConfig, DEFAULT_KEYBINDINGS,
};

/// Terminal contracts and adapters.
pub use crate::core::terminal::{CellAccess, RestoreHandle, Terminal, TerminalGuard, TerminalSize};
#[cfg(unix)]
pub use crate::platform::{install_signal_handlers, ProcessTerminal, SignalHookGuard};
pub use crate::platform::{ShadowTerminal, VirtualTerminal};

/// Built-in controls.
pub use crate::widgets::{
    Container, InputStep, Label, LayoutPolicy, Menu, MenuColors, MenuGlyphs, MenuMode,
    MenuOutcome, MenuStep, TextInput, Widget,
};

/// Rendering and runtime.
pub use crate::render::{Backend, BackendKind};
pub use crate::runtime::{
    read_menu, read_text_input, select, ControlRegistry, MenuOptions, Selection, Surface,
};

pub use crate::config::EnvConfig;
pub use crate::error::{CapacityError, CluiError, ConfigurationError, Result, SearchPatternError};

/// Width-aware text helpers.
pub use crate::core::text::{display_width, fit_line, truncate_to_width};
