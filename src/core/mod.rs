//! Core types: geometry, cells, keys and the control and terminal contracts.

pub mod cell;
pub mod control;
pub mod geometry;
pub mod key;
pub mod keybindings;
pub mod style;
pub mod terminal;
pub mod text;
