//! Backend contract shared by the plain and diffed renderers.

use std::io;

use crate::core::control::ControlId;
use crate::core::terminal::{Terminal, TerminalSize};
use crate::runtime::control_registry::ControlRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Whole-screen character grid, flushed as one write.
    Plain,
    /// Per-region snapshots with dirty tracking; needs cell access.
    Diffed,
}

impl BackendKind {
    /// Diffed unless plain output is forced.
    pub fn preferred(force_plain: bool) -> Self {
        if force_plain {
            BackendKind::Plain
        } else {
            BackendKind::Diffed
        }
    }
}

/// Turns the control tree into terminal output.
///
/// `roots` are drawn in order, each depth first, so later roots end up on top.
pub trait Backend {
    fn kind(&self) -> BackendKind;

    fn resize(&mut self, size: TerminalSize);

    /// Puts every control that is not on screen yet into the pending output.
    fn draw(&mut self, registry: &ControlRegistry, roots: &[ControlId], terminal: &mut dyn Terminal);

    /// Recomposes `id` and its descendants.
    fn refresh(
        &mut self,
        registry: &ControlRegistry,
        roots: &[ControlId],
        id: ControlId,
        terminal: &mut dyn Terminal,
    );

    /// Recomposes the one row of `id` showing `item`. Returns `false` when no
    /// such row is on screen.
    fn update_item(
        &mut self,
        registry: &ControlRegistry,
        roots: &[ControlId],
        id: ControlId,
        item: usize,
        terminal: &mut dyn Terminal,
    ) -> bool;

    /// Writes pending output.
    fn flush(&mut self, terminal: &mut dyn Terminal) -> io::Result<()>;

    /// Takes `id` and its descendants off screen. Called before they leave the
    /// registry.
    fn forget(
        &mut self,
        registry: &ControlRegistry,
        id: ControlId,
        terminal: &mut dyn Terminal,
    ) -> io::Result<()>;

    /// Takes everything off screen.
    fn clear(&mut self, terminal: &mut dyn Terminal) -> io::Result<()>;
}
