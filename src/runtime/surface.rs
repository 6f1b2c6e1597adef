//! Surface: the control tree bound to one terminal and one render backend.
//!
//! Roots are drawn in the order they were added, so overlays added after the
//! default root land on top of it. The terminal size is re-read once per
//! [`Surface::draw`]; a change resizes the default root and the backend.

use std::io;

use crate::config::EnvConfig;
use crate::core::control::ControlId;
use crate::core::terminal::{Terminal, TerminalSize};
use crate::render::backend::{Backend, BackendKind};
use crate::render::diffed::DiffedBackend;
use crate::render::plain::PlainBackend;
use crate::runtime::control_registry::ControlRegistry;
use crate::widgets::{Container, LayoutPolicy, Widget};

pub struct Surface<T: Terminal> {
    terminal: T,
    registry: ControlRegistry,
    roots: Vec<ControlId>,
    root: ControlId,
    backend: Box<dyn Backend>,
    size: TerminalSize,
}

impl<T: Terminal> Surface<T> {
    /// Picks the diffed backend unless `CLUI_PLAIN=1` is set or the terminal
    /// has no cell access.
    pub fn new(terminal: T) -> Self {
        let kind = BackendKind::preferred(EnvConfig::from_env().plain_backend);
        Self::with_backend(terminal, kind)
    }

    pub fn with_backend(mut terminal: T, requested: BackendKind) -> Self {
        let kind = match requested {
            BackendKind::Diffed if terminal.as_cell_access().is_none() => {
                tracing::debug!("terminal has no cell access; using the plain backend");
                BackendKind::Plain
            }
            kind => kind,
        };
        let size = terminal.size();
        let backend: Box<dyn Backend> = match kind {
            BackendKind::Plain => Box::new(PlainBackend::new(size)),
            BackendKind::Diffed => Box::new(DiffedBackend::new(size)),
        };
        tracing::debug!(?kind, columns = size.columns, rows = size.rows, "surface created");

        let mut registry = ControlRegistry::new();
        let rect = size.rect();
        let root = registry.insert(
            Container::new(rect.x, rect.y, rect.width, rect.height).with_layout(LayoutPolicy::manual()),
        );
        Self {
            terminal,
            registry,
            roots: vec![root],
            root,
            backend,
            size,
        }
    }

    /// The default root container covering the terminal.
    pub fn root(&self) -> ControlId {
        self.root
    }

    pub fn roots(&self) -> &[ControlId] {
        &self.roots
    }

    pub fn size(&self) -> TerminalSize {
        self.size
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    pub fn registry(&self) -> &ControlRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ControlRegistry {
        &mut self.registry
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }

    pub fn into_terminal(self) -> T {
        self.terminal
    }

    /// Stores a detached control without showing it.
    pub fn insert(&mut self, widget: impl Into<Widget>) -> ControlId {
        self.registry.insert(widget)
    }

    /// Stores `widget` and attaches it to the container `parent`.
    pub fn add(&mut self, parent: ControlId, widget: impl Into<Widget>) -> Option<ControlId> {
        let id = self.registry.insert(widget);
        if self.registry.add(parent, id) {
            Some(id)
        } else {
            self.registry.discard(id);
            None
        }
    }

    /// Adds a top-level control drawn after every existing root.
    pub fn add_root(&mut self, widget: impl Into<Widget>) -> ControlId {
        let id = self.registry.insert(widget);
        self.roots.push(id);
        id
    }

    /// Adds a transient root on top of everything. [`Surface::remove`] puts back
    /// what it covered.
    pub fn add_overlay(&mut self, widget: impl Into<Widget>) -> ControlId {
        let id = self.add_root(widget);
        tracing::trace!(overlay = id.raw(), "overlay added");
        id
    }

    /// Returns `true` when the terminal changed size.
    fn sync_size(&mut self) -> bool {
        let size = self.terminal.size();
        if size == self.size {
            return false;
        }
        tracing::debug!(
            columns = size.columns,
            rows = size.rows,
            "terminal resized"
        );
        self.size = size;
        self.backend.resize(size);
        let rect = size.rect();
        self.registry.set_width(self.root, rect.width);
        self.registry.set_height(self.root, rect.height);
        true
    }

    /// Puts every control not yet on screen into the pending output.
    pub fn draw(&mut self) {
        if self.sync_size() {
            // Clamping may have moved anything already on screen.
            for root in self.roots.clone() {
                self.backend
                    .refresh(&self.registry, &self.roots, root, &mut self.terminal);
            }
        }
        self.backend
            .draw(&self.registry, &self.roots, &mut self.terminal);
    }

    /// Recomposes `id` and its descendants.
    pub fn refresh(&mut self, id: ControlId) {
        self.backend
            .refresh(&self.registry, &self.roots, id, &mut self.terminal);
    }

    /// Recomposes the single row of `id` that shows `item`.
    pub fn update_item(&mut self, id: ControlId, item: usize) -> bool {
        self.backend
            .update_item(&self.registry, &self.roots, id, item, &mut self.terminal)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.backend.flush(&mut self.terminal)
    }

    /// Takes `id` and its subtree off screen and out of the registry.
    ///
    /// The default root cannot be removed.
    pub fn remove(&mut self, id: ControlId) -> io::Result<Option<Widget>> {
        if id == self.root || !self.registry.contains(id) {
            return Ok(None);
        }
        self.backend.forget(&self.registry, id, &mut self.terminal)?;
        self.roots.retain(|root| *root != id);
        let widget = self.registry.discard(id);
        // The plain grid repaints from scratch, so recompose what is left.
        self.draw();
        Ok(widget)
    }

    /// Takes everything off screen. Controls stay registered.
    pub fn clear(&mut self) -> io::Result<()> {
        self.backend.clear(&mut self.terminal)
    }
}

#[cfg(test)]
mod tests {
    use super::Surface;
    use crate::core::control::Control;
    use crate::core::geometry::EdgeSelector;
    use crate::platform::virtual_terminal::VirtualTerminal;
    use crate::render::backend::BackendKind;
    use crate::widgets::{Container, Label};

    #[test]
    fn dumb_terminal_falls_back_to_plain() {
        let surface = Surface::with_backend(VirtualTerminal::dumb(10, 2), BackendKind::Diffed);
        assert_eq!(surface.backend_kind(), BackendKind::Plain);
    }

    #[test]
    fn plain_backend_flushes_the_whole_grid() {
        let mut surface = Surface::with_backend(VirtualTerminal::new(6, 2), BackendKind::Plain);
        let root = surface.root();
        surface.add(root, Label::new(1, 0, "hi")).unwrap();
        surface.draw();
        surface.flush().unwrap();
        assert_eq!(surface.terminal().screen_text(), vec![" hi   ", "      "]);
    }

    #[test]
    fn removing_an_overlay_restores_the_cells_below() {
        let mut surface = Surface::with_backend(VirtualTerminal::new(8, 3), BackendKind::Diffed);
        let root = surface.root();
        surface.add(root, Label::new(0, 1, "under")).unwrap();
        surface.draw();
        surface.flush().unwrap();
        let before = surface.terminal().screen_text();

        let mut frame = Container::new(1, 0, 3, 3);
        frame.geometry_mut().add_border(EdgeSelector::All, None);
        let overlay = surface.add_overlay(frame);
        surface.draw();
        surface.flush().unwrap();
        assert_ne!(surface.terminal().screen_text(), before);

        surface.remove(overlay).unwrap();
        surface.flush().unwrap();
        assert_eq!(surface.terminal().screen_text(), before);
    }

    #[test]
    fn resize_is_picked_up_on_draw() {
        let mut surface = Surface::with_backend(VirtualTerminal::new(8, 3), BackendKind::Diffed);
        surface.terminal_mut().set_size(12, 5);
        surface.draw();
        assert_eq!(surface.size().columns, 12);
        let root = surface.registry().geometry(surface.root()).unwrap();
        assert_eq!((root.width(), root.height()), (12, 5));
    }

    #[test]
    fn failed_attach_leaves_nothing_behind() {
        let mut surface = Surface::with_backend(VirtualTerminal::new(8, 3), BackendKind::Diffed);
        let label = surface.insert(Label::new(0, 0, "x"));
        assert!(surface.add(label, Label::new(0, 0, "y")).is_none());
        assert_eq!(surface.registry().len(), 2);
    }
}
