//! Diffed backend: per-region snapshots with dirty tracking.
//!
//! The first time a region is seen, the cells under it are captured. Later
//! renders only mark the region dirty when its cells differ from what was last
//! written. Removing a control writes the captured cells back.

use std::collections::BTreeMap;
use std::io;

use crate::core::cell::CellBlock;
use crate::core::control::{ControlId, Region, RegionKey};
use crate::core::geometry::Rect;
use crate::core::terminal::{CellAccess, Terminal, TerminalSize};
use crate::render::backend::{Backend, BackendKind};
use crate::runtime::control_registry::ControlRegistry;

#[derive(Debug, Clone)]
struct RegionRecord {
    rect: Rect,
    snapshot: CellBlock,
    pending: CellBlock,
    written: Option<CellBlock>,
    dirty: bool,
    item: Option<usize>,
}

impl RegionRecord {
    fn capture(region: Region, cells: &dyn CellAccess) -> Self {
        Self {
            rect: region.rect,
            snapshot: cells.get_region(region.rect),
            pending: region.cells,
            written: None,
            dirty: true,
            item: region.item,
        }
    }

    fn stage(&mut self, cells: CellBlock) {
        self.pending = cells;
        self.dirty = self.written.as_ref() != Some(&self.pending);
    }

    /// Puts the captured cells back if anything was written over them.
    fn restore(&self, cells: &mut dyn CellAccess) -> io::Result<()> {
        if self.written.is_none() {
            return Ok(());
        }
        cells.set_region(self.rect.x, self.rect.y, &self.snapshot)
    }
}

type ControlRecords = BTreeMap<RegionKey, RegionRecord>;

/// Region records by control. Ids grow with creation order, so controls added
/// later are flushed later and end up on top.
#[derive(Debug, Default)]
pub struct DiffedBackend {
    size: TerminalSize,
    records: BTreeMap<ControlId, ControlRecords>,
    warned_dumb: bool,
}

impl DiffedBackend {
    pub fn new(size: TerminalSize) -> Self {
        Self {
            size,
            records: BTreeMap::new(),
            warned_dumb: false,
        }
    }

    pub fn is_materialized(&self, id: ControlId) -> bool {
        self.records.contains_key(&id)
    }

    /// Number of regions waiting for the next flush.
    pub fn dirty_count(&self) -> usize {
        self.records
            .values()
            .flat_map(BTreeMap::values)
            .filter(|record| record.dirty)
            .count()
    }

    fn cells<'t>(&mut self, terminal: &'t mut dyn Terminal) -> Option<&'t mut dyn CellAccess> {
        let cells = terminal.as_cell_access();
        if cells.is_none() && !self.warned_dumb {
            tracing::warn!("terminal has no cell access; diffed regions draw nothing");
            self.warned_dumb = true;
        }
        cells
    }

    /// Restores and drops the records of `id` whose region moved or vanished.
    fn release_moved(
        &mut self,
        id: ControlId,
        regions: &[Region],
        cells: &mut dyn CellAccess,
    ) -> io::Result<()> {
        let Some(records) = self.records.get_mut(&id) else {
            return Ok(());
        };
        let live: BTreeMap<RegionKey, Rect> =
            regions.iter().map(|region| (region.key, region.rect)).collect();
        let released: Vec<RegionKey> = records
            .iter()
            .filter(|(key, record)| live.get(*key) != Some(&record.rect))
            .map(|(key, _)| *key)
            .collect();
        for key in released {
            if let Some(record) = records.remove(&key) {
                tracing::trace!(control = id.raw(), ?key, "region moved; restoring");
                record.restore(cells)?;
            }
        }
        Ok(())
    }

    /// Stages `regions` of `id`, capturing the ones without a record.
    fn stage_regions(&mut self, id: ControlId, regions: Vec<Region>, cells: &dyn CellAccess) {
        let records = self.records.entry(id).or_default();
        for region in regions {
            match records.get_mut(&region.key) {
                Some(record) if record.rect == region.rect => {
                    record.item = region.item;
                    record.stage(region.cells);
                }
                _ => {
                    let key = region.key;
                    records.insert(key, RegionRecord::capture(region, cells));
                }
            }
        }
    }

    /// Re-enumerates the regions of `ids`. Every moved or vanished region is
    /// restored, deepest control first, before any new region is captured, so
    /// no capture can see cells this subtree wrote itself.
    fn sync_controls(&mut self, registry: &ControlRegistry, ids: &[ControlId], cells: &mut dyn CellAccess) {
        let rendered: Vec<(ControlId, Vec<Region>)> = ids
            .iter()
            .filter_map(|id| registry.control(*id).map(|control| (*id, control.render_regions())))
            .collect();
        for (id, regions) in rendered.iter().rev() {
            if let Err(err) = self.release_moved(*id, regions, cells) {
                tracing::warn!(error = %err, control = id.raw(), "region restore failed");
            }
        }
        for (id, regions) in rendered {
            self.stage_regions(id, regions, cells);
        }
    }

    fn restore_all(
        &mut self,
        ids: impl Iterator<Item = ControlId>,
        cells: &mut dyn CellAccess,
    ) -> io::Result<()> {
        let mut restored = 0usize;
        for id in ids {
            if let Some(records) = self.records.remove(&id) {
                for record in records.values() {
                    record.restore(cells)?;
                    restored += 1;
                }
            }
        }
        tracing::trace!(restored, "regions restored");
        Ok(())
    }
}

impl Backend for DiffedBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Diffed
    }

    fn resize(&mut self, size: TerminalSize) {
        self.size = size;
    }

    fn draw(&mut self, registry: &ControlRegistry, roots: &[ControlId], terminal: &mut dyn Terminal) {
        let Some(cells) = self.cells(terminal) else {
            return;
        };
        let fresh: Vec<ControlId> = roots
            .iter()
            .flat_map(|root| registry.subtree(*root))
            .filter(|id| !self.is_materialized(*id))
            .collect();
        self.sync_controls(registry, &fresh, cells);
    }

    fn refresh(
        &mut self,
        registry: &ControlRegistry,
        _roots: &[ControlId],
        id: ControlId,
        terminal: &mut dyn Terminal,
    ) {
        if let Some(cells) = self.cells(terminal) {
            self.sync_controls(registry, &registry.subtree(id), cells);
        }
    }

    fn update_item(
        &mut self,
        registry: &ControlRegistry,
        _roots: &[ControlId],
        id: ControlId,
        item: usize,
        _terminal: &mut dyn Terminal,
    ) -> bool {
        let Some(region) = registry.control(id).and_then(|control| control.item_region(item)) else {
            return false;
        };
        let Some(record) = self
            .records
            .get_mut(&id)
            .and_then(|records| records.get_mut(&region.key))
        else {
            return false;
        };
        if record.item != Some(item) || record.rect != region.rect {
            return false;
        }
        record.stage(region.cells);
        true
    }

    fn flush(&mut self, terminal: &mut dyn Terminal) -> io::Result<()> {
        let Some(cells) = self.cells(terminal) else {
            return Ok(());
        };
        let mut written = 0usize;
        for records in self.records.values_mut() {
            for record in records.values_mut().filter(|record| record.dirty) {
                cells.set_region(record.rect.x, record.rect.y, &record.pending)?;
                record.written = Some(record.pending.clone());
                record.dirty = false;
                written += 1;
            }
        }
        if written > 0 {
            tracing::trace!(written, "dirty regions flushed");
        }
        Ok(())
    }

    fn forget(
        &mut self,
        registry: &ControlRegistry,
        id: ControlId,
        terminal: &mut dyn Terminal,
    ) -> io::Result<()> {
        let members = registry.subtree(id);
        let Some(cells) = self.cells(terminal) else {
            for member in members {
                self.records.remove(&member);
            }
            return Ok(());
        };
        // Children were captured after their parents, so they are restored first.
        self.restore_all(members.into_iter().rev(), cells)
    }

    fn clear(&mut self, terminal: &mut dyn Terminal) -> io::Result<()> {
        let ids: Vec<ControlId> = self.records.keys().rev().copied().collect();
        let Some(cells) = self.cells(terminal) else {
            self.records.clear();
            return Ok(());
        };
        self.restore_all(ids.into_iter(), cells)
    }
}
