//! Scrollable item list with an active item, selection, paging and regex find.
//!
//! Items are identified by their index. The display window starts at `top` and
//! covers `min(items, rows)` consecutive items, wrapping past the end of the
//! list. Every operation keeps the active item inside the window.

use std::collections::BTreeSet;

use regex::{Regex, RegexBuilder};

use crate::core::control::{
    compose_regions, compose_text, content_region, Control, ContentRow, Region,
};
use crate::core::geometry::Geometry;
use crate::core::keybindings::Action;
use crate::core::style::{Alignment, CellColor, Color, Decoration};
use crate::core::text::{display_width, fit_line, sanitize};
use crate::error::{ConfigurationError, SearchPatternError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuMode {
    /// Single shot: the first Select or Confirm ends the interaction.
    #[default]
    Default,
    /// Select toggles membership; Confirm returns the set.
    MultiSelect,
    /// Select and Confirm return every item.
    List,
}

/// How an interaction ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    /// Indices in list order, without duplicates. May be empty.
    Selected(Vec<usize>),
    Cancelled,
}

/// What the interaction loop must do after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuStep {
    Continue,
    Redraw,
    RedrawItem(usize),
    OpenFind,
    Finish(MenuOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuColors {
    pub plain: CellColor,
    pub active: CellColor,
    pub selected: CellColor,
    pub active_selected: CellColor,
}

impl Default for MenuColors {
    fn default() -> Self {
        Self {
            plain: CellColor::default(),
            active: CellColor::new(Color::Black, Color::Gray),
            selected: CellColor::new(Color::Green, Color::Default),
            active_selected: CellColor::new(Color::Black, Color::Green),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuGlyphs {
    pub active: char,
    pub selected: char,
}

impl Default for MenuGlyphs {
    fn default() -> Self {
        Self {
            active: '>',
            selected: '*',
        }
    }
}

/// Columns taken by the active and selection markers in front of each item.
pub const GUTTER_WIDTH: usize = 2;

#[derive(Debug, Clone)]
pub struct Menu {
    geometry: Geometry,
    decoration: Decoration,
    items: Vec<String>,
    selection: BTreeSet<usize>,
    active: usize,
    top: usize,
    mode: MenuMode,
    alignment: Alignment,
    colors: MenuColors,
    glyphs: MenuGlyphs,
    pattern: Option<Regex>,
}

impl Menu {
    /// Builds a menu sized to fit every item. Rejects an empty list.
    pub fn new<I, S>(items: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let items: Vec<String> = items
            .into_iter()
            .map(|item| sanitize(item.as_ref()))
            .collect();
        if items.is_empty() {
            return Err(ConfigurationError::EmptyItems);
        }
        let width = items.iter().map(|item| display_width(item)).max().unwrap_or(0) + GUTTER_WIDTH;
        let height = items.len();
        Ok(Self {
            geometry: Geometry::new(0, 0, width as i32, height as i32),
            decoration: Decoration::default(),
            items,
            selection: BTreeSet::new(),
            active: 0,
            top: 0,
            mode: MenuMode::Default,
            alignment: Alignment::Left,
            colors: MenuColors::default(),
            glyphs: MenuGlyphs::default(),
            pattern: None,
        })
    }

    pub fn with_mode(mut self, mode: MenuMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_colors(mut self, colors: MenuColors) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_glyphs(mut self, glyphs: MenuGlyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn mode(&self) -> MenuMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: MenuMode) {
        self.mode = mode;
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn top(&self) -> usize {
        self.top
    }

    /// Index shown on the last visible row, if any row is visible.
    pub fn bottom(&self) -> Option<usize> {
        match self.shown() {
            0 => None,
            shown => Some((self.top + shown - 1) % self.items.len()),
        }
    }

    pub fn selection(&self) -> Vec<usize> {
        self.selection.iter().copied().collect()
    }

    pub fn is_selected(&self, item: usize) -> bool {
        self.selection.contains(&item)
    }

    /// Rows available for items.
    pub fn rows(&self) -> usize {
        self.geometry.content_height() as usize
    }

    fn shown(&self) -> usize {
        self.rows().min(self.items.len())
    }

    fn scrolls(&self) -> bool {
        let rows = self.rows();
        rows > 0 && self.items.len() > rows
    }

    /// Whether `item` is on screen.
    pub fn in_window(&self, item: usize) -> bool {
        let n = self.items.len();
        item < n && (item + n - self.top) % n < self.shown()
    }

    /// Moves the active item, scrolling so it stays visible.
    pub fn set_active(&mut self, item: usize) {
        self.active = item.min(self.items.len() - 1);
        if !self.in_window(self.active) {
            self.recenter(self.active);
        }
    }

    fn recenter(&mut self, item: usize) {
        if !self.scrolls() {
            self.top = 0;
            return;
        }
        let n = self.items.len();
        let middle = (self.rows() / 2) % n;
        self.top = (item + n - middle) % n;
    }

    /// Restores the window invariants after the menu was resized.
    pub fn revalidate_window(&mut self) {
        if !self.scrolls() {
            self.top = 0;
        } else if !self.in_window(self.active) {
            self.recenter(self.active);
        }
    }

    pub fn next(&mut self) {
        let n = self.items.len();
        let old_bottom = self.bottom();
        self.active = (self.active + 1) % n;
        if self.scrolls() && !self.in_window(self.active) {
            match old_bottom {
                Some(bottom) => self.top = (bottom + 1) % n,
                None => self.recenter(self.active),
            }
            if !self.in_window(self.active) {
                self.recenter(self.active);
            }
        }
    }

    pub fn previous(&mut self) {
        let n = self.items.len();
        self.active = (self.active + n - 1) % n;
        if self.scrolls() && !self.in_window(self.active) {
            let shown = self.shown();
            self.top = (self.top + n - shown % n) % n;
            if !self.in_window(self.active) {
                self.recenter(self.active);
            }
        }
    }

    fn page_step(&self) -> usize {
        (self.rows() / 2).max(1)
    }

    /// Returns `false` when the list fits on screen and paging does nothing.
    pub fn page_down(&mut self) -> bool {
        if !self.scrolls() {
            return false;
        }
        let n = self.items.len();
        self.active = (self.active + self.page_step()) % n;
        self.recenter(self.active);
        true
    }

    pub fn page_up(&mut self) -> bool {
        if !self.scrolls() {
            return false;
        }
        let n = self.items.len();
        self.active = (self.active + n - self.page_step() % n) % n;
        self.recenter(self.active);
        true
    }

    /// Compiles a case-insensitive find pattern.
    pub fn compile_pattern(pattern: &str) -> Result<Regex, SearchPatternError> {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| SearchPatternError {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Searches forward from the item after the active one. An empty pattern keeps
    /// the previous one and does nothing; an invalid pattern is a miss.
    pub fn find(&mut self, pattern: &str) -> Option<usize> {
        if pattern.is_empty() {
            return None;
        }
        match Self::compile_pattern(pattern) {
            Ok(regex) => {
                self.pattern = Some(regex);
                self.find_next()
            }
            Err(err) => {
                tracing::debug!(error = %err, "find pattern rejected");
                self.pattern = None;
                None
            }
        }
    }

    pub fn find_next(&mut self) -> Option<usize> {
        let n = self.items.len();
        let start = self.active;
        self.search((1..=n).map(|step| (start + step) % n))
    }

    pub fn find_previous(&mut self) -> Option<usize> {
        let n = self.items.len();
        let start = self.active;
        self.search((1..=n).map(|step| (start + n - step % n) % n))
    }

    fn search(&mut self, order: impl Iterator<Item = usize>) -> Option<usize> {
        let regex = self.pattern.as_ref()?;
        let mut found = None;
        for idx in order {
            if regex.is_match(&self.items[idx]) {
                found = Some(idx);
                break;
            }
        }
        let Some(idx) = found else {
            tracing::trace!(pattern = %regex.as_str(), "no match");
            return None;
        };
        self.active = idx;
        if !self.in_window(idx) {
            self.recenter(idx);
        }
        Some(idx)
    }

    pub fn last_pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(Regex::as_str)
    }

    pub fn toggle_select(&mut self) -> MenuStep {
        match self.mode {
            MenuMode::List => MenuStep::Finish(self.all()),
            MenuMode::Default => {
                self.toggle(self.active);
                MenuStep::Finish(MenuOutcome::Selected(self.selection()))
            }
            MenuMode::MultiSelect => {
                self.toggle(self.active);
                MenuStep::RedrawItem(self.active)
            }
        }
    }

    fn toggle(&mut self, item: usize) {
        if !self.selection.remove(&item) {
            self.selection.insert(item);
        }
    }

    fn all(&self) -> MenuOutcome {
        MenuOutcome::Selected((0..self.items.len()).collect())
    }

    pub fn confirm(&mut self) -> MenuOutcome {
        match self.mode {
            MenuMode::List => self.all(),
            MenuMode::Default => {
                self.selection.insert(self.active);
                MenuOutcome::Selected(self.selection())
            }
            MenuMode::MultiSelect => MenuOutcome::Selected(self.selection()),
        }
    }

    pub fn cancel(&mut self) -> MenuOutcome {
        MenuOutcome::Cancelled
    }

    /// Applies one menu action.
    pub fn handle(&mut self, action: Action) -> MenuStep {
        match action {
            Action::MenuNext => {
                self.next();
                MenuStep::Redraw
            }
            Action::MenuPrevious => {
                self.previous();
                MenuStep::Redraw
            }
            Action::MenuPageDown => {
                if self.page_down() {
                    MenuStep::Redraw
                } else {
                    MenuStep::Continue
                }
            }
            Action::MenuPageUp => {
                if self.page_up() {
                    MenuStep::Redraw
                } else {
                    MenuStep::Continue
                }
            }
            Action::MenuFind => MenuStep::OpenFind,
            Action::MenuFindNext => match self.find_next() {
                Some(_) => MenuStep::Redraw,
                None => MenuStep::Continue,
            },
            Action::MenuFindPrevious => match self.find_previous() {
                Some(_) => MenuStep::Redraw,
                None => MenuStep::Continue,
            },
            Action::MenuSelect => self.toggle_select(),
            Action::MenuConfirm => MenuStep::Finish(self.confirm()),
            Action::MenuCancel => MenuStep::Finish(self.cancel()),
            _ => MenuStep::Continue,
        }
    }

    fn item_color(&self, item: usize) -> CellColor {
        match (item == self.active, self.is_selected(item)) {
            (true, true) => self.colors.active_selected,
            (true, false) => self.colors.active,
            (false, true) => self.colors.selected,
            (false, false) => self.colors.plain,
        }
    }

    fn item_row(&self, item: usize) -> ContentRow {
        let fill = self.decoration.fill_glyph;
        let mut text = String::new();
        text.push(if item == self.active {
            self.glyphs.active
        } else {
            fill
        });
        text.push(if self.is_selected(item) {
            self.glyphs.selected
        } else {
            fill
        });
        text.push_str(&self.items[item]);
        let line = fit_line(
            &text,
            self.geometry.content_width() as usize,
            self.alignment,
            fill,
        );
        ContentRow::for_item(line, self.item_color(item), item)
    }

    fn visible_rows(&self) -> Vec<ContentRow> {
        let n = self.items.len();
        (0..self.shown())
            .map(|row| self.item_row((self.top + row) % n))
            .collect()
    }

    fn first_char(&self) -> Option<char> {
        self.items.get(self.top).and_then(|item| item.chars().next())
    }
}

impl Control for Menu {
    fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn geometry_mut(&mut self) -> &mut Geometry {
        &mut self.geometry
    }

    fn decoration(&self) -> &Decoration {
        &self.decoration
    }

    fn decoration_mut(&mut self) -> &mut Decoration {
        &mut self.decoration
    }

    fn render_text(&self) -> Vec<String> {
        let rows: Vec<String> = self.visible_rows().into_iter().map(|row| row.text).collect();
        compose_text(&self.geometry, &self.decoration, &rows, self.first_char())
    }

    fn render_regions(&self) -> Vec<Region> {
        compose_regions(
            &self.geometry,
            &self.decoration,
            &self.visible_rows(),
            self.first_char(),
        )
    }

    fn item_region(&self, item: usize) -> Option<Region> {
        if !self.in_window(item) {
            return None;
        }
        let n = self.items.len();
        let row = (item + n - self.top) % n;
        content_region(&self.geometry, &self.decoration, Some(&self.item_row(item)), row)
    }
}
