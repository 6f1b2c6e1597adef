//! Single-line editable text field.

use unicode_segmentation::UnicodeSegmentation;

use crate::core::control::{compose_regions, compose_text, Control, ContentRow, Region};
use crate::core::geometry::Geometry;
use crate::core::key::Key;
use crate::core::keybindings::{Action, Keybindings};
use crate::core::style::{Alignment, Decoration};
use crate::core::text::{display_width, fit_line, sanitize, truncate_to_width};

/// Result of feeding one key to a [`TextInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputStep {
    /// Key consumed; `true` when the visible text or cursor moved.
    Continue(bool),
    Submit(String),
    Abort,
}

#[derive(Debug, Clone)]
pub struct TextInput {
    geometry: Geometry,
    decoration: Decoration,
    prompt: String,
    value: String,
    /// Byte offset into `value`, always on a grapheme boundary.
    cursor: usize,
}

impl TextInput {
    /// A one-row input field.
    pub fn new(x: i32, y: i32, width: i32) -> Self {
        Self {
            geometry: Geometry::new(x, y, width, 1),
            decoration: Decoration::default(),
            prompt: String::new(),
            value: String::new(),
            cursor: 0,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = sanitize(&prompt.into());
        self
    }

    pub fn with_decoration(mut self, decoration: Decoration) -> Self {
        self.decoration = decoration;
        self
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = sanitize(&value.into());
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Erases the grapheme left of the cursor. Returns `false` at the left boundary.
    pub fn backspace(&mut self) -> bool {
        let Some(start) = self.previous_boundary() else {
            return false;
        };
        self.value.replace_range(start..self.cursor, "");
        self.cursor = start;
        true
    }

    pub fn delete_forward(&mut self) -> bool {
        let Some(end) = self.next_boundary() else {
            return false;
        };
        self.value.replace_range(self.cursor..end, "");
        true
    }

    pub fn move_left(&mut self) -> bool {
        match self.previous_boundary() {
            Some(start) => {
                self.cursor = start;
                true
            }
            None => false,
        }
    }

    pub fn move_right(&mut self) -> bool {
        match self.next_boundary() {
            Some(end) => {
                self.cursor = end;
                true
            }
            None => false,
        }
    }

    pub fn move_home(&mut self) -> bool {
        let moved = self.cursor != 0;
        self.cursor = 0;
        moved
    }

    pub fn move_end(&mut self) -> bool {
        let moved = self.cursor != self.value.len();
        self.cursor = self.value.len();
        moved
    }

    fn previous_boundary(&self) -> Option<usize> {
        self.value[..self.cursor]
            .grapheme_indices(true)
            .next_back()
            .map(|(offset, _)| offset)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.value[self.cursor..]
            .graphemes(true)
            .next()
            .map(|grapheme| self.cursor + grapheme.len())
    }

    /// Applies one key using the input keybindings.
    pub fn handle_key(&mut self, key: &Key, keybindings: &Keybindings) -> InputStep {
        match keybindings.action_for(key, &Action::INPUT) {
            Some(Action::InputSubmit) => InputStep::Submit(self.value.clone()),
            Some(Action::InputAbort) => InputStep::Abort,
            Some(Action::InputDeleteBackward) => InputStep::Continue(self.backspace()),
            Some(Action::InputDeleteForward) => InputStep::Continue(self.delete_forward()),
            Some(Action::InputCursorLeft) => InputStep::Continue(self.move_left()),
            Some(Action::InputCursorRight) => InputStep::Continue(self.move_right()),
            Some(Action::InputLineStart) => InputStep::Continue(self.move_home()),
            Some(Action::InputLineEnd) => InputStep::Continue(self.move_end()),
            _ => match key.text() {
                Some(ch) => {
                    self.insert_char(ch);
                    InputStep::Continue(true)
                }
                None => InputStep::Continue(false),
            },
        }
    }

    fn value_columns(&self) -> usize {
        let prompt = display_width(&self.prompt);
        (self.geometry.content_width() as usize).saturating_sub(prompt)
    }

    /// Visible slice of the value and the cursor offset inside it. The slice
    /// scrolls so the cursor always has a column of its own.
    fn visible(&self) -> (&str, usize) {
        let columns = self.value_columns();
        let mut start = 0;
        let reserve = columns.saturating_sub(1);
        while display_width(&self.value[start..self.cursor]) > reserve {
            match self.value[start..].graphemes(true).next() {
                Some(grapheme) => start += grapheme.len(),
                None => break,
            }
        }
        let (shown, _) = truncate_to_width(&self.value[start..], columns);
        let cursor = display_width(&self.value[start..self.cursor]);
        (shown, cursor)
    }

    /// Screen column of the live cursor.
    pub fn cursor_column(&self) -> i32 {
        let (_, offset) = self.visible();
        let content = self.geometry.content_rect();
        let column = content.x + (display_width(&self.prompt) + offset) as i32;
        column.min(content.right() - 1).max(content.x)
    }

    /// Screen row of the live cursor.
    pub fn cursor_row(&self) -> i32 {
        self.geometry.content_rect().y
    }

    fn line(&self) -> String {
        let (shown, _) = self.visible();
        let text = format!("{}{}", self.prompt, shown);
        fit_line(
            &text,
            self.geometry.content_width() as usize,
            Alignment::Left,
            self.decoration.fill_glyph,
        )
    }
}

impl Control for TextInput {
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
        let first = self.prompt.chars().chain(self.value.chars()).next();
        compose_text(&self.geometry, &self.decoration, &[self.line()], first)
    }

    fn render_regions(&self) -> Vec<Region> {
        let first = self.prompt.chars().chain(self.value.chars()).next();
        let row = ContentRow::new(self.line(), self.decoration.content_color);
        compose_regions(&self.geometry, &self.decoration, &[row], first)
    }
}
