//! Key decoding for legacy terminal input sequences.

use std::fmt;

/// Normalized key identifier used by keybindings, e.g. `"down"`, `"ctrl+f"`, `"n"`.
pub type KeyId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Function(u8),
    ShiftFunction(u8),
    Ctrl(char),
    Char(char),
    Unknown,
}

impl Key {
    pub fn id(&self) -> KeyId {
        match self {
            Key::Up => "up".to_string(),
            Key::Down => "down".to_string(),
            Key::Left => "left".to_string(),
            Key::Right => "right".to_string(),
            Key::PageUp => "pageUp".to_string(),
            Key::PageDown => "pageDown".to_string(),
            Key::Home => "home".to_string(),
            Key::End => "end".to_string(),
            Key::Enter => "enter".to_string(),
            Key::Escape => "escape".to_string(),
            Key::Backspace => "backspace".to_string(),
            Key::Delete => "delete".to_string(),
            Key::Tab => "tab".to_string(),
            Key::BackTab => "shift+tab".to_string(),
            Key::Function(n) => format!("f{n}"),
            Key::ShiftFunction(n) => format!("shift+f{n}"),
            Key::Ctrl(ch) => format!("ctrl+{ch}"),
            Key::Char(' ') => "space".to_string(),
            Key::Char(ch) => ch.to_string(),
            Key::Unknown => "unknown".to_string(),
        }
    }

    /// The text a key types into an input field, if any.
    pub fn text(&self) -> Option<char> {
        match self {
            Key::Char(ch) => Some(*ch),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

const LEGACY_SEQUENCES: &[(&str, Key)] = &[
    ("\x1b[A", Key::Up),
    ("\x1b[B", Key::Down),
    ("\x1b[C", Key::Right),
    ("\x1b[D", Key::Left),
    ("\x1bOA", Key::Up),
    ("\x1bOB", Key::Down),
    ("\x1bOC", Key::Right),
    ("\x1bOD", Key::Left),
    ("\x1b[H", Key::Home),
    ("\x1b[F", Key::End),
    ("\x1bOH", Key::Home),
    ("\x1bOF", Key::End),
    ("\x1b[1~", Key::Home),
    ("\x1b[4~", Key::End),
    ("\x1b[7~", Key::Home),
    ("\x1b[8~", Key::End),
    ("\x1b[3~", Key::Delete),
    ("\x1b[5~", Key::PageUp),
    ("\x1b[6~", Key::PageDown),
    ("\x1b[Z", Key::BackTab),
    ("\x1bOP", Key::Function(1)),
    ("\x1bOQ", Key::Function(2)),
    ("\x1bOR", Key::Function(3)),
    ("\x1bOS", Key::Function(4)),
    ("\x1b[11~", Key::Function(1)),
    ("\x1b[12~", Key::Function(2)),
    ("\x1b[13~", Key::Function(3)),
    ("\x1b[14~", Key::Function(4)),
    ("\x1b[1;2P", Key::ShiftFunction(1)),
    ("\x1b[1;2Q", Key::ShiftFunction(2)),
    ("\x1b[1;2R", Key::ShiftFunction(3)),
    ("\x1b[1;2S", Key::ShiftFunction(4)),
    ("\x1b[13;2~", Key::ShiftFunction(3)),
];

/// Decodes one complete input sequence.
pub fn parse_key(data: &str) -> Option<Key> {
    if data.is_empty() {
        return None;
    }
    if let Some((_, key)) = LEGACY_SEQUENCES.iter().find(|(seq, _)| *seq == data) {
        return Some(*key);
    }

    let mut chars = data.chars();
    let first = chars.next()?;
    if chars.next().is_some() {
        return if first == '\x1b' {
            Some(Key::Unknown)
        } else {
            None
        };
    }

    let key = match first {
        '\x1b' => Key::Escape,
        '\r' | '\n' => Key::Enter,
        '\t' => Key::Tab,
        '\x7f' | '\x08' => Key::Backspace,
        '\x00' => Key::Ctrl(' '),
        ch @ '\x01'..='\x1a' => Key::Ctrl((b'a' + (ch as u8 - 1)) as char),
        ch if ch.is_control() => Key::Unknown,
        ch => Key::Char(ch),
    };
    Some(key)
}

#[derive(Debug, PartialEq, Eq)]
enum SequenceStatus {
    Complete(usize),
    Incomplete,
}

/// Splits buffered terminal input into complete key sequences.
///
/// Escape sequences may arrive split across reads; an incomplete tail stays
/// buffered until more bytes arrive or the caller forces it out with `flush`.
#[derive(Debug, Default)]
pub struct KeySequenceSplitter {
    buffer: String,
}

impl KeySequenceSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, data: &str) {
        self.buffer.push_str(data);
    }

    pub fn has_pending(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Next complete sequence, if one is buffered.
    pub fn next_sequence(&mut self) -> Option<String> {
        match sequence_length(&self.buffer) {
            Some(SequenceStatus::Complete(len)) => Some(self.buffer.drain(..len).collect()),
            Some(SequenceStatus::Incomplete) | None => None,
        }
    }

    /// Releases whatever is buffered as a sequence (a lone escape, usually).
    pub fn flush(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        if let Some(sequence) = self.next_sequence() {
            return Some(sequence);
        }
        Some(std::mem::take(&mut self.buffer))
    }
}

fn sequence_length(buffer: &str) -> Option<SequenceStatus> {
    let mut chars = buffer.char_indices();
    let (_, first) = chars.next()?;
    if first != '\x1b' {
        return Some(SequenceStatus::Complete(first.len_utf8()));
    }
    let Some((_, second)) = chars.next() else {
        return Some(SequenceStatus::Incomplete);
    };
    match second {
        '[' => {
            for (idx, ch) in chars {
                if ('\x40'..='\x7e').contains(&ch) {
                    return Some(SequenceStatus::Complete(idx + ch.len_utf8()));
                }
            }
            Some(SequenceStatus::Incomplete)
        }
        'O' => match chars.next() {
            Some((idx, ch)) => Some(SequenceStatus::Complete(idx + ch.len_utf8())),
            None => Some(SequenceStatus::Incomplete),
        },
        // Escape followed by anything else is a lone escape press.
        _ => Some(SequenceStatus::Complete(1)),
    }
}
