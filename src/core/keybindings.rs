//! Menu and text-input keybindings.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::core::key::{Key, KeyId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MenuNext,
    MenuPrevious,
    MenuPageUp,
    MenuPageDown,
    MenuFind,
    MenuFindNext,
    MenuFindPrevious,
    MenuSelect,
    MenuConfirm,
    MenuCancel,
    InputSubmit,
    InputAbort,
    InputDeleteBackward,
    InputDeleteForward,
    InputCursorLeft,
    InputCursorRight,
    InputLineStart,
    InputLineEnd,
}

impl Action {
    pub const MENU: [Action; 10] = [
        Action::MenuNext,
        Action::MenuPrevious,
        Action::MenuPageUp,
        Action::MenuPageDown,
        Action::MenuFind,
        Action::MenuFindNext,
        Action::MenuFindPrevious,
        Action::MenuSelect,
        Action::MenuConfirm,
        Action::MenuCancel,
    ];

    pub const INPUT: [Action; 8] = [
        Action::InputSubmit,
        Action::InputAbort,
        Action::InputDeleteBackward,
        Action::InputDeleteForward,
        Action::InputCursorLeft,
        Action::InputCursorRight,
        Action::InputLineStart,
        Action::InputLineEnd,
    ];
}

#[derive(Debug, Clone)]
pub enum KeyBinding {
    Single(KeyId),
    Multiple(Vec<KeyId>),
}

impl From<&str> for KeyBinding {
    fn from(value: &str) -> Self {
        KeyBinding::Single(value.to_string())
    }
}

impl From<String> for KeyBinding {
    fn from(value: String) -> Self {
        KeyBinding::Single(value)
    }
}

impl From<Vec<&str>> for KeyBinding {
    fn from(value: Vec<&str>) -> Self {
        KeyBinding::Multiple(value.into_iter().map(|item| item.to_string()).collect())
    }
}

impl From<Vec<String>> for KeyBinding {
    fn from(value: Vec<String>) -> Self {
        KeyBinding::Multiple(value)
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeybindingsConfig {
    entries: HashMap<Action, KeyBinding>,
}

impl KeybindingsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<K: Into<KeyBinding>>(&mut self, action: Action, keys: K) {
        self.entries.insert(action, keys.into());
    }
}

pub static DEFAULT_KEYBINDINGS: LazyLock<HashMap<Action, Vec<KeyId>>> = LazyLock::new(|| {
    use Action::*;

    let keys = |ids: &[&str]| ids.iter().map(|id| id.to_string()).collect::<Vec<_>>();
    let mut map = HashMap::new();
    map.insert(MenuNext, keys(&["down", "ctrl+n"]));
    map.insert(MenuPrevious, keys(&["up", "ctrl+p"]));
    map.insert(MenuPageUp, keys(&["pageUp"]));
    map.insert(MenuPageDown, keys(&["pageDown"]));
    map.insert(MenuFind, keys(&["/", "ctrl+f"]));
    map.insert(MenuFindNext, keys(&["n", "f3"]));
    map.insert(MenuFindPrevious, keys(&["N", "shift+f3"]));
    map.insert(MenuSelect, keys(&["space"]));
    map.insert(MenuConfirm, keys(&["enter"]));
    map.insert(MenuCancel, keys(&["escape", "ctrl+c"]));
    map.insert(InputSubmit, keys(&["enter"]));
    map.insert(InputAbort, keys(&["escape", "ctrl+c"]));
    map.insert(InputDeleteBackward, keys(&["backspace"]));
    map.insert(InputDeleteForward, keys(&["delete", "ctrl+d"]));
    map.insert(InputCursorLeft, keys(&["left", "ctrl+b"]));
    map.insert(InputCursorRight, keys(&["right"]));
    map.insert(InputLineStart, keys(&["home", "ctrl+a"]));
    map.insert(InputLineEnd, keys(&["end", "ctrl+e"]));
    map
});

#[derive(Debug, Clone)]
pub struct Keybindings {
    action_to_keys: HashMap<Action, Vec<KeyId>>,
}

impl Default for Keybindings {
    fn default() -> Self {
        Self::new(KeybindingsConfig::default())
    }
}

impl Keybindings {
    pub fn new(config: KeybindingsConfig) -> Self {
        let mut action_to_keys: HashMap<Action, Vec<KeyId>> = DEFAULT_KEYBINDINGS.clone();
        for (action, binding) in config.entries {
            let key_list = match binding {
                KeyBinding::Single(key) => vec![key],
                KeyBinding::Multiple(keys) => keys,
            };
            action_to_keys.insert(action, key_list);
        }
        Self { action_to_keys }
    }

    pub fn matches(&self, key: &Key, action: Action) -> bool {
        let Some(keys) = self.action_to_keys.get(&action) else {
            return false;
        };
        let id = key.id();
        keys.iter().any(|candidate| *candidate == id)
    }

    /// First action among `candidates` bound to `key`.
    pub fn action_for(&self, key: &Key, candidates: &[Action]) -> Option<Action> {
        candidates
            .iter()
            .copied()
            .find(|action| self.matches(key, *action))
    }

    pub fn get_keys(&self, action: Action) -> Vec<KeyId> {
        self.action_to_keys.get(&action).cloned().unwrap_or_default()
    }
}
