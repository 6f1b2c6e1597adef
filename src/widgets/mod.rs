//! Built-in controls.

pub mod container;
pub mod label;
pub mod menu;
pub mod text_input;

pub use container::{Container, LayoutPolicy};
pub use label::Label;
pub use menu::{Menu, MenuColors, MenuGlyphs, MenuMode, MenuOutcome, MenuStep};
pub use text_input::{InputStep, TextInput};

use crate::core::control::Control;

/// Every control kind the registry can own.
#[derive(Debug, Clone)]
pub enum Widget {
    Label(Label),
    TextInput(TextInput),
    Menu(Menu),
    Container(Container),
}

impl Widget {
    pub fn as_control(&self) -> &dyn Control {
        match self {
            Widget::Label(label) => label,
            Widget::TextInput(input) => input,
            Widget::Menu(menu) => menu,
            Widget::Container(container) => container,
        }
    }

    pub fn as_control_mut(&mut self) -> &mut dyn Control {
        match self {
            Widget::Label(label) => label,
            Widget::TextInput(input) => input,
            Widget::Menu(menu) => menu,
            Widget::Container(container) => container,
        }
    }

    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Widget::Container(container) => Some(container),
            _ => None,
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut Container> {
        match self {
            Widget::Container(container) => Some(container),
            _ => None,
        }
    }

    pub fn as_menu(&self) -> Option<&Menu> {
        match self {
            Widget::Menu(menu) => Some(menu),
            _ => None,
        }
    }

    pub fn as_menu_mut(&mut self) -> Option<&mut Menu> {
        match self {
            Widget::Menu(menu) => Some(menu),
            _ => None,
        }
    }

    pub fn as_label_mut(&mut self) -> Option<&mut Label> {
        match self {
            Widget::Label(label) => Some(label),
            _ => None,
        }
    }

    pub fn as_text_input(&self) -> Option<&TextInput> {
        match self {
            Widget::TextInput(input) => Some(input),
            _ => None,
        }
    }

    pub fn as_text_input_mut(&mut self) -> Option<&mut TextInput> {
        match self {
            Widget::TextInput(input) => Some(input),
            _ => None,
        }
    }
}

impl From<Label> for Widget {
    fn from(value: Label) -> Self {
        Widget::Label(value)
    }
}

impl From<TextInput> for Widget {
    fn from(value: TextInput) -> Self {
        Widget::TextInput(value)
    }
}

impl From<Menu> for Widget {
    fn from(value: Menu) -> Self {
        Widget::Menu(value)
    }
}

impl From<Container> for Widget {
    fn from(value: Container) -> Self {
        Widget::Container(value)
    }
}
