//! Control tree ownership, surfaces and interaction loops.

pub mod control_registry;
pub mod menu_loop;
pub mod session;
pub mod surface;

pub use control_registry::ControlRegistry;
pub use menu_loop::{read_menu, read_text_input};
pub use session::{select, MenuOptions, Selection};
pub use surface::Surface;
