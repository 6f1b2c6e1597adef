//! Terminal adapters.

#[cfg(unix)]
pub mod process_terminal;
pub mod shadow_terminal;
pub mod virtual_terminal;

#[cfg(unix)]
pub use process_terminal::{install_signal_handlers, ProcessTerminal, SignalHookGuard};
pub use shadow_terminal::ShadowTerminal;
pub use virtual_terminal::VirtualTerminal;
