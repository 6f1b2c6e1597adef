//! Render backends.

pub mod backend;
pub mod diffed;
pub mod plain;

pub use backend::{Backend, BackendKind};
pub use diffed::DiffedBackend;
pub use plain::PlainBackend;
