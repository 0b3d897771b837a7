// Adapters layer: concrete implementations of the domain ports.

pub mod location;
pub mod storage;

pub use location::HashLocation;
pub use storage::{FileTokenStore, MemoryTokenStore};
