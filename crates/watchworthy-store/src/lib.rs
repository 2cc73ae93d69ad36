//! Durable key-value storage for watchworthy state

mod io;
mod paths;
mod store;

pub use io::{atomic_write, read_if_exists};
pub use paths::Paths;
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
