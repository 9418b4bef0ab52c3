//! Storage layer for atomic file operations.

mod atomic_toml;
mod file_key_value_store;

pub use atomic_toml::AtomicTomlFile;
pub use file_key_value_store::FileKeyValueStore;
