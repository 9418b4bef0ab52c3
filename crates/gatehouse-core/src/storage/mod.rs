//! Key-value persistence abstraction.
//!
//! The session's durable slot is a single entry in a [`KeyValueStore`].

mod key_value;
mod memory;

pub use key_value::KeyValueStore;
pub use memory::InMemoryKeyValueStore;

/// Default key of the durable session slot.
pub const SESSION_SLOT_KEY: &str = "currentUser";
