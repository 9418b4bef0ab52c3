//! Session domain module.
//!
//! - `model`: the authenticated-user record persisted in the durable slot

mod model;

pub use model::Session;
