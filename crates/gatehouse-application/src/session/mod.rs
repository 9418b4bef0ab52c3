//! Session application services.
//!
//! [`SessionStore`] owns the single current session: it runs login through an
//! [`Authenticator`](gatehouse_core::auth::Authenticator), persists the result
//! in the durable slot and keeps a read-through cache of it.

mod cache;
mod store;

pub use cache::SessionCache;
pub use store::SessionStore;
