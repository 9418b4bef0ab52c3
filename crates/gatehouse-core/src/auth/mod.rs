//! Authentication domain module.
//!
//! # Module Structure
//!
//! - `error`: the error returned by a failed login
//! - `authenticator`: credential check abstraction and the simulated backend

mod authenticator;
mod error;

pub use authenticator::{Authenticator, CredentialPolicy, SimulatedAuthenticator};
pub use error::AuthError;
