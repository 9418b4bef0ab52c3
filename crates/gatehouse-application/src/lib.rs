pub mod controller;
pub mod session;

pub use controller::{PageController, View};
pub use session::SessionStore;
