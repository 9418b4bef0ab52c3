//! Page controller: the event-driven shell around [`SessionStore`](crate::SessionStore).
//!
//! The controller reacts to page loads and form submissions, calls the
//! session store and drives a [`View`], the presentation collaborator that
//! owns messages, buttons, navigation and the dashboard fields.

mod page_controller;
mod view;

pub use page_controller::{PageController, PageEvent};
pub use view::{DashboardView, Message, MessageKind, Page, SubmitState, View};
