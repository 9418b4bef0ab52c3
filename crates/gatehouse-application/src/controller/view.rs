use std::fmt;
use std::time::Duration;

/// The pages of the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// Entry page; logout lands here.
    Index,
    Login,
    /// The protected page.
    Dashboard,
}

impl Page {
    pub fn is_protected(self) -> bool {
        matches!(self, Page::Dashboard)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Page::Index => "index",
            Page::Login => "login",
            Page::Dashboard => "dashboard",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// A status message for the user.
///
/// `auto_hide` tells the view how long to keep it visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub kind: MessageKind,
    pub auto_hide: Duration,
}

/// State of the login form's submit control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitState {
    /// Enabled with its normal label.
    Idle,
    /// Disabled, showing `label` while a login is pending.
    Busy { label: String },
}

/// Fields rendered on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    /// Shown in the page header.
    pub header_email: String,
    /// Shown in the dashboard body.
    pub email: String,
    /// Last login in local time.
    pub last_login: String,
}

/// Presentation collaborator driven by [`PageController`](super::PageController).
///
/// Methods are fire-and-forget UI updates; implementations use interior
/// mutability as needed.
pub trait View: Send + Sync {
    fn show_message(&self, message: Message);

    fn set_submit_state(&self, state: SubmitState);

    fn navigate(&self, page: Page);

    fn render_dashboard(&self, dashboard: DashboardView);

    fn set_signup_modal(&self, open: bool);
}
