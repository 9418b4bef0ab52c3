use std::sync::Arc;

use gatehouse_core::Session;
use gatehouse_core::auth::AuthError;
use gatehouse_core::config::UiSettings;
use gatehouse_core::error::Result;

use super::view::{DashboardView, Message, MessageKind, Page, SubmitState, View};
use crate::session::SessionStore;

const SIGNING_IN_LABEL: &str = "Signing in...";
const LOGIN_SUCCESS_TEXT: &str = "Login successful! Redirecting...";
const LOGIN_FAILED_FALLBACK: &str = "Login failed. Please try again.";
const SIGNUP_PLACEHOLDER_TEXT: &str = "Signup functionality would be implemented here!";

/// UI events the controller reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    Loaded(Page),
    LoginSubmitted { email: String, password: String },
    SignupOpened,
    SignupSubmitted,
    LogoutRequested,
}

/// Wires UI events to the session store.
///
/// The store is injected rather than reached through a global, so several
/// controllers (pages) can share one store the way browser pages share one
/// profile.
pub struct PageController<V: View> {
    store: Arc<SessionStore>,
    view: Arc<V>,
    ui: UiSettings,
}

// Manual Clone: avoid derive adding a `V: Clone` bound.
impl<V: View> Clone for PageController<V> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            view: self.view.clone(),
            ui: self.ui.clone(),
        }
    }
}

impl<V: View> PageController<V> {
    pub fn new(store: Arc<SessionStore>, view: Arc<V>, ui: UiSettings) -> Self {
        Self { store, view, ui }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn view(&self) -> &Arc<V> {
        &self.view
    }

    /// Dispatches an event to its handler.
    ///
    /// Handler errors are already shown to the user; they are logged here
    /// and not returned.
    pub async fn handle(&self, event: PageEvent) {
        match event {
            PageEvent::Loaded(page) => {
                self.page_loaded(page).await;
            }
            PageEvent::LoginSubmitted { email, password } => {
                if let Err(e) = self.submit_login(&email, &password).await {
                    tracing::debug!(error = %e, "Login submission failed");
                }
            }
            PageEvent::SignupOpened => self.open_signup(),
            PageEvent::SignupSubmitted => self.submit_signup().await,
            PageEvent::LogoutRequested => {
                if let Err(e) = self.logout().await {
                    tracing::error!(error = %e, "Logout failed");
                }
            }
        }
    }

    /// Handles a page load. Returns the page that ends up displayed.
    ///
    /// Loading a protected page without a session redirects to the login page.
    pub async fn page_loaded(&self, page: Page) -> Page {
        if !page.is_protected() {
            return page;
        }

        let Some(session) = self.store.current_user().await else {
            tracing::debug!(page = %page, "Anonymous visit to protected page, redirecting");
            self.view.navigate(Page::Login);
            return Page::Login;
        };

        self.view.render_dashboard(dashboard_for(&session));
        page
    }

    /// Handles a login form submission.
    ///
    /// The submit control is busy while the login is pending. On success a
    /// message is shown and, after the redirect delay, the view navigates to
    /// the dashboard. On failure the error is shown and the control is
    /// re-enabled.
    pub async fn submit_login(
        &self,
        email: &str,
        password: &str,
    ) -> std::result::Result<Session, AuthError> {
        self.view.set_submit_state(SubmitState::Busy {
            label: SIGNING_IN_LABEL.to_string(),
        });

        match self.store.login(email, password).await {
            Ok(session) => {
                self.show(LOGIN_SUCCESS_TEXT, MessageKind::Success);
                tokio::time::sleep(self.ui.redirect_delay()).await;
                self.view.navigate(Page::Dashboard);
                Ok(session)
            }
            Err(err) => {
                let text = err.to_string();
                let text = if text.is_empty() {
                    LOGIN_FAILED_FALLBACK.to_string()
                } else {
                    text
                };
                self.show(text, MessageKind::Error);
                self.view.set_submit_state(SubmitState::Idle);
                Err(err)
            }
        }
    }

    pub fn open_signup(&self) {
        self.view.set_signup_modal(true);
    }

    /// Signup is a placeholder: acknowledge, then close the modal.
    pub async fn submit_signup(&self) {
        self.show(SIGNUP_PLACEHOLDER_TEXT, MessageKind::Success);
        tokio::time::sleep(self.ui.signup_close_delay()).await;
        self.view.set_signup_modal(false);
    }

    /// Logs out, then navigates to the entry page.
    pub async fn logout(&self) -> Result<()> {
        let result = self.store.logout().await;
        self.view.navigate(Page::Index);
        result
    }

    fn show(&self, text: impl Into<String>, kind: MessageKind) {
        self.view.show_message(Message {
            text: text.into(),
            kind,
            auto_hide: self.ui.message_auto_hide(),
        });
    }
}

fn dashboard_for(session: &Session) -> DashboardView {
    DashboardView {
        header_email: session.email.clone(),
        email: session.email.clone(),
        last_login: session.login_time_local(),
    }
}
