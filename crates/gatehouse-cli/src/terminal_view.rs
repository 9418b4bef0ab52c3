//! Terminal rendering of the login front-end.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use colored::Colorize;
use gatehouse_application::View;
use gatehouse_application::controller::{DashboardView, Message, MessageKind, Page, SubmitState};

/// A [`View`] that prints to the terminal.
///
/// Navigation requests are queued; the command loop drains them with
/// [`take_navigation`](Self::take_navigation) and loads each page in turn,
/// the way a browser loads the page a redirect points at.
pub struct TerminalView {
    current: Mutex<Page>,
    navigations: Mutex<VecDeque<Page>>,
}

impl TerminalView {
    pub fn new(start: Page) -> Self {
        Self {
            current: Mutex::new(start),
            navigations: Mutex::new(VecDeque::new()),
        }
    }

    pub fn current_page(&self) -> Page {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn take_navigation(&self) -> Option<Page> {
        self.navigations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }
}

impl View for TerminalView {
    fn show_message(&self, message: Message) {
        // Terminal output scrolls away on its own; auto_hide is not honored here.
        match message.kind {
            MessageKind::Success => println!("{}", message.text.green()),
            MessageKind::Error => eprintln!("{}", message.text.red().bold()),
        }
    }

    fn set_submit_state(&self, state: SubmitState) {
        if let SubmitState::Busy { label } = state {
            println!("{}", label.dimmed());
        }
    }

    fn navigate(&self, page: Page) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = page;
        self.navigations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(page);
        println!("{} {}", "->".cyan(), page.to_string().cyan());
    }

    fn render_dashboard(&self, dashboard: DashboardView) {
        println!("{}  {}", "Dashboard".bold(), dashboard.header_email.dimmed());
        println!("  Email:      {}", dashboard.email);
        println!("  Last login: {}", dashboard.last_login);
    }

    fn set_signup_modal(&self, open: bool) {
        if open {
            println!("{}", "[signup] form opened".dimmed());
        } else {
            println!("{}", "[signup] form closed".dimmed());
        }
    }
}
