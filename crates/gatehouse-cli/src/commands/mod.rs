pub mod login;
pub mod session;
pub mod shell;

use std::sync::Arc;

use gatehouse_application::PageController;
use gatehouse_application::controller::Page;

use crate::terminal_view::TerminalView;

pub type TerminalController = PageController<TerminalView>;

/// Loads every page the view was asked to navigate to, until the view
/// settles on one.
pub async fn follow_navigation(controller: &TerminalController) -> Page {
    let view: &Arc<TerminalView> = controller.view();
    while let Some(page) = view.take_navigation() {
        controller.page_loaded(page).await;
    }
    view.current_page()
}
