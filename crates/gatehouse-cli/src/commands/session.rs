use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use gatehouse_application::controller::Page;

use super::{TerminalController, follow_navigation};

pub async fn logout(controller: &TerminalController) -> Result<ExitCode> {
    controller.logout().await?;
    follow_navigation(controller).await;
    Ok(ExitCode::SUCCESS)
}

/// Prints whether a session exists without touching it.
pub async fn status(controller: &TerminalController) -> Result<ExitCode> {
    match controller.store().current_user().await {
        Some(session) => {
            println!(
                "{} {} (since {})",
                "Signed in as".green(),
                session.email.bold(),
                session.login_time_local()
            );
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("{}", "Not signed in".yellow());
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Loads the protected page; anonymous visitors end up on the login page.
pub async fn dashboard(controller: &TerminalController) -> Result<ExitCode> {
    let shown = controller.page_loaded(Page::Dashboard).await;
    follow_navigation(controller).await;

    Ok(if shown == Page::Dashboard {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

pub async fn signup(controller: &TerminalController) -> Result<ExitCode> {
    controller.open_signup();
    controller.submit_signup().await;
    Ok(ExitCode::SUCCESS)
}
