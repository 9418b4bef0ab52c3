use std::process::ExitCode;

use anyhow::{Context, Result};
use rustyline::DefaultEditor;

use super::{TerminalController, follow_navigation};

/// Prompts for any missing credential, then submits the login form.
pub async fn run(
    controller: &TerminalController,
    email: Option<String>,
    password: Option<String>,
) -> Result<ExitCode> {
    let email = match email {
        Some(email) => email,
        None => prompt_email()?,
    };
    let password = match password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ").context("Failed to read password")?,
    };

    let outcome = controller.submit_login(&email, &password).await;
    follow_navigation(controller).await;

    Ok(if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn prompt_email() -> Result<String> {
    let mut editor = DefaultEditor::new().context("Failed to open line editor")?;
    let line = editor.readline("Email: ").context("Failed to read email")?;
    Ok(line.trim().to_string())
}
