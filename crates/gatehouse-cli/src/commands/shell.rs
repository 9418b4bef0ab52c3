//! Interactive shell: one long-lived session store across many commands,
//! like a single browser tab.

use anyhow::{Context, Result};
use colored::Colorize;
use gatehouse_application::controller::{Page, PageEvent};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use super::{TerminalController, follow_navigation};

const HELP: &str = "\
Commands:
  login [email]   sign in (prompts for anything missing)
  logout          sign out and return to the index page
  status          show the current session
  dashboard       open the protected page
  signup          open and submit the signup form
  help            show this help
  exit            leave the shell";

#[derive(Debug, PartialEq, Eq)]
enum ShellCommand {
    Login(Option<String>),
    Logout,
    Status,
    Dashboard,
    Signup,
    Help,
    Exit,
    Empty,
    Unknown(String),
}

fn parse(line: &str) -> ShellCommand {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return ShellCommand::Empty;
    };
    match head {
        "login" => ShellCommand::Login(parts.next().map(str::to_string)),
        "logout" => ShellCommand::Logout,
        "status" | "whoami" => ShellCommand::Status,
        "dashboard" => ShellCommand::Dashboard,
        "signup" => ShellCommand::Signup,
        "help" | "?" => ShellCommand::Help,
        "exit" | "quit" => ShellCommand::Exit,
        other => ShellCommand::Unknown(other.to_string()),
    }
}

pub async fn run(controller: &TerminalController) -> Result<()> {
    let mut editor = DefaultEditor::new().context("Failed to open line editor")?;
    println!("{}", "gatehouse shell - type 'help' for commands".bold());

    loop {
        let prompt = format!("[{}]> ", controller.view().current_page());
        let line = match editor.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("Failed to read input"),
        };
        if !line.trim().is_empty() {
            let _ = editor.add_history_entry(line.as_str());
        }

        match parse(&line) {
            ShellCommand::Login(email) => {
                let email = match email {
                    Some(email) => email,
                    None => editor.readline("Email: ").context("Failed to read email")?.trim().to_string(),
                };
                let password =
                    rpassword::prompt_password("Password: ").context("Failed to read password")?;
                controller
                    .handle(PageEvent::LoginSubmitted { email, password })
                    .await;
            }
            ShellCommand::Logout => controller.handle(PageEvent::LogoutRequested).await,
            ShellCommand::Status => {
                super::session::status(controller).await?;
            }
            ShellCommand::Dashboard => controller.handle(PageEvent::Loaded(Page::Dashboard)).await,
            ShellCommand::Signup => {
                controller.handle(PageEvent::SignupOpened).await;
                controller.handle(PageEvent::SignupSubmitted).await;
            }
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Exit => break,
            ShellCommand::Empty => {}
            ShellCommand::Unknown(cmd) => {
                eprintln!("{} {} (try 'help')", "Unknown command:".red(), cmd);
            }
        }

        follow_navigation(controller).await;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse("login a@b.com"), ShellCommand::Login(Some("a@b.com".to_string())));
        assert_eq!(parse("  login  "), ShellCommand::Login(None));
        assert_eq!(parse("logout"), ShellCommand::Logout);
        assert_eq!(parse("whoami"), ShellCommand::Status);
        assert_eq!(parse("dashboard"), ShellCommand::Dashboard);
        assert_eq!(parse("quit"), ShellCommand::Exit);
        assert_eq!(parse(""), ShellCommand::Empty);
        assert_eq!(parse("dance"), ShellCommand::Unknown("dance".to_string()));
    }
}
