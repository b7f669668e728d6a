//! Session commands - login, logout, whoami.

use anyhow::{Context, Result, bail};
use clap::Args;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use fieldguide_core::validate::{is_required, is_valid_email};
use std::io::{BufRead, IsTerminal, Write};
use tracing::info;

use super::{connect, emit, require};
use crate::Cli;
use crate::output::SessionOutput;

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Login e-mail.
    pub email: String,

    /// Password; prompted for without echo when omitted, or read from
    /// piped stdin.
    #[arg(long, env = "FIELDGUIDE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Arguments for the whoami command.
#[derive(Args)]
pub struct WhoamiArgs {
    /// Also ask the server whether the session is still valid.
    #[arg(long)]
    pub verify: bool,
}

/// Runs the login command.
pub async fn login(args: &LoginArgs, cli: &Cli) -> Result<()> {
    let email = args.email.trim();
    if !is_valid_email(email) {
        bail!("Invalid email address: {email}");
    }
    let password = match &args.password {
        Some(password) => password.clone(),
        None => read_password()?,
    };
    if !is_required(&password) {
        bail!("Password is required");
    }

    let service = connect(cli).await?;
    let user = require(service.login(email, &password).await)?;
    info!(uid = user.uid, "Login succeeded");

    let output = SessionOutput {
        logged_in: true,
        session_valid: None,
        user: Some(user),
    };
    emit(cli, &output, |f| f.format_session(&output))
}

/// Runs the logout command.
pub async fn logout(cli: &Cli) -> Result<()> {
    let service = connect(cli).await?;
    require(service.logout().await)?;

    let output = SessionOutput {
        logged_in: false,
        session_valid: None,
        user: None,
    };
    emit(cli, &output, |f| f.format_session(&output))
}

/// Runs the whoami command.
pub async fn whoami(args: &WhoamiArgs, cli: &Cli) -> Result<()> {
    let service = connect(cli).await?;
    let user = service.get_user_data().await;
    let session_valid = if args.verify && user.is_some() {
        Some(require(service.verify_session().await)?)
    } else {
        None
    };

    let output = SessionOutput {
        logged_in: user.is_some(),
        session_valid,
        user,
    };
    emit(cli, &output, |f| f.format_session(&output))?;

    if !output.logged_in {
        bail!("No active session");
    }
    Ok(())
}

/// Prompts on stderr for the password.
///
/// On a terminal the input is read in raw mode and not echoed; piped stdin
/// is read as one line.
fn read_password() -> Result<String> {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        let mut line = String::new();
        stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read password")?;
        return Ok(line.trim_end_matches(['\r', '\n']).to_string());
    }

    eprint!("Password: ");
    std::io::stderr().flush().ok();

    terminal::enable_raw_mode().context("Failed to read password")?;
    let password = read_hidden();
    terminal::disable_raw_mode().ok();
    eprintln!();
    password
}

fn read_hidden() -> Result<String> {
    let mut password = String::new();
    loop {
        let Event::Key(key) = event::read().context("Failed to read password")? else {
            continue;
        };
        match on_key(&mut password, key) {
            Prompt::Pending => {}
            Prompt::Done => return Ok(password),
            Prompt::Cancelled => bail!("Login cancelled"),
        }
    }
}

/// State of the hidden password prompt after one key.
#[derive(Debug, PartialEq, Eq)]
enum Prompt {
    Pending,
    Done,
    Cancelled,
}

fn on_key(buffer: &mut String, key: KeyEvent) -> Prompt {
    if key.kind == KeyEventKind::Release {
        return Prompt::Pending;
    }
    match key.code {
        KeyCode::Enter => Prompt::Done,
        KeyCode::Esc => Prompt::Cancelled,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Prompt::Cancelled,
        KeyCode::Char(c) => {
            buffer.push(c);
            Prompt::Pending
        }
        KeyCode::Backspace => {
            buffer.pop();
            Prompt::Pending
        }
        _ => Prompt::Pending,
    }
}
