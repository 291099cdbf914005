//! Sign-in state commands.

use anyhow::{Context as _, Result};
use chrono::Utc;
use std::io::{BufRead, IsTerminal, Write};

use super::Context;
use crate::models::Tab;
use crate::ui;
use crate::utils::format_age;

/// `cabinet login <email>`.
pub async fn login(ctx: &Context, email: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => read_password()?,
    };

    let session = ui::with_spinner("Signing in...", ctx.client.login(email, &password)).await?;
    ctx.store.save(&session)?;

    let name = session
        .user
        .as_ref()
        .map_or_else(|| email.to_string(), |u| u.display_name());
    println!("Signed in as {name} ({})", session.role());
    Ok(())
}

fn read_password() -> Result<String> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprint!("Password: ");
        std::io::stderr().flush().ok();
    }
    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// `cabinet logout`.
pub fn logout(ctx: &Context) -> Result<()> {
    if ctx.store.clear()? {
        println!("Signed out");
    } else {
        println!("Not signed in");
    }
    Ok(())
}

/// `cabinet whoami`, from the stored session without a request.
pub fn whoami(ctx: &Context) -> Result<()> {
    let session = ctx.client.require_session()?;
    match &session.user {
        Some(user) => {
            println!("{} <{}>", user.display_name(), user.email);
            println!("Role:      {}", user.role);
            println!("User id:   {}", user.id);
        },
        None => println!("Signed in (profile unknown)"),
    }
    println!(
        "Signed in: {} ago",
        format_age(session.created_at, Utc::now())
    );
    Ok(())
}

/// `cabinet tabs`: the sections the stored role can open.
pub fn tabs(ctx: &Context) -> Result<()> {
    let session = ctx.client.require_session()?;
    for tab in Tab::visible_for(session.role()) {
        println!("{}", tab.label());
    }
    Ok(())
}
