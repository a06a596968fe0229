use anyhow::Result;
use clap::Args;

use super::{prompt, Context};
use crate::output::print_user;

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub email: String,

    /// Password (at least 6 characters). Prompted for when omitted
    #[arg(long)]
    pub password: Option<String>,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,
}

#[derive(Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    /// Prompted for when omitted
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,
}

fn password_or_prompt(password: &Option<String>) -> Result<String> {
    match password {
        Some(password) => Ok(password.clone()),
        None => prompt("Password: "),
    }
}

pub async fn register(args: &RegisterArgs, ctx: &Context) -> Result<()> {
    let password = password_or_prompt(&args.password)?;
    let result = ctx
        .store
        .register(&args.email, &password, &args.first_name, &args.last_name)
        .await;
    ctx.settle(result)
}

/// Logs in, then shows the first page of reminders.
pub async fn login(args: &LoginArgs, ctx: &Context) -> Result<()> {
    let password = password_or_prompt(&args.password)?;
    let result = ctx.store.login(&args.email, &password).await;
    let user = ctx.settle(result)?;
    if !user.is_empty() {
        eprintln!("Signed in as {} <{}>", user.full_name(), user.email);
    }

    // A new session starts from the default list view.
    ctx.view.clear()?;
    let result = ctx.store.fetch_reminders().await;
    ctx.settle(result)?;
    ctx.show_list()
}

pub fn logout(ctx: &Context) -> Result<()> {
    let result = ctx.store.logout();
    ctx.view.clear()?;
    ctx.settle(result)?;
    eprintln!("Logged out.");
    Ok(())
}

pub fn whoami(ctx: &Context) -> Result<()> {
    ctx.settle(ctx.store.require_authenticated())?;
    let user = ctx.store.session_snapshot().user.unwrap_or_default();
    print_user(&user, &ctx.format)
}

pub async fn profile(args: &ProfileArgs, ctx: &Context) -> Result<()> {
    let result = ctx
        .store
        .update_profile(&args.first_name, &args.last_name)
        .await;
    let user = ctx.settle(result)?;
    print_user(&user, &ctx.format)
}
