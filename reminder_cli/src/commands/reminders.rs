use anyhow::{anyhow, bail, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use reminder_lib::validation;

use super::{is_confirmed, prompt, Context};

#[derive(Args)]
pub struct CreateArgs {
    /// At least 3 characters
    #[arg(long)]
    pub title: String,

    /// At least 10 characters
    #[arg(long)]
    pub description: String,

    /// When to remind: RFC 3339 or "YYYY-MM-DD HH:MM" (UTC)
    #[arg(long)]
    pub at: String,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Reminder ID
    pub id: String,

    /// Omitted fields keep their current values
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub at: Option<String>,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Reminder ID
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

fn parse_at(input: &str) -> Result<DateTime<Utc>> {
    validation::parse_schedule(input).map_err(|e| anyhow!(e.user_message()))
}

pub async fn create(args: &CreateArgs, ctx: &Context) -> Result<()> {
    ctx.settle(ctx.store.require_authenticated())?;
    ctx.restore_view();
    let scheduled_at = parse_at(&args.at)?;
    let result = ctx
        .store
        .create_reminder(&args.title, &args.description, Some(scheduled_at))
        .await;
    ctx.settle(result)?;
    ctx.show_list()
}

pub async fn update(args: &UpdateArgs, ctx: &Context) -> Result<()> {
    ctx.settle(ctx.store.require_authenticated())?;
    ctx.restore_view();

    if args.title.is_none() || args.description.is_none() || args.at.is_none() {
        let result = ctx.store.fetch_reminders().await;
        ctx.settle(result)?;
        let current = ctx
            .store
            .list_snapshot()
            .reminders
            .into_iter()
            .find(|r| r.id == args.id);
        match current {
            Some(reminder) => ctx.store.set_editing(Some(reminder)),
            None => bail!(
                "Reminder {} is not on the current page; pass --title, --description and --at",
                args.id
            ),
        }
    }

    let editing = ctx.store.list_snapshot().editing;
    let title = match &args.title {
        Some(title) => title.clone(),
        None => editing.as_ref().map(|r| r.title.clone()).unwrap_or_default(),
    };
    let description = match &args.description {
        Some(description) => description.clone(),
        None => editing
            .as_ref()
            .map(|r| r.description.clone())
            .unwrap_or_default(),
    };
    let scheduled_at = match &args.at {
        Some(at) => Some(parse_at(at)?),
        None => editing.as_ref().map(|r| r.scheduled_at),
    };

    let result = ctx
        .store
        .update_reminder(&args.id, &title, &description, scheduled_at)
        .await;
    ctx.settle(result)?;
    ctx.show_list()
}

/// Deletes after an interactive confirmation unless `--yes` was given.
/// Declining sends nothing.
pub async fn delete(args: &DeleteArgs, ctx: &Context) -> Result<()> {
    ctx.settle(ctx.store.require_authenticated())?;
    ctx.restore_view();

    if !args.yes {
        // Loads the page so the prompt can name the reminder.
        let result = ctx.store.fetch_reminders().await;
        ctx.settle(result)?;
    }
    let pending = ctx.store.request_delete(&args.id);

    if !args.yes {
        eprintln!("Are you sure you want to delete this reminder?");
        match pending.title() {
            Some(title) => eprintln!("  {} ({})", title, pending.id()),
            None => eprintln!("  {}", pending.id()),
        }
        if !is_confirmed(&prompt("Delete? [y/N] ")?) {
            eprintln!("Delete cancelled.");
            return Ok(());
        }
    }

    let result = ctx.store.delete_reminder(pending).await;
    ctx.settle(result)?;
    ctx.show_list()
}
