mod commands;
mod output;
mod view_state;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use reminder_lib::{Config, Store};

use crate::commands::{Context, Reported};
use crate::output::OutputFormat;
use crate::view_state::ViewStateFile;

#[derive(Parser)]
#[command(name = "reminders")]
#[command(about = "Manage your reminders from the command line")]
struct Cli {
    /// Output format: table, json, csv, markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// API base URL (overrides REMINDER_API_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register(commands::account::RegisterArgs),
    /// Log in and show the first page of reminders
    Login(commands::account::LoginArgs),
    /// Log out and forget the stored token
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Update first and last name
    Profile(commands::account::ProfileArgs),
    /// List reminders, remembering filters between runs
    List(commands::list::ListArgs),
    /// Create a reminder
    Create(commands::reminders::CreateArgs),
    /// Update a reminder
    Update(commands::reminders::UpdateArgs),
    /// Delete a reminder
    Delete(commands::reminders::DeleteArgs),
}

impl Commands {
    fn needs_session(&self) -> bool {
        !matches!(
            self,
            Commands::Register(_) | Commands::Login(_) | Commands::Logout
        )
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !e.is::<Reported>() {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("reminder=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let format = OutputFormat::parse(&cli.output);
    let config = Config::from_env().with_base_url(cli.base_url.as_deref());
    tracing::debug!("Using API at {}", config.base_url);

    let store = Store::from_config(&config)?;
    if cli.command.needs_session() {
        store.bootstrap().await?;
    }
    let ctx = Context {
        store,
        view: ViewStateFile::new(&config.state_dir),
        format,
    };

    match &cli.command {
        Commands::Register(args) => commands::account::register(args, &ctx).await?,
        Commands::Login(args) => commands::account::login(args, &ctx).await?,
        Commands::Logout => commands::account::logout(&ctx)?,
        Commands::Whoami => commands::account::whoami(&ctx)?,
        Commands::Profile(args) => commands::account::profile(args, &ctx).await?,
        Commands::List(args) => commands::list::run(args, &ctx).await?,
        Commands::Create(args) => commands::reminders::create(args, &ctx).await?,
        Commands::Update(args) => commands::reminders::update(args, &ctx).await?,
        Commands::Delete(args) => commands::reminders::delete(args, &ctx).await?,
    }

    Ok(())
}
