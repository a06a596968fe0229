//! CLI subcommand implementations.

pub mod account;
pub mod list;
pub mod reminders;

use std::fmt;
use std::io::{self, BufRead, Write};

use anyhow::Result;
use reminder_lib::{ReminderError, Severity, Store};

use crate::output::{print_list, print_toast, OutputFormat};
use crate::view_state::{ViewState, ViewStateFile};

/// A failure whose message has already been printed as a notification.
#[derive(Debug)]
pub struct Reported;

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action failed")
    }
}

impl std::error::Error for Reported {}

pub struct Context {
    pub store: Store,
    pub view: ViewStateFile,
    pub format: OutputFormat,
}

impl Context {
    /// Prints the pending notification and converts a failed action into an
    /// error for the top level.
    pub fn settle<T>(&self, result: Result<T, ReminderError>) -> Result<T> {
        let toast = self.store.toast_snapshot();
        if toast.open {
            print_toast(&toast);
            self.store.hide_toast();
        }
        result.map_err(|e| {
            let message = e.user_message();
            if toast.open && toast.severity == Severity::Error && toast.message == message {
                anyhow::Error::new(Reported)
            } else {
                anyhow::anyhow!(message)
            }
        })
    }

    /// Seeds the list slice with the view saved by the previous run.
    pub fn restore_view(&self) {
        let state = self.view.load();
        self.store.restore_list(state.filters, state.pagination);
    }

    /// Prints the loaded page and remembers its filters for the next run.
    pub fn show_list(&self) -> Result<()> {
        let list = self.store.list_snapshot();
        print_list(&list, &self.format)?;
        if let Err(e) = self.view.save(&ViewState::from(&list)) {
            tracing::warn!("Could not save list view: {}", e);
        }
        Ok(())
    }
}

/// Reads one line from stdin after printing `label` to stderr.
pub fn prompt(label: &str) -> Result<String> {
    eprint!("{}", label);
    io::stderr().flush()?;
    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

pub fn is_confirmed(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
