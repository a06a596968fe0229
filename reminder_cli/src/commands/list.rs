use anyhow::{anyhow, Result};
use clap::Args;
use reminder_lib::{FilterChange, Filters, ReminderSortBy, SortDirection};

use super::Context;

const NAVIGATION: [&str; 3] = ["page", "next", "prev"];

#[derive(Args, Default)]
pub struct ListArgs {
    /// Search title and description
    #[arg(long, conflicts_with_all = NAVIGATION)]
    pub search: Option<String>,

    /// Drop the saved search
    #[arg(long, conflicts_with_all = ["search", "page", "next", "prev"])]
    pub clear_search: bool,

    /// Only reminders scheduled in the future
    #[arg(long, conflicts_with_all = NAVIGATION)]
    pub upcoming: bool,

    /// Past reminders too (undoes --upcoming)
    #[arg(long, conflicts_with_all = ["upcoming", "page", "next", "prev"])]
    pub all: bool,

    /// Sort field: created, scheduled, title
    #[arg(long, conflicts_with_all = NAVIGATION)]
    pub sort_by: Option<String>,

    /// Sort ascending
    #[arg(long, conflicts_with_all = NAVIGATION)]
    pub asc: bool,

    /// Sort descending
    #[arg(long, conflicts_with_all = ["asc", "page", "next", "prev"])]
    pub desc: bool,

    /// Jump to page N
    #[arg(long, conflicts_with_all = ["next", "prev"])]
    pub page: Option<i64>,

    /// Next page of the saved view
    #[arg(long, conflicts_with = "prev")]
    pub next: bool,

    /// Previous page of the saved view
    #[arg(long)]
    pub prev: bool,

    /// Start over from the default view
    #[arg(long)]
    pub reset: bool,
}

impl ListArgs {
    fn navigates(&self) -> bool {
        self.page.is_some() || self.next || self.prev
    }
}

/// Translates flags into filter changes against the saved view.
fn filter_changes(args: &ListArgs, current: &Filters) -> Result<Vec<FilterChange>> {
    let mut changes = Vec::new();

    if let Some(search) = &args.search {
        changes.push(FilterChange::Search(search.clone()));
    } else if args.clear_search {
        changes.push(FilterChange::ClearSearch);
    }

    if args.upcoming {
        changes.push(FilterChange::UpcomingOnly(true));
    } else if args.all {
        changes.push(FilterChange::UpcomingOnly(false));
    }

    if args.sort_by.is_some() || args.asc || args.desc {
        let sort_by = match &args.sort_by {
            Some(s) => s.parse::<ReminderSortBy>().map_err(|_| {
                anyhow!("Unknown sort field '{}': use created, scheduled or title", s)
            })?,
            None => current.sort_by,
        };
        let order = if args.asc {
            SortDirection::Asc
        } else if args.desc {
            SortDirection::Desc
        } else {
            current.sort_order
        };
        changes.push(FilterChange::Sort(sort_by, order));
    }

    if let Some(page) = args.page {
        changes.push(FilterChange::Page(page));
    } else if args.next {
        changes.push(FilterChange::NextPage);
    } else if args.prev {
        changes.push(FilterChange::PrevPage);
    }

    Ok(changes)
}

pub async fn run(args: &ListArgs, ctx: &Context) -> Result<()> {
    ctx.settle(ctx.store.require_authenticated())?;
    if args.reset {
        ctx.view.clear()?;
    }
    ctx.restore_view();

    let current = ctx.store.list_snapshot().filters;
    let changes = filter_changes(args, &current)?;
    let fetched = if changes.is_empty() {
        None
    } else {
        let result = ctx.store.apply_filter_changes(changes).await;
        ctx.settle(result)?
    };

    // The store sent nothing for a refused or no-op change. A fresh process
    // has no page loaded yet, so the current view is fetched for display.
    if fetched.is_none() {
        if args.navigates() {
            eprintln!("No such page; showing page {}.", current.current_page);
        }
        let result = ctx.store.fetch_reminders().await;
        ctx.settle(result)?;
    }
    ctx.show_list()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_no_changes() {
        let changes = filter_changes(&ListArgs::default(), &Filters::default()).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn filters_become_changes() {
        let args = ListArgs {
            search: Some("gym".to_string()),
            upcoming: true,
            sort_by: Some("scheduled".to_string()),
            asc: true,
            ..ListArgs::default()
        };
        let changes = filter_changes(&args, &Filters::default()).unwrap();
        assert_eq!(
            changes,
            vec![
                FilterChange::Search("gym".to_string()),
                FilterChange::UpcomingOnly(true),
                FilterChange::Sort(ReminderSortBy::ScheduledAt, SortDirection::Asc),
            ]
        );
    }

    #[test]
    fn sort_keeps_saved_parts() {
        let current = Filters {
            sort_by: ReminderSortBy::Title,
            sort_order: SortDirection::Asc,
            ..Filters::default()
        };
        let args = ListArgs {
            desc: true,
            ..ListArgs::default()
        };
        assert_eq!(
            filter_changes(&args, &current).unwrap(),
            vec![FilterChange::Sort(ReminderSortBy::Title, SortDirection::Desc)]
        );

        let args = ListArgs {
            sort_by: Some("created".to_string()),
            ..ListArgs::default()
        };
        assert_eq!(
            filter_changes(&args, &current).unwrap(),
            vec![FilterChange::Sort(ReminderSortBy::CreatedAt, SortDirection::Asc)]
        );
    }

    #[test]
    fn unknown_sort_field_is_an_error() {
        let args = ListArgs {
            sort_by: Some("priority".to_string()),
            ..ListArgs::default()
        };
        assert!(filter_changes(&args, &Filters::default()).is_err());
    }

    #[test]
    fn navigation_changes() {
        let next = ListArgs {
            next: true,
            ..ListArgs::default()
        };
        assert_eq!(
            filter_changes(&next, &Filters::default()).unwrap(),
            vec![FilterChange::NextPage]
        );
        assert!(next.navigates());

        let page = ListArgs {
            page: Some(3),
            ..ListArgs::default()
        };
        assert_eq!(
            filter_changes(&page, &Filters::default()).unwrap(),
            vec![FilterChange::Page(3)]
        );
    }

    #[test]
    fn clear_search_and_all() {
        let args = ListArgs {
            clear_search: true,
            all: true,
            ..ListArgs::default()
        };
        assert_eq!(
            filter_changes(&args, &Filters::default()).unwrap(),
            vec![FilterChange::ClearSearch, FilterChange::UpcomingOnly(false)]
        );
    }

    #[test]
    fn cli_rejects_navigation_with_filters() {
        use clap::Parser;

        #[derive(Parser)]
        struct Harness {
            #[command(flatten)]
            list: ListArgs,
        }

        assert!(Harness::try_parse_from(["list", "--search", "gym", "--next"]).is_err());
        assert!(Harness::try_parse_from(["list", "--next", "--prev"]).is_err());
        let ok = Harness::try_parse_from(["list", "--page", "2"]).unwrap();
        assert_eq!(ok.list.page, Some(2));
    }
}
