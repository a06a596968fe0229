//! Reminder list state: filters, the server's pagination mirror, and the
//! currently displayed page.
//!
//! Filters and pagination are written from two directions (the user changes
//! filters, the server answers with pagination), so every fetch carries a
//! sequence number. Only the response to the most recently issued fetch is
//! applied; anything older is dropped when it arrives.

use reminder_api::types::{Reminder, ReminderPage, ServerPagination, DEFAULT_LIMIT};
use reminder_api::{Query, ReminderQuery, ReminderSortBy, SortDirection};
use serde::{Deserialize, Serialize};

/// User-controlled parameters of the next list request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    pub search: String,
    pub upcoming_only: bool,
    pub sort_by: ReminderSortBy,
    pub sort_order: SortDirection,
    pub current_page: i64,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            search: String::new(),
            upcoming_only: false,
            sort_by: ReminderSortBy::CreatedAt,
            sort_order: SortDirection::Desc,
            current_page: 1,
        }
    }
}

impl Filters {
    pub fn to_query(&self, limit: i64) -> ReminderQuery {
        ReminderQuery::default()
            .with_page(self.current_page)
            .with_limit(limit)
            .with_sort_direction(self.sort_order)
            .with_sort_by(self.sort_by)
            .with_search(&self.search)
            .with_upcoming_only(self.upcoming_only)
    }

    pub fn is_filtered(&self) -> bool {
        !self.search.is_empty() || self.upcoming_only
    }
}

/// Client-side mirror of the server's paging metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub items_per_page: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_items: 0,
            items_per_page: DEFAULT_LIMIT,
            has_next_page: false,
            has_prev_page: false,
        }
    }
}

impl From<&ServerPagination> for Pagination {
    fn from(p: &ServerPagination) -> Self {
        Self {
            current_page: p.current_page,
            total_pages: p.total_pages,
            total_items: p.total_docs,
            items_per_page: p.limit,
            has_next_page: p.has_next_page,
            has_prev_page: p.has_prev_page,
        }
    }
}

impl Pagination {
    /// 1-based index of the first and last item on the current page, for
    /// "Showing a to b of n". `(0, 0)` when there is nothing to show.
    pub fn item_range(&self) -> (i64, i64) {
        if self.total_items <= 0 {
            return (0, 0);
        }
        // Server-supplied numbers; saturate rather than overflow.
        let first = self.current_page.saturating_sub(1)
            .saturating_mul(self.items_per_page)
            .saturating_add(1);
        let last = self
            .current_page
            .saturating_mul(self.items_per_page)
            .min(self.total_items);
        (first, last)
    }

    /// Pagination derived locally when the server sent none.
    fn from_item_count(count: usize, page_size: i64) -> Self {
        let total = i64::try_from(count).unwrap_or(i64::MAX);
        let per_page = page_size.max(1);
        Self {
            current_page: 1,
            total_pages: total.saturating_add(per_page - 1) / per_page,
            total_items: total,
            items_per_page: per_page,
            has_next_page: false,
            has_prev_page: false,
        }
    }
}

/// A user intent that reshapes the list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterChange {
    Search(String),
    ClearSearch,
    UpcomingOnly(bool),
    Sort(ReminderSortBy, SortDirection),
    NextPage,
    PrevPage,
    Page(i64),
}

/// Issued by [`ReminderListState::begin_fetch`]. The request must be built
/// from `filters`, and the response handed back with the same ticket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub filters: Filters,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    Fresh,
    /// A newer fetch was issued after this one; the response was dropped.
    Stale,
}

#[derive(Clone, Debug, Serialize)]
pub struct ReminderListState {
    pub reminders: Vec<Reminder>,
    pub loading: bool,
    /// A create/update/delete is in flight.
    pub saving: bool,
    pub error: Option<String>,
    pub editing: Option<Reminder>,
    pub pagination: Pagination,
    pub filters: Filters,
    #[serde(skip)]
    issued: u64,
    #[serde(skip)]
    page_size: i64,
}

impl Default for ReminderListState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_LIMIT)
    }
}

impl ReminderListState {
    pub fn with_page_size(page_size: i64) -> Self {
        Self {
            reminders: Vec::new(),
            loading: false,
            saving: false,
            error: None,
            editing: None,
            pagination: Pagination::default(),
            filters: Filters::default(),
            issued: 0,
            page_size,
        }
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Back to defaults, keeping the page size and the sequence counter so
    /// that responses to fetches issued before the reset are still dropped.
    pub fn reset(&mut self) {
        let issued = self.issued;
        *self = Self::with_page_size(self.page_size);
        self.issued = issued;
    }

    /// Seeds filters and pagination from a previous run.
    pub fn restore(&mut self, filters: Filters, pagination: Pagination) {
        self.filters = filters;
        self.pagination = pagination;
    }

    /// Applies a filter change. Returns `true` when the filters changed and
    /// a fetch is due; refused page navigation and no-op changes return `false`.
    pub fn apply(&mut self, change: FilterChange) -> bool {
        let before = self.filters.clone();
        match change {
            FilterChange::Search(search) => {
                self.filters.search = search;
                self.filters.current_page = 1;
            }
            FilterChange::ClearSearch => {
                self.filters.search.clear();
                self.filters.current_page = 1;
            }
            FilterChange::UpcomingOnly(flag) => {
                self.filters.upcoming_only = flag;
                self.filters.current_page = 1;
            }
            FilterChange::Sort(sort_by, sort_order) => {
                self.filters.sort_by = sort_by;
                self.filters.sort_order = sort_order;
                self.filters.current_page = 1;
            }
            FilterChange::NextPage => {
                if !self.pagination.has_next_page {
                    return false;
                }
                self.set_page(self.pagination.current_page.saturating_add(1));
            }
            FilterChange::PrevPage => {
                if !self.pagination.has_prev_page {
                    return false;
                }
                self.set_page(self.pagination.current_page.saturating_sub(1));
            }
            FilterChange::Page(page) => {
                if !self.can_go_to(page) {
                    return false;
                }
                self.set_page(page);
            }
        }
        self.filters != before
    }

    /// A direct page jump needs the server flag for its direction and must
    /// stay inside the reported page range.
    fn can_go_to(&self, page: i64) -> bool {
        let current = self.pagination.current_page;
        if page < 1 || page > self.pagination.total_pages {
            return false;
        }
        if page > current {
            self.pagination.has_next_page
        } else if page < current {
            self.pagination.has_prev_page
        } else {
            false
        }
    }

    fn set_page(&mut self, page: i64) {
        self.filters.current_page = page;
        self.pagination.current_page = page;
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.loading = true;
        self.error = None;
        FetchTicket {
            seq: self.issued,
            filters: self.filters.clone(),
        }
    }

    pub fn is_latest(&self, ticket: &FetchTicket) -> bool {
        ticket.seq == self.issued
    }

    /// Replaces the page and the pagination mirror with the server's answer.
    /// The server's page number wins over the requested one, which keeps
    /// `filters.current_page` equal to `pagination.current_page`.
    pub fn apply_page(&mut self, ticket: &FetchTicket, page: ReminderPage) -> Applied {
        if !self.is_latest(ticket) {
            return Applied::Stale;
        }
        self.loading = false;
        self.pagination = match &page.pagination {
            Some(p) => Pagination::from(p),
            None => Pagination::from_item_count(page.reminders.len(), self.page_size),
        };
        self.filters.current_page = self.pagination.current_page;
        self.reminders = page.reminders;
        Applied::Fresh
    }

    pub fn apply_error(&mut self, ticket: &FetchTicket, message: impl Into<String>) -> Applied {
        if !self.is_latest(ticket) {
            return Applied::Stale;
        }
        self.loading = false;
        self.error = Some(message.into());
        Applied::Fresh
    }

    pub fn mutation_started(&mut self) {
        self.saving = true;
        self.error = None;
    }

    pub fn mutation_succeeded(&mut self) {
        self.saving = false;
    }

    pub fn mutation_failed(&mut self, message: impl Into<String>) {
        self.saving = false;
        self.error = Some(message.into());
    }

    pub fn set_editing(&mut self, reminder: Option<Reminder>) {
        self.editing = reminder;
    }

    pub fn clear_editing(&mut self) {
        self.editing = None;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
