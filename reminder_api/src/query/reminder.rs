use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use super::common::{Query, QueryCommon};

/// Query for `GET /reminder`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReminderQuery {
    pub common: QueryCommon,
    pub sort_by: ReminderSortBy,
    pub search: Option<String>,
    pub upcoming_only: bool,
}

impl Query for ReminderQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        url.query_pairs_mut()
            .append_pair("sortBy", &self.sort_by.to_string())
            .append_pair("sortOrder", &self.common.sort_direction.to_string());
        if let Some(search) = &self.search {
            url.query_pairs_mut().append_pair("search", search.as_str());
        }
        if self.upcoming_only {
            url.query_pairs_mut().append_pair("upcomingOnly", "true");
        }
        url
    }
}

impl ReminderQuery {
    /// Sets the search text. An empty string clears it, since the server
    /// treats a missing parameter and an empty one the same way.
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = if search.is_empty() {
            None
        } else {
            Some(search.to_string())
        };
        self
    }

    pub fn with_sort_by(mut self, sort_by: ReminderSortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn with_upcoming_only(mut self, upcoming_only: bool) -> Self {
        self.upcoming_only = upcoming_only;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReminderSortBy {
    #[default]
    CreatedAt,
    ScheduledAt,
    Title,
}

impl std::fmt::Display for ReminderSortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ReminderSortBy::CreatedAt => "createdAt",
                ReminderSortBy::ScheduledAt => "scheduledAt",
                ReminderSortBy::Title => "title",
            }
        )
    }
}

impl FromStr for ReminderSortBy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "created" | "createdat" => Ok(ReminderSortBy::CreatedAt),
            "scheduled" | "scheduledat" => Ok(ReminderSortBy::ScheduledAt),
            "title" => Ok(ReminderSortBy::Title),
            _ => Err(()),
        }
    }
}
