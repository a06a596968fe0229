use anyhow::Result;
use chrono::{DateTime, Utc};
use reminder_lib::types::{Reminder, User};
use reminder_lib::{Filters, Pagination, ReminderListState, ToastState};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

const DESCRIPTION_WIDTH: usize = 40;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Self {
        match value {
            "json" => Self::Json,
            "csv" => Self::Csv,
            "markdown" | "md" => Self::Markdown,
            _ => Self::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct ReminderRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Description")]
    #[serde(rename = "Description")]
    description: String,
    #[tabled(rename = "Scheduled")]
    #[serde(rename = "Scheduled")]
    scheduled: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
}

#[derive(Tabled, Serialize)]
struct UserRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    #[serde(rename = "Email")]
    email: String,
}

/// JSON shape of the list view.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListView<'a> {
    reminders: &'a [Reminder],
    pagination: &'a Pagination,
    filters: &'a Filters,
}

// -- Row builders --

fn build_reminder_rows(reminders: &[Reminder], now: DateTime<Utc>, full: bool) -> Vec<ReminderRow> {
    reminders
        .iter()
        .map(|r| ReminderRow {
            id: r.id.clone(),
            title: r.title.clone(),
            description: if full {
                r.description.clone()
            } else {
                truncate(&r.description, DESCRIPTION_WIDTH)
            },
            scheduled: format_datetime(&r.scheduled_at),
            status: if r.scheduled_at < now { "Past" } else { "Upcoming" }.to_string(),
        })
        .collect()
}

fn build_user_rows(user: &User) -> Vec<UserRow> {
    vec![UserRow {
        id: user.id.clone(),
        name: user.full_name(),
        email: user.email.clone(),
    }]
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}

// -- List view --

/// "Showing a to b of n" and "Page x/y", or `None` for an empty list.
pub fn page_summary(pagination: &Pagination) -> Option<String> {
    if pagination.total_items <= 0 {
        return None;
    }
    let (first, last) = pagination.item_range();
    Some(format!(
        "Showing {} to {} of {} reminders\nPage {}/{}",
        first, last, pagination.total_items, pagination.current_page, pagination.total_pages
    ))
}

fn empty_message(filters: &Filters) -> &'static str {
    if filters.is_filtered() {
        "No reminders found matching your criteria."
    } else {
        "No reminders found. Create your first reminder!"
    }
}

/// Prints the current page of the list slice in `format`. Notices go to
/// stderr so that stdout stays machine-readable.
pub fn print_list(list: &ReminderListState, format: &OutputFormat) -> Result<()> {
    if let Some(error) = &list.error {
        eprintln!("{}", error);
    }
    if *format == OutputFormat::Json {
        print_json(&ListView {
            reminders: &list.reminders,
            pagination: &list.pagination,
            filters: &list.filters,
        });
        return Ok(());
    }

    if list.reminders.is_empty() {
        eprintln!("{}", empty_message(&list.filters));
        return Ok(());
    }

    let now = Utc::now();
    match format {
        OutputFormat::Table => print_table(build_reminder_rows(&list.reminders, now, false)),
        OutputFormat::Markdown => print_markdown(build_reminder_rows(&list.reminders, now, false)),
        OutputFormat::Csv => print_csv(build_reminder_rows(&list.reminders, now, true))?,
        OutputFormat::Json => {}
    }
    if let Some(summary) = page_summary(&list.pagination) {
        eprintln!("{}", summary);
    }
    Ok(())
}

pub fn print_user(user: &User, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_table(build_user_rows(user)),
        OutputFormat::Markdown => print_markdown(build_user_rows(user)),
        OutputFormat::Csv => print_csv(build_user_rows(user))?,
        OutputFormat::Json => print_json(user),
    }
    Ok(())
}

/// Notifications are written to stderr, prefixed with their severity.
pub fn print_toast(toast: &ToastState) {
    eprintln!("[{}] {}", toast.severity, toast.message);
}

// -- Writers --

fn print_table<T: Tabled>(rows: Vec<T>) {
    println!("{}", Table::new(rows));
}

fn print_markdown<T: Tabled>(rows: Vec<T>) {
    let mut table = Table::new(rows);
    table.with(Style::markdown());
    println!("{}", table);
}

fn print_csv<T: Serialize>(rows: Vec<T>) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_json<T: Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use reminder_lib::Severity;

    fn reminder(id: &str, title: &str, description: &str, at: DateTime<Utc>) -> Reminder {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": title,
            "description": description,
            "scheduledAt": at.to_rfc3339(),
        }))
        .unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 5, 1, 12, 0, 0).unwrap()
    }

    fn csv_from_rows<T: Serialize>(rows: &[T]) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        for row in rows {
            wtr.serialize(row).unwrap();
        }
        wtr.flush().unwrap();
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn output_format_parse() {
        assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("csv"), OutputFormat::Csv);
        assert_eq!(OutputFormat::parse("markdown"), OutputFormat::Markdown);
        assert_eq!(OutputFormat::parse("md"), OutputFormat::Markdown);
        assert_eq!(OutputFormat::parse("anything"), OutputFormat::Table);
    }

    // -- Row builders --

    #[test]
    fn reminder_rows_mark_past_and_upcoming() {
        let reminders = vec![
            reminder(
                "r1",
                "Dentist",
                "Bring the insurance card",
                Utc.with_ymd_and_hms(2030, 5, 14, 9, 30, 0).unwrap(),
            ),
            reminder(
                "r2",
                "Gym",
                "Leg day with the trainer",
                Utc.with_ymd_and_hms(2030, 4, 1, 7, 0, 0).unwrap(),
            ),
        ];
        let rows = build_reminder_rows(&reminders, now(), false);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "r1");
        assert_eq!(rows[0].scheduled, "2030-05-14 09:30 UTC");
        assert_eq!(rows[0].status, "Upcoming");
        assert_eq!(rows[1].status, "Past");
    }

    #[test]
    fn reminder_rows_truncate_long_descriptions() {
        let long = "a".repeat(80);
        let reminders = vec![reminder("r1", "Dentist", &long, now())];

        let short = build_reminder_rows(&reminders, now(), false);
        assert_eq!(short[0].description.chars().count(), DESCRIPTION_WIDTH);
        assert!(short[0].description.ends_with("..."));

        let full = build_reminder_rows(&reminders, now(), true);
        assert_eq!(full[0].description, long);
    }

    #[test]
    fn reminder_rows_empty() {
        assert!(build_reminder_rows(&[], now(), false).is_empty());
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate("héllo wörld", 20), "héllo wörld");
        assert_eq!(truncate("ééééééééé", 6), "ééé...");
    }

    #[test]
    fn user_rows_mapping() {
        let user: User = serde_json::from_value(serde_json::json!({
            "_id": "u-1001",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com"
        }))
        .unwrap();
        let rows = build_user_rows(&user);
        assert_eq!(rows[0].id, "u-1001");
        assert_eq!(rows[0].name, "Ada Lovelace");
        assert_eq!(rows[0].email, "ada@example.com");
    }

    // -- Summaries --

    #[test]
    fn page_summary_middle_page() {
        let p = Pagination {
            current_page: 2,
            total_pages: 3,
            total_items: 12,
            items_per_page: 5,
            has_next_page: true,
            has_prev_page: true,
        };
        assert_eq!(
            page_summary(&p).unwrap(),
            "Showing 6 to 10 of 12 reminders\nPage 2/3"
        );
    }

    #[test]
    fn page_summary_last_partial_page() {
        let p = Pagination {
            current_page: 3,
            total_pages: 3,
            total_items: 12,
            items_per_page: 5,
            has_next_page: false,
            has_prev_page: true,
        };
        assert_eq!(
            page_summary(&p).unwrap(),
            "Showing 11 to 12 of 12 reminders\nPage 3/3"
        );
    }

    #[test]
    fn page_summary_empty() {
        assert_eq!(page_summary(&Pagination::default()), None);
    }

    #[test]
    fn empty_message_depends_on_filters() {
        assert_eq!(
            empty_message(&Filters::default()),
            "No reminders found. Create your first reminder!"
        );
        let filtered = Filters {
            upcoming_only: true,
            ..Filters::default()
        };
        assert_eq!(
            empty_message(&filtered),
            "No reminders found matching your criteria."
        );
    }

    #[test]
    fn toast_severity_display() {
        let mut toast = ToastState::default();
        toast.show("Reminder created successfully", Severity::Success);
        assert_eq!(toast.severity.to_string(), "success");
    }

    // -- CSV / Markdown --

    #[test]
    fn csv_reminder_headers() {
        let rows = build_reminder_rows(&[reminder("r1", "Dentist", "Bring the card", now())], now(), true);
        let csv = csv_from_rows(&rows);
        let header = csv.lines().next().unwrap();
        assert_eq!(header, "ID,Title,Description,Scheduled,Status");
    }

    #[test]
    fn markdown_user_structure() {
        let mut table = Table::new(build_user_rows(&User::default()));
        table.with(Style::markdown());
        let md = table.to_string();
        assert!(md.contains('|'));
        assert!(md.contains("---"));
        assert!(md.lines().next().unwrap().contains("Email"));
    }
}
