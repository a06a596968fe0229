use reminder_api::types::{LoginResponse, MeData, ReminderListResponse, Response};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_reminders_full() {
    let json = load_fixture("reminders.json");
    let resp: ReminderListResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(resp.data.reminders.len(), 2);

    let first = &resp.data.reminders[0];
    assert_eq!(first.id, "66a1f0c2e4b0a1b2c3d4e5f6");
    assert_eq!(first.title, "Dentist appointment");
    assert_eq!(first.scheduled_at.to_rfc3339(), "2030-05-14T09:30:00+00:00");
    assert!(first.created_at.is_some());

    // Mongo-style `_id` is accepted too
    assert_eq!(resp.data.reminders[1].id, "66a1f0c2e4b0a1b2c3d4e5f7");

    let paging = resp.data.pagination.unwrap();
    assert_eq!(paging.current_page, 1);
    assert_eq!(paging.total_pages, 3);
    assert_eq!(paging.total_docs, 12);
    assert_eq!(paging.limit, 5);
    assert!(paging.has_next_page);
    assert!(!paging.has_prev_page);
}

#[test]
fn deserialize_reminders_without_pagination() {
    let json = load_fixture("reminders_empty.json");
    let resp: ReminderListResponse = serde_json::from_str(&json).unwrap();
    assert!(resp.data.reminders.is_empty());
    assert!(resp.data.pagination.is_none());
}

#[test]
fn deserialize_reminders_missing_data() {
    let resp: ReminderListResponse = serde_json::from_str("{}").unwrap();
    assert!(resp.data.reminders.is_empty());
}

#[test]
fn deserialize_login() {
    let json = load_fixture("login.json");
    let resp: LoginResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(resp.access_token(), Some("eyJhbGciOiJIUzI1NiJ9.test.signature"));
}

#[test]
fn deserialize_login_without_token() {
    let resp: LoginResponse = serde_json::from_str(r#"{"data":{"tokens":{}}}"#).unwrap();
    assert_eq!(resp.access_token(), None);
    let resp: LoginResponse =
        serde_json::from_str(r#"{"data":{"tokens":{"accessToken":""}}}"#).unwrap();
    assert_eq!(resp.access_token(), None);
}

#[test]
fn deserialize_me() {
    let json = load_fixture("me.json");
    let resp: Response<MeData> = serde_json::from_str(&json).unwrap();
    let user = resp.data.user.unwrap();
    assert_eq!(user.id, "u-1001");
    assert_eq!(user.full_name(), "Ada Lovelace");
}

#[test]
fn deserialize_reminder_missing_title_returns_error() {
    let json = r#"{"data":{"reminders":[{"id":"1","scheduledAt":"2030-01-01T00:00:00Z"}]}}"#;
    let result = serde_json::from_str::<ReminderListResponse>(json);
    assert!(result.is_err());
}
