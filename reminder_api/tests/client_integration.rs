use reminder_api::types::{Credentials, ProfileUpdate, ReminderInput};
use reminder_api::{Client, Error, Query, ReminderQuery};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn input() -> ReminderInput {
    ReminderInput {
        title: "Dentist appointment".to_string(),
        description: "Bring the insurance card".to_string(),
        scheduled_at: "2030-05-14T09:30:00Z".parse().unwrap(),
    }
}

#[tokio::test]
async fn list_reminders_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("reminders.json");

    Mock::given(method("GET"))
        .and(path("/reminder"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "5"))
        .and(query_param("search", "dentist"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let query = ReminderQuery::default().with_page(2).with_search("dentist");
    let resp = client.list_reminders(&query).await.unwrap();

    assert_eq!(resp.data.reminders.len(), 2);
    assert_eq!(resp.data.reminders[0].title, "Dentist appointment");
    assert_eq!(resp.data.pagination.unwrap().total_docs, 12);
}

#[tokio::test]
async fn list_reminders_server_error_carries_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reminder"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string(r#"{"message":"database unavailable"}"#),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client
        .list_reminders(&ReminderQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.server_message(), Some("database unavailable"));
}

#[tokio::test]
async fn list_reminders_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reminder"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let result = client.list_reminders(&ReminderQuery::default()).await;
    assert!(matches!(result, Err(Error::ParseFailed(_))));
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    // Nothing listens on port 1.
    let client = Client::with_base_url("http://127.0.0.1:1").unwrap();
    let err = client.me().await.unwrap_err();
    assert!(err.is_network());
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn login_posts_credentials_and_returns_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login/email"))
        .and(body_json(serde_json::json!({
            "email": "ada@example.com",
            "password": "secret1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("login.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let resp = client
        .login(&Credentials {
            email: "ada@example.com".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(
        resp.access_token(),
        Some("eyJhbGciOiJIUzI1NiJ9.test.signature")
    );
}

#[tokio::test]
async fn me_sends_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("me.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    client.set_token("tok-123");
    let resp = client.me().await.unwrap();
    let user = resp.data.user.unwrap();
    assert_eq!(user.first_name, "Ada");
    assert_eq!(user.email, "ada@example.com");
}

#[tokio::test]
async fn update_profile_uses_patch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/auth/profile"))
        .and(body_json(serde_json::json!({"firstName": "Grace", "lastName": "Hopper"})))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"data":{"firstName":"Grace"},"message":"Profile updated"}"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let resp = client
        .update_profile(&ProfileUpdate {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
        })
        .await
        .unwrap();
    let data = resp.data.unwrap();
    assert_eq!(data.first_name.as_deref(), Some("Grace"));
    assert_eq!(data.last_name, None);
}

#[tokio::test]
async fn create_update_delete_paths() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/reminder"))
        .and(body_json(serde_json::json!({
            "title": "Dentist appointment",
            "description": "Bring the insurance card",
            "scheduledAt": "2030-05-14T09:30:00Z"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"message":"Created!"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/reminder/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/reminder/abc"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let created = client.create_reminder(&input()).await.unwrap();
    assert_eq!(created.message.as_deref(), Some("Created!"));
    let updated = client.update_reminder("abc", &input()).await.unwrap();
    assert_eq!(updated.message, None);
    let deleted = client.delete_reminder("abc").await.unwrap();
    assert_eq!(deleted.message, None);
}
