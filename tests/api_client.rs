use std::time::Duration;

use pubquiz_lib::api::{ApiError, QuestionId, QuestionPayload, QuizApiClient};
use pubquiz_lib::catalog::load_categories;
use pubquiz_lib::settings::Settings;
use pubquiz_lib::status::{check_status, ConnectionStatus};
use reqwest::StatusCode;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(uri: &str, health_timeout: Duration) -> QuizApiClient {
    let base = Url::parse(&format!("{}/", uri)).unwrap();
    QuizApiClient::with_base_url(base, health_timeout).unwrap()
}

fn payload() -> QuestionPayload {
    QuestionPayload {
        question_text: "What is the speed of light?".to_string(),
        answer_text: "299,792 km/s".to_string(),
        question_type: "text".to_string(),
        category: "Science".to_string(),
        subcategory: "Physics".to_string(),
        media_file_path: None,
    }
}

#[tokio::test]
async fn health_success_reports_connected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
        .expect(1)
        .mount(&server)
        .await;

    let report = check_status(&client_for(&server.uri(), Duration::from_secs(2))).await;
    assert_eq!(report.status, ConnectionStatus::Connected);
    assert_eq!(report.label, "API Connected");
    assert!(report.checked_at.is_some());
}

#[tokio::test]
async fn health_server_error_reports_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let report = check_status(&client_for(&server.uri(), Duration::from_secs(2))).await;
    assert_eq!(report.status, ConnectionStatus::Error);
    assert_eq!(report.label, "API Error");
}

#[tokio::test]
async fn unreachable_api_reports_disconnected() {
    // nothing listens on port 1
    let report = check_status(&client_for("http://127.0.0.1:1", Duration::from_secs(2))).await;
    assert_eq!(report.status, ConnectionStatus::Error);
    assert_eq!(report.label, "API Disconnected");
}

#[tokio::test]
async fn slow_health_check_is_bounded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let report = check_status(&client_for(&server.uri(), Duration::from_millis(200))).await;
    assert_eq!(report.status, ConnectionStatus::Error);
}

#[tokio::test]
async fn categories_keep_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"Science":["Physics","Chemistry"],"History":["Ancient","Modern"],"Music":["Pop","90s"]}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let catalog = load_categories(&client_for(&server.uri(), Duration::from_secs(2)))
        .await
        .unwrap();
    assert_eq!(catalog.categories().collect::<Vec<_>>(), ["Science", "History", "Music"]);
    assert_eq!(catalog.subcategories_for("Music"), ["Pop", "90s"]);
}

#[tokio::test]
async fn categories_failure_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = load_categories(&client_for(&server.uri(), Duration::from_secs(2))).await;
    assert!(matches!(
        result,
        Err(ApiError::Rejected { status, .. }) if status == StatusCode::INTERNAL_SERVER_ERROR
    ));
}

#[tokio::test]
async fn malformed_categories_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"["Science"]"#, "application/json"))
        .mount(&server)
        .await;

    let result = load_categories(&client_for(&server.uri(), Duration::from_secs(2))).await;
    assert!(matches!(result, Err(ApiError::InvalidResponse(_))));
}

#[tokio::test]
async fn create_question_posts_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/questions/"))
        .and(body_json(json!({
            "question_text": "What is the speed of light?",
            "answer_text": "299,792 km/s",
            "question_type": "text",
            "category": "Science",
            "subcategory": "Physics"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 42, "category": "Science"})))
        .expect(1)
        .mount(&server)
        .await;

    let created = client_for(&server.uri(), Duration::from_secs(2))
        .create_question(&payload())
        .await
        .unwrap();
    assert_eq!(created.id, QuestionId::Number(42));
}

#[tokio::test]
async fn rejected_question_carries_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/questions/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "category required"})))
        .mount(&server)
        .await;

    let err = client_for(&server.uri(), Duration::from_secs(2))
        .create_question(&payload())
        .await
        .unwrap_err();
    match err {
        ApiError::Rejected { status, detail } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(detail.as_deref(), Some("category required"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn rejected_question_without_json_has_no_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/questions/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server.uri(), Duration::from_secs(2))
        .create_question(&payload())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Rejected { detail: None, .. }));
}

#[test]
fn client_from_settings_reports_bad_base_url() {
    let settings = Settings {
        api_base_url: "not a url".to_string(),
        ..Settings::default()
    };
    assert!(matches!(QuizApiClient::new(&settings), Err(ApiError::Settings(_))));

    let settings = Settings {
        api_base_url: "http://quiz.local:8000/api".to_string(),
        ..Settings::default()
    };
    let client = QuizApiClient::new(&settings).unwrap();
    assert_eq!(client.base_url().as_str(), "http://quiz.local:8000/api/");
}
