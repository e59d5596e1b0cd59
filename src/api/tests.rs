use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{ChatApi, HttpClient};
use crate::model::message::AgentRole;
use crate::model::patient::PatientDraft;

async fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::new(server.uri(), "http://unused.invalid")
}

#[tokio::test]
async fn list_patients_parses_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/patients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "p1", "name": "Jane", "age": 42},
            {"id": "p2", "name": "Omar", "notes": "asthma"}
        ])))
        .mount(&server)
        .await;

    let patients = client_for(&server).await.list_patients().await.unwrap();
    assert_eq!(patients.len(), 2);
    assert_eq!(patients[0].age, Some(42));
    assert_eq!(patients[1].notes.as_deref(), Some("asthma"));
}

#[tokio::test]
async fn list_patients_reports_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/patients"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "db offline"})))
        .mount(&server)
        .await;

    let err = client_for(&server).await.list_patients().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to load patients: db offline");
}

#[tokio::test]
async fn history_id_is_percent_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/patients/a%2Fb%20c/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [
                {"id": "m1", "role": "user", "agent": "user", "content": "hi", "ts": "2024-01-01T10:00:00Z"},
                {"id": "m2", "role": "assistant", "agent": "agent1", "content": "hello", "ts": "2024-01-01T10:00:01Z"}
            ]
        })))
        .mount(&server)
        .await;

    let messages = client_for(&server).await.fetch_history("a/b c").await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].agent, AgentRole::Agent1);
}

#[tokio::test]
async fn history_html_error_includes_status_and_snippet() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/patients/p1/history"))
        .respond_with(
            ResponseTemplate::new(502).set_body_string("<html>\n<body>Bad   gateway</body>\n</html>"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).await.fetch_history("p1").await.unwrap_err();
    assert_eq!(
        err.message,
        "Failed to load history: HTTP 502 Bad Gateway — <html> <body>Bad gateway</body> </html>"
    );
}

#[tokio::test]
async fn upsert_sends_only_defined_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/patients"))
        .and(body_json(json!({"name": "Jane"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p9", "name": "Jane"})))
        .expect(1)
        .mount(&server)
        .await;

    let patient = client_for(&server)
        .await
        .upsert_patient(&PatientDraft::named("Jane"))
        .await
        .unwrap();
    assert_eq!(patient.id, "p9");
}

#[tokio::test]
async fn send_message_posts_camel_case_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/send"))
        .and(body_json(json!({"patientId": "p1", "message": "Hello"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "agent1": {"id": "a1", "content": "Any fever?"},
            "agent2": {"id": "a2", "content": "Hydrate."},
            "threadId": "t1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server)
        .await
        .send_message("p1", "Hello")
        .await
        .unwrap();
    assert_eq!(reply.thread_id.as_deref(), Some("t1"));
    let [first, second] = reply.agent_messages();
    assert_eq!(first.content, "Any fever?");
    assert_eq!(second.content, "Hydrate.");
}

#[tokio::test]
async fn send_message_error_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/send"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({"error": "slow down"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .send_message("p1", "Hello")
        .await
        .unwrap_err();
    assert_eq!(err.message, "Failed to send message: slow down");
}

#[tokio::test]
async fn undecodable_success_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/patients"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).await.list_patients().await.unwrap_err();
    assert!(err
        .message
        .starts_with("Failed to load patients: invalid response body:"));
}

#[tokio::test]
async fn unreachable_backend_is_a_request_error() {
    let client = HttpClient::new("http://127.0.0.1:1".into(), "http://unused.invalid");
    let err = client.list_patients().await.unwrap_err();
    assert!(err.message.starts_with("Failed to load patients: "));
}

#[test]
fn relative_base_is_kept_for_display() {
    let client = HttpClient::new("/api".into(), "http://localhost:5173");
    assert_eq!(client.base_url(), "/api");
    assert_eq!(client.url("/patients"), "http://localhost:5173/api/patients");
}
