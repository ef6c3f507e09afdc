/*
[INPUT]:  Mock TrackIt HTTP server
[OUTPUT]: Verified sync flow through the real HTTP client
[POS]:    Integration tests - TrackitClient wired into SyncController
[UPDATE]: When the gateway wiring or wire format changes
*/

mod common;

use common::{drain, signed_in, test_user};
use serde_json::json;
use tokio_test::assert_ok;
use trackit_board::{ChannelNotifier, Notification, SyncController};
use trackit_client::{ClientConfig, TaskStatus, TokenData, TrackitClient};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> TrackitClient {
    let client = TrackitClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
        .expect("client init");
    client
        .token_store()
        .set(TokenData::new("test-token".to_string(), test_user()));
    client
}

fn task_list() -> serde_json::Value {
    json!({
        "tasks": [
            {"id": "1", "title": "A", "description": "", "status": "todo"},
            {"id": "2", "title": "B", "status": "completed", "priority": "high"},
            {"id": "3", "title": "C", "status": "archived"}
        ]
    })
}

#[tokio::test]
async fn test_start_loads_tasks_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_list()))
        .expect(1)
        .mount(&server)
        .await;

    let (notifier, mut rx) = ChannelNotifier::channel();
    let mut controller = SyncController::new(client(&server), notifier);
    assert!(controller.start(&signed_in()).await);

    let snapshot = controller.snapshot();
    let ids: Vec<&str> = snapshot.iter().map(|task| task.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert_eq!(snapshot[0].description(), None);
    assert!(drain(&mut rx).is_empty());
    controller.stop();
}

#[tokio::test]
async fn test_move_puts_status_then_relists() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/tasks/1"))
        .and(body_json(json!({"status": "in_progress"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Task updated successfully"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tasks": [{"id": "1", "title": "A", "status": "in_progress"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (notifier, mut rx) = ChannelNotifier::channel();
    let controller = SyncController::new(client(&server), notifier);

    assert_ok!(controller.move_task("1", "in_progress").await);

    assert_eq!(controller.snapshot()[0].status, TaskStatus::InProgress);
    assert_eq!(
        drain(&mut rx),
        vec![Notification::Success("Task updated successfully".to_string())]
    );
}

#[tokio::test]
async fn test_server_error_on_list_empties_store() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "Failed to fetch tasks"})))
        .mount(&server)
        .await;

    let (notifier, mut rx) = ChannelNotifier::channel();
    let mut controller = SyncController::new(client(&server), notifier);
    assert!(controller.start(&signed_in()).await);

    assert!(controller.store().is_empty());
    let notifications = drain(&mut rx);
    assert_eq!(notifications.len(), 1);
    assert!(notifications[0].message().contains("Failed to fetch tasks"));
    controller.stop();
}

#[tokio::test]
async fn test_delete_of_missing_task_reports_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/tasks/42"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Task not found"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_list()))
        .expect(0)
        .mount(&server)
        .await;

    let (notifier, mut rx) = ChannelNotifier::channel();
    let controller = SyncController::new(client(&server), notifier);

    assert!(controller.delete("42").await.is_err());
    let notifications = drain(&mut rx);
    assert_eq!(notifications.len(), 1);
    assert!(notifications[0].message().contains("Task not found"));
}
