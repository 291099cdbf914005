//! Notification list actions and the background poller.

#[path = "common.rs"]
mod common;

use axum::http::{Method, StatusCode};
use common::MockBackend;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use cabinet::models::{Id, Role};
use cabinet::views::ListView;
use cabinet::views::notifications::{
    self, NotificationPoller, NotificationsFilter, NotificationsSource,
};

#[tokio::test]
async fn test_mark_read_reloads_unread_filter() {
    let read = Arc::new(Mutex::new(false));
    let list_read = read.clone();
    let mark = read.clone();
    let backend = MockBackend::builder()
        .route(Method::GET, "/notifications", move |_| {
            let is_read = *list_read.lock().unwrap();
            (
                StatusCode::OK,
                json!([
                    {"id": 1, "title": "Réservation approuvée", "is_read": is_read},
                    {"id": 2, "title": "Nouveau document", "is_read": true}
                ]),
            )
        })
        .route(Method::PUT, "/notifications/1/read", move |_| {
            *mark.lock().unwrap() = true;
            (StatusCode::OK, json!({}))
        })
        .start()
        .await
        .unwrap();
    let client = backend.client_as(Role::User);

    let mut view = ListView::with_filter(
        NotificationsSource,
        NotificationsFilter { unread_only: true },
    );
    assert_eq!(view.load(&client).await.unwrap().len(), 1);

    view.mutate(&client, notifications::mark_read(&client, &Id::new("1")))
        .await
        .unwrap();
    assert!(view.is_empty());
    assert_eq!(view.render(), "No notifications.");
}

#[tokio::test]
async fn test_read_all_and_delete_paths() {
    let backend = MockBackend::builder()
        .json(Method::PUT, "/notifications/read-all", StatusCode::OK, json!({}))
        .json(Method::DELETE, "/notifications/4", StatusCode::NO_CONTENT, json!(null))
        .start()
        .await
        .unwrap();
    let client = backend.client_as(Role::User);

    notifications::mark_all_read(&client).await.unwrap();
    notifications::delete(&client, &Id::new("4")).await.unwrap();

    let paths: Vec<_> = backend.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, ["/notifications/read-all", "/notifications/4"]);
}

#[tokio::test]
async fn test_poller_reports_new_unread() {
    let calls = Arc::new(Mutex::new(0u32));
    let counter = calls.clone();
    let backend = MockBackend::builder()
        .route(Method::GET, "/notifications", move |_| {
            let mut n = counter.lock().unwrap();
            *n += 1;
            let body = if *n == 1 {
                json!([{"id": 1, "title": "Bienvenue", "is_read": false}])
            } else {
                json!([
                    {"id": 1, "title": "Bienvenue", "is_read": false},
                    {"id": 2, "title": "Réservation approuvée", "is_read": false}
                ])
            };
            (StatusCode::OK, body)
        })
        .start()
        .await
        .unwrap();

    let poller = NotificationPoller::new(backend.client_as(Role::User), Duration::from_millis(50));
    let (mut rx, handle) = poller.spawn();

    let first = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.unread, 1);
    assert!(first.new.is_empty());

    let second = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.unread, 2);
    assert_eq!(second.new.len(), 1);
    assert_eq!(second.new[0].id, Id::new("2"));

    drop(rx);
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn test_poller_survives_failed_poll() {
    let calls = Arc::new(Mutex::new(0u32));
    let counter = calls.clone();
    let backend = MockBackend::builder()
        .route(Method::GET, "/notifications", move |_| {
            let mut n = counter.lock().unwrap();
            *n += 1;
            if *n == 1 {
                (StatusCode::SERVICE_UNAVAILABLE, json!({"message": "Maintenance"}))
            } else {
                (StatusCode::OK, json!([]))
            }
        })
        .start()
        .await
        .unwrap();

    let poller = NotificationPoller::new(backend.client_as(Role::User), Duration::from_millis(50));
    let (mut rx, _handle) = poller.spawn();

    let snapshot = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(snapshot.unread, 0);
    assert!(*calls.lock().unwrap() >= 2);
}

#[tokio::test]
async fn test_poller_with_zero_interval_still_runs() {
    let backend = MockBackend::builder()
        .get("/notifications", json!([{"id": 1, "title": "Bienvenue", "is_read": false}]))
        .start()
        .await
        .unwrap();

    let poller = NotificationPoller::new(backend.client_as(Role::User), Duration::ZERO);
    let (mut rx, handle) = poller.spawn();

    let snapshot = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .expect("poller task ended without a snapshot");
    assert_eq!(snapshot.unread, 1);

    drop(rx);
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();
}
