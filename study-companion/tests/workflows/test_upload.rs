//! Upload workflow tests

use std::sync::{Arc, Mutex};

use serde_json::json;
use study_companion::workflows::{Outcome, UploadStatus, UploadWorkflow, UPLOAD_FAILED};
use study_companion_sdk::Endpoint;
use tokio::runtime::Handle;

use super::common::*;

#[tokio::test]
async fn test_successful_upload_notifies_hook() {
    let transport = FakeTransport::new();
    transport.respond(Endpoint::Upload, Scripted::Body(json!({ "message": "indexed 42 chunks" })));
    let mut upload = UploadWorkflow::new(client(&transport), Handle::current());

    let uploaded = Arc::new(Mutex::new(Vec::new()));
    let sink = uploaded.clone();
    upload.set_on_success(Box::new(move |name| sink.lock().unwrap().push(name.to_string())));

    assert!(upload.drop_file(document("chapter3.pdf")));
    assert!(upload.is_uploading());
    assert_eq!(upload.in_flight(), Some("chapter3.pdf"));
    assert!(upload.wait_for_response().await);

    assert_eq!(upload.status(), UploadStatus::Done);
    let attempt = upload.last_attempt().unwrap();
    assert_eq!(attempt.outcome, Outcome::Success);
    assert_eq!(attempt.detail, "Successfully uploaded chapter3.pdf");
    assert_eq!(*uploaded.lock().unwrap(), vec!["chapter3.pdf".to_string()]);
    assert_eq!(transport.calls()[0].file_name.as_deref(), Some("chapter3.pdf"));
}

#[tokio::test]
async fn test_failed_upload_shows_generic_message() {
    let transport = FakeTransport::new();
    transport.respond(Endpoint::Upload, Scripted::Status(500, Some("disk full")));
    let mut upload = UploadWorkflow::new(client(&transport), Handle::current());

    let calls = Arc::new(Mutex::new(0));
    let counter = calls.clone();
    upload.set_on_success(Box::new(move |_| *counter.lock().unwrap() += 1));

    upload.drop_file(document("notes.md"));
    upload.wait_for_response().await;

    let attempt = upload.last_attempt().unwrap();
    assert_eq!(attempt.outcome, Outcome::Failure);
    assert_eq!(attempt.detail, UPLOAD_FAILED);
    assert_eq!(*calls.lock().unwrap(), 0);
    assert!(!upload.is_uploading());
}

#[tokio::test]
async fn test_unparseable_ack_still_counts_as_success() {
    let transport = FakeTransport::new();
    transport.respond(Endpoint::Upload, Scripted::Body(json!("ok")));
    let mut upload = UploadWorkflow::new(client(&transport), Handle::current());

    upload.drop_file(document("book.pdf"));
    upload.wait_for_response().await;

    assert_eq!(upload.last_attempt().unwrap().outcome, Outcome::Success);
}

#[tokio::test]
async fn test_drop_during_upload_is_ignored() {
    let transport = FakeTransport::new();
    transport.respond(Endpoint::Upload, Scripted::Body(json!({})));
    let mut upload = UploadWorkflow::new(client(&transport), Handle::current());

    assert!(upload.drop_file(document("first.pdf")));
    assert!(!upload.drop_file(document("second.pdf")));
    assert!(!upload.submit());
    upload.wait_for_response().await;

    assert_eq!(transport.call_count(Endpoint::Upload), 1);
    assert_eq!(upload.last_attempt().unwrap().file_name, "first.pdf");
    assert!(upload.pending_file().is_none());
}

#[tokio::test]
async fn test_submit_without_selection_does_nothing() {
    let transport = FakeTransport::new();
    let mut upload = UploadWorkflow::new(client(&transport), Handle::current());

    assert!(!upload.submit());
    assert_eq!(upload.status(), UploadStatus::Idle);
    assert!(!upload.wait_for_response().await);
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_next_upload_replaces_previous_result() {
    let transport = FakeTransport::new();
    transport.respond(Endpoint::Upload, Scripted::Status(503, None));
    let mut upload = UploadWorkflow::new(client(&transport), Handle::current());

    upload.drop_file(document("a.pdf"));
    upload.wait_for_response().await;
    assert_eq!(upload.last_attempt().unwrap().outcome, Outcome::Failure);

    transport.respond(Endpoint::Upload, Scripted::Body(json!({})));
    upload.select_file(document("b.pdf"));
    assert!(upload.submit());
    assert!(upload.last_attempt().is_none());
    upload.wait_for_response().await;

    let attempt = upload.last_attempt().unwrap();
    assert_eq!(attempt.file_name, "b.pdf");
    assert_eq!(attempt.outcome, Outcome::Success);
}
