//! Archives and financial documents: multipart upload, blob download and
//! delete-then-reload against the mock backend.

#[path = "common.rs"]
mod common;

use axum::http::{Method, StatusCode};
use common::MockBackend;
use serde_json::json;
use tempfile::TempDir;

use cabinet::api::ApiError;
use cabinet::models::{FileCollection, Id, Role};
use cabinet::validation::ValidationError;
use cabinet::views::ListView;
use cabinet::views::files::{self, FileFilter, FilesSource, UploadForm};

#[tokio::test]
async fn test_list_sends_filter_as_query() {
    let backend = MockBackend::builder()
        .get(
            "/financial-documents",
            json!([{
                "id": 1,
                "title": "Rapport annuel",
                "category": "rapports annuels",
                "year": 2023
            }]),
        )
        .start()
        .await
        .unwrap();

    let filter = FileFilter {
        category: Some("rapports annuels".into()),
        year: Some(2023),
        search: None,
    };
    let mut view =
        ListView::with_filter(FilesSource::new(FileCollection::FinancialDocuments), filter);
    let items = view.load(&backend.client_as(Role::User)).await.unwrap();
    assert_eq!(items.len(), 1);

    let request = &backend.requests()[0];
    assert_eq!(
        request.query.as_deref(),
        Some("category=rapports+annuels&year=2023")
    );
}

#[tokio::test]
async fn test_upload_without_file_sends_no_request() {
    let backend = MockBackend::builder().start().await.unwrap();
    let form = UploadForm {
        title: "Bilan 2023".into(),
        ..Default::default()
    };

    let err = files::upload(&backend.client_as(Role::Admin), FileCollection::Archives, &form)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Please select a file to upload");
    assert!(matches!(
        err,
        ApiError::Validation(ValidationError::MissingFile)
    ));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_upload_sends_multipart_then_list_reloads() {
    let backend = MockBackend::builder()
        .json(
            Method::POST,
            "/archives",
            StatusCode::CREATED,
            json!({"id": 4}),
        )
        .get("/archives", json!([{"id": 4, "title": "Bilan 2023"}]))
        .start()
        .await
        .unwrap();
    let client = backend.client_as(Role::Admin);

    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bilan.pdf");
    std::fs::write(&path, b"%PDF-1.4 bilan").unwrap();

    let form = UploadForm {
        file: Some(path),
        title: "Bilan 2023".into(),
        category: Some("comptes".into()),
        year: Some(2023),
        ..Default::default()
    };
    let mut view = ListView::new(FilesSource::new(FileCollection::Archives));
    view.mutate(&client, files::upload(&client, FileCollection::Archives, &form))
        .await
        .unwrap();
    assert_eq!(view.items().len(), 1);

    let upload = &backend.requests_to(Method::POST, "/archives")[0];
    assert!(
        upload
            .header("content-type")
            .unwrap()
            .starts_with("multipart/form-data")
    );
    let body = upload.body_text();
    assert!(body.contains("name=\"title\""));
    assert!(body.contains("Bilan 2023"));
    assert!(body.contains("name=\"year\""));
    assert!(body.contains("filename=\"bilan.pdf\""));
    assert!(body.contains("application/pdf"));
    assert!(body.contains("%PDF-1.4 bilan"));
}

#[tokio::test]
async fn test_upload_requires_admin() {
    let backend = MockBackend::builder().start().await.unwrap();
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("a.txt");
    std::fs::write(&path, b"x").unwrap();

    let form = UploadForm {
        file: Some(path),
        title: "Note".into(),
        ..Default::default()
    };
    let err = files::upload(&backend.client_as(Role::User), FileCollection::Archives, &form)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_download_through_backend() {
    let backend = MockBackend::builder()
        .get(
            "/archives",
            json!([{"id": 9, "title": "Bilan", "file_path": "uploads/bilan-2021.pdf"}]),
        )
        .raw("/archives/9/download", "application/pdf", b"%PDF-1.4 data")
        .start()
        .await
        .unwrap();
    let client = backend.client_as(Role::User);

    let mut view = ListView::new(FilesSource::new(FileCollection::Archives));
    view.load(&client).await.unwrap();
    let record = &view.items()[0];

    let tmp = TempDir::new().unwrap();
    let saved = files::download(&client, FileCollection::Archives, record, tmp.path())
        .await
        .unwrap();
    assert_eq!(saved, tmp.path().join("bilan-2021.pdf"));
    assert_eq!(std::fs::read(&saved).unwrap(), b"%PDF-1.4 data");

    let request = &backend.requests_to(Method::GET, "/archives/9/download")[0];
    assert_eq!(request.header("x-auth-token"), Some(common::TEST_TOKEN));

    // A second download never overwrites the first.
    let again = files::download(&client, FileCollection::Archives, record, tmp.path())
        .await
        .unwrap();
    assert_eq!(again, tmp.path().join("bilan-2021 (1).pdf"));
}

#[tokio::test]
async fn test_download_external_url_skips_credential() {
    let backend = MockBackend::builder()
        .raw("/files/rapport.pdf", "application/pdf", b"external")
        .start()
        .await
        .unwrap();
    let url = format!("{}/api/files/rapport.pdf", backend.origin());
    let record = serde_json::from_value(json!({
        "id": 3,
        "title": "Rapport",
        "fileUrl": url
    }))
    .unwrap();

    let tmp = TempDir::new().unwrap();
    let saved = files::download(
        &backend.client_as(Role::User),
        FileCollection::FinancialDocuments,
        &record,
        tmp.path(),
    )
    .await
    .unwrap();
    assert_eq!(std::fs::read(saved).unwrap(), b"external");

    let request = &backend.requests()[0];
    assert_eq!(request.path, "/files/rapport.pdf");
    assert!(request.header("x-auth-token").is_none());
}

#[tokio::test]
async fn test_delete_reloads_list() {
    let backend = MockBackend::builder()
        .json(Method::DELETE, "/archives/2", StatusCode::OK, json!({"message": "Supprimé"}))
        .get("/archives", json!([]))
        .start()
        .await
        .unwrap();
    let client = backend.client_as(Role::Admin);

    let mut view = ListView::new(FilesSource::new(FileCollection::Archives));
    view.mutate(&client, files::delete(&client, FileCollection::Archives, &Id::new("2")))
        .await
        .unwrap();
    assert_eq!(view.render(), "No archives found.");

    let methods: Vec<_> = backend.requests().iter().map(|r| r.method.clone()).collect();
    assert_eq!(methods, [Method::DELETE, Method::GET]);
}
