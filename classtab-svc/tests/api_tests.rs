//! Integration tests for classtab-svc API endpoints

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use classtab_svc::{build_router, AppState, ServiceConfig};

/// Test helper: create test app with a temp static directory
fn create_test_app() -> (axum::Router, tempfile::TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = ServiceConfig {
        port: 0,
        static_dir: temp_dir.path().to_path_buf(),
        base_url: Some("https://files.example".to_string()),
    };
    let app = build_router(AppState::new(config));
    (app, temp_dir)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn root_reports_service_running() {
    let (app, _dir) = create_test_app();
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Service is running! All systems go.");
}

#[tokio::test]
async fn health_reports_module_and_version() {
    let (app, _dir) = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "classtab-svc");
}

#[tokio::test]
async fn process_without_file_url_is_bad_request() {
    let (app, _dir) = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/process")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::HOST, "localhost")
                .body(Body::from(json!({}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn process_with_blank_file_url_is_bad_request() {
    let (app, _dir) = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/process_winter_homework")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::HOST, "localhost")
                .body(Body::from(json!({ "file_url": "  " }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn process_with_unfetchable_url_is_bad_gateway() {
    let (app, _dir) = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/process_compact")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::HOST, "localhost")
                .body(
                    Body::from(
                        json!({ "file_url": "http://127.0.0.1:1/none.xlsx" }).to_string(),
                    ),
                )
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "FETCH_FAILED");
}

#[tokio::test]
async fn static_serves_generated_workbooks() {
    let (app, dir) = create_test_app();
    std::fs::write(dir.path().join("result_test.xlsx"), b"stub").unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/static/result_test.xlsx")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

/// Full flow: fetch a real workbook from a local listener, process it, and
/// check the generated result file
#[tokio::test]
async fn process_winter_homework_end_to_end() {
    let (app, dir) = create_test_app();

    // Source workbook in the static dir of a second, actually-bound server
    let source_path = dir.path().join("source.xlsx");
    let mut workbook = rust_xlsxwriter::Workbook::new();
    {
        let ws = workbook.add_worksheet();
        let headers = ["序号", "教材名称", "出版社", "书号", "使用班级"];
        for (col, label) in headers.iter().enumerate() {
            ws.write_string(0, col as u16, *label).unwrap();
        }
        ws.write_string(1, 1, "语文").unwrap();
        ws.write_string(1, 2, "人民教育出版社").unwrap();
        ws.write_string(1, 3, "9787107000001").unwrap();
        ws.write_string(1, 4, "2402班38人 2401班40人").unwrap();
    }
    workbook.save(&source_path).unwrap();

    let serve_app = build_router(AppState::new(ServiceConfig {
        port: 0,
        static_dir: dir.path().to_path_buf(),
        base_url: None,
    }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, serve_app).await.unwrap();
    });

    let file_url = format!("http://127.0.0.1:{port}/static/source.xlsx");
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/process_winter_homework")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::HOST, "localhost")
                .body(Body::from(json!({ "file_url": file_url }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "success");
    let download_url = body["download_url"].as_str().unwrap();
    assert!(download_url.starts_with("https://files.example/static/winter_hw_"));

    // The generated workbook landed in the static dir
    let generated: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with("winter_hw_"))
        .collect();
    assert_eq!(generated.len(), 1);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (app, _dir) = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
