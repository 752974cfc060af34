use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};
use tempfile::TempDir;

use wheel_backend::{
    config::{DatabaseConfig, ReportConfig, ReportLanguage, StorageConfig},
    database::{DbPool, create_pool, run_migrations},
    handlers,
    services::*,
    utils::PassthroughShaper,
};

struct TestContext {
    participants: ParticipantService,
    winners: WinnerService,
    draws: DrawService,
    settings: SettingsService,
    reports: ReportService,
    uploads: UploadService,
    _upload_dir: TempDir,
}

async fn memory_pool() -> DbPool {
    let pool = create_pool(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    })
    .await
    .unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

async fn context() -> TestContext {
    let pool = memory_pool().await;
    let upload_dir = TempDir::new().unwrap();
    let winners = WinnerService::new(pool.clone());
    TestContext {
        participants: ParticipantService::new(pool.clone()),
        draws: DrawService::new(pool.clone()),
        settings: SettingsService::new(pool.clone()),
        reports: ReportService::new(
            winners.clone(),
            ReportConfig {
                rtl_shaping: false,
                font_paths: vec![],
                language: ReportLanguage::En,
            },
            std::sync::Arc::new(PassthroughShaper),
        ),
        uploads: UploadService::new(&StorageConfig {
            upload_dir: upload_dir.path().to_path_buf(),
            max_upload_bytes: 64,
        }),
        winners,
        _upload_dir: upload_dir,
    }
}

macro_rules! app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($ctx.participants.clone()))
                .app_data(web::Data::new($ctx.winners.clone()))
                .app_data(web::Data::new($ctx.draws.clone()))
                .app_data(web::Data::new($ctx.settings.clone()))
                .app_data(web::Data::new($ctx.reports.clone()))
                .app_data(web::Data::new($ctx.uploads.clone()))
                .route("/", web::get().to(handlers::root))
                .service(web::scope("/api").configure(handlers::api_config)),
        )
        .await
    };
}

fn multipart_body(boundary: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"file\"; filename=\"wheel.png\"\r\n",
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

#[actix_web::test]
async fn test_root_greeting() {
    let ctx = context().await;
    let app = app!(ctx);

    let req = test::TestRequest::get().uri("/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Welcome to the Wheel of Fortune!");
}

#[actix_web::test]
async fn test_participant_lifecycle() {
    let ctx = context().await;
    let app = app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/participants")
        .set_json(json!({ "name": "  Alice " }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Alice");

    // 重复
    let req = test::TestRequest::post()
        .uri("/api/participants")
        .set_json(json!({ "name": "Alice" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "DUPLICATE_NAME");

    // 空白
    let req = test::TestRequest::post()
        .uri("/api/participants")
        .set_json(json!({ "name": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/participants/bulk")
        .set_json(json!({ "names": ["Bob", "", "Alice", "Carol", "Bob"] }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["added"], json!(["Bob", "Carol"]));
    assert_eq!(body["data"]["skipped"], json!(["Alice", "Bob"]));
    assert_eq!(body["data"]["added_count"], 2);
    assert_eq!(body["data"]["message"], "Added 2 participants");

    let req = test::TestRequest::get().uri("/api/participants").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["count"], 3);
    assert_eq!(body["data"]["participants"], json!(["Carol", "Bob", "Alice"]));

    let req = test::TestRequest::delete()
        .uri("/api/participants/Bob")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri("/api/participants/Bob")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let req = test::TestRequest::delete().uri("/api/participants").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["removed"], 2);
}

#[actix_web::test]
async fn test_spin_until_empty() {
    let ctx = context().await;
    for name in ["Alice", "Bob"] {
        ctx.participants.add_participant(name).await.unwrap();
    }
    let app = app!(ctx);

    let mut drawn = Vec::new();
    for expected_remaining in [1, 0] {
        let req = test::TestRequest::post().uri("/api/spin").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["remaining_count"], expected_remaining);
        let winner = body["data"]["winner"].as_str().unwrap().to_string();
        assert_eq!(
            body["data"]["message"],
            format!("Congratulations! The winner is: {winner}")
        );
        drawn.push(winner);
    }
    let last = drawn[1].clone();
    drawn.sort();
    assert_eq!(drawn, vec!["Alice", "Bob"]);

    let req = test::TestRequest::post().uri("/api/spin").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "EMPTY_POOL");

    let req = test::TestRequest::get().uri("/api/winners").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["count"], 2);
    assert_eq!(body["data"]["winners"][0]["name"], last);
}

#[actix_web::test]
async fn test_winners_pdf_and_clear() {
    let ctx = context().await;
    ctx.winners.record_winner("Alice").await.unwrap();
    let app = app!(ctx);

    let req = test::TestRequest::get().uri("/api/winners/pdf").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/pdf"
    );
    let disposition = resp
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("winners_"));
    let bytes = test::read_body(resp).await;
    assert!(bytes.starts_with(b"%PDF"));

    let req = test::TestRequest::delete().uri("/api/winners").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["removed"], 1);

    // 空名单同样可以导出
    let req = test::TestRequest::get().uri("/api/winners/pdf").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_settings_endpoints() {
    let ctx = context().await;
    let app = app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/settings/text-color")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"], json!({ "color": "#333333", "exists": false }));

    let req = test::TestRequest::post()
        .uri("/api/settings/title")
        .set_json(json!({ "title": " Friday Raffle " }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], "Friday Raffle");

    let req = test::TestRequest::get().uri("/api/settings/title").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"], json!({ "title": "Friday Raffle", "exists": true }));

    let req = test::TestRequest::delete()
        .uri("/api/settings/title")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/settings/title").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"], json!({ "title": "", "exists": false }));

    let req = test::TestRequest::post()
        .uri("/api/settings/max-display-names")
        .set_json(json!({ "max_names": "abc" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["max_names"], 0);

    let req = test::TestRequest::post()
        .uri("/api/settings/max-display-names")
        .set_json(json!({ "max_names": "25" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["max_names"], 25);

    let req = test::TestRequest::post()
        .uri("/api/settings/sound-muted")
        .set_json(json!({ "muted": "yes" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["muted"], true);

    let req = test::TestRequest::get()
        .uri("/api/settings/sound-muted")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"], json!({ "muted": true, "exists": true }));

    let req = test::TestRequest::post()
        .uri("/api/settings/text-color")
        .set_json(json!({}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["color"], "#ffffff");
}

#[actix_web::test]
async fn test_malformed_json_uses_error_envelope() {
    let ctx = context().await;
    let app = app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/participants")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_wheel_image_upload() {
    let ctx = context().await;
    let app = app!(ctx);
    let boundary = "wheel-boundary";

    let req = test::TestRequest::get().uri("/api/wheel-image").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"], json!({ "url": null, "exists": false }));

    let req = test::TestRequest::post()
        .uri("/api/upload-wheel-image")
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(multipart_body(boundary, "text/plain", b"hello"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "INVALID_UPLOAD");

    let req = test::TestRequest::post()
        .uri("/api/upload-wheel-image")
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(multipart_body(boundary, "image/png", b"\x89PNG fake image"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["url"], "/uploads/wheel_center.png");

    let req = test::TestRequest::get().uri("/api/wheel-image").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body["data"],
        json!({ "url": "/uploads/wheel_center.png", "exists": true })
    );

    let req = test::TestRequest::delete()
        .uri("/api/wheel-image")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri("/api/wheel-image")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
