mod common;

use common::{MemorySink, TestApp, TestAppOptions};

use catalog_backend::api::build_routes;
use catalog_backend::config::MailSettings;
use poem::http::StatusCode;
use poem::test::{TestClient, TestForm, TestFormField, TestResponse};
use serde_json::{json, Value};
use std::sync::Arc;

const SERVER_URL: &str = "http://localhost:5000/api";

fn client(app: &TestApp) -> TestClient<impl poem::Endpoint> {
    TestClient::new(build_routes(app.app_data.clone(), SERVER_URL))
}

fn image(field: &str, file_name: &str) -> TestFormField {
    TestFormField::bytes(b"\x89PNG fake image".to_vec())
        .name(field)
        .filename(file_name)
        .content_type("image/png")
}

fn shirt_form() -> TestForm {
    TestForm::new()
        .text("name", "Blue Denim Shirt")
        .text("type", "Shirt")
        .text("description", "Comfortable blue denim shirt")
        .field(image("coverImage", "a.png"))
}

async fn body(resp: TestResponse) -> Value {
    resp.0
        .into_body()
        .into_json::<Value>()
        .await
        .expect("response body is not JSON")
}

async fn create_shirt(cli: &TestClient<impl poem::Endpoint>) -> Value {
    let resp = cli.post("/api/items").multipart(shirt_form()).send().await;
    resp.assert_status(StatusCode::CREATED);
    body(resp).await["data"].clone()
}

#[tokio::test]
async fn test_health_reports_running() {
    let app = TestApp::new().await;
    let cli = client(&app);

    let resp = cli.get("/api/health").send().await;
    resp.assert_status_is_ok();

    let json = body(resp).await;
    assert_eq!(json["success"], json!(true));
    assert_eq!(json["message"], json!("Catalog API is running!"));
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let app = TestApp::new().await;
    let cli = client(&app);

    let resp = cli.get("/nowhere").send().await;
    resp.assert_status(StatusCode::NOT_FOUND);

    let json = body(resp).await;
    assert_eq!(json, json!({ "success": false, "message": "Route not found" }));
}

#[tokio::test]
async fn test_create_returns_created_item_and_serves_cover() {
    let app = TestApp::new().await;
    let cli = client(&app);

    let resp = cli.post("/api/items").multipart(shirt_form()).send().await;
    resp.assert_status(StatusCode::CREATED);

    let json = body(resp).await;
    assert_eq!(json["success"], json!(true));
    assert_eq!(json["message"], json!("Item successfully added"));

    let item = &json["data"];
    assert_eq!(item["name"], json!("Blue Denim Shirt"));
    assert_eq!(item["type"], json!("Shirt"));
    assert_eq!(item["additionalImages"], json!([]));

    let cover = item["coverImage"].as_str().unwrap();
    assert!(cover.starts_with("coverImage-"));
    assert!(cover.ends_with(".png"));
    assert_eq!(app.stored_files(), vec![cover.to_string()]);

    let served = cli.get(format!("/uploads/{}", cover)).send().await;
    served.assert_status_is_ok();
}

#[tokio::test]
async fn test_create_without_fields_lists_every_error() {
    let app = TestApp::new().await;
    let cli = client(&app);

    let form = TestForm::new().field(image("additionalImages", "b.png"));
    let resp = cli.post("/api/items").multipart(form).send().await;
    resp.assert_status(StatusCode::BAD_REQUEST);

    let json = body(resp).await;
    assert_eq!(json["success"], json!(false));
    assert_eq!(json["message"], json!("Validation Error"));
    assert_eq!(json["errors"].as_array().unwrap().len(), 4);
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_create_with_unknown_type_keeps_no_files() {
    let app = TestApp::new().await;
    let cli = client(&app);

    let form = TestForm::new()
        .text("name", "Bucket Hat")
        .text("type", "Hat")
        .text("description", "Not a catalog type")
        .field(image("coverImage", "a.png"))
        .field(image("additionalImages", "b.png"));
    let resp = cli.post("/api/items").multipart(form).send().await;
    resp.assert_status(StatusCode::BAD_REQUEST);

    assert!(app.stored_files().is_empty());

    let list = body(cli.get("/api/items").send().await).await;
    assert_eq!(list["count"], json!(0));
}

#[tokio::test]
async fn test_non_image_upload_is_rejected() {
    let app = TestApp::new().await;
    let cli = client(&app);

    let form = TestForm::new()
        .text("name", "Blue Denim Shirt")
        .text("type", "Shirt")
        .text("description", "Comfortable blue denim shirt")
        .field(
            TestFormField::bytes(b"hello".to_vec())
                .name("coverImage")
                .filename("notes.txt")
                .content_type("text/plain"),
        );
    let resp = cli.post("/api/items").multipart(form).send().await;
    resp.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let json = body(resp).await;
    assert_eq!(json["message"], json!("Only image files are allowed!"));
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let app = TestApp::with_options(TestAppOptions {
        max_file_bytes: 8,
        ..Default::default()
    })
    .await;
    let cli = client(&app);

    let resp = cli.post("/api/items").multipart(shirt_form()).send().await;
    resp.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_list_returns_newest_first() {
    let app = TestApp::new().await;
    let cli = client(&app);

    let first = create_shirt(&cli).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = create_shirt(&cli).await;

    let resp = cli.get("/api/items").send().await;
    resp.assert_status_is_ok();

    let json = body(resp).await;
    assert_eq!(json["message"], json!("Items retrieved successfully"));
    assert_eq!(json["count"], json!(2));
    assert_eq!(json["data"][0]["id"], second["id"]);
    assert_eq!(json["data"][1]["id"], first["id"]);
}

#[tokio::test]
async fn test_get_with_malformed_id_is_bad_request() {
    let app = TestApp::new().await;
    let cli = client(&app);

    let resp = cli.get("/api/items/not-an-id").send().await;
    resp.assert_status(StatusCode::BAD_REQUEST);

    let json = body(resp).await;
    assert_eq!(json["message"], json!("Invalid ID format"));
}

#[tokio::test]
async fn test_get_missing_item_is_not_found() {
    let app = TestApp::new().await;
    let cli = client(&app);

    let resp = cli
        .get("/api/items/6f9619ff-8b86-4d01-b42d-00cf4fc964ff")
        .send()
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);

    let json = body(resp).await;
    assert_eq!(json["message"], json!("Item not found"));
}

#[tokio::test]
async fn test_update_replaces_additional_set_and_cleans_up() {
    let app = TestApp::new().await;
    let cli = client(&app);

    let created = create_shirt(&cli).await;
    let id = created["id"].as_str().unwrap();

    let form = TestForm::new()
        .field(image("additionalImages", "b.png"))
        .field(image("additionalImages", "c.png"));
    let resp = cli.put(format!("/api/items/{}", id)).multipart(form).send().await;
    resp.assert_status_is_ok();

    let json = body(resp).await;
    assert_eq!(json["message"], json!("Item updated successfully"));
    assert_eq!(json["data"]["name"], json!("Blue Denim Shirt"));
    assert_eq!(json["data"]["coverImage"], created["coverImage"]);
    assert_eq!(json["data"]["additionalImages"].as_array().unwrap().len(), 2);
    assert_eq!(app.stored_files().len(), 3);

    let form = TestForm::new().field(image("additionalImages", "d.png"));
    let resp = cli.put(format!("/api/items/{}", id)).multipart(form).send().await;
    resp.assert_status_is_ok();

    let json = body(resp).await;
    let additional = json["data"]["additionalImages"].as_array().unwrap().clone();
    assert_eq!(additional.len(), 1);

    let mut expected = vec![
        created["coverImage"].as_str().unwrap().to_string(),
        additional[0].as_str().unwrap().to_string(),
    ];
    expected.sort();
    assert_eq!(app.stored_files(), expected);
}

#[tokio::test]
async fn test_update_with_six_additional_images_is_rejected() {
    let app = TestApp::new().await;
    let cli = client(&app);

    let created = create_shirt(&cli).await;
    let id = created["id"].as_str().unwrap();
    let before = app.stored_files();

    let mut form = TestForm::new();
    for i in 0..6 {
        form = form.field(image("additionalImages", &format!("{}.png", i)));
    }
    let resp = cli.put(format!("/api/items/{}", id)).multipart(form).send().await;
    resp.assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(app.stored_files(), before);

    let json = body(cli.get(format!("/api/items/{}", id)).send().await).await;
    assert_eq!(json["data"]["additionalImages"], json!([]));
}

#[tokio::test]
async fn test_delete_removes_record_and_files() {
    let app = TestApp::new().await;
    let cli = client(&app);

    let created = create_shirt(&cli).await;
    let id = created["id"].as_str().unwrap();

    let resp = cli.delete(format!("/api/items/{}", id)).send().await;
    resp.assert_status_is_ok();

    let json = body(resp).await;
    assert_eq!(json, json!({ "success": true, "message": "Item deleted successfully" }));
    assert!(app.stored_files().is_empty());

    cli.get(format!("/api/items/{}", id))
        .send()
        .await
        .assert_status(StatusCode::NOT_FOUND);
    cli.delete(format!("/api/items/{}", id))
        .send()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_enquiry_notifies_owner() {
    let app = TestApp::new().await;
    let cli = client(&app);

    let created = create_shirt(&cli).await;
    let id = created["id"].as_str().unwrap();

    let resp = cli
        .post(format!("/api/enquiry/{}", id))
        .body_json(&json!({
            "customerName": "Jane Doe",
            "customerEmail": "jane@example.com",
            "message": "Is this available in large?"
        }))
        .send()
        .await;
    resp.assert_status_is_ok();

    let json = body(resp).await;
    assert_eq!(
        json["message"],
        json!("Enquiry sent successfully! We will get back to you soon.")
    );

    let sent = app.sink.messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "owner@example.com");
    assert_eq!(sent[0].subject, "New Enquiry for Item: Blue Denim Shirt");
    assert!(sent[0].html_body.contains("Jane Doe"));
    assert!(sent[0].html_body.contains("Is this available in large?"));
}

#[tokio::test]
async fn test_enquiry_for_missing_item_sends_nothing() {
    let app = TestApp::new().await;
    let cli = client(&app);

    let resp = cli
        .post("/api/enquiry/6f9619ff-8b86-4d01-b42d-00cf4fc964ff")
        .body_json(&json!({}))
        .send()
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);
    assert!(app.sink.messages().is_empty());
}

#[tokio::test]
async fn test_enquiry_without_mail_settings_fails() {
    let app = TestApp::with_options(TestAppOptions {
        mail: MailSettings::default(),
        ..Default::default()
    })
    .await;
    let cli = client(&app);

    let created = create_shirt(&cli).await;
    let id = created["id"].as_str().unwrap();

    let resp = cli
        .post(format!("/api/enquiry/{}", id))
        .body_json(&json!({ "message": "Hello" }))
        .send()
        .await;
    resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let json = body(resp).await;
    assert_eq!(json["success"], json!(false));
    assert!(app.sink.messages().is_empty());
}

#[tokio::test]
async fn test_enquiry_delivery_failure_is_reported() {
    let app = TestApp::with_options(TestAppOptions {
        sink: Arc::new(MemorySink::failing("smtp unreachable")),
        ..Default::default()
    })
    .await;
    let cli = client(&app);

    let created = create_shirt(&cli).await;
    let id = created["id"].as_str().unwrap();

    let resp = cli
        .post(format!("/api/enquiry/{}", id))
        .body_json(&json!({}))
        .send()
        .await;
    resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let json = body(resp).await;
    assert_eq!(
        json["message"],
        json!("Failed to send enquiry email. Please try again later.")
    );

    let item = body(cli.get(format!("/api/items/{}", id)).send().await).await;
    assert_eq!(item["data"], created);
}

#[tokio::test]
async fn test_test_email_is_sent() {
    let app = TestApp::new().await;
    let cli = client(&app);

    let resp = cli.get("/api/enquiry/test").send().await;
    resp.assert_status_is_ok();

    let json = body(resp).await;
    assert_eq!(json["message"], json!("Test email sent successfully!"));
    assert_eq!(app.sink.messages()[0].subject, "Test Email - Catalog System");
}

#[tokio::test]
async fn test_seed_replaces_catalog() {
    let app = TestApp::new().await;
    let cli = client(&app);

    let existing = create_shirt(&cli).await;

    let resp = cli.post("/api/seed").send().await;
    resp.assert_status_is_ok();

    let json = body(resp).await;
    assert_eq!(json["message"], json!("Sample data seeded successfully"));
    assert_eq!(json["count"], json!(5));

    let list = body(cli.get("/api/items").send().await).await;
    assert_eq!(list["count"], json!(5));
    assert!(list["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|item| item["id"] != existing["id"]));

    // 5 covers plus 6 additional placeholders; the earlier upload is gone
    let files = app.stored_files();
    assert_eq!(files.len(), 11);
    assert!(!files.contains(&existing["coverImage"].as_str().unwrap().to_string()));
}

#[tokio::test]
async fn test_seed_route_hidden_when_disabled() {
    let app = TestApp::with_options(TestAppOptions {
        enable_seed_route: false,
        ..Default::default()
    })
    .await;
    let cli = client(&app);

    let resp = cli.post("/api/seed").send().await;
    resp.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wrong_content_type_returns_error_envelope() {
    let app = TestApp::new().await;
    let cli = client(&app);

    let resp = cli
        .post("/api/items")
        .body_json(&json!({ "name": "Blue Denim Shirt", "type": "Shirt" }))
        .send()
        .await;
    resp.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let json = body(resp).await;
    assert_eq!(json["success"], json!(false));
    assert_eq!(json["error"], json!("unsupported_content_type"));
    assert_eq!(json["statusCode"], json!(415));
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn test_malformed_enquiry_json_returns_error_envelope() {
    let app = TestApp::new().await;
    let cli = client(&app);

    let created = create_shirt(&cli).await;
    let id = created["id"].as_str().unwrap();

    let resp = cli
        .post(format!("/api/enquiry/{}", id))
        .content_type("application/json")
        .body("{\"message\": ")
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);

    let json = body(resp).await;
    assert_eq!(json["success"], json!(false));
    assert_eq!(json["error"], json!("invalid_request_body"));
    assert!(app.sink.messages().is_empty());
}

#[tokio::test]
async fn test_declared_oversized_body_is_refused_unread() {
    let app = TestApp::with_options(TestAppOptions {
        max_file_bytes: 1024,
        ..Default::default()
    })
    .await;
    let cli = client(&app);

    let resp = cli
        .post("/api/items")
        .content_type("multipart/form-data; boundary=catalog")
        .header("content-length", "10000000")
        .body("--catalog--\r\n")
        .send()
        .await;
    resp.assert_status(StatusCode::PAYLOAD_TOO_LARGE);

    let json = body(resp).await;
    assert_eq!(json["success"], json!(false));
    assert_eq!(json["error"], json!("payload_too_large"));
    assert!(json["message"]
        .as_str()
        .unwrap()
        .starts_with("Request body too large"));
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_two_cover_images_are_rejected() {
    let app = TestApp::new().await;
    let cli = client(&app);

    let form = shirt_form().field(image("coverImage", "second.png"));
    let resp = cli.post("/api/items").multipart(form).send().await;
    resp.assert_status(StatusCode::BAD_REQUEST);

    let json = body(resp).await;
    assert_eq!(json["error"], json!("too_many_files"));
    assert!(app.stored_files().is_empty());
}
