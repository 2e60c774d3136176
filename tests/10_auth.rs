mod common;

use anyhow::Result;
use common::{body_json, MockBackend, TestGateway};
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let gateway = TestGateway::start(MockBackend::new()).await?;

    let res = gateway.get("/health").send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_json(res).await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(gateway.backend.call_count(), 0, "health must not reach the backend");
    Ok(())
}

#[tokio::test]
async fn login_success_returns_token_and_sets_cookie() -> Result<()> {
    let backend = MockBackend::new().ok(
        "POST",
        "/auth/login",
        json!({ "accessToken": "tok", "tokenType": "Bearer" }),
    );
    let gateway = TestGateway::start(backend).await?;

    let res = gateway
        .post("/api/auth/login")
        .json(&json!({ "accountId": "store01", "password": "secret" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let cookie = res
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(cookie.starts_with("accessToken=tok"), "unexpected cookie: {}", cookie);
    assert!(cookie.contains("HttpOnly"));

    let body = body_json(res).await?;
    assert_eq!(
        body,
        json!({ "success": true, "data": { "accessToken": "tok", "tokenType": "Bearer" } })
    );

    let calls = gateway.backend.calls_to("/auth/login");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].json()?, json!({ "accountId": "store01", "password": "secret" }));
    assert!(calls[0]
        .content_type
        .as_deref()
        .unwrap_or_default()
        .starts_with("application/json"));
    assert!(calls[0].authorization.is_none());
    Ok(())
}

#[tokio::test]
async fn login_rejected_by_backend_keeps_status_and_message() -> Result<()> {
    let backend = MockBackend::new().fail(
        "POST",
        "/auth/login",
        401,
        json!({ "errorCode": "E1", "errorMessage": "bad credentials" }),
    );
    let gateway = TestGateway::start(backend).await?;

    let res = gateway
        .post("/api/auth/login")
        .json(&json!({ "accountId": "store01", "password": "wrong" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.headers().get(reqwest::header::SET_COOKIE).is_none());

    let body = body_json(res).await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "bad credentials");
    Ok(())
}

#[tokio::test]
async fn login_missing_fields_never_reach_backend() -> Result<()> {
    let gateway = TestGateway::start(MockBackend::new()).await?;

    for payload in [
        json!({ "password": "secret" }),
        json!({ "accountId": "store01" }),
        json!({ "accountId": "  ", "password": "secret" }),
    ] {
        let res = gateway.post("/api/auth/login").json(&payload).send().await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "payload {}", payload);
        let body = body_json(res).await?;
        assert_eq!(body["success"], false);
    }

    // An empty body reads as an empty object
    let res = gateway.post("/api/auth/login").send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    assert_eq!(gateway.backend.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn malformed_login_body_is_an_unexpected_error() -> Result<()> {
    let gateway = TestGateway::start(MockBackend::new()).await?;

    let res = gateway
        .post("/api/auth/login")
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(res).await?;
    let message = body["message"].as_str().unwrap_or_default();
    assert!(message.starts_with("Login error:"), "unexpected message: {}", message);
    assert_eq!(gateway.backend.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn signup_conflict_passes_status_through() -> Result<()> {
    let backend = MockBackend::new().fail(
        "POST",
        "/auth/register",
        409,
        json!({
            "errorCode": "DUPLICATE",
            "errorMessage": "Already registered",
            "validation": { "accountId": "account id in use" }
        }),
    );
    let gateway = TestGateway::start(backend).await?;

    let res = gateway
        .post("/api/auth/signup")
        .json(&json!({
            "accountId": "store01",
            "password": "secret",
            "businessNumber": "123-45-67890",
            "storeName": "Noodle Bar",
            "ownerName": "Kim",
            "phone": "010-0000-0000"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let body = body_json(res).await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Already registered - account id in use");

    // Extra form fields are forwarded untouched
    let calls = gateway.backend.calls_to("/auth/register");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].json()?["phone"], "010-0000-0000");
    Ok(())
}

#[tokio::test]
async fn signup_requires_every_field() -> Result<()> {
    let gateway = TestGateway::start(MockBackend::new()).await?;

    let res = gateway
        .post("/api/auth/signup")
        .json(&json!({ "accountId": "store01", "password": "secret", "storeName": "Noodle Bar", "ownerName": "Kim" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await?;
    assert_eq!(body["message"], "businessNumber is required");
    assert_eq!(gateway.backend.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn empty_error_body_falls_back_to_status_text() -> Result<()> {
    let backend = MockBackend::new().raw("POST", "/auth/register", 409, "");
    let gateway = TestGateway::start(backend).await?;

    let res = gateway
        .post("/api/auth/signup")
        .json(&json!({
            "accountId": "store01",
            "password": "secret",
            "businessNumber": "123-45-67890",
            "storeName": "Noodle Bar",
            "ownerName": "Kim"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = body_json(res).await?;
    assert_eq!(body["message"], "Signup failed: Conflict");
    Ok(())
}

#[tokio::test]
async fn check_id_is_idempotent() -> Result<()> {
    let backend = MockBackend::new().ok("GET", "/auth/checkAccountId", json!(true));
    let gateway = TestGateway::start(backend).await?;

    let mut answers = Vec::new();
    for _ in 0..2 {
        let res = gateway.get("/api/auth/check-id?accountId=store01").send().await?;
        assert_eq!(res.status(), StatusCode::OK);
        answers.push(body_json(res).await?);
    }
    assert_eq!(answers[0], answers[1]);
    assert_eq!(answers[0], json!({ "success": true, "data": { "available": true } }));

    let calls = gateway.backend.calls_to("/auth/checkAccountId");
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].query.as_deref(), Some("accountId=store01"));
    Ok(())
}

#[tokio::test]
async fn check_id_accepts_object_shaped_answer() -> Result<()> {
    let backend = MockBackend::new().ok(
        "GET",
        "/auth/checkAccountId",
        json!({ "available": false, "accountId": "store01" }),
    );
    let gateway = TestGateway::start(backend).await?;

    let res = gateway.get("/api/auth/check-id?accountId=store01").send().await?;
    let body = body_json(res).await?;
    assert_eq!(body["data"], json!({ "available": false }));
    Ok(())
}

#[tokio::test]
async fn check_id_without_account_id_is_rejected() -> Result<()> {
    let gateway = TestGateway::start(MockBackend::new()).await?;

    let res = gateway.get("/api/auth/check-id").send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(gateway.backend.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn ocr_forwards_the_uploaded_file() -> Result<()> {
    let backend = MockBackend::new().ok(
        "POST",
        "/auth/ocr",
        json!({ "businessNumber": "123-45-67890", "storeName": "Noodle Bar" }),
    );
    let gateway = TestGateway::start(backend).await?;

    let form = reqwest::multipart::Form::new().part(
        "file",
        reqwest::multipart::Part::bytes(b"fake-image-bytes".to_vec())
            .file_name("licence.png")
            .mime_str("image/png")?,
    );
    let res = gateway.post("/api/auth/ocr").multipart(form).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_json(res).await?;
    assert_eq!(body["data"]["storeName"], "Noodle Bar");

    let calls = gateway.backend.calls_to("/auth/ocr");
    assert_eq!(calls.len(), 1);
    assert!(calls[0]
        .content_type
        .as_deref()
        .unwrap_or_default()
        .starts_with("multipart/form-data"));
    let forwarded = String::from_utf8_lossy(&calls[0].body);
    assert!(forwarded.contains("fake-image-bytes"));
    assert!(forwarded.contains("licence.png"));
    Ok(())
}

#[tokio::test]
async fn ocr_without_file_is_rejected() -> Result<()> {
    let gateway = TestGateway::start(MockBackend::new()).await?;

    let form = reqwest::multipart::Form::new().text("note", "no file here");
    let res = gateway.post("/api/auth/ocr").multipart(form).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(gateway.backend.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn logout_expires_the_cookie_locally() -> Result<()> {
    let gateway = TestGateway::start(MockBackend::new()).await?;

    let res = common::with_session(gateway.post("/api/auth/logout")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = res
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(cookie.starts_with("accessToken=;"), "unexpected cookie: {}", cookie);
    assert!(cookie.contains("Max-Age=0"));

    let body = body_json(res).await?;
    assert_eq!(body["success"], true);
    assert_eq!(gateway.backend.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn ocr_with_non_multipart_body_gets_json_error() -> Result<()> {
    let gateway = TestGateway::start(MockBackend::new()).await?;

    let res = gateway
        .post("/api/auth/ocr")
        .json(&json!({ "file": "licence.png" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].is_string());

    let res = gateway.post("/api/auth/ocr").send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res).await?["success"], false);

    assert_eq!(gateway.backend.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn undecodable_query_gets_json_error() -> Result<()> {
    let gateway = TestGateway::start(MockBackend::new()).await?;

    let res = gateway
        .get("/api/auth/check-id?accountId=a&accountId=b")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(gateway.backend.call_count(), 0);
    Ok(())
}
