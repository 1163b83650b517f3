mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use serde_json::{Value, json};

use estate_api::api::handlers::{
    login_handler, refresh_token_handler, request_reset_handler, reset_password_handler,
    set_password_handler, signup_handler, verify_otp_handler,
};
use estate_api::infrastructure::oauth::OAuthProfile;

/// Build a test server with the auth routes (no rate limiting in tests).
fn make_server(context: &common::TestContext) -> TestServer {
    let app = Router::new()
        .route("/api/auth/signup", post(signup_handler))
        .route("/api/auth/verify", post(verify_otp_handler))
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/request-reset", post(request_reset_handler))
        .route("/api/auth/reset-password", post(reset_password_handler))
        .route("/api/auth/set-password", post(set_password_handler))
        .route("/api/auth/refresh-token", post(refresh_token_handler))
        .with_state(context.state.clone());
    TestServer::new(app).unwrap()
}

/// Pulls the six OTP digits out of a queued email body.
fn otp_from(body: &str) -> String {
    body.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[tokio::test]
async fn test_signup_verify_login_flow() {
    let mut context = common::create_test_state();
    let server = make_server(&context);

    // Signup queues an OTP email.
    let signup = server
        .post("/api/auth/signup")
        .json(&json!({ "email": "new@example.com", "password": "secret123" }))
        .await;
    signup.assert_status_ok();
    assert_eq!(signup.json::<Value>()["message"], "OTP sent to email");

    let job = context.mail_rx.try_recv().unwrap();
    assert_eq!(job.to, "new@example.com");
    let otp = otp_from(&job.body);
    assert_eq!(otp.len(), 6);

    // Verification issues both tokens.
    let verify = server
        .post("/api/auth/verify")
        .json(&json!({ "email": "new@example.com", "otp": otp }))
        .await;
    verify.assert_status_ok();
    let tokens = verify.json::<Value>();
    assert!(tokens["accessToken"].is_string());
    assert!(tokens["refreshToken"].is_string());

    // Password login works afterwards.
    let login = server
        .post("/api/auth/login")
        .json(&json!({ "email": "new@example.com", "password": "secret123" }))
        .await;
    login.assert_status_ok();
}

#[tokio::test]
async fn test_signup_duplicate_email_conflicts() {
    let context = common::create_test_state();
    context.users.seed_with_password("taken@example.com", "secret123");

    let server = make_server(&context);
    let response = server
        .post("/api/auth/signup")
        .json(&json!({ "email": "taken@example.com", "password": "secret123" }))
        .await;

    response.assert_status(axum::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_rejects_invalid_payload() {
    let context = common::create_test_state();
    let server = make_server(&context);

    server
        .post("/api/auth/signup")
        .json(&json!({ "email": "not-an-email", "password": "secret123" }))
        .await
        .assert_status_bad_request();

    server
        .post("/api/auth/signup")
        .json(&json!({ "email": "a@example.com", "password": "abc" }))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_verify_with_wrong_otp_fails() {
    let mut context = common::create_test_state();
    let server = make_server(&context);

    server
        .post("/api/auth/signup")
        .json(&json!({ "email": "new@example.com", "password": "secret123" }))
        .await
        .assert_status_ok();
    let _ = context.mail_rx.try_recv().unwrap();

    let response = server
        .post("/api/auth/verify")
        .json(&json!({ "email": "new@example.com", "otp": "000001" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let context = common::create_test_state();
    context.users.seed_with_password("a@example.com", "secret123");

    let server = make_server(&context);
    server
        .post("/api/auth/login")
        .json(&json!({ "email": "a@example.com", "password": "wrong" }))
        .await
        .assert_status_unauthorized();

    server
        .post("/api/auth/login")
        .json(&json!({ "email": "ghost@example.com", "password": "secret123" }))
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn test_refresh_token_round_trip() {
    let context = common::create_test_state();
    context.users.seed_with_password("a@example.com", "secret123");

    let server = make_server(&context);
    let login = server
        .post("/api/auth/login")
        .json(&json!({ "email": "a@example.com", "password": "secret123" }))
        .await
        .json::<Value>();

    let refresh_token = login["refreshToken"].as_str().unwrap();

    let refreshed = server
        .post("/api/auth/refresh-token")
        .json(&json!({ "refreshToken": refresh_token }))
        .await;
    refreshed.assert_status_ok();
    assert!(refreshed.json::<Value>()["accessToken"].is_string());
}

#[tokio::test]
async fn test_refresh_rejects_rotated_and_garbage_tokens() {
    let context = common::create_test_state();
    context.users.seed_with_password("a@example.com", "secret123");

    let server = make_server(&context);

    let first = server
        .post("/api/auth/login")
        .json(&json!({ "email": "a@example.com", "password": "secret123" }))
        .await
        .json::<Value>();
    let old_refresh = first["refreshToken"].as_str().unwrap().to_string();

    // A second login rotates the stored MAC, invalidating the first
    // refresh token.
    server
        .post("/api/auth/login")
        .json(&json!({ "email": "a@example.com", "password": "secret123" }))
        .await
        .assert_status_ok();

    server
        .post("/api/auth/refresh-token")
        .json(&json!({ "refreshToken": old_refresh }))
        .await
        .assert_status_forbidden();

    server
        .post("/api/auth/refresh-token")
        .json(&json!({ "refreshToken": "garbage" }))
        .await
        .assert_status_forbidden();
}

#[tokio::test]
async fn test_password_reset_flow() {
    let mut context = common::create_test_state();
    context.users.seed_with_password("a@example.com", "secret123");

    let server = make_server(&context);

    server
        .post("/api/auth/request-reset")
        .json(&json!({ "email": "a@example.com" }))
        .await
        .assert_status_ok();

    let job = context.mail_rx.try_recv().unwrap();
    assert_eq!(job.subject, "Reset your password");
    let otp = otp_from(&job.body);

    server
        .post("/api/auth/reset-password")
        .json(&json!({
            "email": "a@example.com",
            "otp": otp,
            "newPassword": "fresh-password"
        }))
        .await
        .assert_status_ok();

    // Old password no longer works; the new one does.
    server
        .post("/api/auth/login")
        .json(&json!({ "email": "a@example.com", "password": "secret123" }))
        .await
        .assert_status_unauthorized();

    server
        .post("/api/auth/login")
        .json(&json!({ "email": "a@example.com", "password": "fresh-password" }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_request_reset_for_unknown_email_is_not_found() {
    let context = common::create_test_state();
    let server = make_server(&context);

    server
        .post("/api/auth/request-reset")
        .json(&json!({ "email": "ghost@example.com" }))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_set_password_for_oauth_account() {
    let context = common::create_test_state();

    // An OAuth sign-in creates an account with no password.
    context
        .state
        .auth_service
        .oauth_login(OAuthProfile {
            provider_id: "g-77".to_string(),
            email: "oauth@example.com".to_string(),
            name: Some("OAuth User".to_string()),
            photo: None,
        })
        .await
        .unwrap();

    let server = make_server(&context);

    server
        .post("/api/auth/set-password")
        .json(&json!({ "email": "oauth@example.com", "password": "secret123" }))
        .await
        .assert_status_ok();

    // A second attempt is rejected: the password is already set.
    server
        .post("/api/auth/set-password")
        .json(&json!({ "email": "oauth@example.com", "password": "another" }))
        .await
        .assert_status_bad_request();

    server
        .post("/api/auth/login")
        .json(&json!({ "email": "oauth@example.com", "password": "secret123" }))
        .await
        .assert_status_ok();
}
