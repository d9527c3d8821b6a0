mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use material_todo_api::database::UserStore;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = server.client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn signup_stores_a_digest_and_default_avatar() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = server.signup("Ann", "ann@x.com", "secret1").await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.json::<Value>().await?, json!({}));

    let user = server
        .store
        .find_user_by_email("ann@x.com")
        .await?
        .expect("user row");
    assert_ne!(user.password, "secret1");
    assert!(user.password.starts_with("$argon2"));
    assert_eq!(user.image, "uploads/default_avatar.png");
    Ok(())
}

#[tokio::test]
async fn signup_accepts_multipart_fields() -> Result<()> {
    let server = common::ensure_server().await?;

    let form = reqwest::multipart::Form::new()
        .text("full_name", "Ann")
        .text("email", "ann@x.com")
        .text("password", "secret1")
        .part(
            "image",
            reqwest::multipart::Part::bytes(b"PNGDATA".to_vec()).file_name("ann.png"),
        );
    let res = server
        .client
        .post(server.url("/api/auth/signup"))
        .multipart(form)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let user = server
        .store
        .find_user_by_email("ann@x.com")
        .await?
        .expect("user row");
    assert_eq!(user.full_name, "Ann");
    assert_eq!(user.image, "uploads/default_avatar.png");

    let form = reqwest::multipart::Form::new()
        .text("email", "ann@x.com")
        .text("password", "secret1");
    let res = server
        .client
        .post(server.url("/api/auth/login"))
        .multipart(form)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.json::<Value>().await?["token"].is_string());
    Ok(())
}

#[tokio::test]
async fn signup_requires_all_fields() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = server.signup("Ann", "", "secret1").await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>().await?,
        json!({ "error": "Full Name, Email, and Password are required" })
    );
    assert_eq!(server.store.user_count().await, 0);
    Ok(())
}

#[tokio::test]
async fn duplicate_signup_conflicts_and_keeps_first_account() -> Result<()> {
    let server = common::ensure_server().await?;

    server.signup("Ann", "ann@x.com", "secret1").await?;
    let res = server.signup("Impostor", "ann@x.com", "other-pw").await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    assert_eq!(server.store.user_count().await, 1);
    let res = server.login("ann@x.com", "secret1").await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn login_returns_a_token_for_the_email() -> Result<()> {
    let server = common::ensure_server().await?;
    server.signup("Ann", "ann@x.com", "secret1").await?;

    let res = server.login("ann@x.com", "secret1").await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    let token = body["token"].as_str().expect("token");

    assert_eq!(server.tokens.verify(token)?, "ann@x.com");
    Ok(())
}

#[tokio::test]
async fn login_failures_are_indistinguishable() -> Result<()> {
    let server = common::ensure_server().await?;
    server.signup("Ann", "ann@x.com", "secret1").await?;

    let wrong_password = server.login("ann@x.com", "wrong").await?;
    let unknown_email = server.login("nobody@x.com", "secret1").await?;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.json::<Value>().await?, unknown_email.json::<Value>().await?);
    Ok(())
}

#[tokio::test]
async fn login_accepts_form_fields() -> Result<()> {
    let server = common::ensure_server().await?;
    server.signup("Ann", "ann@x.com", "secret1").await?;

    let res = server
        .client
        .post(server.url("/api/auth/login"))
        .header("content-type", "application/x-www-form-urlencoded")
        .body("email=ann%40x.com&password=secret1")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.json::<Value>().await?["token"].is_string());
    Ok(())
}

#[tokio::test]
async fn login_without_password_is_bad_request() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = server.login("ann@x.com", "").await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>().await?,
        json!({ "error": "Email and password are required" })
    );
    Ok(())
}

#[tokio::test]
async fn reset_flow_needs_no_code() -> Result<()> {
    let server = common::ensure_server().await?;
    server.signup("Ann", "ann@x.com", "secret1").await?;

    let res = server
        .client
        .post(server.url("/api/auth/forget-password/generateCode"))
        .json(&json!({ "email": "ann@x.com" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let code = res.json::<Value>().await?["code"].as_str().unwrap_or_default().to_string();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));

    let res = server
        .client
        .post(server.url("/api/auth/forget-password/changePassword"))
        .json(&json!({ "email": "ann@x.com", "password": "brand-new" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    assert_eq!(server.login("ann@x.com", "secret1").await?.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(server.login("ann@x.com", "brand-new").await?.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn reset_for_unknown_email_is_not_found() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = server
        .client
        .post(server.url("/api/auth/forget-password/generateCode"))
        .json(&json!({ "email": "nobody@x.com" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({ "error": "User not found" }));

    let res = server
        .client
        .post(server.url("/api/auth/forget-password/changePassword"))
        .json(&json!({ "email": "ann@x.com" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?, json!({ "error": "Invalid input" }));
    Ok(())
}

#[tokio::test]
async fn validate_token_reports_the_subject() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = server.register("ann@x.com").await?;

    let res = server
        .client
        .post(server.url("/api/auth/validate-token"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({ "valid": true, "email": "ann@x.com" }));

    let res = server
        .client
        .post(server.url("/api/auth/validate-token"))
        .bearer_auth("garbage")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn protected_routes_reject_bad_headers() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = server.register("ann@x.com").await?;

    let res = server.client.get(server.url("/api/user/getUserInfo")).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.json::<Value>().await?, json!({ "error": "Authorization token required" }));

    for header in [format!("Token {}", token), format!("Bearer  {}", token), "Bearer".to_string()] {
        let res = server
            .client
            .get(server.url("/api/user/getUserInfo"))
            .header("authorization", header)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            res.json::<Value>().await?,
            json!({ "error": "Invalid Authorization header format" })
        );
    }
    Ok(())
}

#[tokio::test]
async fn token_for_unknown_account_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = server.tokens.issue("ghost@x.com")?;

    let res = server.get("/api/user/getUserInfo", &token).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.json::<Value>().await?, json!({ "error": "User not found" }));
    Ok(())
}

#[tokio::test]
async fn policy_documents_are_public() -> Result<()> {
    let server = common::ensure_server().await?;

    for (path, title) in [
        ("/api/documents/getPolicy", "Terms of Service"),
        ("/api/documents/getPrivacy", "Privacy Policy"),
    ] {
        let res = server.client.get(server.url(path)).send().await?;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = res.json().await?;
        assert!(body["data"].as_str().unwrap_or_default().starts_with(title));
    }
    Ok(())
}
