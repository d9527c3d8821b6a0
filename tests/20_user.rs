mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn user_info_is_the_public_profile() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = server.register("ann@x.com").await?;

    let res = server.get("/api/user/getUserInfo", &token).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert!(body["id"].is_i64());
    assert_eq!(body["full_name"], "Test User");
    assert_eq!(body["email"], "ann@x.com");
    assert_eq!(body["image"], "uploads/default_avatar.png");
    assert!(body.get("password").is_none());
    Ok(())
}

#[tokio::test]
async fn update_changes_only_supplied_fields() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = server.register("ann@x.com").await?;

    let res = server
        .put("/api/user/updateUserInfo", &token, &json!({ "full_name": "Ann Smith" }))
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({}));

    let body: Value = server.get("/api/user/getUserInfo", &token).await?.json().await?;
    assert_eq!(body["full_name"], "Ann Smith");
    assert_eq!(body["image"], "uploads/default_avatar.png");

    let res = server
        .put("/api/user/updateUserInfo", &token, &json!({ "full_name": "", "image": "uploads/ann.png" }))
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = server.get("/api/user/getUserInfo", &token).await?.json().await?;
    assert_eq!(body["full_name"], "Ann Smith");
    assert_eq!(body["image"], "uploads/ann.png");
    Ok(())
}

#[tokio::test]
async fn update_accepts_form_fields() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = server.register("ann@x.com").await?;

    let res = server
        .client
        .put(server.url("/api/user/updateUserInfo"))
        .bearer_auth(&token)
        .header("content-type", "application/x-www-form-urlencoded")
        .body("full_name=Form+Name")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = server.get("/api/user/getUserInfo", &token).await?.json().await?;
    assert_eq!(body["full_name"], "Form Name");
    Ok(())
}
