//! EC site settings through the dashboard.

use reqwest::StatusCode;
use serde_json::Value;

use keizok_integration_tests::{TestApp, location};

/// The stored site array.
async fn stored_sites(app: &TestApp) -> Vec<Value> {
    let raw = app.store.get("mock_ec_sites").await.unwrap().unwrap_or_default();
    if raw.is_empty() {
        return Vec::new();
    }
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test]
async fn test_site_lifecycle() {
    let app = TestApp::spawn().await;
    app.login().await;

    let body = app
        .client
        .get(app.url("/settings/ec-sites"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("ECサイトが登録されていません"));

    let resp = app
        .client
        .post(app.url("/settings/ec-sites"))
        .form(&[
            ("name", "メインショップ"),
            ("url", "https://shop.example.com"),
            ("platform", "shopify"),
            ("api_key", "key-123"),
            ("api_secret", ""),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&resp), "/settings/ec-sites?success=site_created");

    let sites = stored_sites(&app).await;
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0]["name"], "メインショップ");
    assert_eq!(sites[0]["is_active"], true);
    assert_eq!(sites[0]["api_key"], "key-123");
    assert_eq!(sites[0]["api_secret"], Value::Null);
    let id = sites[0]["id"].as_str().unwrap().to_owned();

    let body = app
        .client
        .get(app.url("/settings/ec-sites?success=site_created"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("ECサイトを追加しました"));
    assert!(body.contains("メインショップ"));
    assert!(body.contains("Shopify"));
    assert!(body.contains("API連携設定済み"));

    let resp = app
        .client
        .post(app.url(&format!("/settings/ec-sites/{id}/toggle")))
        .send()
        .await
        .unwrap();
    assert_eq!(location(&resp), "/settings/ec-sites?success=site_disabled");
    assert_eq!(stored_sites(&app).await[0]["is_active"], false);

    let resp = app
        .client
        .post(app.url(&format!("/settings/ec-sites/{id}")))
        .form(&[
            ("name", "サブショップ"),
            ("url", "https://sub.example.com"),
            ("platform", "base"),
            ("api_key", ""),
            ("api_secret", ""),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&resp), "/settings/ec-sites?success=site_updated");
    let sites = stored_sites(&app).await;
    assert_eq!(sites[0]["name"], "サブショップ");
    assert_eq!(sites[0]["platform"], "base");
    assert_eq!(sites[0]["is_active"], false);

    let resp = app
        .client
        .post(app.url(&format!("/settings/ec-sites/{id}/delete")))
        .send()
        .await
        .unwrap();
    assert_eq!(location(&resp), "/settings/ec-sites?success=site_deleted");
    assert!(stored_sites(&app).await.is_empty());
}

#[tokio::test]
async fn test_create_requires_fields() {
    let app = TestApp::spawn().await;
    app.login().await;

    let resp = app
        .client
        .post(app.url("/settings/ec-sites"))
        .form(&[("name", "ショップ"), ("url", ""), ("platform", "shopify")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("必須項目を入力してください"));
    assert!(body.contains("ショップ"));
    assert!(stored_sites(&app).await.is_empty());
}

#[tokio::test]
async fn test_unknown_site_is_not_found() {
    let app = TestApp::spawn().await;
    app.login().await;

    let resp = app
        .client
        .get(app.url("/settings/ec-sites/does-not-exist/edit"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app
        .client
        .post(app.url("/settings/ec-sites/does-not-exist/toggle"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
