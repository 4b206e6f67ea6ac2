//! Contract tests for LicenseMutations against a mock license API.
//!
//! | Method | Path | Retries |
//! |--------|------|---------|
//! | POST | `/license/{id}/renew` | 2 |
//! | POST | `/license/{id}/payment` | 1 |
//! | POST | `/license/dashboard` | 2 |
//! | DELETE | `/license/{id}/dashboard` | 1 |

use std::sync::Arc;
use std::time::Duration;

use license_client::{
    ClientConfig, CreateLicense, LicenseMutations, MakePayment, RenewLicense, ReqwestTransport,
};
use license_core::{CacheDirective, LicenseId, NotificationLevel, PackageType, ProjectId, QueryKey};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mutations(server: &MockServer) -> LicenseMutations {
    let config = ClientConfig {
        api_url: server.uri(),
        timeout_secs: 5,
        ..ClientConfig::default()
    };
    let transport = Arc::new(ReqwestTransport::new(&config).unwrap());
    LicenseMutations::with_retry_delay(transport, Duration::from_millis(1))
}

fn ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "statusCode": 200,
        "message": "OK"
    }))
}

// ── POST /license/{id}/renew ──────────────────────────────────────────

#[tokio::test]
async fn renew_posts_to_license_path() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/license/L1/renew"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let outcome = mutations(&server)
        .renew_license(RenewLicense::new(LicenseId::new("L1")))
        .await;
    assert!(outcome.is_success());
    assert_eq!(outcome.notification.level, NotificationLevel::Success);
    assert!(outcome
        .directives
        .contains(&CacheDirective::Invalidate(QueryKey::detail("L1"))));
}

#[tokio::test]
async fn renew_sold_out_is_retried_then_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/license/L1/renew"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "statusCode": 422,
            "message": "Package sold out"
        })))
        .expect(3)
        .mount(&server)
        .await;

    let outcome = mutations(&server)
        .renew_license(RenewLicense::new(LicenseId::new("L1")))
        .await;
    assert!(!outcome.is_success());
    assert_eq!(outcome.attempts, 3);
    assert_eq!(outcome.notification.message, "Package sold out");
    assert!(outcome.directives.is_empty());
}

// ── POST /license/{id}/payment ────────────────────────────────────────

#[tokio::test]
async fn payment_failure_retries_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/license/L5/payment"))
        .and(body_json(serde_json::json!({"orderNo": "ORD-2025-0005"})))
        .respond_with(ResponseTemplate::new(502))
        .expect(2)
        .mount(&server)
        .await;

    let outcome = mutations(&server)
        .make_payment(MakePayment::new(LicenseId::new("L5"), "ORD-2025-0005"))
        .await;
    assert_eq!(outcome.attempts, 2);
    assert_eq!(outcome.notification.message, "Failed to make payment");
}

// ── POST /license/dashboard ───────────────────────────────────────────

#[tokio::test]
async fn create_sends_purchase_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/license/dashboard"))
        .and(body_json(serde_json::json!({
            "projectId": "p2",
            "packageType": "Optional",
            "features": ["Smart parking"],
            "paymentMethod": "credit_card"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "statusCode": 201,
            "message": "Created"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = mutations(&server)
        .create_license(CreateLicense {
            project_id: ProjectId::new("p2"),
            package_type: PackageType::Optional,
            features: vec!["Smart parking".into()],
            payment_method: Some("credit_card".into()),
        })
        .await;
    assert!(outcome.is_success());
    assert_eq!(
        outcome.directives,
        vec![CacheDirective::Invalidate(QueryKey::Licenses)]
    );
}

// ── DELETE /license/{id}/dashboard ────────────────────────────────────

#[tokio::test]
async fn delete_uses_error_field() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/license/L3/dashboard"))
        .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
            "error": "License is still active"
        })))
        .expect(2)
        .mount(&server)
        .await;

    let outcome = mutations(&server)
        .delete_license(&LicenseId::new("L3"))
        .await;
    assert_eq!(outcome.notification.level, NotificationLevel::Error);
    assert_eq!(outcome.notification.message, "License is still active");
}

#[tokio::test]
async fn delete_success_removes_detail() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/license/L3/dashboard"))
        .respond_with(ok())
        .mount(&server)
        .await;

    let outcome = mutations(&server)
        .delete_license(&LicenseId::new("L3"))
        .await;
    assert_eq!(
        outcome.directives,
        vec![
            CacheDirective::Invalidate(QueryKey::Licenses),
            CacheDirective::Remove(QueryKey::detail("L3")),
        ]
    );
}
