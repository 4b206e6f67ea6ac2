//! Contract tests for RemoteLicenseSource against a mock license API.
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET | `/license` | `list_licenses_*` |
//! | GET | `/project/list` | `project_options_*` |
//! | GET | `/license/{id}` | `license_info_*` |
//! | GET | `/package/list` | `package_offers_*` |

use std::sync::Arc;

use license_client::{ClientConfig, LicenseSource, RemoteLicenseSource, ReqwestTransport};
use license_core::{LicenseId, LicenseStatus, PackageType};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn remote(server: &MockServer) -> RemoteLicenseSource {
    let config = ClientConfig {
        api_url: server.uri(),
        timeout_secs: 5,
        ..ClientConfig::default()
    };
    RemoteLicenseSource::new(Arc::new(ReqwestTransport::new(&config).unwrap()))
}

// ── GET /license ──────────────────────────────────────────────────────

#[tokio::test]
async fn list_licenses_unwraps_data_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/license"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "statusCode": 200,
            "message": "OK",
            "data": [{
                "id": "L1",
                "projectName": "AiTAN",
                "packageName": "Standard",
                "orderNo": "ORD-2025-0001",
                "purchaseDate": "2025-01-15",
                "status": "in_service"
            }]
        })))
        .mount(&server)
        .await;

    let items = remote(&server).list_licenses().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].project_name, "AiTAN");
    assert_eq!(items[0].package_name, PackageType::Standard);
    assert_eq!(items[0].status, LicenseStatus::InService);
}

#[tokio::test]
async fn list_licenses_rejects_unknown_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/license"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": "L1",
            "projectName": "AiTAN",
            "packageName": "Standard",
            "orderNo": "ORD-2025-0001",
            "purchaseDate": "2025-01-15",
            "status": "archived"
        }])))
        .mount(&server)
        .await;

    let err = remote(&server).list_licenses().await.unwrap_err();
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn list_licenses_embedded_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/license"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "statusCode": 403,
            "error": "Forbidden"
        })))
        .mount(&server)
        .await;

    let err = remote(&server).list_licenses().await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.user_message("Failed to load licenses"), "Forbidden");
}

// ── GET /project/list ─────────────────────────────────────────────────

#[tokio::test]
async fn project_options_bare_array() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/project/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "p1", "name": "AiTAN"},
            {"id": "p3", "name": "TerraLink Housing"}
        ])))
        .mount(&server)
        .await;

    let options = remote(&server).project_options().await.unwrap();
    assert_eq!(options.len(), 2);
    assert_eq!(options[1].name, "TerraLink Housing");
}

// ── GET /license/{id} ─────────────────────────────────────────────────

#[tokio::test]
async fn license_info_not_found_uses_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/license/L99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "statusCode": 404,
            "message": "License not found"
        })))
        .mount(&server)
        .await;

    let info = remote(&server)
        .license_info(Some(&LicenseId::new("L99")))
        .await
        .unwrap();
    assert_eq!(info.id.as_str(), "1");
    assert_eq!(info.project_name, "AiTAN");
}

#[tokio::test]
async fn license_info_server_error_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/license/L1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = remote(&server)
        .license_info(Some(&LicenseId::new("L1")))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.user_message("fallback"), "Failed to load license");
}

// ── GET /package/list ─────────────────────────────────────────────────

#[tokio::test]
async fn package_offers_unwraps_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/package/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "statusCode": 200,
            "message": "OK",
            "data": [
                {"packageType": "Standard", "features": ["Resident app"]},
                {"packageType": "Optional", "features": ["Smart parking", "E-billing"]}
            ]
        })))
        .mount(&server)
        .await;

    let offers = remote(&server).package_offers().await.unwrap();
    assert_eq!(offers.len(), 2);
    assert_eq!(offers[1].package_type, PackageType::Optional);
    assert_eq!(offers[1].features, vec!["Smart parking", "E-billing"]);
}
