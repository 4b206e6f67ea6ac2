//! HTTP Handlers
//!
//! Every endpoint answers with the envelope the dashboard client normalizes:
//! `{statusCode, message, data?, error?}`. A missing license is a real 404;
//! business-rule rejections (wrong state, bad order number, unknown project)
//! come back as HTTP 200 with the failure status embedded in the body.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use license_core::{
    LicenseId, LicenseInfo, LicenseItem, PackageOffer, PackageType, ProjectId, ProjectOption,
};

use crate::state::AppState;
use crate::store::StoreError;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub status_code: u16,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl<T> Envelope<T> {
    fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status_code: 200,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub licenses: usize,
}

/// Store failure rendered as an envelope
#[derive(Debug)]
pub struct ApiError(StoreError);

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.0.status_code();
        let http_status = match &self.0 {
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::OK,
        };
        tracing::warn!(status_code, error = %self.0, "License request rejected");

        let body = Envelope::<()> {
            status_code,
            message: self.0.to_string(),
            data: None,
            error: Some(self.0.code()),
        };
        (http_status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewRequest {
    #[serde(default)]
    pub package_type: Option<PackageType>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub order_no: String,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub proof_of_payment: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    pub project_id: ProjectId,
    pub package_type: PackageType,
    pub features: Vec<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        licenses: state.store.list().len(),
    })
}

pub async fn list_licenses(State(state): State<AppState>) -> Json<Envelope<Vec<LicenseItem>>> {
    Json(Envelope::ok("OK", state.store.list()))
}

pub async fn list_projects(State(state): State<AppState>) -> Json<Envelope<Vec<ProjectOption>>> {
    Json(Envelope::ok("OK", state.store.projects()))
}

pub async fn list_packages(State(state): State<AppState>) -> Json<Envelope<Vec<PackageOffer>>> {
    Json(Envelope::ok("OK", state.store.packages()))
}

pub async fn license_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<LicenseInfo> {
    let info = state.store.info(&LicenseId::new(id))?;
    Ok(Json(Envelope::ok("OK", info)))
}

pub async fn renew_license(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<RenewRequest>,
) -> ApiResult<LicenseItem> {
    let item = state.store.renew(&LicenseId::new(id))?;
    tracing::info!(
        license_id = %item.id,
        package = ?payload.package_type,
        features = payload.features.as_ref().map_or(0, Vec::len),
        "License renewed"
    );
    Ok(Json(Envelope::ok("License renewed", item)))
}

pub async fn make_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<PaymentRequest>,
) -> ApiResult<LicenseItem> {
    let item = state.store.pay(&LicenseId::new(id), &payload.order_no)?;
    tracing::info!(
        license_id = %item.id,
        order_no = %item.order_no,
        method = ?payload.payment_method,
        proof = payload.proof_of_payment.is_some(),
        "Payment recorded"
    );
    Ok(Json(Envelope::ok("Payment received", item)))
}

pub async fn create_license(
    State(state): State<AppState>,
    Json(payload): Json<CreateRequest>,
) -> ApiResult<LicenseItem> {
    let item = state
        .store
        .create(&payload.project_id, payload.package_type, &payload.features)?;
    tracing::info!(
        license_id = %item.id,
        project = %payload.project_id,
        method = ?payload.payment_method,
        "License created"
    );
    Ok(Json(Envelope::ok("License created", item)))
}

pub async fn delete_license(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<LicenseItem> {
    let item = state.store.delete(&LicenseId::new(id))?;
    tracing::info!(license_id = %item.id, "License deleted");
    Ok(Json(Envelope::ok("License deleted", item)))
}
