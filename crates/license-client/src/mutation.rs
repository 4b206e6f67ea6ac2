//! Mutation Layer
//!
//! Renew, pay, create and delete. Each operation sends one request (retried
//! per its policy), normalizes the response, and returns a
//! [`MutationOutcome`] describing what the screen should do: which cache
//! entries to touch and which toast to show. Nothing here reaches into the
//! cache or the toast queue itself.

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use license_core::{
    CacheDirective, LicenseId, Notification, PackageType, ProjectId, PurchaseOrder, QueryKey,
};

use crate::error::{ClientError, Result};
use crate::response::normalize;
use crate::retry::{RetryPolicy, retry};
use crate::transport::{ApiRequest, HttpTransport};

/// The four write operations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Renew,
    Payment,
    Create,
    Delete,
}

impl MutationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationKind::Renew => "renew",
            MutationKind::Payment => "payment",
            MutationKind::Create => "create",
            MutationKind::Delete => "delete",
        }
    }

    /// Retries after the first attempt
    pub fn retries(&self) -> u32 {
        match self {
            MutationKind::Renew | MutationKind::Create => 2,
            MutationKind::Payment | MutationKind::Delete => 1,
        }
    }

    /// Toast text when the server gives no message
    pub fn failure_message(&self) -> &'static str {
        match self {
            MutationKind::Renew => "Failed to renew license",
            MutationKind::Payment => "Failed to make payment",
            MutationKind::Create => "Failed to create license",
            MutationKind::Delete => "Failed to delete license",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            MutationKind::Renew => "License renewed successfully",
            MutationKind::Payment => "Payment submitted successfully",
            MutationKind::Create => "License created successfully",
            MutationKind::Delete => "License deleted successfully",
        }
    }
}

/// `POST /license/{id}/renew`
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewLicense {
    #[serde(skip)]
    pub license_id: LicenseId,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_type: Option<PackageType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
}

impl RenewLicense {
    pub fn new(license_id: LicenseId) -> Self {
        Self {
            license_id,
            package_type: None,
            features: None,
        }
    }
}

/// `POST /license/{id}/payment`
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MakePayment {
    #[serde(skip)]
    pub license_id: LicenseId,

    pub order_no: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,

    /// Reference to an uploaded payment slip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_of_payment: Option<String>,
}

impl MakePayment {
    pub fn new(license_id: LicenseId, order_no: impl Into<String>) -> Self {
        Self {
            license_id,
            order_no: order_no.into(),
            payment_method: None,
            proof_of_payment: None,
        }
    }
}

/// `POST /license/dashboard`
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLicense {
    pub project_id: ProjectId,

    pub package_type: PackageType,

    pub features: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

impl From<PurchaseOrder> for CreateLicense {
    fn from(order: PurchaseOrder) -> Self {
        Self {
            project_id: order.project_id,
            package_type: order.selection.package_type,
            features: order.selection.features,
            payment_method: order.selection.payment_method,
        }
    }
}

/// Everything a mutation produced
#[derive(Clone, Debug)]
pub struct MutationOutcome {
    pub kind: MutationKind,

    /// Response body on success, normalized error on failure
    pub result: Result<Value>,

    /// Cache changes to apply; empty on failure
    pub directives: Vec<CacheDirective>,

    /// Exactly one toast per invocation
    pub notification: Notification,

    /// Requests sent, including retries
    pub attempts: u32,
}

impl MutationOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&ClientError> {
        self.result.as_ref().err()
    }
}

/// Cache directives applied after a successful mutation
pub fn success_directives(kind: MutationKind, license_id: Option<&LicenseId>) -> Vec<CacheDirective> {
    let mut directives = vec![CacheDirective::Invalidate(QueryKey::Licenses)];
    if let Some(id) = license_id {
        let detail = QueryKey::LicenseDetail(id.clone());
        match kind {
            MutationKind::Renew | MutationKind::Payment => {
                directives.push(CacheDirective::Invalidate(detail));
            }
            MutationKind::Delete => directives.push(CacheDirective::Remove(detail)),
            MutationKind::Create => {}
        }
    }
    directives
}

/// Write operations against the license API
pub struct LicenseMutations {
    transport: Arc<dyn HttpTransport>,
    retry_base_delay: Duration,
}

impl LicenseMutations {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self::with_retry_delay(transport, Duration::from_millis(1000))
    }

    pub fn with_retry_delay(transport: Arc<dyn HttpTransport>, retry_base_delay: Duration) -> Self {
        Self {
            transport,
            retry_base_delay,
        }
    }

    pub fn policy(&self, kind: MutationKind) -> RetryPolicy {
        RetryPolicy::new(kind.retries(), self.retry_base_delay)
    }

    pub async fn renew_license(&self, request: RenewLicense) -> MutationOutcome {
        let path = format!("/license/{}/renew", request.license_id);
        let body = to_body(&request);
        self.execute(
            MutationKind::Renew,
            Some(&request.license_id),
            body.map(|body| ApiRequest::post(path, body)),
        )
        .await
    }

    pub async fn make_payment(&self, request: MakePayment) -> MutationOutcome {
        let path = format!("/license/{}/payment", request.license_id);
        let body = to_body(&request);
        self.execute(
            MutationKind::Payment,
            Some(&request.license_id),
            body.map(|body| ApiRequest::post(path, body)),
        )
        .await
    }

    pub async fn create_license(&self, request: CreateLicense) -> MutationOutcome {
        let body = to_body(&request);
        self.execute(
            MutationKind::Create,
            None,
            body.map(|body| ApiRequest::post("/license/dashboard", body)),
        )
        .await
    }

    pub async fn delete_license(&self, license_id: &LicenseId) -> MutationOutcome {
        let request = ApiRequest::delete(format!("/license/{license_id}/dashboard"));
        self.execute(MutationKind::Delete, Some(license_id), Ok(request))
            .await
    }

    async fn execute(
        &self,
        kind: MutationKind,
        license_id: Option<&LicenseId>,
        request: Result<ApiRequest>,
    ) -> MutationOutcome {
        let mut attempts = 0;
        let result = match request {
            Ok(request) => {
                retry(self.policy(kind), kind.as_str(), || {
                    attempts += 1;
                    self.send_once(kind, request.clone())
                })
                .await
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(body) => {
                let directives = success_directives(kind, license_id);
                tracing::info!(
                    operation = kind.as_str(),
                    license_id = ?license_id.map(LicenseId::as_str),
                    attempts,
                    "License mutation succeeded"
                );
                MutationOutcome {
                    kind,
                    result: Ok(body),
                    directives,
                    notification: Notification::success(kind.success_message()),
                    attempts,
                }
            }
            Err(err) => {
                let message = err.user_message(kind.failure_message());
                tracing::warn!(
                    operation = kind.as_str(),
                    license_id = ?license_id.map(LicenseId::as_str),
                    attempts,
                    error = %err,
                    "License mutation failed"
                );
                MutationOutcome {
                    kind,
                    result: Err(err),
                    directives: Vec::new(),
                    notification: Notification::error(message),
                    attempts,
                }
            }
        }
    }

    async fn send_once(&self, kind: MutationKind, request: ApiRequest) -> Result<Value> {
        let response = self.transport.send(request).await?;
        normalize(response, kind.failure_message())
    }
}

fn to_body<T: Serialize>(payload: &T) -> Result<Value> {
    Ok(serde_json::to_value(payload)?)
}
