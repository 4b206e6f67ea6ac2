//! Remote License Source
//!
//! Reads from the license API through an [`HttpTransport`], normalizing
//! responses the same way the mutation layer does.

use async_trait::async_trait;
use std::sync::Arc;

use license_core::fixtures;
use license_core::{LicenseId, LicenseInfo, LicenseItem, PackageOffer, ProjectOption};

use super::LicenseSource;
use crate::error::Result;
use crate::response::{decode, normalize};
use crate::transport::{ApiRequest, HttpTransport};

pub struct RemoteLicenseSource {
    transport: Arc<dyn HttpTransport>,
}

impl RemoteLicenseSource {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, path: String, default: &str) -> Result<T> {
        let response = self.transport.send(ApiRequest::get(path)).await?;
        decode(normalize(response, default)?)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl LicenseSource for RemoteLicenseSource {
    async fn list_licenses(&self) -> Result<Vec<LicenseItem>> {
        self.fetch("/license".into(), "Failed to load licenses").await
    }

    async fn project_options(&self) -> Result<Vec<ProjectOption>> {
        self.fetch("/project/list".into(), "Failed to load projects").await
    }

    async fn package_offers(&self) -> Result<Vec<PackageOffer>> {
        self.fetch("/package/list".into(), "Failed to load packages").await
    }

    async fn license_info(&self, id: Option<&LicenseId>) -> Result<LicenseInfo> {
        let Some(id) = id else {
            return Ok(fixtures::fallback_license_info());
        };

        match self
            .fetch(format!("/license/{id}"), "Failed to load license")
            .await
        {
            Err(err) if err.is_not_found() => {
                tracing::debug!(license_id = %id, "License not found, showing fallback record");
                Ok(fixtures::fallback_license_info())
            }
            other => other,
        }
    }

    fn name(&self) -> &str {
        "RemoteLicenseSource"
    }
}
