//! Mock License Source
//!
//! Serves the static fixtures. The project lookup waits for a configurable
//! latency so loading states can be exercised.

use async_trait::async_trait;
use std::time::Duration;

use license_core::fixtures;
use license_core::{LicenseId, LicenseInfo, LicenseItem, PackageOffer, ProjectOption};

use super::LicenseSource;
use crate::error::Result;
use crate::retry::pause;

/// License source backed by fixtures
pub struct MockLicenseSource {
    items: Vec<LicenseItem>,
    options: Vec<ProjectOption>,
    latency: Duration,
}

impl Default for MockLicenseSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLicenseSource {
    pub fn new() -> Self {
        Self::with_latency(Duration::ZERO)
    }

    /// Create with artificial latency on the project lookup
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            items: fixtures::license_items(),
            options: fixtures::project_options(),
            latency,
        }
    }

    /// Replace the table rows
    pub fn with_items(mut self, items: Vec<LicenseItem>) -> Self {
        self.items = items;
        self
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl LicenseSource for MockLicenseSource {
    async fn list_licenses(&self) -> Result<Vec<LicenseItem>> {
        Ok(self.items.clone())
    }

    async fn project_options(&self) -> Result<Vec<ProjectOption>> {
        pause(self.latency).await;
        Ok(self.options.clone())
    }

    async fn license_info(&self, id: Option<&LicenseId>) -> Result<LicenseInfo> {
        Ok(fixtures::license_info(&self.items, id))
    }

    async fn package_offers(&self) -> Result<Vec<PackageOffer>> {
        Ok(fixtures::package_offers())
    }

    fn name(&self) -> &str {
        "MockLicenseSource"
    }
}
