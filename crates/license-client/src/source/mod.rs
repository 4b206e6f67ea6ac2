//! Query Sources
//!
//! Read side of the dashboard. The screen only talks to [`LicenseSource`];
//! which implementation backs it is decided when the dashboard is composed.

mod mock;
mod remote;

pub use mock::MockLicenseSource;
pub use remote::RemoteLicenseSource;

use async_trait::async_trait;
use license_core::{LicenseId, LicenseInfo, LicenseItem, PackageOffer, ProjectOption};

use crate::error::Result;
use crate::transport::MaybeSendSync;

/// Query source trait (Strategy pattern)
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait LicenseSource: MaybeSendSync {
    /// Every license visible to the current user
    async fn list_licenses(&self) -> Result<Vec<LicenseItem>>;

    /// Projects a new license can be assigned to
    async fn project_options(&self) -> Result<Vec<ProjectOption>>;

    /// Package tiers and their features for the package-selection step
    async fn package_offers(&self) -> Result<Vec<PackageOffer>>;

    /// Detail for the info modal. Absent or unknown ids resolve to the
    /// fallback record instead of an error.
    async fn license_info(&self, id: Option<&LicenseId>) -> Result<LicenseInfo>;

    /// Source name for logs
    fn name(&self) -> &str;
}
