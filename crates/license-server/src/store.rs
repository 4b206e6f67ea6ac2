//! License Store
//!
//! In-memory backing store for the development API, seeded with the same
//! fixtures the mock source serves.

use chrono::{Datelike, Utc};
use std::sync::{PoisonError, RwLock};
use thiserror::Error;

use license_core::fixtures;
use license_core::{
    LicenseId, LicenseInfo, LicenseItem, LicenseStatus, PackageOffer, PackageType, ProjectId,
    ProjectOption,
};

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("License {0} not found")]
    NotFound(LicenseId),

    #[error("Project {0} not found")]
    UnknownProject(ProjectId),

    /// Request is well formed but the license is in the wrong state
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Invalid(String),
}

impl StoreError {
    /// Status reported to the client
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::NotFound(_) => 404,
            StoreError::Conflict(_) => 409,
            StoreError::UnknownProject(_) | StoreError::Invalid(_) => 422,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            StoreError::NotFound(_) => "NOT_FOUND",
            StoreError::UnknownProject(_) => "UNKNOWN_PROJECT",
            StoreError::Conflict(_) => "CONFLICT",
            StoreError::Invalid(_) => "INVALID_REQUEST",
        }
    }
}

/// License persistence
pub trait LicenseStore: Send + Sync {
    fn list(&self) -> Vec<LicenseItem>;

    fn get(&self, id: &LicenseId) -> Result<LicenseItem>;

    fn projects(&self) -> Vec<ProjectOption>;

    /// Package tiers on sale
    fn packages(&self) -> Vec<PackageOffer> {
        fixtures::package_offers()
    }

    /// Extend a license; it is in service afterwards
    fn renew(&self, id: &LicenseId) -> Result<LicenseItem>;

    /// Settle an outstanding order
    fn pay(&self, id: &LicenseId, order_no: &str) -> Result<LicenseItem>;

    /// Open a new order for a project; it waits for payment
    fn create(
        &self,
        project_id: &ProjectId,
        package: PackageType,
        features: &[String],
    ) -> Result<LicenseItem>;

    fn delete(&self, id: &LicenseId) -> Result<LicenseItem>;

    fn info(&self, id: &LicenseId) -> Result<LicenseInfo> {
        self.get(id).map(|item| fixtures::license_info_for(&item))
    }
}

/// In-memory store; rows keep insertion order
pub struct MemoryLicenseStore {
    licenses: RwLock<Vec<LicenseItem>>,
    projects: Vec<ProjectOption>,
}

impl Default for MemoryLicenseStore {
    fn default() -> Self {
        Self::seeded()
    }
}

impl MemoryLicenseStore {
    pub fn new(licenses: Vec<LicenseItem>, projects: Vec<ProjectOption>) -> Self {
        Self {
            licenses: RwLock::new(licenses),
            projects,
        }
    }

    /// Store holding the fixture rows and projects
    pub fn seeded() -> Self {
        Self::new(fixtures::license_items(), fixtures::project_options())
    }

    fn update<F>(&self, id: &LicenseId, f: F) -> Result<LicenseItem>
    where
        F: FnOnce(&mut LicenseItem) -> Result<()>,
    {
        let mut licenses = self.licenses.write().unwrap_or_else(PoisonError::into_inner);
        let item = licenses
            .iter_mut()
            .find(|item| &item.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        f(item)?;
        Ok(item.clone())
    }
}

impl LicenseStore for MemoryLicenseStore {
    fn list(&self) -> Vec<LicenseItem> {
        self.licenses
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn get(&self, id: &LicenseId) -> Result<LicenseItem> {
        let licenses = self.licenses.read().unwrap_or_else(PoisonError::into_inner);
        licenses
            .iter()
            .find(|item| &item.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn projects(&self) -> Vec<ProjectOption> {
        self.projects.clone()
    }

    fn renew(&self, id: &LicenseId) -> Result<LicenseItem> {
        self.update(id, |item| {
            if item.status == LicenseStatus::WaitingForPayment {
                return Err(StoreError::Conflict(
                    "License is waiting for payment".into(),
                ));
            }
            item.status = LicenseStatus::InService;
            Ok(())
        })
    }

    fn pay(&self, id: &LicenseId, order_no: &str) -> Result<LicenseItem> {
        self.update(id, |item| {
            if item.status != LicenseStatus::WaitingForPayment {
                return Err(StoreError::Conflict(
                    "License has no outstanding payment".into(),
                ));
            }
            if item.order_no != order_no {
                return Err(StoreError::Invalid("Order number does not match".into()));
            }
            item.status = LicenseStatus::InService;
            Ok(())
        })
    }

    fn create(
        &self,
        project_id: &ProjectId,
        package: PackageType,
        features: &[String],
    ) -> Result<LicenseItem> {
        let project = self
            .projects
            .iter()
            .find(|p| &p.id == project_id)
            .ok_or_else(|| StoreError::UnknownProject(project_id.clone()))?;

        if features.is_empty() {
            return Err(StoreError::Invalid("Select at least one feature".into()));
        }

        let today = Utc::now().date_naive();
        let serial = uuid::Uuid::new_v4().simple().to_string();
        let item = LicenseItem {
            id: LicenseId::new(format!("L-{}", &serial[..8])),
            project_name: project.name.clone(),
            package_name: package,
            order_no: format!("ORD-{}-{}", today.year(), serial[..6].to_uppercase()),
            purchase_date: today.format("%d/%m/%Y").to_string(),
            status: LicenseStatus::WaitingForPayment,
        };

        self.licenses
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(item.clone());
        Ok(item)
    }

    fn delete(&self, id: &LicenseId) -> Result<LicenseItem> {
        let mut licenses = self.licenses.write().unwrap_or_else(PoisonError::into_inner);
        let pos = licenses
            .iter()
            .position(|item| &item.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        Ok(licenses.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renew_sets_in_service() {
        let store = MemoryLicenseStore::seeded();
        let expired = store
            .list()
            .into_iter()
            .find(|item| item.status == LicenseStatus::Expired)
            .unwrap();

        let renewed = store.renew(&expired.id).unwrap();
        assert_eq!(renewed.status, LicenseStatus::InService);
        assert_eq!(store.get(&expired.id).unwrap().status, LicenseStatus::InService);
    }

    #[test]
    fn test_renew_rejects_unpaid() {
        let store = MemoryLicenseStore::seeded();
        let err = store.renew(&LicenseId::new("L5")).unwrap_err();
        assert_eq!(err.status_code(), 409);
    }

    #[test]
    fn test_pay_checks_order_number() {
        let store = MemoryLicenseStore::seeded();
        let unpaid = store.get(&LicenseId::new("L5")).unwrap();

        let err = store.pay(&unpaid.id, "ORD-WRONG").unwrap_err();
        assert_eq!(err.status_code(), 422);

        let paid = store.pay(&unpaid.id, &unpaid.order_no).unwrap();
        assert_eq!(paid.status, LicenseStatus::InService);
    }

    #[test]
    fn test_create_appends_waiting_license() {
        let store = MemoryLicenseStore::seeded();
        let before = store.list().len();

        let item = store
            .create(
                &ProjectId::new("p3"),
                PackageType::Standard,
                &["Resident app".to_string()],
            )
            .unwrap();

        assert_eq!(item.project_name, "TerraLink Housing");
        assert_eq!(item.status, LicenseStatus::WaitingForPayment);
        assert_eq!(store.list().len(), before + 1);
        assert_eq!(store.list().last().unwrap().id, item.id);
    }

    #[test]
    fn test_create_unknown_project() {
        let store = MemoryLicenseStore::seeded();
        let err = store
            .create(&ProjectId::new("p99"), PackageType::Standard, &["x".into()])
            .unwrap_err();
        assert_eq!(err, StoreError::UnknownProject(ProjectId::new("p99")));
    }

    #[test]
    fn test_delete_then_missing() {
        let store = MemoryLicenseStore::seeded();
        let id = LicenseId::new("L2");
        store.delete(&id).unwrap();
        assert!(matches!(store.get(&id), Err(StoreError::NotFound(_))));
        assert!(matches!(store.delete(&id), Err(StoreError::NotFound(_))));
    }
}
