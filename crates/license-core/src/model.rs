//! Domain Models
//!
//! Wire-compatible records for licenses, feature bundles and project options.
//! Every record is a read-only snapshot of server state; the client never edits
//! them in place.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::error::LicenseError;

/// License identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LicenseId(String);

impl LicenseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LicenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LicenseId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Project identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// License lifecycle status
///
/// The set is closed: a wire value outside these five fails to decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseStatus {
    InService,
    ExpiringSoon,
    Expired,
    Suspended,
    WaitingForPayment,
}

impl LicenseStatus {
    pub const ALL: [Self; 5] = [
        Self::InService,
        Self::ExpiringSoon,
        Self::Expired,
        Self::Suspended,
        Self::WaitingForPayment,
    ];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InService => "in_service",
            Self::ExpiringSoon => "expiring_soon",
            Self::Expired => "expired",
            Self::Suspended => "suspended",
            Self::WaitingForPayment => "waiting_for_payment",
        }
    }
}

impl fmt::Display for LicenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LicenseStatus {
    type Err = LicenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| LicenseError::UnknownStatus(s.to_string()))
    }
}

/// Package tier of a license or bundle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackageType {
    #[default]
    Standard,
    Optional,
}

impl PackageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Optional => "Optional",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row in the license table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseItem {
    pub id: LicenseId,

    pub project_name: String,

    /// Package tier shown in the package column
    pub package_name: PackageType,

    pub order_no: String,

    /// Purchase date as displayed (`DD/MM/YYYY`)
    pub purchase_date: String,

    pub status: LicenseStatus,
}

/// One purchased feature bundle
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureBundle {
    #[serde(rename = "type")]
    pub bundle_type: PackageType,

    /// Validity period as displayed (e.g. "01/01/2025 - 31/12/2025")
    pub period: String,

    pub features: BTreeSet<String>,
}

impl FeatureBundle {
    pub fn new<I, S>(bundle_type: PackageType, period: impl Into<String>, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            bundle_type,
            period: period.into(),
            features: features.into_iter().map(Into::into).collect(),
        }
    }
}

/// Detail record for the information modal
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseInfo {
    pub id: LicenseId,

    /// Project image reference
    #[serde(default)]
    pub image: Option<String>,

    pub project_name: String,

    pub location: String,

    pub order_no: String,

    pub status: LicenseStatus,

    /// Human readable summary of the current package
    pub current_package: String,

    #[serde(default)]
    pub bundles: Vec<FeatureBundle>,
}

/// Entry of the project-assignment selector
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectOption {
    pub id: ProjectId,
    pub name: String,
}

impl ProjectOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ProjectId::new(id),
            name: name.into(),
        }
    }
}

/// A package tier offered in the buy flow with the features it unlocks
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageOffer {
    pub package_type: PackageType,

    pub features: Vec<String>,
}

/// Package chosen in the package-selection step of the buy flow
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSelection {
    pub package_type: PackageType,

    pub features: Vec<String>,

    #[serde(default)]
    pub payment_method: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_license_item_wire_format() {
        let json = r#"{
            "id": "L1",
            "projectName": "AiTAN",
            "packageName": "Standard",
            "orderNo": "ORD-0001",
            "purchaseDate": "12/01/2025",
            "status": "waiting_for_payment"
        }"#;

        let item: LicenseItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id.as_str(), "L1");
        assert_eq!(item.package_name, PackageType::Standard);
        assert_eq!(item.status, LicenseStatus::WaitingForPayment);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let json = r#"{
            "id": "L1",
            "projectName": "AiTAN",
            "packageName": "Standard",
            "orderNo": "ORD-0001",
            "purchaseDate": "12/01/2025",
            "status": "archived"
        }"#;

        assert!(serde_json::from_str::<LicenseItem>(json).is_err());
        assert!("archived".parse::<LicenseStatus>().is_err());
    }

    #[test]
    fn test_status_parses_every_wire_value() {
        for status in LicenseStatus::ALL {
            assert_eq!(status.as_str().parse::<LicenseStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_bundle_type_field_name() {
        let bundle = FeatureBundle::new(PackageType::Optional, "2025", ["Parking"]);
        let value = serde_json::to_value(&bundle).unwrap();
        assert_eq!(value["type"], "Optional");
        assert_eq!(value["features"][0], "Parking");
    }
}
