//! Mock Data
//!
//! Static records backing the mock license source and the development server.

use crate::model::{
    FeatureBundle, LicenseId, LicenseInfo, LicenseItem, LicenseStatus, PackageOffer, PackageType,
    ProjectOption,
};

/// Id of the record shown when an info lookup has no usable id
pub const FALLBACK_LICENSE_ID: &str = "1";

const STANDARD_FEATURES: [&str; 4] = [
    "Resident app",
    "Visitor management",
    "Parcel tracking",
    "Announcements",
];

const OPTIONAL_FEATURES: [&str; 3] = ["Facility booking", "Smart parking", "E-billing"];

/// Features included in a package tier
pub fn package_features(package: PackageType) -> Vec<String> {
    let features: &[&str] = match package {
        PackageType::Standard => &STANDARD_FEATURES,
        PackageType::Optional => &OPTIONAL_FEATURES,
    };
    features.iter().map(|f| (*f).to_string()).collect()
}

/// Every package tier with its features, in display order
pub fn package_offers() -> Vec<PackageOffer> {
    [PackageType::Standard, PackageType::Optional]
        .into_iter()
        .map(|package_type| PackageOffer {
            package_type,
            features: package_features(package_type),
        })
        .collect()
}

/// Projects offered by the assignment selector
pub fn project_options() -> Vec<ProjectOption> {
    vec![
        ProjectOption::new("p1", "AiTAN"),
        ProjectOption::new("p2", "Skyline Residence"),
        ProjectOption::new("p3", "TerraLink Housing"),
        ProjectOption::new("p4", "Harbor Park Condo"),
        ProjectOption::new("p5", "Nexa Urban"),
    ]
}

fn row(
    id: &str,
    project: &str,
    package: PackageType,
    order: &str,
    date: &str,
    status: LicenseStatus,
) -> LicenseItem {
    LicenseItem {
        id: LicenseId::new(id),
        project_name: project.into(),
        package_name: package,
        order_no: order.into(),
        purchase_date: date.into(),
        status,
    }
}

/// License table rows
pub fn license_items() -> Vec<LicenseItem> {
    use LicenseStatus::{Expired, ExpiringSoon, InService, Suspended, WaitingForPayment};
    use PackageType::{Optional, Standard};

    vec![
        row("L1", "AiTAN", Standard, "ORD-2025-0001", "12/01/2025", InService),
        row("L2", "Skyline Residence", Optional, "ORD-2025-0002", "03/02/2025", ExpiringSoon),
        row("L3", "TerraLink Housing", Standard, "ORD-2025-0003", "18/02/2025", Expired),
        row("L4", "Harbor Park Condo", Standard, "ORD-2025-0004", "27/02/2025", Suspended),
        row("L5", "Nexa Urban", Optional, "ORD-2025-0005", "05/03/2025", WaitingForPayment),
        row("L6", "AiTAN", Optional, "ORD-2025-0006", "14/03/2025", WaitingForPayment),
        row("L7", "Green Park Villa", Standard, "ORD-2025-0007", "02/04/2025", InService),
        row("L8", "Riverside Loft", Standard, "ORD-2025-0008", "19/04/2025", ExpiringSoon),
        row("L9", "Maple Court", Optional, "ORD-2025-0009", "08/05/2025", InService),
        row("L10", "Sunrise Tower", Standard, "ORD-2025-0010", "21/05/2025", Expired),
        row("L11", "Lakeside Garden", Standard, "ORD-2025-0011", "30/05/2025", InService),
        row("L12", "Nexa Urban", Standard, "ORD-2025-0012", "11/06/2025", Suspended),
    ]
}

fn bundles_for(package: PackageType) -> Vec<FeatureBundle> {
    let mut bundles = vec![FeatureBundle::new(
        PackageType::Standard,
        "01/01/2025 - 31/12/2025",
        package_features(PackageType::Standard),
    )];
    if package == PackageType::Optional {
        bundles.push(FeatureBundle::new(
            PackageType::Optional,
            "01/03/2025 - 28/02/2026",
            package_features(PackageType::Optional),
        ));
    }
    bundles
}

/// Summary line shown as "current package"
pub fn package_summary(package: PackageType) -> String {
    match package {
        PackageType::Standard => "Standard package".into(),
        PackageType::Optional => "Standard package + Optional add-ons".into(),
    }
}

/// Record shown whenever the requested license cannot be resolved
pub fn fallback_license_info() -> LicenseInfo {
    LicenseInfo {
        id: LicenseId::new(FALLBACK_LICENSE_ID),
        image: None,
        project_name: "AiTAN".into(),
        location: "Bangkok, Thailand".into(),
        order_no: "ORD-2025-0001".into(),
        status: LicenseStatus::InService,
        current_package: package_summary(PackageType::Optional),
        bundles: bundles_for(PackageType::Optional),
    }
}

/// Detail record for a table row
pub fn license_info_for(item: &LicenseItem) -> LicenseInfo {
    LicenseInfo {
        id: item.id.clone(),
        image: None,
        project_name: item.project_name.clone(),
        location: "Bangkok, Thailand".into(),
        order_no: item.order_no.clone(),
        status: item.status,
        current_package: package_summary(item.package_name),
        bundles: bundles_for(item.package_name),
    }
}

/// Resolve detail for `id` among `items`, falling back to the default record
pub fn license_info(items: &[LicenseItem], id: Option<&LicenseId>) -> LicenseInfo {
    id.and_then(|id| items.iter().find(|item| &item.id == id))
        .map_or_else(fallback_license_info, license_info_for)
}
