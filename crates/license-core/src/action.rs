//! Action Resolution
//!
//! Every license exposes exactly one primary action, decided by its status.

use crate::confirm::ConfirmRequest;
use crate::model::{LicenseItem, LicenseStatus};

/// Primary action available on a license row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LicenseAction {
    Renew,
    MakePayment,
}

impl LicenseAction {
    /// Resolve the single action for a status
    pub fn for_status(status: LicenseStatus) -> Self {
        match status {
            LicenseStatus::WaitingForPayment => LicenseAction::MakePayment,
            LicenseStatus::InService
            | LicenseStatus::ExpiringSoon
            | LicenseStatus::Expired
            | LicenseStatus::Suspended => LicenseAction::Renew,
        }
    }

    /// Button label
    pub fn label(self) -> &'static str {
        match self {
            LicenseAction::Renew => "Renew",
            LicenseAction::MakePayment => "Make payment",
        }
    }

    /// Confirmation prompt guarding this action on `item`
    pub fn confirmation(self, item: &LicenseItem) -> ConfirmRequest {
        match self {
            LicenseAction::Renew => ConfirmRequest::new(
                "Renew license",
                format!(
                    "Renew the {} license for {}?",
                    item.package_name, item.project_name
                ),
            )
            .with_labels("Renew", "Cancel"),
            LicenseAction::MakePayment => ConfirmRequest::new(
                "Make payment",
                format!(
                    "Proceed to pay order {} for {}?",
                    item.order_no, item.project_name
                ),
            )
            .with_labels("Pay now", "Cancel"),
        }
    }
}

impl LicenseItem {
    pub fn action(&self) -> LicenseAction {
        LicenseAction::for_status(self.status)
    }
}
