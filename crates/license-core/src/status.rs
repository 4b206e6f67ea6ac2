//! Status Pill Styling
//!
//! Maps every [`LicenseStatus`] to the label and colors of its pill. The match
//! is exhaustive, so a new status cannot render as a blank pill.

use crate::model::LicenseStatus;

/// Label and colors for a status pill
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusStyle {
    pub label: &'static str,

    /// Text color (hex)
    pub foreground: &'static str,

    /// Pill background (hex)
    pub background: &'static str,
}

impl LicenseStatus {
    pub fn style(self) -> StatusStyle {
        match self {
            LicenseStatus::InService => StatusStyle {
                label: "In service",
                foreground: "#027A48",
                background: "#ECFDF3",
            },
            LicenseStatus::ExpiringSoon => StatusStyle {
                label: "Expiring soon",
                foreground: "#B54708",
                background: "#FFFAEB",
            },
            LicenseStatus::Expired => StatusStyle {
                label: "Expired",
                foreground: "#B42318",
                background: "#FEF3F2",
            },
            LicenseStatus::Suspended => StatusStyle {
                label: "Suspended",
                foreground: "#344054",
                background: "#F2F4F7",
            },
            LicenseStatus::WaitingForPayment => StatusStyle {
                label: "Waiting for payment",
                foreground: "#175CD3",
                background: "#EFF8FF",
            },
        }
    }

    pub fn label(self) -> &'static str {
        self.style().label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_status_has_a_label() {
        for status in LicenseStatus::ALL {
            let style = status.style();
            assert!(!style.label.is_empty());
            assert!(style.foreground.starts_with('#'));
            assert!(style.background.starts_with('#'));
        }
    }

    #[test]
    fn test_labels_are_distinct() {
        let labels: HashSet<_> = LicenseStatus::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels.len(), LicenseStatus::ALL.len());
    }
}
