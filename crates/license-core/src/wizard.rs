//! Buy-New-License Flow
//!
//! Assign project, then select package, then create. The selected project only
//! exists inside the steps that need it.

use crate::error::{LicenseError, Result};
use crate::model::{PackageSelection, ProjectId};

/// Step of the buy flow
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum BuyFlow {
    #[default]
    Idle,

    /// Project-assignment modal open
    AssigningProject { selected: Option<ProjectId> },

    /// Package-selection modal open for a chosen project
    SelectingPackage { project_id: ProjectId },
}

/// What the flow hands to the create mutation once a package is confirmed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PurchaseOrder {
    pub project_id: ProjectId,
    pub selection: PackageSelection,
}

impl BuyFlow {
    /// "Buy new license" pressed
    pub fn start(&mut self) -> Result<()> {
        match self {
            BuyFlow::Idle => {
                *self = BuyFlow::AssigningProject { selected: None };
                Ok(())
            }
            _ => Err(LicenseError::InvalidTransition(
                "buy flow already in progress".into(),
            )),
        }
    }

    pub fn select_project(&mut self, project_id: ProjectId) -> Result<()> {
        match self {
            BuyFlow::AssigningProject { selected } => {
                *selected = Some(project_id);
                Ok(())
            }
            _ => Err(LicenseError::InvalidTransition(
                "project can only be chosen while assigning".into(),
            )),
        }
    }

    /// Whether Continue is enabled in the assignment modal
    pub fn can_continue(&self) -> bool {
        matches!(self, BuyFlow::AssigningProject { selected: Some(_) })
    }

    /// Move from project assignment to package selection
    pub fn proceed(&mut self) -> Result<()> {
        match self {
            BuyFlow::AssigningProject {
                selected: Some(project_id),
            } => {
                *self = BuyFlow::SelectingPackage {
                    project_id: project_id.clone(),
                };
                Ok(())
            }
            BuyFlow::AssigningProject { selected: None } => Err(LicenseError::NoProjectSelected),
            _ => Err(LicenseError::InvalidTransition(
                "continue is only available while assigning".into(),
            )),
        }
    }

    /// Close whichever modal is open and forget the selection
    pub fn cancel(&mut self) {
        *self = BuyFlow::Idle;
    }

    /// Order for the chosen package. The flow stays on the package step so
    /// the modal can show progress and stay open if creation fails.
    pub fn pending_order(&self, selection: PackageSelection) -> Result<PurchaseOrder> {
        match self {
            BuyFlow::SelectingPackage { project_id } => Ok(PurchaseOrder {
                project_id: project_id.clone(),
                selection,
            }),
            _ => Err(LicenseError::InvalidTransition(
                "no package selection in progress".into(),
            )),
        }
    }

    /// The order was created: close the flow
    pub fn complete(&mut self) -> Result<()> {
        match self {
            BuyFlow::SelectingPackage { .. } => {
                *self = BuyFlow::Idle;
                Ok(())
            }
            _ => Err(LicenseError::InvalidTransition(
                "no package selection in progress".into(),
            )),
        }
    }

    pub fn selected_project(&self) -> Option<&ProjectId> {
        match self {
            BuyFlow::AssigningProject { selected } => selected.as_ref(),
            BuyFlow::SelectingPackage { project_id } => Some(project_id),
            BuyFlow::Idle => None,
        }
    }

    pub fn is_assigning(&self) -> bool {
        matches!(self, BuyFlow::AssigningProject { .. })
    }

    pub fn is_selecting_package(&self) -> bool {
        matches!(self, BuyFlow::SelectingPackage { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PackageType;

    fn selection() -> PackageSelection {
        PackageSelection {
            package_type: PackageType::Standard,
            features: vec!["Resident app".into()],
            payment_method: None,
        }
    }

    #[test]
    fn test_continue_disabled_until_selection() {
        let mut flow = BuyFlow::default();
        flow.start().unwrap();
        assert!(!flow.can_continue());
        assert_eq!(flow.proceed(), Err(LicenseError::NoProjectSelected));

        flow.select_project(ProjectId::new("p3")).unwrap();
        assert!(flow.can_continue());
    }

    #[test]
    fn test_full_flow_returns_order_and_resets() {
        let mut flow = BuyFlow::default();
        flow.start().unwrap();
        flow.select_project(ProjectId::new("p1")).unwrap();
        flow.proceed().unwrap();
        assert!(flow.is_selecting_package());
        assert_eq!(flow.selected_project().map(ProjectId::as_str), Some("p1"));

        let order = flow.pending_order(selection()).unwrap();
        assert_eq!(order.project_id.as_str(), "p1");
        assert!(flow.is_selecting_package());

        flow.complete().unwrap();
        assert_eq!(flow, BuyFlow::Idle);
        assert!(flow.selected_project().is_none());
    }

    #[test]
    fn test_cancel_from_package_step_clears_project() {
        let mut flow = BuyFlow::default();
        flow.start().unwrap();
        flow.select_project(ProjectId::new("p2")).unwrap();
        flow.proceed().unwrap();
        flow.cancel();
        assert_eq!(flow, BuyFlow::Idle);
        assert!(flow.selected_project().is_none());
    }

    #[test]
    fn test_cancel_from_assignment_clears_selection() {
        let mut flow = BuyFlow::default();
        flow.start().unwrap();
        flow.select_project(ProjectId::new("p2")).unwrap();
        flow.cancel();
        flow.start().unwrap();
        assert!(!flow.can_continue());
    }

    #[test]
    fn test_order_outside_package_step_keeps_state() {
        let mut flow = BuyFlow::default();
        flow.start().unwrap();
        assert!(flow.pending_order(selection()).is_err());
        assert!(flow.complete().is_err());
        assert!(flow.is_assigning());
    }

    #[test]
    fn test_package_step_survives_until_completed() {
        let mut flow = BuyFlow::default();
        flow.start().unwrap();
        flow.select_project(ProjectId::new("p4")).unwrap();
        flow.proceed().unwrap();

        // a failed create leaves the modal open for another attempt
        flow.pending_order(selection()).unwrap();
        let retry = flow.pending_order(selection()).unwrap();
        assert_eq!(retry.project_id.as_str(), "p4");
        assert!(flow.is_selecting_package());
    }

    #[test]
    fn test_double_start_rejected() {
        let mut flow = BuyFlow::default();
        flow.start().unwrap();
        assert!(flow.start().is_err());
    }
}
