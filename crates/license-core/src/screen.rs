//! Screen State
//!
//! Everything the license screen remembers between renders: search text, page,
//! open modals, the buy flow and which rows have a mutation in flight.

use std::collections::HashSet;

use crate::action::LicenseAction;
use crate::confirm::{ConfirmGate, ConfirmRequest};
use crate::error::{LicenseError, Result};
use crate::listing::{Pagination, filter_licenses};
use crate::model::{LicenseId, LicenseItem};
use crate::wizard::BuyFlow;

/// A confirmed row action waiting to be executed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowAction {
    pub action: LicenseAction,
    pub license_id: LicenseId,
    pub order_no: String,
}

/// Information modal state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum InfoModal {
    #[default]
    Closed,

    /// Open for a row; `None` shows the fallback record
    Open(Option<LicenseId>),
}

/// UI state of the license screen
#[derive(Clone, Debug, Default)]
pub struct LicenseScreen {
    search: String,
    pagination: Pagination,
    info: InfoModal,
    confirm: ConfirmGate<RowAction>,
    in_flight: HashSet<LicenseId>,

    /// Buy-new-license flow
    pub buy: BuyFlow,
}

impl LicenseScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pagination(pagination: Pagination) -> Self {
        Self {
            pagination,
            ..Self::default()
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Update the search text. The current page is kept as is.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn pagination_mut(&mut self) -> &mut Pagination {
        &mut self.pagination
    }

    /// Rows matching the search, before paging
    pub fn filtered<'a>(&self, items: &'a [LicenseItem]) -> Vec<&'a LicenseItem> {
        filter_licenses(items, &self.search)
    }

    /// Rows rendered on the current page
    pub fn visible_rows<'a>(&self, items: &'a [LicenseItem]) -> Vec<&'a LicenseItem> {
        let filtered = self.filtered(items);
        self.pagination.window(&filtered).to_vec()
    }

    pub fn page_count(&self, items: &[LicenseItem]) -> usize {
        self.pagination.page_count(self.filtered(items).len())
    }

    pub fn open_info(&mut self, license_id: Option<LicenseId>) {
        self.info = InfoModal::Open(license_id);
    }

    pub fn close_info(&mut self) {
        self.info = InfoModal::Closed;
    }

    pub fn info(&self) -> &InfoModal {
        &self.info
    }

    /// Whether the row's action button should be disabled
    pub fn is_pending(&self, license_id: &LicenseId) -> bool {
        self.in_flight.contains(license_id)
    }

    /// Row action button pressed: opens the confirmation prompt
    pub fn request_action(&mut self, item: &LicenseItem) -> Result<&ConfirmRequest> {
        if self.is_pending(&item.id) {
            return Err(LicenseError::InvalidTransition(format!(
                "license {} already has a request in flight",
                item.id
            )));
        }
        let action = item.action();
        self.confirm.open(
            action.confirmation(item),
            RowAction {
                action,
                license_id: item.id.clone(),
                order_no: item.order_no.clone(),
            },
        );
        self.confirm
            .request()
            .ok_or_else(|| LicenseError::InvalidTransition("confirmation did not open".into()))
    }

    pub fn confirmation(&self) -> Option<&ConfirmRequest> {
        self.confirm.request()
    }

    /// User accepted the prompt. The row is marked in flight until
    /// [`finish_action`](Self::finish_action).
    pub fn accept_confirmation(&mut self) -> Option<RowAction> {
        let action = self.confirm.accept()?;
        self.in_flight.insert(action.license_id.clone());
        Some(action)
    }

    pub fn cancel_confirmation(&mut self) {
        self.confirm.cancel();
    }

    pub fn finish_action(&mut self, license_id: &LicenseId) {
        self.in_flight.remove(license_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::model::LicenseStatus;

    #[test]
    fn test_search_keeps_current_page() {
        let items = fixtures::license_items();
        let mut screen = LicenseScreen::with_pagination(Pagination::new(1, 5).unwrap());
        screen.pagination_mut().set_page(2);

        screen.set_search("aitan");
        assert_eq!(screen.pagination().cur_page(), 2);
        assert!(screen.visible_rows(&items).is_empty());
        assert_eq!(screen.filtered(&items).len(), 2);
    }

    #[test]
    fn test_visible_rows_page_window() {
        let items = fixtures::license_items();
        let mut screen = LicenseScreen::with_pagination(Pagination::new(1, 5).unwrap());
        assert_eq!(screen.visible_rows(&items).len(), 5);
        assert_eq!(screen.page_count(&items), 3);

        screen.pagination_mut().set_page(3);
        assert_eq!(screen.visible_rows(&items).len(), 2);
    }

    #[test]
    fn test_request_action_routes_by_status() {
        let items = fixtures::license_items();
        let mut screen = LicenseScreen::new();

        let waiting = items
            .iter()
            .find(|i| i.status == LicenseStatus::WaitingForPayment)
            .unwrap();
        assert_eq!(
            screen.request_action(waiting).unwrap().title,
            "Make payment"
        );
        let action = screen.accept_confirmation().unwrap();
        assert_eq!(action.action, LicenseAction::MakePayment);
        assert_eq!(action.order_no, waiting.order_no);
    }

    #[test]
    fn test_pending_row_blocks_second_request() {
        let items = fixtures::license_items();
        let mut screen = LicenseScreen::new();
        let row = &items[0];

        screen.request_action(row).unwrap();
        screen.accept_confirmation().unwrap();
        assert!(screen.is_pending(&row.id));
        assert!(screen.request_action(row).is_err());

        screen.finish_action(&row.id);
        assert!(screen.request_action(row).is_ok());
    }

    #[test]
    fn test_cancel_confirmation_runs_nothing() {
        let items = fixtures::license_items();
        let mut screen = LicenseScreen::new();
        screen.request_action(&items[0]).unwrap();
        screen.cancel_confirmation();
        assert!(screen.accept_confirmation().is_none());
        assert!(!screen.is_pending(&items[0].id));
    }

    #[test]
    fn test_info_modal_without_id() {
        let mut screen = LicenseScreen::new();
        screen.open_info(None);
        assert_eq!(screen.info(), &InfoModal::Open(None));
        screen.close_info();
        assert_eq!(screen.info(), &InfoModal::Closed);
    }
}
