//! # license-core
//!
//! Domain model and UI-independent state for the license dashboard.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       LicenseScreen                           │
//! │  ┌─────────────┐  ┌─────────────┐  ┌──────────────────────┐  │
//! │  │  Search &   │  │ ConfirmGate │  │  BuyFlow             │  │
//! │  │  Pagination │  │ (RowAction) │  │  Idle → Assign → Pkg │  │
//! │  └─────────────┘  └─────────────┘  └──────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//!          ▲                                   │
//!          │ LicenseItem / LicenseInfo          │ PurchaseOrder
//!  ┌───────┴────────┐                 ┌────────▼─────────┐
//!  │   QueryCache   │◀─ directives ───│  mutation layer  │
//!  └────────────────┘                 │ (license-client) │
//!                                     └──────────────────┘
//! ```
//!
//! Nothing here performs I/O. Fetching and mutations live in `license-client`;
//! this crate decides what is shown, which action a row offers and how cache
//! directives change the cached queries.

pub mod action;
pub mod cache;
pub mod confirm;
pub mod error;
pub mod fixtures;
pub mod listing;
pub mod model;
pub mod notify;
pub mod screen;
pub mod status;
pub mod wizard;

pub use action::LicenseAction;
pub use cache::{CacheDirective, CachedValue, QueryCache, QueryKey};
pub use confirm::{ConfirmGate, ConfirmRequest};
pub use error::{LicenseError, Result};
pub use listing::Pagination;
pub use model::{
    FeatureBundle, LicenseId, LicenseInfo, LicenseItem, LicenseStatus, PackageOffer,
    PackageSelection, PackageType, ProjectId, ProjectOption,
};
pub use notify::{
    Notification, NotificationLevel, NotificationQueue, TOAST_DURATION, Toast, ToastList,
};
pub use screen::{InfoModal, LicenseScreen, RowAction};
pub use status::StatusStyle;
pub use wizard::{BuyFlow, PurchaseOrder};
