//! # license-client
//!
//! Data access for the license dashboard: query sources, the mutation layer
//! and the [`Dashboard`] service that ties them to the query cache and the
//! toast queue.
//!
//! ```text
//! ┌──────────────┐  reads   ┌──────────────────────────────┐
//! │  Dashboard   │─────────▶│ LicenseSource                │
//! │              │          │  ├─ MockLicenseSource        │
//! │  QueryCache  │          │  └─ RemoteLicenseSource ──┐  │
//! │  Toasts      │  writes  └───────────────────────────┼──┘
//! │              │─────────▶ LicenseMutations ──────────┤
//! └──────────────┘            (retry + normalize)       ▼
//!                                               HttpTransport (reqwest)
//! ```
//!
//! Every response, success or not, passes through [`response::normalize`]:
//! an HTTP status of 400 or more, or a body `statusCode` of 400 or more,
//! is a failure carrying the server's `message` (or `error`) when present.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod mutation;
pub mod response;
pub mod retry;
pub mod source;
pub mod transport;

pub use config::{ClientConfig, SourceKind};
pub use dashboard::Dashboard;
pub use error::{ClientError, Result};
pub use mutation::{
    CreateLicense, LicenseMutations, MakePayment, MutationKind, MutationOutcome, RenewLicense,
};
pub use retry::RetryPolicy;
pub use source::{LicenseSource, MockLicenseSource, RemoteLicenseSource};
pub use transport::{ApiRequest, HttpTransport, Method, RawResponse, ReqwestTransport};
