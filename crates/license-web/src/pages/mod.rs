//! Page Components

mod licenses;

pub use licenses::LicensesPage;
