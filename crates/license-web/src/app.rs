//! Main App Component

use leptos::prelude::*;
use leptos_router::{components::*, path};

use crate::api;
use crate::pages::LicensesPage;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_context(api::DashboardHandle::new());

    view! {
        <Router>
            <main class="app">
                <Routes fallback=|| view! { <p>"Page not found"</p> }>
                    <Route path=path!("/") view=LicensesPage />
                    <Route path=path!("/licenses") view=LicensesPage />
                </Routes>
            </main>
        </Router>
    }
}
