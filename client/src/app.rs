//! Application shell: shared auth context and routing.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::pages::client_dashboard::ClientDashboardPage;
use crate::pages::login::LoginPage;
use crate::pages::staff_dashboard::StaffDeskPage;
use crate::state::auth::AuthState;

/// Root component: provides the auth signal and mounts the routes.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::loading());
    provide_context(auth);

    view! {
        <Title text="VetDesk"/>
        <Router>
            <Routes fallback=|| view! { <p class="not-found">"Page not found"</p> }>
                <Route path=path!("/") view=ClientDashboardPage/>
                <Route path=path!("/staff") view=StaffDeskPage/>
                <Route path=path!("/login") view=LoginPage/>
            </Routes>
        </Router>
    }
}
