//! Wrapper that renders its children only for a signed-in user.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;
use crate::util::auth::{GateDecision, gate_decision, install_unauth_redirect};

/// Protected view gate: spinner while validating, children when signed in,
/// `/login` (replacing history) otherwise.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    move || match auth.with(gate_decision) {
        GateDecision::Render => children().into_any(),
        GateDecision::Placeholder | GateDecision::Redirect(_) => view! {
            <div class="route-gate">
                <div class="route-gate__spinner" aria-label="Loading"></div>
            </div>
        }
        .into_any(),
    }
}
