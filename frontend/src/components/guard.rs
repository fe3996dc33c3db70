use crate::state::{
    auth::{use_auth, use_auth_services},
    gate::AuthGate,
};
use leptos::*;
use leptos_router::{use_location, RouterContext};
use storefront_common::is_protected_route;

/// Client-side twin of the edge route guard. Renders children for public
/// routes or a live session; otherwise hands off to the auth gate, which
/// remembers where the user was going.
///
/// Inside a `<Router/>` the protected check follows the router's pathname, so
/// client-side navigation between routes sharing one view is re-evaluated.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth, _) = use_auth();
    let gate = use_auth_services().gate;
    let router_pathname = use_context::<RouterContext>().map(|_| use_location().pathname);
    let initial_location = gate.navigator().current_location();
    let protected = Signal::derive(move || match router_pathname {
        Some(pathname) => pathname.with(|path| is_protected_route(path)),
        None => initial_location.as_deref().map_or(true, is_protected_route),
    });

    create_effect(move |_| {
        enforce_guard(&gate, auth.get().is_authenticated, protected.get());
    });

    view! {
        <Show
            when=move || should_render_children(auth.get().is_authenticated, protected.get())
            fallback=|| ()
        >
            {children()}
        </Show>
    }
}

fn should_render_children(is_authenticated: bool, protected: bool) -> bool {
    is_authenticated || !protected
}

/// Sends a guest on a protected route through the gate. Returns whether the
/// children may render.
fn enforce_guard(gate: &AuthGate, is_authenticated: bool, protected: bool) -> bool {
    if should_render_children(is_authenticated, protected) {
        return true;
    }
    gate.check()
}
