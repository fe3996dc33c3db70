use leptos::*;
use leptos_meta::*;
use leptos_router::*;

pub mod api;
mod components;
pub mod config;
mod pages;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

use components::guard::RequireAuth;
use pages::{home::HomePage, login::LoginPage, profile::ProfilePage};
use state::auth::AuthProvider;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
    log::info!("starting storefront frontend");

    // Runtime config resolves in the background; API calls await it.
    leptos::spawn_local(async move {
        config::init().await;
    });

    mount_to_body(App);
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Storefront" />
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/profile" view=ProtectedProfile/>
                    <Route path="/profile/*any" view=ProtectedProfile/>
                    <Route path="/*any" view=GuardedFallback/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}

#[component]
fn ProtectedProfile() -> impl IntoView {
    view! { <RequireAuth><ProfilePage/></RequireAuth> }
}

/// Unmatched paths show the shop, except protected prefixes without their own
/// page (`/checkout`, `/wishlist`), which the guard keeps behind the login.
#[component]
fn GuardedFallback() -> impl IntoView {
    view! { <RequireAuth><HomePage/></RequireAuth> }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::App;
    use crate::test_support::helpers::provide_auth;
    use crate::test_support::ssr::render_to_string;
    use leptos::*;
    use leptos_router::{RouterIntegrationContext, ServerIntegration};

    fn render_app_at(path: &'static str, authenticated: bool) -> String {
        render_to_string(move || {
            provide_context(RouterIntegrationContext::new(ServerIntegration {
                path: format!("http://localhost{path}"),
            }));
            provide_auth(path, authenticated);
            view! { <App/> }
        })
    }

    fn shows_page_content(html: &str) -> bool {
        html.contains("Linen Shirt") || html.contains("Your profile")
    }

    #[test]
    fn guest_never_sees_protected_pages() {
        for path in [
            "/profile",
            "/profile/addresses",
            "/checkout",
            "/checkout/payment",
            "/wishlist",
            "/wishlist/shared",
        ] {
            let html = render_app_at(path, false);
            assert!(!shows_page_content(&html), "{path} rendered for a guest: {html}");
        }
    }

    #[test]
    fn guest_sees_public_pages() {
        for path in ["/", "/product/42", "/profiles"] {
            assert!(render_app_at(path, false).contains("Linen Shirt"), "{path}");
        }
    }

    #[test]
    fn signed_in_user_sees_protected_pages() {
        assert!(render_app_at("/wishlist", true).contains("Linen Shirt"));
        assert!(render_app_at("/profile/addresses", true).contains("Your profile"));
    }
}
