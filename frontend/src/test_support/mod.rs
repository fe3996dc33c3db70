#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::ApiClient;
    use crate::state::{
        auth::{AuthServices, AuthState},
        gate::AuthGate,
        redirect::RedirectMemory,
        session::{MemorySessionStore, SessionState},
    };
    use crate::utils::{navigation::RecordingNavigator, storage::MemoryStorage};
    use leptos::*;
    use storefront_common::SessionCookies;

    pub fn in_memory_services(
        base_url: &str,
        location: &str,
        cookies: SessionCookies,
    ) -> (AuthServices, RecordingNavigator) {
        let nav = RecordingNavigator::at(location);
        let gate = AuthGate::new(
            SessionState::new(MemorySessionStore::with_cookies(cookies)),
            RedirectMemory::new(MemoryStorage::new()),
            nav.clone(),
        );
        let services = AuthServices::new(gate, ApiClient::new_with_base_url(base_url));
        (services, nav)
    }

    /// Provides in-memory services and a matching auth signal to the current
    /// reactive scope.
    pub fn provide_auth(location: &str, authenticated: bool) -> (AuthServices, RecordingNavigator) {
        let cookies = if authenticated {
            SessionCookies::logged_in("access", "refresh")
        } else {
            SessionCookies::default()
        };
        let (services, nav) = in_memory_services("http://localhost:3000/api", location, cookies);
        let (auth, set_auth) = create_signal(AuthState {
            is_authenticated: authenticated,
        });
        provide_context(services.clone());
        provide_context((auth, set_auth));
        (services, nav)
    }
}
