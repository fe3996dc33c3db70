use std::rc::Rc;

use storefront_common::routes::{is_login_route, LOGIN_ROUTE};

use crate::{
    api::PendingRequest,
    state::{redirect::RedirectMemory, session::SessionState},
    utils::navigation::Navigator,
};

/// Login wall shared by client-side gating and the API client's 401 path, so
/// both leave the same redirect memory behind for the reconciler.
#[derive(Clone)]
pub struct AuthGate {
    session: SessionState,
    redirect: RedirectMemory,
    navigator: Rc<dyn Navigator>,
}

impl AuthGate {
    pub fn new(
        session: SessionState,
        redirect: RedirectMemory,
        navigator: impl Navigator + 'static,
    ) -> Self {
        Self {
            session,
            redirect,
            navigator: Rc::new(navigator),
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn redirect_memory(&self) -> &RedirectMemory {
        &self.redirect
    }

    pub fn navigator(&self) -> Rc<dyn Navigator> {
        Rc::clone(&self.navigator)
    }

    /// Returns true when the caller may proceed. Otherwise the current
    /// location has been remembered and the browser sent to the login page.
    pub fn check(&self) -> bool {
        if self.session.is_authenticated() {
            return true;
        }
        self.send_to_login();
        false
    }

    /// Wraps `action` so it only runs with a session. A blocked call yields
    /// `None` and is dropped; the user repeats it after logging in.
    pub fn require_auth<A, R, F>(&self, action: F) -> impl Fn(A) -> Option<R>
    where
        F: Fn(A) -> R,
    {
        let gate = self.clone();
        move |args| gate.check().then(|| action(args))
    }

    /// The API answered 401: the cookies are stale, so drop them, park the
    /// request for replay and go to the login page.
    pub fn reject_request(&self, request: PendingRequest) {
        if self.on_login_page() {
            log::debug!("ignoring 401 for {} while on the login page", request.url);
            return;
        }
        self.session.invalidate();
        self.redirect.push_pending_request(request);
        self.send_to_login();
    }

    fn on_login_page(&self) -> bool {
        self.navigator
            .current_location()
            .is_some_and(|location| is_login_route(&location))
    }

    fn send_to_login(&self) {
        let Some(location) = self.navigator.current_location() else {
            self.navigator.navigate(LOGIN_ROUTE);
            return;
        };
        if is_login_route(&location) {
            return;
        }
        self.redirect.store_redirect_url(&location);
        self.navigator.navigate(LOGIN_ROUTE);
    }
}
