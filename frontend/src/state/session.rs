use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};

use storefront_common::{
    cookies::{
        build_clear_cookie, build_cookie, ACCESS_COOKIE_NAME, LOGGED_IN_COOKIE_NAME,
        NEWSLETTER_COOKIE_NAME, REFRESH_COOKIE_NAME,
    },
    routes::HOME_ROUTE,
    SessionCookies,
};
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use crate::{state::redirect::RedirectMemory, utils::navigation::Navigator};

const SESSION_COOKIE_MAX_AGE: Duration = Duration::from_secs(7 * 24 * 60 * 60);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStatus {
    pub authenticated: bool,
}

/// Where the session cookies live. `clear` also drops the newsletter cache
/// cookie so a different user never inherits it.
pub trait SessionStore {
    fn get(&self) -> SessionCookies;
    fn set(&self, cookies: &SessionCookies);
    fn clear(&self);
}

#[derive(Debug, Clone, Copy)]
pub struct CookieSessionStore {
    max_age: Duration,
}

impl Default for CookieSessionStore {
    fn default() -> Self {
        Self {
            max_age: SESSION_COOKIE_MAX_AGE,
        }
    }
}

fn html_document() -> Option<HtmlDocument> {
    web_sys::window()?
        .document()?
        .dyn_into::<HtmlDocument>()
        .ok()
}

fn write_cookie(cookie: &str) {
    let written = html_document().map(|doc| doc.set_cookie(cookie).is_ok());
    if written != Some(true) {
        log::warn!("unable to write session cookie");
    }
}

impl SessionStore for CookieSessionStore {
    fn get(&self) -> SessionCookies {
        html_document()
            .and_then(|doc| doc.cookie().ok())
            .map(|raw| SessionCookies::from_cookie_header(&raw))
            .unwrap_or_default()
    }

    fn set(&self, cookies: &SessionCookies) {
        let pairs = [
            (ACCESS_COOKIE_NAME, &cookies.access_token),
            (REFRESH_COOKIE_NAME, &cookies.refresh_token),
            (LOGGED_IN_COOKIE_NAME, &cookies.is_logged_in),
        ];
        for (name, value) in pairs {
            match value {
                Some(value) => write_cookie(&build_cookie(name, value, self.max_age)),
                None => write_cookie(&build_clear_cookie(name)),
            }
        }
    }

    fn clear(&self) {
        for name in [
            ACCESS_COOKIE_NAME,
            REFRESH_COOKIE_NAME,
            LOGGED_IN_COOKIE_NAME,
            NEWSLETTER_COOKIE_NAME,
        ] {
            write_cookie(&build_clear_cookie(name));
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    cookies: Rc<RefCell<SessionCookies>>,
    newsletter_joined: Rc<Cell<bool>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cookies(cookies: SessionCookies) -> Self {
        let store = Self::default();
        store.set(&cookies);
        store
    }

    pub fn mark_newsletter_joined(&self) {
        self.newsletter_joined.set(true);
    }

    pub fn newsletter_joined(&self) -> bool {
        self.newsletter_joined.get()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> SessionCookies {
        self.cookies.borrow().clone()
    }

    fn set(&self, cookies: &SessionCookies) {
        *self.cookies.borrow_mut() = cookies.clone();
    }

    fn clear(&self) {
        *self.cookies.borrow_mut() = SessionCookies::default();
        self.newsletter_joined.set(false);
    }
}

/// Observer over the session cookies. Token validity is never checked here;
/// the API answers 401 when they are stale.
#[derive(Clone)]
pub struct SessionState {
    store: Rc<dyn SessionStore>,
    optimistic: Rc<Cell<bool>>,
}

impl SessionState {
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self {
            store: Rc::new(store),
            optimistic: Rc::new(Cell::new(false)),
        }
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            authenticated: self.optimistic.get() || self.store.get().is_authenticated(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.status().authenticated
    }

    pub fn access_token(&self) -> Option<String> {
        self.store.get().access_token.filter(|token| !token.is_empty())
    }

    pub fn establish(&self, cookies: &SessionCookies) {
        self.store.set(cookies);
    }

    /// Treat the session as authenticated until the cookies are next re-read on
    /// a fresh page load.
    pub fn mark_authenticated(&self) {
        self.optimistic.set(true);
    }

    pub fn invalidate(&self) {
        self.optimistic.set(false);
        self.store.clear();
    }
}

pub fn logout(session: &SessionState, redirect: &RedirectMemory, navigator: &dyn Navigator) {
    session.invalidate();
    redirect.clear_all();
    log::info!("session cleared, returning home");
    navigator.navigate(HOME_ROUTE);
}
