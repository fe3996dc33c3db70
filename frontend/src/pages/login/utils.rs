use leptos::*;
use storefront_common::{routes::REDIRECT_PARAM, sanitize_redirect};

#[derive(Clone, Copy)]
pub struct LoginFormState {
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
}

impl Default for LoginFormState {
    fn default() -> Self {
        Self {
            email: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
        }
    }
}

pub fn validate_credentials(email: &str, password: &str) -> Result<(), String> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Enter your email address".into());
    }
    if !email.contains('@') {
        return Err("Enter a valid email address".into());
    }
    if password.is_empty() {
        return Err("Enter your password".into());
    }
    Ok(())
}

/// The `?redirect=` value the edge guard attached, if it is a safe
/// same-origin target. The router hands it over already percent-decoded.
pub fn redirect_from_query(query: &leptos_router::ParamsMap) -> Option<String> {
    query.get(REDIRECT_PARAM).and_then(|raw| sanitize_redirect(raw))
}
