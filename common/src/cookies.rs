use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const ACCESS_COOKIE_NAME: &str = "_at";
pub const REFRESH_COOKIE_NAME: &str = "_rt";
pub const LOGGED_IN_COOKIE_NAME: &str = "_iil";
pub const NEWSLETTER_COOKIE_NAME: &str = "_nlj";
pub const LOGGED_IN_SENTINEL: &str = "true";
pub const COOKIE_PATH: &str = "/";

/// Raw values of the three session cookies. Tokens are opaque here; the API
/// decides whether they are still valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCookies {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub is_logged_in: Option<String>,
}

impl SessionCookies {
    pub fn logged_in(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            refresh_token: Some(refresh_token.into()),
            is_logged_in: Some(LOGGED_IN_SENTINEL.to_string()),
        }
    }

    pub fn from_cookie_header(header: &str) -> Self {
        Self {
            access_token: extract_cookie_value(header, ACCESS_COOKIE_NAME),
            refresh_token: extract_cookie_value(header, REFRESH_COOKIE_NAME),
            is_logged_in: extract_cookie_value(header, LOGGED_IN_COOKIE_NAME),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());
        present(&self.access_token)
            && present(&self.refresh_token)
            && self.is_logged_in.as_deref() == Some(LOGGED_IN_SENTINEL)
    }
}

pub fn build_cookie(name: &str, value: &str, max_age: Duration) -> String {
    format!(
        "{}={}; Path={}; Max-Age={}; SameSite=Lax",
        name,
        value,
        COOKIE_PATH,
        max_age.as_secs()
    )
}

pub fn build_clear_cookie(name: &str) -> String {
    format!("{}=; Path={}; Max-Age=0; SameSite=Lax", name, COOKIE_PATH)
}

pub fn extract_cookie_value(header: &str, name: &str) -> Option<String> {
    header.split(';').map(str::trim).find_map(|pair| {
        let mut parts = pair.splitn(2, '=');
        let key = parts.next()?.trim();
        let value = parts.next()?.trim();
        if key == name {
            Some(value.to_string())
        } else {
            None
        }
    })
}
