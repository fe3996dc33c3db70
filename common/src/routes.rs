use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const HOME_ROUTE: &str = "/";
pub const LOGIN_ROUTE: &str = "/login";
pub const REDIRECT_PARAM: &str = "redirect";

/// Paths that require a session. A prefix also covers every sub-path below it,
/// so `/profile` protects `/profile/addresses` but not `/profiles`.
pub const PROTECTED_ROUTE_PREFIXES: &[&str] = &["/profile", "/checkout", "/wishlist"];

const REDIRECT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn path_of(target: &str) -> &str {
    match target.find(|c| c == '?' || c == '#') {
        Some(idx) => &target[..idx],
        None => target,
    }
}

pub fn is_login_route(path: &str) -> bool {
    let path = path_of(path);
    path == LOGIN_ROUTE || path.trim_end_matches('/') == LOGIN_ROUTE
}

pub fn is_protected_route(path: &str) -> bool {
    let path = path_of(path);
    PROTECTED_ROUTE_PREFIXES.iter().any(|prefix| {
        path == *prefix
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Accepts only same-origin relative targets (path plus optional query) that do
/// not point back at the login page.
pub fn sanitize_redirect(raw: &str) -> Option<String> {
    let target = raw.trim();
    if !target.starts_with('/') || target.starts_with("//") || target.starts_with("/\\") {
        return None;
    }
    if target.chars().any(char::is_control) {
        return None;
    }
    if is_login_route(target) {
        return None;
    }
    Some(target.to_string())
}

pub fn login_url_with_redirect(target: &str) -> String {
    match sanitize_redirect(target) {
        Some(target) if target != HOME_ROUTE => format!(
            "{}?{}={}",
            LOGIN_ROUTE,
            REDIRECT_PARAM,
            utf8_percent_encode(&target, REDIRECT_ENCODE_SET)
        ),
        _ => LOGIN_ROUTE.to_string(),
    }
}
