//! Route and cookie conventions shared by the storefront frontend and the edge
//! server. Both sides must agree on which paths need a session and on how the
//! session cookies are named, so they live here and nowhere else.

pub mod cookies;
pub mod routes;

pub use cookies::SessionCookies;
pub use routes::{is_protected_route, login_url_with_redirect, sanitize_redirect};
