pub mod auth;
pub mod gate;
pub mod reconciler;
pub mod redirect;
pub mod session;
