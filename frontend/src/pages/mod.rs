pub mod home;
pub mod login;
pub mod profile;

pub use home::*;
pub use login::*;
pub use profile::*;
