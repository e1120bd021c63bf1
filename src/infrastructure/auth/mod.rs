//! Login and session token handling

mod login;
mod token;

pub use login::{LoginError, LoginService};
pub use token::{constant_time_compare, IssuedToken, TokenSigner};
