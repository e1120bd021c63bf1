//! Infrastructure layer - External service implementations

pub mod auth;
pub mod catalog;
pub mod logging;
pub mod upstream;
