//! Domain layer - Catalog entities, normalization rules and errors

pub mod catalog;
pub mod error;

pub use catalog::{MapperOptions, ProductCard, ProductMapper, RawProduct};
pub use error::DomainError;
