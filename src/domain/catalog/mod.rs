//! Catalog domain - Product records, normalization rules and mapping

mod mapper;
pub mod normalize;
mod product;

pub use mapper::{MapperOptions, ProductMapper};
pub use product::{
    ProductCard, RawAttribute, RawDimensions, RawImage, RawProduct, RenderedText,
};
