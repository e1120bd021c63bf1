//! Raw upstream product → display card mapping

use super::normalize::{
    derive_dimensions, dimensions_from_attributes, extract_first_image_src, format_price,
    medium_from_attributes, normalize_image, normalize_medium_text, scrub_title_dimensions,
    strip_tags,
};
use super::product::{ProductCard, RawProduct};

/// Switches between the field rules the catalog has used over time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapperOptions {
    /// Rewrite thumbnail URLs to the full-size asset
    pub full_size_images: bool,
    /// Append an inch unit to dimensions and remove them from the title
    pub scrub_title_dimensions: bool,
}

impl Default for MapperOptions {
    fn default() -> Self {
        Self {
            full_size_images: true,
            scrub_title_dimensions: false,
        }
    }
}

impl MapperOptions {
    pub fn with_full_size_images(mut self, enabled: bool) -> Self {
        self.full_size_images = enabled;
        self
    }

    pub fn with_scrub_title_dimensions(mut self, enabled: bool) -> Self {
        self.scrub_title_dimensions = enabled;
        self
    }
}

type Candidate<'a> = &'a dyn Fn() -> Option<String>;

/// Evaluates candidates in order and returns the first non-empty value.
fn first_present(candidates: &[Candidate<'_>]) -> Option<String> {
    candidates
        .iter()
        .find_map(|candidate| candidate().filter(|value| !value.trim().is_empty()))
}

/// Maps raw upstream products to [`ProductCard`]s
#[derive(Debug, Clone, Default)]
pub struct ProductMapper {
    options: MapperOptions,
}

impl ProductMapper {
    pub fn new(options: MapperOptions) -> Self {
        Self { options }
    }

    /// Maps one record. Returns `None` when the record has no usable title.
    ///
    /// The resulting card may still lack an image; see [`Self::map_all`].
    pub fn map(&self, raw: &RawProduct) -> Option<ProductCard> {
        let title = normalize_medium_text(&strip_tags(raw.name_text()));

        if title.is_empty() {
            return None;
        }

        let scrub = self.options.scrub_title_dimensions;
        let full_size = self.options.full_size_images;

        let dimensions = first_present(&[
            &|| dimensions_from_attributes(&raw.attributes),
            &|| derive_dimensions(&title, raw.dimensions.as_ref(), scrub),
        ]);

        let medium = medium_from_attributes(&raw.attributes);

        let price_text = format_price(raw.price.as_deref(), raw.regular_price.as_deref());

        let image = first_present(&[
            &|| raw.first_image_src().and_then(|src| normalize_image(src, full_size)),
            &|| extract_first_image_src(raw.description_html(), full_size),
        ]);

        let description = Some(normalize_medium_text(&strip_tags(raw.description_html())))
            .filter(|text| !text.is_empty());

        let title = if scrub {
            Some(scrub_title_dimensions(&title))
                .filter(|scrubbed| !scrubbed.is_empty())
                .unwrap_or(title)
        } else {
            title
        };

        Some(ProductCard {
            id: raw.id,
            title,
            slug: raw.slug_text().to_string(),
            link: raw.permalink_text().to_string(),
            image,
            price_text,
            dimensions,
            medium,
            description,
        })
    }

    /// Maps a batch, silently dropping records without a title or image.
    pub fn map_all(&self, raws: &[RawProduct]) -> Vec<ProductCard> {
        raws.iter()
            .filter_map(|raw| self.map(raw))
            .filter(ProductCard::has_image)
            .collect()
    }
}
