use serde::{Deserialize, Deserializer, Serialize};

/// Display-ready representation of one catalog item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProductCard {
    pub fn has_image(&self) -> bool {
        self.image.as_deref().is_some_and(|src| !src.is_empty())
    }
}

/// Text field that the upstream sends either as a plain string or as
/// a WordPress `{ "rendered": "..." }` object
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RenderedText {
    Plain(String),
    Rendered { rendered: String },
}

impl RenderedText {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(text) => text,
            Self::Rendered { rendered } => rendered,
        }
    }
}

impl Default for RenderedText {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawImage {
    #[serde(default)]
    pub src: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawDimensions {
    #[serde(default, deserialize_with = "string_or_number")]
    pub width: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub height: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub length: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawAttribute {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
}

/// Product record as returned by the upstream catalog API
///
/// The field set differs between upstream versions, so everything except
/// `id` is optional, `null` counts as absent and unknown fields are ignored.
/// WooCommerce sends `name`/`permalink`, WordPress posts send `title`/`link`;
/// some records carry both and the WooCommerce field wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawProduct {
    pub id: u64,
    #[serde(default)]
    pub name: Option<RenderedText>,
    #[serde(default)]
    pub title: Option<RenderedText>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub images: Vec<RawImage>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub regular_price: Option<String>,
    #[serde(default)]
    pub dimensions: Option<RawDimensions>,
    #[serde(default)]
    pub description: Option<RenderedText>,
    #[serde(default)]
    pub attributes: Vec<RawAttribute>,
}

impl RawProduct {
    /// `name`, else `title`; blank values fall through
    pub fn name_text(&self) -> &str {
        first_non_blank([
            self.name.as_ref().map(RenderedText::as_str),
            self.title.as_ref().map(RenderedText::as_str),
        ])
    }

    pub fn slug_text(&self) -> &str {
        first_non_blank([self.slug.as_deref()])
    }

    /// `permalink`, else `link`; blank values fall through
    pub fn permalink_text(&self) -> &str {
        first_non_blank([self.permalink.as_deref(), self.link.as_deref()])
    }

    pub fn description_html(&self) -> &str {
        self.description
            .as_ref()
            .map(RenderedText::as_str)
            .unwrap_or("")
    }

    pub fn first_image_src(&self) -> Option<&str> {
        self.images.first().and_then(|image| image.src.as_deref())
    }
}

fn first_non_blank<const N: usize>(candidates: [Option<&str>; N]) -> &str {
    candidates
        .into_iter()
        .flatten()
        .find(|text| !text.trim().is_empty())
        .unwrap_or("")
}

/// Accepts `"45"`, `45`, `45.5` or `null` and keeps the textual form
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(serde_json::Value::String(text)) => Some(text),
        Some(serde_json::Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}
