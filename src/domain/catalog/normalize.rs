//! Field normalization rules for upstream catalog records
//!
//! Every function here is pure. Empty strings are treated exactly like
//! missing values: anything that normalizes to an empty string comes back
//! as `None`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::product::{RawAttribute, RawDimensions};

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

static OLIO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bolio\b").expect("valid medium pattern"));

static THUMBNAIL_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)-\d+x\d+(\.(?:jpe?g|png|gif|webp|avif))\b").expect("valid thumbnail pattern")
});

// Group 1 is the dimension text itself; the outer groups only assert that
// the numbers are not part of longer digit runs.
static TITLE_DIMENSIONS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|\D)((\d{2,3})\s*x\s*(\d{2,3}))(?:\D|$)")
        .expect("valid dimensions pattern")
});

static IMG_SRC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<img\b[^>]*?\bsrc\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("valid img pattern")
});

const DIMENSION_UNIT: &str = " in";

/// Removes `<...>` markup, collapses whitespace runs and trims.
pub fn strip_tags(html: &str) -> String {
    let without_tags = TAG_RE.replace_all(html, "");
    WHITESPACE_RE
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

/// Replaces the standalone word "olio" with "óleo", keeping its casing.
pub fn normalize_medium_text(text: &str) -> String {
    OLIO_RE
        .replace_all(text, |caps: &Captures| {
            let word = &caps[0];

            if word.chars().all(char::is_uppercase) {
                "ÓLEO"
            } else if word.chars().next().is_some_and(char::is_uppercase) {
                "Óleo"
            } else {
                "óleo"
            }
        })
        .into_owned()
}

/// Normalizes an image URL: forces https and, when `full_size` is set,
/// drops WordPress `-<w>x<h>` thumbnail suffixes.
pub fn normalize_image(src: &str, full_size: bool) -> Option<String> {
    let trimmed = src.trim();

    if trimmed.is_empty() {
        return None;
    }

    let secure = match trimmed.get(..7) {
        Some(scheme) if scheme.eq_ignore_ascii_case("http://") => {
            format!("https://{}", &trimmed[7..])
        }
        _ => trimmed.to_string(),
    };

    if full_size {
        Some(THUMBNAIL_SUFFIX_RE.replace(&secure, "$1").into_owned())
    } else {
        Some(secure)
    }
}

/// Formats a price as `$<amount> USD`, preferring the sale price.
pub fn format_price(sale: Option<&str>, regular: Option<&str>) -> Option<String> {
    [sale, regular]
        .into_iter()
        .flatten()
        .find_map(parse_amount)
        .map(format_usd)
}

fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn format_usd(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    let sign = if rounded < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", rounded.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut out = format!("{}${}", sign, group_thousands(integer));

    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }

    out.push_str(" USD");
    out
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

/// Derives a dimensions label from structured width/height, else from a
/// `24x36`-style pattern in the title.
pub fn derive_dimensions(
    title: &str,
    structured: Option<&RawDimensions>,
    with_unit: bool,
) -> Option<String> {
    let from_structured = structured.and_then(|dims| {
        let width = dims.width.as_deref().map(str::trim).unwrap_or("");
        let height = dims.height.as_deref().map(str::trim).unwrap_or("");

        (!width.is_empty() && !height.is_empty()).then(|| format!("{} x {}", width, height))
    });

    let label = from_structured.or_else(|| {
        TITLE_DIMENSIONS_RE
            .captures(title)
            .map(|caps| format!("{} x {}", &caps[2], &caps[3]))
    })?;

    if with_unit {
        Some(format!("{}{}", label, DIMENSION_UNIT))
    } else {
        Some(label)
    }
}

/// Removes the first dimension pattern (with any unit, parentheses and
/// dashes around it) from a display title.
pub fn scrub_title_dimensions(title: &str) -> String {
    let Some(span) = TITLE_DIMENSIONS_RE
        .captures(title)
        .and_then(|caps| caps.get(1))
    else {
        return title.to_string();
    };

    let opening = |c: char| c.is_whitespace() || matches!(c, '(' | '[' | '-' | '–' | '—');
    let closing = |c: char| c.is_whitespace() || matches!(c, ')' | ']' | '-' | '–' | '—');

    let before = title[..span.start()].trim_end_matches(opening);
    let after = skip_unit(title[span.end()..].trim_start()).trim_start_matches(closing);

    WHITESPACE_RE
        .replace_all(&format!("{} {}", before, after), " ")
        .trim()
        .to_string()
}

fn skip_unit(text: &str) -> &str {
    if let Some(rest) = text.strip_prefix('"') {
        return rest;
    }

    let is_inches = text
        .get(..2)
        .is_some_and(|unit| unit.eq_ignore_ascii_case("in"));

    if is_inches && !text[2..].starts_with(|c: char| c.is_alphanumeric()) {
        return text[2..].strip_prefix('.').unwrap_or(&text[2..]);
    }

    text
}

/// First attribute whose cleaned name is non-empty.
pub fn dimensions_from_attributes(attributes: &[RawAttribute]) -> Option<String> {
    attributes
        .iter()
        .map(|attr| strip_tags(attr.name.as_deref().unwrap_or("")))
        .find(|name| !name.is_empty())
}

/// First non-empty cleaned option across all attributes.
pub fn medium_from_attributes(attributes: &[RawAttribute]) -> Option<String> {
    attributes
        .iter()
        .flat_map(|attr| attr.options.iter())
        .map(|option| strip_tags(option))
        .find(|option| !option.is_empty())
        .map(|option| normalize_medium_text(&option))
}

/// `src` of the first `<img>` tag in an HTML fragment.
pub fn extract_first_image_src(html: &str, full_size: bool) -> Option<String> {
    let caps = IMG_SRC_RE.captures(html)?;
    let src = caps.get(1).or_else(|| caps.get(2))?;

    normalize_image(src.as_str(), full_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(name: &str, options: &[&str]) -> RawAttribute {
        RawAttribute {
            name: Some(name.to_string()),
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<p>Hello   <b>world</b></p>\n"), "Hello world");
        assert_eq!(strip_tags("  plain\ttext  "), "plain text");
        assert_eq!(strip_tags("<br/>"), "");
    }

    #[test]
    fn test_normalize_medium_text_casing() {
        assert_eq!(normalize_medium_text("Olio"), "Óleo");
        assert_eq!(normalize_medium_text("OLIO"), "ÓLEO");
        assert_eq!(normalize_medium_text("olio"), "óleo");
        assert_eq!(normalize_medium_text("Olio su tela"), "Óleo su tela");
    }

    #[test]
    fn test_normalize_medium_text_standalone_only() {
        assert_eq!(normalize_medium_text("Oliosa"), "Oliosa");
        assert_eq!(normalize_medium_text("acrilico e olio."), "acrilico e óleo.");
    }

    #[test]
    fn test_normalize_image_upgrades_scheme() {
        assert_eq!(
            normalize_image("http://cdn.example.com/a.jpg", false),
            Some("https://cdn.example.com/a.jpg".to_string())
        );
        assert_eq!(normalize_image("   ", false), None);
    }

    #[test]
    fn test_normalize_image_strips_thumbnail_suffix() {
        assert_eq!(
            normalize_image("http://cdn.example.com/uploads/painting-300x200.JPG", true),
            Some("https://cdn.example.com/uploads/painting.JPG".to_string())
        );
        assert_eq!(
            normalize_image("https://cdn.example.com/uploads/painting-300x200.webp?v=2", true),
            Some("https://cdn.example.com/uploads/painting.webp?v=2".to_string())
        );
        assert_eq!(
            normalize_image("https://cdn.example.com/uploads/painting-300x200.jpg", false),
            Some("https://cdn.example.com/uploads/painting-300x200.jpg".to_string())
        );
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Some("45"), Some("60")), Some("$45 USD".to_string()));
        assert_eq!(format_price(None, Some("60")), Some("$60 USD".to_string()));
        assert_eq!(format_price(None, None), None);
    }

    #[test]
    fn test_format_price_fallbacks() {
        assert_eq!(format_price(Some(""), Some("60")), Some("$60 USD".to_string()));
        assert_eq!(format_price(Some("n/a"), Some("abc")), None);
        assert_eq!(format_price(Some("NaN"), Some("inf")), None);
    }

    #[test]
    fn test_format_price_grouping_and_fraction() {
        assert_eq!(format_price(Some("1234.5"), None), Some("$1,234.5 USD".to_string()));
        assert_eq!(format_price(Some("1250000"), None), Some("$1,250,000 USD".to_string()));
        assert_eq!(format_price(Some("19.999"), None), Some("$20 USD".to_string()));
        assert_eq!(format_price(Some("0.25"), None), Some("$0.25 USD".to_string()));
    }

    #[test]
    fn test_derive_dimensions_from_title() {
        assert_eq!(
            derive_dimensions("Untitled 24x36", None, false),
            Some("24 x 36".to_string())
        );
        assert_eq!(
            derive_dimensions("Untitled 24x36", Some(&RawDimensions::default()), true),
            Some("24 x 36 in".to_string())
        );
        assert_eq!(
            derive_dimensions("Marina 100 X 120 cm", None, false),
            Some("100 x 120".to_string())
        );
        assert_eq!(derive_dimensions("Series 1234x5678", None, false), None);
        assert_eq!(derive_dimensions("Untitled", None, false), None);
    }

    #[test]
    fn test_derive_dimensions_prefers_structured() {
        let dims = RawDimensions {
            width: Some("50".to_string()),
            height: Some("70".to_string()),
            length: None,
        };
        assert_eq!(
            derive_dimensions("Untitled 24x36", Some(&dims), false),
            Some("50 x 70".to_string())
        );

        let half = RawDimensions {
            width: Some("50".to_string()),
            height: Some("".to_string()),
            length: None,
        };
        assert_eq!(
            derive_dimensions("Untitled 24x36", Some(&half), false),
            Some("24 x 36".to_string())
        );
    }

    #[test]
    fn test_scrub_title_dimensions() {
        assert_eq!(scrub_title_dimensions("Untitled 24x36"), "Untitled");
        assert_eq!(scrub_title_dimensions("Sunset (24 x 36 in) - Oil"), "Sunset Oil");
        assert_eq!(scrub_title_dimensions("Harbor - 30x40\""), "Harbor");
        assert_eq!(scrub_title_dimensions("Study (blue) 24x36"), "Study (blue)");
        assert_eq!(scrub_title_dimensions("No numbers here"), "No numbers here");
    }

    #[test]
    fn test_attribute_derived_fields() {
        let attributes = vec![
            attr("  ", &[]),
            attr("<span>24 x 36</span>", &["", "<em>Olio</em> su tela"]),
            attr("Frame", &["Wood"]),
        ];

        assert_eq!(
            dimensions_from_attributes(&attributes),
            Some("24 x 36".to_string())
        );
        assert_eq!(
            medium_from_attributes(&attributes),
            Some("Óleo su tela".to_string())
        );
        assert_eq!(dimensions_from_attributes(&[]), None);
        assert_eq!(medium_from_attributes(&[attr("Size", &[" "])]), None);
    }

    #[test]
    fn test_extract_first_image_src() {
        let html = r#"<p>Intro</p><img class="x" src='http://cdn.example.com/one-150x150.png'><img src="two.png">"#;
        assert_eq!(
            extract_first_image_src(html, true),
            Some("https://cdn.example.com/one.png".to_string())
        );
        assert_eq!(
            extract_first_image_src(r#"<IMG SRC="https://cdn.example.com/a.gif" />"#, false),
            Some("https://cdn.example.com/a.gif".to_string())
        );
        assert_eq!(extract_first_image_src("<p>No image</p>", true), None);
    }
}
