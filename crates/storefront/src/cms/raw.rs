//! Wire shapes of CMS responses.
//!
//! Every optional collection is `Option<Vec<_>>` so a null and a missing key
//! decode the same way. Unknown keys are ignored.

use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImage {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alternative_text: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub formats: Option<RawFormats>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawFormats {
    #[serde(default)]
    pub thumbnail: Option<RawFormat>,
    #[serde(default)]
    pub small: Option<RawFormat>,
    #[serde(default)]
    pub medium: Option<RawFormat>,
    #[serde(default)]
    pub large: Option<RawFormat>,
}

#[derive(Debug, Deserialize)]
pub struct RawFormat {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct RawProductDetail {
    pub id: i64,
    #[serde(default)]
    pub highlights: Option<String>,
    #[serde(default)]
    pub composition_outer: Option<String>,
    #[serde(default)]
    pub composition_lining: Option<String>,
    #[serde(default)]
    pub washing_instructions: Option<String>,
    #[serde(default)]
    pub wearing_info: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub id: i64,
    #[serde(default)]
    pub document_id: Option<String>,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    pub original_price: Decimal,
    #[serde(default)]
    pub discounted_price: Option<Decimal>,
    #[serde(default)]
    pub discount_percentage: Option<Decimal>,
    #[serde(default)]
    pub relation: Option<String>,
    #[serde(default)]
    pub sizes: Option<Vec<String>>,
    #[serde(default)]
    pub estimated_delivery_min: Option<String>,
    #[serde(default)]
    pub estimated_delivery_max: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<RawImage>>,
    /// Field name as the CMS schema spells it.
    #[serde(default, rename = "avaliableIn", alias = "availableIn")]
    pub available_in: Option<Vec<RawImage>>,
    #[serde(default)]
    pub product_detail: Option<Vec<RawProductDetail>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBanner {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cta_text: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub relation: Option<String>,
    #[serde(default)]
    pub image: Option<RawImage>,
}

#[derive(Debug, Deserialize)]
pub struct RawHomeSection {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub button_text: Option<String>,
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default)]
    pub order: Option<i32>,
    #[serde(default)]
    pub image: Option<RawImage>,
}

/// Entry of a `fields[0]=slug` listing.
#[derive(Debug, Deserialize)]
pub struct RawSlug {
    pub slug: String,
}
