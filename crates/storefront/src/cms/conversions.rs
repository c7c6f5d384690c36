//! Normalization from CMS wire shapes to domain records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use vitrine_core::{
    Banner, BannerId, DeliveryEstimate, HomeSection, HomeSectionId, Image, ImageFormats, ImageId,
    ImageVariant, Placement, Product, ProductDetail, ProductDetailId, ProductId, Relation,
};

use super::raw::{
    RawBanner, RawFormat, RawFormats, RawHomeSection, RawImage, RawProduct, RawProductDetail,
};

/// Decode each entry of a response `data` member on its own.
///
/// Accepts both the list shape and the single-object shape. Entries that
/// fail to decode are skipped with a warning so one bad entry never hides
/// the rest.
pub fn decode_each<T: DeserializeOwned>(collection: &str, data: &Value) -> Vec<T> {
    let items = match data {
        Value::Array(items) => items.as_slice(),
        Value::Object(_) => std::slice::from_ref(data),
        _ => {
            warn!(collection, "Expected a list or an object in CMS response data");
            return Vec::new();
        }
    };

    items
        .iter()
        .filter_map(|item| match T::deserialize(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(
                    collection,
                    id = ?item.get("id"),
                    error = %e,
                    "Skipping CMS entry that failed to decode"
                );
                None
            }
        })
        .collect()
}

// =============================================================================
// Images
// =============================================================================

fn convert_format(format: RawFormat) -> ImageVariant {
    ImageVariant {
        url: format.url,
        width: format.width,
        height: format.height,
    }
}

fn convert_formats(formats: Option<RawFormats>) -> ImageFormats {
    let formats = formats.unwrap_or_default();
    ImageFormats {
        thumbnail: formats.thumbnail.map(convert_format),
        small: formats.small.map(convert_format),
        medium: formats.medium.map(convert_format),
        large: formats.large.map(convert_format),
    }
}

/// Flatten an upload record.
pub fn convert_image(image: RawImage) -> Image {
    Image {
        id: ImageId::new(image.id),
        name: image.name.unwrap_or_default(),
        url: image.url.unwrap_or_default(),
        alt: image.alternative_text.filter(|alt| !alt.trim().is_empty()),
        width: image.width,
        height: image.height,
        formats: convert_formats(image.formats),
    }
}

fn convert_images(images: Option<Vec<RawImage>>) -> Vec<Image> {
    images
        .unwrap_or_default()
        .into_iter()
        .map(convert_image)
        .collect()
}

// =============================================================================
// Products
// =============================================================================

fn convert_detail(detail: RawProductDetail) -> ProductDetail {
    ProductDetail {
        id: ProductDetailId::new(detail.id),
        highlights: detail.highlights,
        composition_outer: detail.composition_outer,
        composition_lining: detail.composition_lining,
        washing_instructions: detail.washing_instructions,
        wearing_info: detail.wearing_info,
    }
}

fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    let value = value?.trim();
    // Date-only fields, but tolerate a full timestamp.
    let date_part = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn convert_delivery(min: Option<&str>, max: Option<&str>) -> Option<DeliveryEstimate> {
    Some(DeliveryEstimate {
        earliest: parse_date(min)?,
        latest: parse_date(max)?,
    })
}

/// Positive values only; null and zero both mean "not on sale".
fn positive(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| *v > Decimal::ZERO)
}

/// Normalize a product and log records that break pricing invariants.
pub fn convert_product(product: RawProduct) -> Product {
    let converted = Product {
        id: ProductId::new(product.id),
        document_id: product.document_id.unwrap_or_default(),
        delivery: convert_delivery(
            product.estimated_delivery_min.as_deref(),
            product.estimated_delivery_max.as_deref(),
        ),
        slug: product.slug,
        name: product.name,
        brand: product.brand.unwrap_or_default(),
        original_price: product.original_price,
        discounted_price: positive(product.discounted_price),
        discount_percentage: positive(product.discount_percentage)
            .and_then(|pct| pct.round().to_u32()),
        relation: Relation::from_tag(product.relation.as_deref()),
        sizes: product.sizes.unwrap_or_default(),
        images: convert_images(product.images),
        color_variants: convert_images(product.available_in),
        details: product
            .product_detail
            .unwrap_or_default()
            .into_iter()
            .map(convert_detail)
            .collect(),
    };

    if converted.has_inverted_sale_price() {
        warn!(
            slug = %converted.slug,
            original = %converted.original_price,
            discounted = ?converted.discounted_price,
            "Discounted price is not below the original price"
        );
    }

    if let Some((stored, derived)) = converted.discount_mismatch() {
        warn!(
            slug = %converted.slug,
            stored,
            derived,
            "Stored discount percentage disagrees with prices"
        );
    }

    converted
}

// =============================================================================
// Banners and home sections
// =============================================================================

/// Normalize a banner. Banners without an image are dropped.
pub fn convert_banner(banner: RawBanner) -> Option<Banner> {
    let Some(image) = banner.image else {
        warn!(banner_id = banner.id, "Skipping banner without image");
        return None;
    };

    Some(Banner {
        id: BannerId::new(banner.id),
        title: banner.title.unwrap_or_default(),
        description: banner.description.unwrap_or_default(),
        cta_text: banner.cta_text.filter(|text| !text.trim().is_empty()),
        position: Placement::from_layout(banner.position.as_deref()),
        relation: Relation::from_tag(banner.relation.as_deref()),
        image: convert_image(image),
    })
}

/// Normalize a home section. Sections without an image are dropped.
pub fn convert_home_section(section: RawHomeSection) -> Option<HomeSection> {
    let Some(image) = section.image else {
        warn!(section_id = section.id, "Skipping home section without image");
        return None;
    };

    Some(HomeSection {
        id: HomeSectionId::new(section.id),
        title: section.title.unwrap_or_default(),
        description: section.description.unwrap_or_default(),
        button_text: section.button_text.unwrap_or_default(),
        layout: Placement::from_layout(section.layout.as_deref()),
        order: section.order.unwrap_or_default(),
        image: convert_image(image),
    })
}
