//! Product detail route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;

use vitrine_core::{Product, ProductDetail, format_price};

use crate::cms::MediaResolver;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::state::AppState;

use super::views::{GALLERY_FORMATS, ImageView, NavLink, PriceView, SWATCH_FORMATS, nav_links};

/// One block of the "details" section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailView {
    /// Highlight bullets, one per non-empty line.
    pub highlights: Vec<String>,
    pub composition_outer: Option<String>,
    pub composition_lining: Option<String>,
    pub washing_instructions: Option<String>,
    pub wearing_info: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

impl From<&ProductDetail> for DetailView {
    fn from(detail: &ProductDetail) -> Self {
        Self {
            highlights: detail
                .highlights
                .as_deref()
                .unwrap_or_default()
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            composition_outer: non_blank(detail.composition_outer.as_deref()),
            composition_lining: non_blank(detail.composition_lining.as_deref()),
            washing_instructions: non_blank(detail.washing_instructions.as_deref()),
            wearing_info: non_blank(detail.wearing_info.as_deref()),
        }
    }
}

/// Product detail display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPageView {
    pub brand: String,
    pub name: String,
    pub price: PriceView,
    pub sizes: Vec<String>,
    pub delivery: Option<String>,
    /// Always holds at least one image; the placeholder when the CMS has none.
    pub gallery: Vec<ImageView>,
    pub color_variants: Vec<ImageView>,
    pub details: Vec<DetailView>,
}

impl ProductPageView {
    #[must_use]
    pub fn new(product: &Product, media: &MediaResolver) -> Self {
        let mut gallery: Vec<_> = product
            .images
            .iter()
            .map(|image| ImageView::new(image, GALLERY_FORMATS, media, &product.name))
            .collect();
        if gallery.is_empty() {
            gallery.push(ImageView::placeholder(&product.name));
        }

        Self {
            brand: product.brand.clone(),
            name: product.name.clone(),
            price: PriceView::from(product),
            sizes: product.sizes.clone(),
            delivery: product.delivery.map(|estimate| estimate.label()),
            gallery,
            color_variants: product
                .color_variants
                .iter()
                .map(|image| ImageView::new(image, SWATCH_FORMATS, media, &product.name))
                .collect(),
            details: product.visible_details().map(DetailView::from).collect(),
        }
    }
}

/// Page title, e.g. `Nord - Wool Coat`.
#[must_use]
pub fn page_title(product: &Product) -> String {
    format!("{} - {}", product.brand, product.name)
}

/// Meta description mentioning the sale price when there is one.
#[must_use]
pub fn meta_description(product: &Product) -> String {
    let base = format!(
        "Shop {} {} for {}.",
        product.brand,
        product.name,
        format_price(product.original_price)
    );
    match product.sale_price() {
        Some(sale) => format!("{base} Now on sale for {}!", format_price(sale)),
        None => base,
    }
}

/// Product detail template.
#[derive(Template, WebTemplate)]
#[template(path = "product.html")]
pub struct ProductTemplate {
    pub nav: Vec<NavLink>,
    pub title: String,
    pub description: String,
    /// Absolute URL for `og:image`, when the product has an image.
    pub og_image: Option<String>,
    pub product: ProductPageView,
}

/// Display a product by slug.
///
/// # Errors
///
/// Returns `AppError::NotFound` when no product has the slug.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(slug): Path<String>) -> Result<ProductTemplate> {
    let scope = state.cms().scope();

    let product = scope
        .product_by_slug(&slug)
        .await
        .ok_or_else(|| AppError::NotFound(format!("product {slug}")))?;

    add_breadcrumb("product", "Viewed product page", Some(&[("slug", slug.as_str())]));

    let media = scope.media();
    let og_image = product
        .images
        .first()
        .map(|image| media.resolve(&image.url));

    Ok(ProductTemplate {
        nav: nav_links(None),
        title: page_title(&product),
        description: meta_description(&product),
        og_image,
        product: ProductPageView::new(&product, media),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use vitrine_core::{
        DeliveryEstimate, Image, ImageFormats, ImageId, ProductDetailId, ProductId, Relation,
    };

    fn media() -> MediaResolver {
        MediaResolver::new("https://media.shop.test")
    }

    fn product() -> Product {
        Product {
            id: ProductId::new(3),
            document_id: "doc3".to_string(),
            slug: "linen-shirt".to_string(),
            name: "Linen Shirt".to_string(),
            brand: "Atelier".to_string(),
            original_price: Decimal::from(120),
            discounted_price: Some(Decimal::from(90)),
            discount_percentage: None,
            relation: Relation::Men,
            sizes: vec!["S".to_string(), "M".to_string()],
            images: Vec::new(),
            color_variants: vec![Image {
                id: ImageId::new(8),
                name: "blue.jpg".to_string(),
                url: "/uploads/blue.jpg".to_string(),
                alt: Some("Blue".to_string()),
                width: None,
                height: None,
                formats: ImageFormats::default(),
            }],
            details: vec![
                ProductDetail::default(),
                ProductDetail {
                    id: ProductDetailId::new(1),
                    highlights: Some("Relaxed fit\n\n  Mother-of-pearl buttons ".to_string()),
                    composition_outer: Some("100% linen".to_string()),
                    washing_instructions: Some("  ".to_string()),
                    ..ProductDetail::default()
                },
            ],
            delivery: Some(DeliveryEstimate {
                earliest: NaiveDate::from_ymd_opt(2025, 10, 3).expect("valid date"),
                latest: NaiveDate::from_ymd_opt(2025, 10, 17).expect("valid date"),
            }),
        }
    }

    #[test]
    fn test_page_title() {
        assert_eq!(page_title(&product()), "Atelier - Linen Shirt");
    }

    #[test]
    fn test_meta_description_mentions_sale() {
        assert_eq!(
            meta_description(&product()),
            "Shop Atelier Linen Shirt for $120. Now on sale for $90!"
        );

        let mut full_price = product();
        full_price.discounted_price = None;
        assert_eq!(
            meta_description(&full_price),
            "Shop Atelier Linen Shirt for $120."
        );
    }

    #[test]
    fn test_page_view() {
        let view = ProductPageView::new(&product(), &media());

        assert_eq!(view.gallery.len(), 1);
        assert_eq!(view.gallery[0].url, crate::cms::PLACEHOLDER_IMAGE);
        assert_eq!(
            view.color_variants[0].url,
            "https://media.shop.test/uploads/blue.jpg"
        );
        assert_eq!(view.color_variants[0].alt, "Blue");
        assert_eq!(view.delivery.as_deref(), Some("Oct 3 - Oct 17"));
        assert_eq!(view.price.discount_badge.as_deref(), Some("-25%"));
    }

    #[test]
    fn test_details_skip_empty_blocks_and_split_highlights() {
        let view = ProductPageView::new(&product(), &media());

        assert_eq!(view.details.len(), 1);
        let detail = &view.details[0];
        assert_eq!(
            detail.highlights,
            vec!["Relaxed fit", "Mother-of-pearl buttons"]
        );
        assert_eq!(detail.composition_outer.as_deref(), Some("100% linen"));
        assert!(detail.washing_instructions.is_none());
    }
}
