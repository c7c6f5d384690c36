//! Display data shared by page templates.
//!
//! Views hold only strings and flags so templates never compare raw values
//! or resolve media paths themselves.

use vitrine_core::{BrowseState, CategoryToken, FormatSize, Image, Product, Relation, format_price};

use crate::cms::{MediaResolver, PLACEHOLDER_IMAGE};

/// Format preference for product cards.
pub const CARD_FORMATS: &[FormatSize] = &[FormatSize::Medium, FormatSize::Small];
/// Format preference for banners.
pub const BANNER_FORMATS: &[FormatSize] = &[FormatSize::Medium];
/// Format preference for home sections.
pub const SECTION_FORMATS: &[FormatSize] = &[FormatSize::Small];
/// Format preference for the product gallery.
pub const GALLERY_FORMATS: &[FormatSize] = &[FormatSize::Large];
/// Format preference for color swatches.
pub const SWATCH_FORMATS: &[FormatSize] = &[FormatSize::Thumbnail, FormatSize::Small];

// =============================================================================
// Images
// =============================================================================

/// Image display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
}

impl ImageView {
    /// Absolute URL of the preferred variant, with alt text.
    #[must_use]
    pub fn new(
        image: &Image,
        preference: &[FormatSize],
        media: &MediaResolver,
        fallback_alt: &str,
    ) -> Self {
        Self {
            url: media.resolve(image.best_url(preference)),
            alt: image.alt_or(fallback_alt).to_string(),
        }
    }

    /// The placeholder image.
    #[must_use]
    pub fn placeholder(alt: &str) -> Self {
        Self {
            url: PLACEHOLDER_IMAGE.to_string(),
            alt: alt.to_string(),
        }
    }
}

// =============================================================================
// Prices
// =============================================================================

/// Price block shown on cards and the detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceView {
    /// Price the shopper pays.
    pub current: String,
    /// Struck-through original price, when on sale.
    pub original: Option<String>,
    /// Badge text such as `-25%`.
    pub discount_badge: Option<String>,
}

impl From<&Product> for PriceView {
    fn from(product: &Product) -> Self {
        product.sale_price().map_or_else(
            || Self {
                current: format_price(product.original_price),
                original: None,
                discount_badge: None,
            },
            |sale| Self {
                current: format_price(sale),
                original: Some(format_price(product.original_price)),
                discount_badge: product
                    .display_discount_percentage()
                    .map(|pct| format!("-{pct}%")),
            },
        )
    }
}

// =============================================================================
// Product cards
// =============================================================================

/// Product display data for the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub href: String,
    pub name: String,
    pub brand: String,
    pub price: PriceView,
    pub image: ImageView,
}

impl ProductCardView {
    #[must_use]
    pub fn new(product: &Product, media: &MediaResolver) -> Self {
        let image = product.images.first().map_or_else(
            || ImageView::placeholder(&product.name),
            |image| ImageView::new(image, CARD_FORMATS, media, &product.name),
        );

        Self {
            href: product_href(&product.slug),
            name: product.name.clone(),
            brand: product.brand.clone(),
            price: PriceView::from(product),
            image,
        }
    }
}

/// Path of a product detail page, with the slug percent-encoded as a single
/// path segment.
#[must_use]
pub fn product_href(slug: &str) -> String {
    let segment: String = url::form_urlencoded::byte_serialize(slug.as_bytes()).collect();
    // byte_serialize writes spaces as `+` and a literal `+` as `%2B`.
    format!("/product/{}", segment.replace('+', "%20"))
}

// =============================================================================
// Navigation
// =============================================================================

/// A navigation bar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// Href of the browse view for a category.
#[must_use]
pub fn browse_href(category: CategoryToken) -> String {
    format!("/?category={category}&show_all=true")
}

/// Navigation bar entries; the entry matching `current` is marked active.
#[must_use]
pub fn nav_links(current: Option<&BrowseState>) -> Vec<NavLink> {
    [
        ("Womenswear", CategoryToken::Tag(Relation::Women)),
        ("Menswear", CategoryToken::Tag(Relation::Men)),
        ("Kidswear", CategoryToken::Tag(Relation::Kids)),
        ("Sale", CategoryToken::Sale),
        ("All", CategoryToken::All),
    ]
    .into_iter()
    .map(|(label, category)| NavLink {
        label,
        href: browse_href(category),
        active: current.is_some_and(|state| state.show_all && state.category == category),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use vitrine_core::{ImageFormats, ImageId, ImageVariant, ProductId};

    fn media() -> MediaResolver {
        MediaResolver::new("https://media.shop.test")
    }

    fn image() -> Image {
        Image {
            id: ImageId::new(1),
            name: "front.jpg".to_string(),
            url: "/uploads/front.jpg".to_string(),
            alt: None,
            width: Some(1200),
            height: Some(1600),
            formats: ImageFormats {
                small: Some(ImageVariant {
                    url: "/uploads/small_front.jpg".to_string(),
                    width: Some(375),
                    height: Some(500),
                }),
                ..ImageFormats::default()
            },
        }
    }

    fn product(discounted: Option<i64>, stored_pct: Option<u32>) -> Product {
        Product {
            id: ProductId::new(1),
            document_id: "doc1".to_string(),
            slug: "wool-coat".to_string(),
            name: "Wool Coat".to_string(),
            brand: "Nord".to_string(),
            original_price: Decimal::from(200),
            discounted_price: discounted.map(Decimal::from),
            discount_percentage: stored_pct,
            relation: Relation::Women,
            sizes: Vec::new(),
            images: vec![image()],
            color_variants: Vec::new(),
            details: Vec::new(),
            delivery: None,
        }
    }

    #[test]
    fn test_image_view_prefers_variant_and_resolves() {
        let view = ImageView::new(&image(), CARD_FORMATS, &media(), "Wool Coat");
        assert_eq!(view.url, "https://media.shop.test/uploads/small_front.jpg");
        assert_eq!(view.alt, "Wool Coat");
    }

    #[test]
    fn test_price_view_full_price() {
        let price = PriceView::from(&product(None, None));
        assert_eq!(price.current, "$200");
        assert!(price.original.is_none());
        assert!(price.discount_badge.is_none());
    }

    #[test]
    fn test_price_view_on_sale_derives_badge() {
        let price = PriceView::from(&product(Some(150), None));
        assert_eq!(price.current, "$150");
        assert_eq!(price.original.as_deref(), Some("$200"));
        assert_eq!(price.discount_badge.as_deref(), Some("-25%"));
    }

    #[test]
    fn test_price_view_prefers_stored_percentage() {
        let price = PriceView::from(&product(Some(150), Some(30)));
        assert_eq!(price.discount_badge.as_deref(), Some("-30%"));
    }

    #[test]
    fn test_card_without_images_uses_placeholder() {
        let mut product = product(None, None);
        product.images.clear();
        let card = ProductCardView::new(&product, &media());
        assert_eq!(card.image.url, PLACEHOLDER_IMAGE);
        assert_eq!(card.href, "/product/wool-coat");
    }

    #[test]
    fn test_nav_links_mark_current_category() {
        let state = BrowseState::choose(CategoryToken::Sale);
        let links = nav_links(Some(&state));
        let active: Vec<_> = links.iter().filter(|l| l.active).map(|l| l.label).collect();
        assert_eq!(active, vec!["Sale"]);
        assert!(links.iter().any(|l| l.href == "/?category=men&show_all=true"));
    }

    #[test]
    fn test_product_href_encodes_slug() {
        assert_eq!(product_href("wool-coat"), "/product/wool-coat");
        assert_eq!(product_href("a b/c"), "/product/a%20b%2Fc");
        assert_eq!(product_href("x?y#z"), "/product/x%3Fy%23z");
        assert_eq!(product_href("c++"), "/product/c%2B%2B");
    }

    #[test]
    fn test_card_href_matches_encoded_slug() {
        let mut product = product(None, None);
        product.slug = "a b?".to_string();
        let card = ProductCardView::new(&product, &media());
        assert_eq!(card.href, "/product/a%20b%3F");
    }

    #[test]
    fn test_nav_links_on_landing_mark_nothing() {
        let links = nav_links(Some(&BrowseState::landing()));
        assert!(links.iter().all(|l| !l.active));
        assert!(nav_links(None).iter().all(|l| !l.active));
    }
}
