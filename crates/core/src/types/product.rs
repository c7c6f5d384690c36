//! Product records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::Relation;
use super::id::{ProductDetailId, ProductId};
use super::image::Image;
use super::price::discount_percentage;

/// Structured detail text attached to a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub id: ProductDetailId,
    pub highlights: Option<String>,
    pub composition_outer: Option<String>,
    pub composition_lining: Option<String>,
    pub washing_instructions: Option<String>,
    pub wearing_info: Option<String>,
}

impl ProductDetail {
    /// True when no field carries any text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [
            &self.highlights,
            &self.composition_outer,
            &self.composition_lining,
            &self.washing_instructions,
            &self.wearing_info,
        ]
        .iter()
        .all(|field| field.as_deref().is_none_or(|text| text.trim().is_empty()))
    }
}

/// Estimated delivery window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryEstimate {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

impl DeliveryEstimate {
    /// Short label such as `Oct 3 - Oct 7`.
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.earliest.format("%b %-d"),
            self.latest.format("%b %-d")
        )
    }
}

/// A catalog product.
///
/// The storefront holds an immutable copy for the duration of one request;
/// the CMS owns the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub document_id: String,
    pub slug: String,
    pub name: String,
    pub brand: String,
    pub original_price: Decimal,
    /// Sale price; `None` when the CMS sends null or zero.
    pub discounted_price: Option<Decimal>,
    /// Stored discount; `None` when the CMS sends null or zero.
    pub discount_percentage: Option<u32>,
    pub relation: Relation,
    pub sizes: Vec<String>,
    pub images: Vec<Image>,
    /// Images of the other colors this product comes in.
    pub color_variants: Vec<Image>,
    pub details: Vec<ProductDetail>,
    pub delivery: Option<DeliveryEstimate>,
}

impl Product {
    /// Sale price when it is strictly positive.
    #[must_use]
    pub fn sale_price(&self) -> Option<Decimal> {
        self.discounted_price.filter(|price| *price > Decimal::ZERO)
    }

    /// Whether the product belongs to the `sale` pseudo-category.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.sale_price().is_some()
    }

    /// Discount computed from the two prices.
    #[must_use]
    pub fn derived_discount_percentage(&self) -> Option<u32> {
        self.sale_price()
            .and_then(|sale| discount_percentage(self.original_price, sale))
    }

    /// Discount to show on the badge.
    ///
    /// The stored value wins when present; otherwise it is derived from the
    /// prices. Products that are not on sale show no badge.
    #[must_use]
    pub fn display_discount_percentage(&self) -> Option<u32> {
        if !self.is_on_sale() {
            return None;
        }
        self.discount_percentage
            .filter(|pct| *pct > 0)
            .or_else(|| self.derived_discount_percentage())
    }

    /// Stored and derived percentages when they differ by more than a point.
    #[must_use]
    pub fn discount_mismatch(&self) -> Option<(u32, u32)> {
        let stored = self.discount_percentage.filter(|pct| *pct > 0)?;
        let derived = self.derived_discount_percentage()?;
        (stored.abs_diff(derived) > 1).then_some((stored, derived))
    }

    /// Whether the sale price breaks the "below original" invariant.
    #[must_use]
    pub fn has_inverted_sale_price(&self) -> bool {
        self.sale_price()
            .is_some_and(|sale| sale >= self.original_price)
    }

    /// Detail blocks that carry at least one non-empty field.
    pub fn visible_details(&self) -> impl Iterator<Item = &ProductDetail> {
        self.details.iter().filter(|detail| !detail.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(original: i64, discounted: Option<i64>, stored_pct: Option<u32>) -> Product {
        Product {
            id: ProductId::new(1),
            document_id: "doc1".to_string(),
            slug: "wool-coat".to_string(),
            name: "Wool coat".to_string(),
            brand: "Maison".to_string(),
            original_price: Decimal::new(original, 0),
            discounted_price: discounted.map(|d| Decimal::new(d, 0)),
            discount_percentage: stored_pct,
            relation: Relation::Women,
            sizes: Vec::new(),
            images: Vec::new(),
            color_variants: Vec::new(),
            details: Vec::new(),
            delivery: None,
        }
    }

    #[test]
    fn test_zero_discounted_price_is_not_a_sale() {
        let p = product(100, Some(0), None);
        assert!(!p.is_on_sale());
        assert_eq!(p.display_discount_percentage(), None);
    }

    #[test]
    fn test_display_prefers_stored_percentage() {
        let p = product(200, Some(150), Some(20));
        assert_eq!(p.display_discount_percentage(), Some(20));
        assert_eq!(p.discount_mismatch(), Some((20, 25)));
    }

    #[test]
    fn test_display_derives_missing_percentage() {
        let p = product(200, Some(150), None);
        assert_eq!(p.display_discount_percentage(), Some(25));
        assert_eq!(p.discount_mismatch(), None);
    }

    #[test]
    fn test_small_rounding_difference_is_not_a_mismatch() {
        // derived is 33
        let p = product(300, Some(200), Some(34));
        assert_eq!(p.discount_mismatch(), None);
    }

    #[test]
    fn test_inverted_sale_price_detected() {
        assert!(product(100, Some(120), None).has_inverted_sale_price());
        assert!(!product(100, Some(80), None).has_inverted_sale_price());
        assert!(!product(100, None, None).has_inverted_sale_price());
    }

    #[test]
    fn test_delivery_label() {
        let estimate = DeliveryEstimate {
            earliest: NaiveDate::from_ymd_opt(2025, 10, 3).unwrap_or_default(),
            latest: NaiveDate::from_ymd_opt(2025, 10, 17).unwrap_or_default(),
        };
        assert_eq!(estimate.label(), "Oct 3 - Oct 17");
    }

    #[test]
    fn test_visible_details_skips_blank_blocks() {
        let mut p = product(100, None, None);
        p.details = vec![
            ProductDetail::default(),
            ProductDetail {
                washing_instructions: Some("Dry clean only".to_string()),
                ..ProductDetail::default()
            },
        ];
        assert_eq!(p.visible_details().count(), 1);
    }
}
