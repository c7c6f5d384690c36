//! Browse state and the rules that decide what a catalog page shows.
//!
//! A page is described by a [`BrowseState`]: the selected category plus a
//! `show_all` flag that separates the curated landing view from an explicit
//! browse. [`filter_products`] and [`select_banners`] turn the full CMS
//! collections into the subsets a page renders. Both preserve input order
//! and never mutate their input.

use crate::types::{Banner, CategoryToken, Product, Relation};

/// Tag shown by the landing view before the shopper picks anything.
pub const DEFAULT_RELATION: Relation = Relation::Women;

/// Banner fallback order for the umbrella `all` view.
pub const BANNER_PRIORITY: [Relation; 3] = [Relation::Women, Relation::Men, Relation::Kids];

/// What the shopper is currently looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BrowseState {
    pub category: CategoryToken,
    /// `false` for the curated landing view, `true` once the shopper browses.
    pub show_all: bool,
}

impl BrowseState {
    /// The curated landing view.
    #[must_use]
    pub const fn landing() -> Self {
        Self {
            category: CategoryToken::Tag(DEFAULT_RELATION),
            show_all: false,
        }
    }

    /// State after the "shop now" call to action: every product.
    #[must_use]
    pub const fn shop_now() -> Self {
        Self {
            category: CategoryToken::All,
            show_all: true,
        }
    }

    /// State after the shopper picks a category from the navigation.
    #[must_use]
    pub const fn choose(category: CategoryToken) -> Self {
        Self {
            category,
            show_all: true,
        }
    }

    /// Whether this is the curated landing view.
    #[must_use]
    pub const fn is_landing(&self) -> bool {
        !self.show_all
    }
}

impl Default for BrowseState {
    fn default() -> Self {
        Self::landing()
    }
}

/// Products visible for `state`, in catalog order.
///
/// The landing view always shows [`DEFAULT_RELATION`], whatever category
/// token it carries. `sale` is price-derived and ignores the relation tag.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], state: &BrowseState) -> Vec<&'a Product> {
    if !state.show_all {
        return products
            .iter()
            .filter(|product| product.relation == DEFAULT_RELATION)
            .collect();
    }

    match state.category {
        CategoryToken::All => products.iter().collect(),
        CategoryToken::Sale => products.iter().filter(|p| p.is_on_sale()).collect(),
        CategoryToken::Tag(relation) => products
            .iter()
            .filter(|product| product.relation == relation)
            .collect(),
    }
}

/// Banners to draw for `state`.
///
/// The `all` browse view draws at most one banner: the first one tagged
/// with the highest-priority relation that has any. Every other state draws
/// all banners tagged with the selected relation, which is none for the
/// `sale` and `all` pseudo-categories.
#[must_use]
pub fn select_banners<'a>(banners: &'a [Banner], state: &BrowseState) -> Vec<&'a Banner> {
    if state.show_all && state.category == CategoryToken::All {
        return BANNER_PRIORITY
            .iter()
            .find_map(|relation| banners.iter().find(|banner| banner.relation == *relation))
            .into_iter()
            .collect();
    }

    let Some(relation) = state.category.relation() else {
        return Vec::new();
    };

    banners
        .iter()
        .filter(|banner| banner.relation == relation)
        .collect()
}

/// Heading above the product grid.
#[must_use]
pub const fn collection_heading(state: &BrowseState) -> &'static str {
    if !state.show_all {
        return "Women's Collection";
    }

    match state.category {
        CategoryToken::All => "All Products",
        CategoryToken::Sale => "Sale Items",
        CategoryToken::Tag(Relation::Men) => "Men's Collection",
        CategoryToken::Tag(Relation::Women) => "Women's Collection",
        CategoryToken::Tag(Relation::Kids) => "Kids' Collection",
        CategoryToken::Tag(_) => "Products",
    }
}

/// How well stocked an explicitly chosen category is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// Products exist, or the state is not a single-tag browse.
    Available,
    /// Banners exist but no products yet.
    Limited,
    /// Neither products nor banners.
    Unavailable,
}

/// Check whether the relation the shopper picked has anything to show.
#[must_use]
pub fn availability(products: &[Product], banners: &[Banner], state: &BrowseState) -> Availability {
    let Some(relation) = state.category.relation().filter(|_| state.show_all) else {
        return Availability::Available;
    };

    let has_products = products.iter().any(|product| product.relation == relation);
    let has_banners = banners.iter().any(|banner| banner.relation == relation);

    match (has_products, has_banners) {
        (true, _) => Availability::Available,
        (false, true) => Availability::Limited,
        (false, false) => Availability::Unavailable,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::{BannerId, Image, ImageFormats, ImageId, Placement, ProductId};

    fn image() -> Image {
        Image {
            id: ImageId::new(1),
            name: "img.jpg".to_string(),
            url: "/uploads/img.jpg".to_string(),
            alt: None,
            width: None,
            height: None,
            formats: ImageFormats::default(),
        }
    }

    fn product(id: i64, relation: Relation, discounted: Option<i64>) -> Product {
        Product {
            id: ProductId::new(id),
            document_id: format!("doc{id}"),
            slug: format!("product-{id}"),
            name: format!("Product {id}"),
            brand: "Maison".to_string(),
            original_price: Decimal::new(100, 0),
            discounted_price: discounted.map(|d| Decimal::new(d, 0)),
            discount_percentage: None,
            relation,
            sizes: Vec::new(),
            images: Vec::new(),
            color_variants: Vec::new(),
            details: Vec::new(),
            delivery: None,
        }
    }

    fn banner(id: i64, relation: Relation) -> Banner {
        Banner {
            id: BannerId::new(id),
            title: format!("Banner {id}"),
            description: String::new(),
            cta_text: None,
            position: Placement::Left,
            relation,
            image: image(),
        }
    }

    fn ids<T>(items: &[&T], id: impl Fn(&T) -> i64) -> Vec<i64> {
        items.iter().map(|item| id(item)).collect()
    }

    fn relation_strategy() -> impl Strategy<Value = Relation> {
        prop_oneof![
            Just(Relation::Men),
            Just(Relation::Women),
            Just(Relation::Kids),
            Just(Relation::Unisex),
            Just(Relation::Unknown),
        ]
    }

    fn token_strategy() -> impl Strategy<Value = CategoryToken> {
        prop_oneof![
            Just(CategoryToken::All),
            Just(CategoryToken::Sale),
            relation_strategy().prop_map(CategoryToken::Tag),
        ]
    }

    fn products_strategy() -> impl Strategy<Value = Vec<Product>> {
        proptest::collection::vec(
            (relation_strategy(), proptest::option::of(0i64..150)),
            0..24,
        )
        .prop_map(|specs| {
            specs
                .into_iter()
                .zip(1i64..)
                .map(|((relation, discounted), id)| product(id, relation, discounted))
                .collect()
        })
    }

    fn banners_strategy(relations: BoxedStrategy<Relation>) -> impl Strategy<Value = Vec<Banner>> {
        proptest::collection::vec(relations, 0..12).prop_map(|relations| {
            relations
                .into_iter()
                .zip(1i64..)
                .map(|(relation, id)| banner(id, relation))
                .collect()
        })
    }

    // =========================================================================
    // Product filter
    // =========================================================================

    #[test]
    fn test_landing_shows_default_relation_only() {
        let products = vec![
            product(1, Relation::Men, None),
            product(2, Relation::Women, None),
            product(3, Relation::Women, Some(50)),
            product(4, Relation::Kids, None),
        ];

        let visible = filter_products(&products, &BrowseState::landing());
        assert_eq!(ids(&visible, |p| p.id.as_i64()), vec![2, 3]);
    }

    #[test]
    fn test_all_shows_everything_in_order() {
        let products = vec![
            product(3, Relation::Kids, None),
            product(1, Relation::Unknown, None),
            product(2, Relation::Men, None),
        ];

        let visible = filter_products(&products, &BrowseState::shop_now());
        assert_eq!(ids(&visible, |p| p.id.as_i64()), vec![3, 1, 2]);
    }

    #[test]
    fn test_sale_ignores_relation() {
        let products = vec![
            product(1, Relation::Men, Some(80)),
            product(2, Relation::Women, Some(0)),
            product(3, Relation::Unknown, Some(10)),
            product(4, Relation::Kids, None),
        ];

        let visible = filter_products(&products, &BrowseState::choose(CategoryToken::Sale));
        assert_eq!(ids(&visible, |p| p.id.as_i64()), vec![1, 3]);
    }

    #[test]
    fn test_concrete_tag_filters_by_relation() {
        let products = vec![
            product(1, Relation::Men, None),
            product(2, Relation::Kids, None),
            product(3, Relation::Men, Some(40)),
        ];

        let state = BrowseState::choose(CategoryToken::Tag(Relation::Men));
        let visible = filter_products(&products, &state);
        assert_eq!(ids(&visible, |p| p.id.as_i64()), vec![1, 3]);
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        assert!(filter_products(&[], &BrowseState::shop_now()).is_empty());
        assert!(filter_products(&[], &BrowseState::landing()).is_empty());
    }

    proptest! {
        #[test]
        fn prop_landing_ignores_category_token(
            products in products_strategy(),
            token in token_strategy(),
        ) {
            let state = BrowseState { category: token, show_all: false };
            let visible = filter_products(&products, &state);
            prop_assert!(visible.iter().all(|p| p.relation == DEFAULT_RELATION));
            let expected = products.iter().filter(|p| p.relation == DEFAULT_RELATION).count();
            prop_assert_eq!(visible.len(), expected);
        }

        #[test]
        fn prop_sale_is_exactly_positive_discounts(products in products_strategy()) {
            let visible = filter_products(&products, &BrowseState::choose(CategoryToken::Sale));
            let expected: Vec<&Product> = products
                .iter()
                .filter(|p| p.discounted_price.is_some_and(|d| d > Decimal::ZERO))
                .collect();
            prop_assert_eq!(visible, expected);
        }

        #[test]
        fn prop_filter_is_an_ordered_subsequence(
            products in products_strategy(),
            token in token_strategy(),
            show_all in any::<bool>(),
        ) {
            let state = BrowseState { category: token, show_all };
            let visible = filter_products(&products, &state);
            let positions = visible
                .iter()
                .map(|v| products.iter().position(|p| p.id == v.id));
            let mut last = None;
            for position in positions {
                prop_assert!(position.is_some());
                prop_assert!(position > last);
                last = position;
            }
        }
    }

    // =========================================================================
    // Banner selector
    // =========================================================================

    #[test]
    fn test_all_view_prefers_women_banner() {
        let banners = vec![
            banner(1, Relation::Kids),
            banner(2, Relation::Men),
            banner(3, Relation::Women),
            banner(4, Relation::Women),
        ];

        let selected = select_banners(&banners, &BrowseState::shop_now());
        assert_eq!(ids(&selected, |b| b.id.as_i64()), vec![3]);
    }

    #[test]
    fn test_all_view_falls_back_through_priority() {
        let banners = vec![banner(1, Relation::Unisex), banner(2, Relation::Kids)];
        let selected = select_banners(&banners, &BrowseState::shop_now());
        assert_eq!(ids(&selected, |b| b.id.as_i64()), vec![2]);
    }

    #[test]
    fn test_all_view_does_not_fall_back_past_kids() {
        let banners = vec![banner(1, Relation::Unisex), banner(2, Relation::Unknown)];
        assert!(select_banners(&banners, &BrowseState::shop_now()).is_empty());
    }

    #[test]
    fn test_concrete_category_returns_every_match() {
        let banners = vec![
            banner(1, Relation::Men),
            banner(2, Relation::Women),
            banner(3, Relation::Men),
        ];

        let state = BrowseState::choose(CategoryToken::Tag(Relation::Men));
        let selected = select_banners(&banners, &state);
        assert_eq!(ids(&selected, |b| b.id.as_i64()), vec![1, 3]);
    }

    #[test]
    fn test_landing_uses_its_category_for_banners() {
        let banners = vec![banner(1, Relation::Men), banner(2, Relation::Women)];
        let selected = select_banners(&banners, &BrowseState::landing());
        assert_eq!(ids(&selected, |b| b.id.as_i64()), vec![2]);
    }

    #[test]
    fn test_sale_has_no_banners() {
        let banners = vec![banner(1, Relation::Men), banner(2, Relation::Women)];
        let selected = select_banners(&banners, &BrowseState::choose(CategoryToken::Sale));
        assert!(selected.is_empty());
    }

    proptest! {
        #[test]
        fn prop_men_banner_wins_without_women(
            mut banners in banners_strategy(
                prop_oneof![
                    Just(Relation::Men),
                    Just(Relation::Kids),
                    Just(Relation::Unisex),
                    Just(Relation::Unknown),
                ].boxed()
            ),
            men_at in any::<prop::sample::Index>(),
        ) {
            let at = men_at.index(banners.len() + 1);
            banners.insert(at, banner(999, Relation::Men));

            let first_men = banners
                .iter()
                .find(|b| b.relation == Relation::Men)
                .map(|b| b.id);
            let selected = select_banners(&banners, &BrowseState::shop_now());
            prop_assert_eq!(selected.len(), 1);
            prop_assert_eq!(Some(selected[0].id), first_men);
        }

        #[test]
        fn prop_no_priority_tags_means_no_banner(
            banners in banners_strategy(
                prop_oneof![Just(Relation::Unisex), Just(Relation::Unknown)].boxed()
            ),
        ) {
            prop_assert!(select_banners(&banners, &BrowseState::shop_now()).is_empty());
        }

        #[test]
        fn prop_all_view_draws_at_most_one(
            banners in banners_strategy(relation_strategy().boxed()),
        ) {
            prop_assert!(select_banners(&banners, &BrowseState::shop_now()).len() <= 1);
        }
    }

    // =========================================================================
    // Headings and availability
    // =========================================================================

    #[test]
    fn test_collection_headings() {
        assert_eq!(collection_heading(&BrowseState::landing()), "Women's Collection");
        assert_eq!(
            collection_heading(&BrowseState {
                category: CategoryToken::Tag(Relation::Men),
                show_all: false,
            }),
            "Women's Collection"
        );
        assert_eq!(collection_heading(&BrowseState::shop_now()), "All Products");
        assert_eq!(
            collection_heading(&BrowseState::choose(CategoryToken::Sale)),
            "Sale Items"
        );
        assert_eq!(
            collection_heading(&BrowseState::choose(CategoryToken::Tag(Relation::Kids))),
            "Kids' Collection"
        );
        assert_eq!(
            collection_heading(&BrowseState::choose(CategoryToken::Tag(Relation::Unisex))),
            "Products"
        );
    }

    #[test]
    fn test_availability() {
        let products = vec![product(1, Relation::Women, None)];
        let banners = vec![banner(1, Relation::Men)];

        let pick = |relation| BrowseState::choose(CategoryToken::Tag(relation));

        assert_eq!(
            availability(&products, &banners, &pick(Relation::Women)),
            Availability::Available
        );
        assert_eq!(
            availability(&products, &banners, &pick(Relation::Men)),
            Availability::Limited
        );
        assert_eq!(
            availability(&products, &banners, &pick(Relation::Kids)),
            Availability::Unavailable
        );
        assert_eq!(
            availability(&[], &[], &BrowseState::shop_now()),
            Availability::Available
        );
        assert_eq!(
            availability(&[], &[], &BrowseState::landing()),
            Availability::Available
        );
    }
}
