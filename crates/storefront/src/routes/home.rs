//! Home page route handler.
//!
//! The page is a pure function of the query string: `?category=men&show_all=true`
//! selects what the product grid and banner strip show.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use vitrine_core::browse::{Availability, availability, collection_heading};
use vitrine_core::{
    Banner, BrowseState, CategoryToken, HomeSection, Placement, filter_products, select_banners,
};

use crate::cms::MediaResolver;
use crate::filters;
use crate::state::AppState;

use super::views::{
    BANNER_FORMATS, ImageView, NavLink, ProductCardView, SECTION_FORMATS, browse_href, nav_links,
};

// =============================================================================
// Query
// =============================================================================

/// Raw browse parameters. Unknown or malformed values fall back to the
/// landing view rather than failing the page.
#[derive(Debug, Default, Deserialize)]
pub struct BrowseQuery {
    pub category: Option<String>,
    pub show_all: Option<String>,
}

impl BrowseQuery {
    /// Interpret the parameters as a browse state.
    #[must_use]
    pub fn browse_state(&self) -> BrowseState {
        let show_all = self
            .show_all
            .as_deref()
            .is_some_and(|v| matches!(v.trim(), "true" | "1"));

        let category = match self.category.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match CategoryToken::parse(raw) {
                Ok(token) => Some(token),
                Err(e) => {
                    tracing::debug!(category = raw, error = %e, "Ignoring unknown category");
                    return BrowseState::landing();
                }
            },
        };

        match (category, show_all) {
            (Some(token), true) => BrowseState::choose(token),
            (None, true) => BrowseState::shop_now(),
            (_, false) => BrowseState::landing(),
        }
    }
}

// =============================================================================
// Views
// =============================================================================

/// Banner display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerView {
    pub title: String,
    pub description: String,
    pub cta_text: Option<String>,
    pub cta_href: String,
    pub image_right: bool,
    pub image: ImageView,
}

impl BannerView {
    fn new(banner: &Banner, media: &MediaResolver) -> Self {
        Self {
            title: banner.title.clone(),
            description: banner.description.clone(),
            cta_text: banner.cta_text.clone(),
            cta_href: browse_href(CategoryToken::Tag(banner.relation)),
            image_right: banner.position == Placement::Right,
            image: ImageView::new(&banner.image, BANNER_FORMATS, media, &banner.title),
        }
    }
}

/// Home section display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub title: String,
    pub description: String,
    pub button_text: String,
    pub image_right: bool,
    pub image: ImageView,
}

impl SectionView {
    fn new(section: &HomeSection, media: &MediaResolver) -> Self {
        Self {
            title: section.title.clone(),
            description: section.description.clone(),
            button_text: section.button_text.clone(),
            image_right: section.layout == Placement::Right,
            image: ImageView::new(&section.image, SECTION_FORMATS, media, &section.title),
        }
    }
}

/// Notice shown after picking a category that has little or nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub is_error: bool,
    pub message: String,
}

impl Notice {
    fn for_state(availability: Availability, state: &BrowseState) -> Option<Self> {
        let relation = state.category.relation()?;
        match availability {
            Availability::Available => None,
            Availability::Limited => Some(Self {
                is_error: false,
                message: format!(
                    "We have limited {} products available. More items coming soon!",
                    relation.possessive()
                ),
            }),
            Availability::Unavailable => Some(Self {
                is_error: true,
                message: format!(
                    "Sorry, we don't have any {} products available at the moment. Please check back later!",
                    relation.possessive()
                ),
            }),
        }
    }
}

/// Count shown above the product grid. Always plural: "0 items", "1 items".
#[must_use]
pub fn item_count_label(count: usize) -> String {
    format!("{count} items")
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav: Vec<NavLink>,
    pub shop_now_href: String,
    pub sections: Vec<SectionView>,
    pub notice: Option<Notice>,
    pub heading: &'static str,
    pub item_count: String,
    pub products: Vec<ProductCardView>,
    pub banners: Vec<BannerView>,
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>, Query(query): Query<BrowseQuery>) -> HomeTemplate {
    let browse = query.browse_state();
    let scope = state.cms().scope();

    let (products, banners, sections) =
        tokio::join!(scope.products(), scope.banners(), scope.home_sections());

    let media = scope.media();
    let visible_products: Vec<_> = filter_products(&products, &browse)
        .into_iter()
        .map(|product| ProductCardView::new(product, media))
        .collect();
    let visible_banners = select_banners(&banners, &browse)
        .into_iter()
        .map(|banner| BannerView::new(banner, media))
        .collect();

    HomeTemplate {
        nav: nav_links(Some(&browse)),
        shop_now_href: browse_href(CategoryToken::All),
        sections: sections
            .iter()
            .map(|section| SectionView::new(section, media))
            .collect(),
        notice: Notice::for_state(availability(&products, &banners, &browse), &browse),
        heading: collection_heading(&browse),
        item_count: item_count_label(visible_products.len()),
        products: visible_products,
        banners: visible_banners,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::Relation;

    fn query(category: Option<&str>, show_all: Option<&str>) -> BrowseQuery {
        BrowseQuery {
            category: category.map(str::to_string),
            show_all: show_all.map(str::to_string),
        }
    }

    #[test]
    fn test_no_parameters_is_landing() {
        assert_eq!(query(None, None).browse_state(), BrowseState::landing());
    }

    #[test]
    fn test_category_with_show_all() {
        assert_eq!(
            query(Some("men"), Some("true")).browse_state(),
            BrowseState::choose(CategoryToken::Tag(Relation::Men))
        );
        assert_eq!(
            query(Some("sale"), Some("1")).browse_state(),
            BrowseState::choose(CategoryToken::Sale)
        );
    }

    #[test]
    fn test_show_all_alone_is_shop_now() {
        assert_eq!(query(None, Some("true")).browse_state(), BrowseState::shop_now());
    }

    #[test]
    fn test_category_without_show_all_is_landing() {
        assert_eq!(
            query(Some("kids"), None).browse_state(),
            BrowseState::landing()
        );
        assert_eq!(
            query(Some("kids"), Some("false")).browse_state(),
            BrowseState::landing()
        );
    }

    #[test]
    fn test_unknown_category_falls_back_to_landing() {
        assert_eq!(
            query(Some("pets"), Some("true")).browse_state(),
            BrowseState::landing()
        );
    }

    #[test]
    fn test_item_count_label() {
        assert_eq!(item_count_label(0), "0 items");
        assert_eq!(item_count_label(1), "1 items");
        assert_eq!(item_count_label(12), "12 items");
    }

    #[test]
    fn test_notice_messages() {
        let men = BrowseState::choose(CategoryToken::Tag(Relation::Men));
        let kids = BrowseState::choose(CategoryToken::Tag(Relation::Kids));

        let unavailable = Notice::for_state(Availability::Unavailable, &men).expect("notice");
        assert!(unavailable.is_error);
        assert!(unavailable.message.contains("any men's products"));

        let limited = Notice::for_state(Availability::Limited, &kids).expect("notice");
        assert!(!limited.is_error);
        assert!(limited.message.contains("limited kids' products"));

        assert!(Notice::for_state(Availability::Available, &men).is_none());
    }
}
