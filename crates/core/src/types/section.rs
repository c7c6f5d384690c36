//! Home page hero sections.

use serde::{Deserialize, Serialize};

use super::category::Placement;
use super::id::HomeSectionId;
use super::image::Image;

/// One two-column block on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeSection {
    pub id: HomeSectionId,
    pub title: String,
    pub description: String,
    pub button_text: String,
    /// Side the image sits on.
    pub layout: Placement,
    /// Sort key; sections render in ascending order.
    pub order: i32,
    pub image: Image,
}

impl HomeSection {
    /// Sort sections by ascending `order`, keeping CMS order for ties.
    pub fn sort_for_display(sections: &mut [Self]) {
        sections.sort_by_key(|section| section.order);
    }
}
