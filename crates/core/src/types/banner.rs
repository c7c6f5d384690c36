//! Promotional banners.

use serde::{Deserialize, Serialize};

use super::category::{Placement, Relation};
use super::id::BannerId;
use super::image::Image;

/// A promotional banner tied to one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub id: BannerId,
    pub title: String,
    pub description: String,
    /// Call-to-action label; no button is drawn without one.
    pub cta_text: Option<String>,
    /// Side the image sits on.
    pub position: Placement,
    pub relation: Relation,
    pub image: Image,
}
