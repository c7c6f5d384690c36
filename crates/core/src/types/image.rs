//! Media records as the CMS upload plugin describes them.

use serde::{Deserialize, Serialize};

use super::id::ImageId;

/// Named size variant generated by the CMS for an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatSize {
    Thumbnail,
    Small,
    Medium,
    Large,
}

/// One resized rendition of an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageVariant {
    /// CMS-relative or absolute URL.
    pub url: String,
    /// Width in pixels.
    pub width: Option<u32>,
    /// Height in pixels.
    pub height: Option<u32>,
}

/// The size variants available for an image. Any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFormats {
    pub thumbnail: Option<ImageVariant>,
    pub small: Option<ImageVariant>,
    pub medium: Option<ImageVariant>,
    pub large: Option<ImageVariant>,
}

impl ImageFormats {
    /// Look up a single variant.
    #[must_use]
    pub const fn get(&self, size: FormatSize) -> Option<&ImageVariant> {
        match size {
            FormatSize::Thumbnail => self.thumbnail.as_ref(),
            FormatSize::Small => self.small.as_ref(),
            FormatSize::Medium => self.medium.as_ref(),
            FormatSize::Large => self.large.as_ref(),
        }
    }
}

/// A flattened media reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// CMS upload id.
    pub id: ImageId,
    /// Original file name.
    pub name: String,
    /// CMS-relative or absolute URL of the original upload.
    pub url: String,
    /// Alt text for accessibility.
    pub alt: Option<String>,
    /// Width of the original in pixels.
    pub width: Option<u32>,
    /// Height of the original in pixels.
    pub height: Option<u32>,
    /// Resized variants.
    pub formats: ImageFormats,
}

impl Image {
    /// URL of the first variant present in `preference`, else the original.
    ///
    /// The returned path is not yet absolute; pass it through the media
    /// resolver before rendering.
    #[must_use]
    pub fn best_url(&self, preference: &[FormatSize]) -> &str {
        preference
            .iter()
            .find_map(|size| self.formats.get(*size))
            .map_or(self.url.as_str(), |variant| variant.url.as_str())
    }

    /// Alt text, falling back to the given label when the CMS has none.
    #[must_use]
    pub fn alt_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.alt
            .as_deref()
            .filter(|alt| !alt.trim().is_empty())
            .unwrap_or(fallback)
    }
}
