//! Category vocabulary shared by products and banners.
//!
//! The CMS tags every product and banner with a `relation` drawn from a
//! small fixed set. Shoppers browse by that tag, by the umbrella `all`
//! token, or by the price-derived `sale` token.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`CategoryToken`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    /// The input string is empty.
    #[error("category cannot be empty")]
    Empty,
    /// The input is not part of the category vocabulary.
    #[error("unknown category: {0}")]
    Unknown(String),
}

/// Category tag stored on products and banners.
///
/// Anything the CMS sends outside the known vocabulary (including a null
/// relation) becomes [`Relation::Unknown`] so that one badly tagged entry
/// never fails a whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Men,
    Women,
    Kids,
    Unisex,
    Unknown,
}

impl Relation {
    /// Every tag a shopper can browse by.
    pub const BROWSABLE: [Self; 4] = [Self::Men, Self::Women, Self::Kids, Self::Unisex];

    /// Map a raw CMS tag onto the vocabulary.
    #[must_use]
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            Some("men") => Self::Men,
            Some("women") => Self::Women,
            Some("kids") => Self::Kids,
            Some("unisex") => Self::Unisex,
            _ => Self::Unknown,
        }
    }

    /// The tag as the CMS spells it.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Men => "men",
            Self::Women => "women",
            Self::Kids => "kids",
            Self::Unisex => "unisex",
            Self::Unknown => "unknown",
        }
    }

    /// Possessive form used in shopper-facing copy ("men's", "kids'").
    #[must_use]
    pub const fn possessive(&self) -> &'static str {
        match self {
            Self::Men => "men's",
            Self::Women => "women's",
            Self::Kids => "kids'",
            Self::Unisex => "unisex",
            Self::Unknown => "these",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category a shopper can select.
///
/// `All` and `Sale` are pseudo-categories: `All` is the wildcard, `Sale`
/// is derived from product prices rather than from the relation tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryToken {
    All,
    Sale,
    Tag(Relation),
}

impl CategoryToken {
    /// Parse a token from a query string value.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryError`] when the value is empty or not part of the
    /// vocabulary.
    pub fn parse(input: &str) -> Result<Self, CategoryError> {
        let value = input.trim();
        if value.is_empty() {
            return Err(CategoryError::Empty);
        }

        match value.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "sale" => Ok(Self::Sale),
            other => match Relation::from_tag(Some(other)) {
                Relation::Unknown => Err(CategoryError::Unknown(value.to_string())),
                relation => Ok(Self::Tag(relation)),
            },
        }
    }

    /// The token as it appears in URLs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Sale => "sale",
            Self::Tag(relation) => relation.as_str(),
        }
    }

    /// The relation tag this token names, if it names one.
    #[must_use]
    pub const fn relation(&self) -> Option<Relation> {
        match self {
            Self::Tag(relation) => Some(*relation),
            Self::All | Self::Sale => None,
        }
    }
}

impl FromStr for CategoryToken {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CategoryToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of a two-column block the image sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    #[default]
    Left,
    Right,
}

impl Placement {
    /// Map a raw CMS layout value; anything but `right` is `Left`.
    #[must_use]
    pub fn from_layout(layout: Option<&str>) -> Self {
        match layout.map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("right") => Self::Right,
            _ => Self::Left,
        }
    }
}
