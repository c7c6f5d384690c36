//! Core types for Vitrine.
//!
//! This module provides type-safe wrappers for catalog concepts.

pub mod banner;
pub mod category;
pub mod id;
pub mod image;
pub mod price;
pub mod product;
pub mod section;

pub use banner::Banner;
pub use category::{CategoryError, CategoryToken, Placement, Relation};
pub use id::*;
pub use image::{FormatSize, Image, ImageFormats, ImageVariant};
pub use price::format_price;
pub use product::{DeliveryEstimate, Product, ProductDetail};
pub use section::HomeSection;
