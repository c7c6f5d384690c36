//! Vitrine Core - Shared catalog types and browsing rules.
//!
//! This crate provides the domain model used by the storefront:
//! - Products, banners and home sections as delivered by the CMS
//! - The category vocabulary and the browse state carried between pages
//! - The product filter and banner selector that decide what a page shows
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no templates. The storefront crate fetches records and hands
//! them to [`browse`] to decide what to render.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, category tags, images, prices and records
//! - [`browse`] - Browse state, product filter and banner selector

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod browse;
pub mod types;

pub use browse::{BrowseState, filter_products, select_banners};
pub use types::*;
