//! TrendBoard - A Financial News Dashboard
//!
//! This crate relays a provider's general news feed, tags each story with
//! topic categories by keyword, and serves a searchable, filterable grid of
//! headlines.

pub mod category;
pub mod config;
pub mod error;
pub mod filter;
pub mod highlight;
pub mod news;
pub mod routes;
pub mod upstream;
pub mod view;
