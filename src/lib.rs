//! Watchlist Picker Library
//!
//! Page-side logic for a movie/series watchlist: a random pick flow against a
//! content server, the add-content form with its field toggling, validation
//! and catalog autofill.

pub mod catalog;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod form;
pub mod models;
pub mod notice;
pub mod page;
pub mod view;
