//! Typed wrappers for the movie catalog HTTP contract, one module per
//! feature area.

pub mod auth;
pub mod catalog;
pub mod types;
pub mod watchlist;
