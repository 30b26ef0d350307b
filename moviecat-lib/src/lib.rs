//! Trending movie catalogue core
//!
//! Caches TMDB trending lists per time window, fetches movie details and keeps
//! a persisted, observable set of favorite movie IDs.

pub mod api;
pub mod cache;
pub mod clock;
pub mod codec;
pub mod error;
pub mod favorites;
pub mod model;
pub mod store;

mod client;
mod repository;
mod response;

pub use client::*;
pub use repository::*;
pub use response::CacheStatus;
pub use response::Response;
