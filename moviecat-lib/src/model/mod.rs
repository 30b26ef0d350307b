//! Catalogue data types
//!
//! Values returned by the remote catalogue. [`Movie`] lists are cached
//! verbatim; [`MovieDetails`] are always fetched live.

mod details;
mod movie;
mod poster;
mod time_window;

pub use details::*;
pub use movie::*;
pub use poster::*;
pub use time_window::*;
