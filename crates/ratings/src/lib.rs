//! IMDb rating resolution for TMDB catalog items.
//!
//! ```text
//!                 ┌──────────────────────────┐
//!   RatingRequest │      RatingResolver      │ ExternalRating
//!  ─────────────▶ │ cache ─▶ mapping ─▶ fetch│ ─────────────▶
//!                 └──────────────────────────┘
//!                    │          │         │
//!              RatingCache  IdMapper  RatingSource
//!             (SQLite, …)   (TMDB)     (IMDb)
//! ```
//!
//! The resolver is stateless: the only state shared between calls lives in
//! the [`RatingCache`] implementation. Call sites that want to suppress
//! duplicate resolutions use a [`ResolveGuard`].
//!
//! # Example
//!
//! ```ignore
//! use ratings::{RatingRequest, RatingResolver, MediaType};
//!
//! let resolver = RatingResolver::new(source, mapper, cache);
//! let rating = resolver.resolve(&RatingRequest::for_tmdb(550, MediaType::Movie)).await?;
//! ```

mod adapters;
mod error;
mod guard;
mod models;
mod provider;
mod resolver;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use adapters::{ImdbRatingSource, TmdbIdMapper};
pub use error::{CacheError, MappingError, ResolveError, ResolveErrorKind, SourceError};
pub use guard::ResolveGuard;
pub use models::{
    CacheEntry, CacheUpsert, ExternalRating, FetchedRating, ImdbType, MediaType, RatingRequest,
};
pub use provider::{IdMapper, RatingCache, RatingSource};
pub use resolver::RatingResolver;
