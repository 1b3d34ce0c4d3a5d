//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 movie endpoints
//! (search, popular/top-rated listings and details) and normalizes
//! their responses.

mod api;
mod client;
mod credential;
mod error;
mod params;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_SEARCH_TIMEOUT, TmdbClient, TmdbClientBuilder};
pub use credential::Credential;
#[allow(clippy::module_name_repetitions)]
pub use error::{Result, TmdbError};
pub use params::{ListingKind, ListingRequest, SearchQuery};
pub use types::{
    ApiResult, CastMember, Credits, CrewMember, Genre, MovieDetails, MovieSummary,
    ProductionCompany, Video, Videos,
};
