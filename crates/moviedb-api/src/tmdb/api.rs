//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::Result;
use super::params::{ListingRequest, SearchQuery};
use super::types::{ApiResult, MovieDetails, MovieSummary};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Searches movies by title.
    ///
    /// A query that is blank after trimming returns [`ApiResult::empty`]
    /// without a network call.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential is missing, the bounded wait
    /// elapses, the transport fails, the status is not a success, or the
    /// body is malformed.
    async fn search_movies(&self, query: &SearchQuery) -> Result<ApiResult<MovieSummary>>;

    /// Fetches a page of a fixed listing.
    ///
    /// # Errors
    ///
    /// Same failures as [`LocalTmdbApi::search_movies`].
    async fn list_movies(&self, request: &ListingRequest) -> Result<ApiResult<MovieSummary>>;

    /// Fetches a page of `movie/popular`.
    ///
    /// # Errors
    ///
    /// Same failures as [`LocalTmdbApi::list_movies`].
    async fn list_popular_movies(&self, page: u32) -> Result<ApiResult<MovieSummary>>;

    /// Fetches a page of `movie/top_rated`.
    ///
    /// # Errors
    ///
    /// Same failures as [`LocalTmdbApi::list_movies`].
    async fn list_top_rated(&self, page: u32) -> Result<ApiResult<MovieSummary>>;

    /// Fetches movie details with credits, videos and similar movies.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential is missing, the transport fails,
    /// the status is not a success, or the body is malformed.
    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetails>;
}
