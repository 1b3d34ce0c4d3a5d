//! API client library for moviedb.
//!
//! Provides a client for the TMDB API movie endpoints.

/// TMDB API client.
pub mod tmdb;
