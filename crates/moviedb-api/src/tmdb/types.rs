//! TMDB API response types.
//!
//! Every optional field tolerates both absence and an explicit `null`.
//! Unknown fields are ignored.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Deserializes `null` as `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Deserializes an appended sub-resource, yielding `None` when it does not
/// match the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(T::deserialize(value)
        .inspect_err(|e| {
            tracing::debug!(
                kind = std::any::type_name::<T>(),
                error = %e,
                "dropping undecodable sub-resource"
            );
        })
        .ok())
}

/// Deserializes a list, skipping entries that do not match `T`.
///
/// `null` yields an empty list.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let values = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(values
        .into_iter()
        .filter_map(|value| {
            T::deserialize(value)
                .inspect_err(|e| {
                    tracing::debug!(
                        kind = std::any::type_name::<T>(),
                        error = %e,
                        "skipping undecodable entry"
                    );
                })
                .ok()
        })
        .collect())
}

// --- Paged results ---

/// Normalized page of results shared by the search and listing endpoints.
///
/// Missing or `null` upstream fields default to an empty `results`, zero
/// totals and page `1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPage<T>", bound(deserialize = "T: Deserialize<'de>"))]
#[allow(clippy::module_name_repetitions)]
pub struct ApiResult<T> {
    /// Results on this page, in upstream order.
    pub results: Vec<T>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results.
    pub total_results: u32,
    /// Current page number (1-based).
    pub page: u32,
}

impl<T> ApiResult<T> {
    /// Empty result, returned for blank search queries.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
            page: 1,
        }
    }

    /// Returns `true` if the page carries no results.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<T> Default for ApiResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Wire shape of a paged response before normalization.
#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct RawPage<T> {
    page: Option<u32>,
    results: Option<Vec<T>>,
    total_pages: Option<u32>,
    total_results: Option<u32>,
}

impl<T> From<RawPage<T>> for ApiResult<T> {
    fn from(raw: RawPage<T>) -> Self {
        Self {
            results: raw.results.unwrap_or_default(),
            total_pages: raw.total_pages.unwrap_or_default(),
            total_results: raw.total_results.unwrap_or_default(),
            page: raw.page.filter(|page| *page != 0).unwrap_or(1),
        }
    }
}

// --- Movie summary ---

/// A movie entry in search and listing results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: Option<String>,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: Option<String>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Release date (YYYY-MM-DD, may be empty).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Vote count.
    #[serde(default)]
    pub vote_count: Option<u32>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: Option<f64>,
}

// --- Movie details ---

/// Response from `movie/{movie_id}` with `credits,videos,similar` appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    /// Fields shared with [`MovieSummary`].
    #[serde(flatten)]
    pub summary: MovieSummary,
    /// Tagline.
    #[serde(default)]
    pub tagline: Option<String>,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Release status (e.g., "Released").
    #[serde(default)]
    pub status: Option<String>,
    /// Official homepage.
    #[serde(default)]
    pub homepage: Option<String>,
    /// IMDb identifier.
    #[serde(default)]
    pub imdb_id: Option<String>,
    /// Genres, in upstream order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<Genre>,
    /// Production companies, in upstream order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub production_companies: Vec<ProductionCompany>,
    /// Appended `credits` sub-resource.
    #[serde(default, deserialize_with = "lenient")]
    pub credits: Option<Credits>,
    /// Appended `videos` sub-resource.
    #[serde(default, deserialize_with = "lenient")]
    pub videos: Option<Videos>,
    /// Appended `similar` sub-resource.
    #[serde(default, deserialize_with = "lenient")]
    pub similar: Option<ApiResult<MovieSummary>>,
}

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Production company entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCompany {
    /// Company ID.
    #[serde(default)]
    pub id: Option<u64>,
    /// Company name.
    pub name: String,
    /// Logo image path.
    #[serde(default)]
    pub logo_path: Option<String>,
    /// Origin country (ISO 3166-1).
    #[serde(default)]
    pub origin_country: Option<String>,
}

/// Cast and crew of a movie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credits {
    /// Cast members, in billing order.
    #[serde(default, deserialize_with = "lenient_list")]
    pub cast: Vec<CastMember>,
    /// Crew members.
    #[serde(default, deserialize_with = "lenient_list")]
    pub crew: Vec<CrewMember>,
}

/// A single cast credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    /// Person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Character played.
    #[serde(default)]
    pub character: Option<String>,
    /// Billing order.
    #[serde(default)]
    pub order: Option<u32>,
    /// Profile image path.
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// A single crew credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMember {
    /// Person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Job title (e.g., "Director").
    #[serde(default)]
    pub job: Option<String>,
    /// Department (e.g., "Directing").
    #[serde(default)]
    pub department: Option<String>,
}

/// Videos attached to a movie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Videos {
    /// Video entries.
    #[serde(default, deserialize_with = "lenient_list")]
    pub results: Vec<Video>,
}

/// A single video entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Site-specific video key.
    pub key: String,
    /// Hosting site (e.g., "YouTube").
    pub site: String,
    /// Video name.
    #[serde(default)]
    pub name: Option<String>,
    /// Video type (e.g., "Trailer", "Teaser").
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Whether the video is marked official.
    #[serde(default)]
    pub official: Option<bool>,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    #[serde(default)]
    pub status_code: Option<u32>,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[serde(default)]
    pub success: bool,
}
