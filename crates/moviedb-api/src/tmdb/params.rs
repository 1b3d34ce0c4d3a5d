//! TMDB API request parameter types.

/// Parameters for the `search/movie` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Search text. Trimmed before it is sent.
    pub query: String,
    /// Result page (1-based, default: 1).
    pub page: u32,
    /// Include adult content (default: `false`).
    pub include_adult: bool,
}

impl SearchQuery {
    /// Creates new search params with the given query text.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            include_adult: false,
        }
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Returns the query text with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.query.trim()
    }

    /// Returns `true` if the query is empty after trimming.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }

    /// Query-string pairs for this search (credential and language excluded).
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("query", String::from(self.trimmed())),
            ("page", effective_page(self.page).to_string()),
            ("include_adult", self.include_adult.to_string()),
        ]
    }
}

/// Fixed, query-less movie listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKind {
    /// `movie/popular`.
    Popular,
    /// `movie/top_rated`.
    TopRated,
}

impl ListingKind {
    /// Endpoint path relative to the API base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Popular => "movie/popular",
            Self::TopRated => "movie/top_rated",
        }
    }
}

/// Parameters for a listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingRequest {
    /// Which listing to fetch.
    pub kind: ListingKind,
    /// Result page (1-based, default: 1).
    pub page: u32,
}

impl ListingRequest {
    /// Creates a request for the first page of the given listing.
    #[must_use]
    pub const fn new(kind: ListingKind) -> Self {
        Self { kind, page: 1 }
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub(crate) fn to_query(self) -> Vec<(&'static str, String)> {
        vec![("page", effective_page(self.page).to_string())]
    }
}

/// Pages are 1-based; `0` is sent as `1`.
const fn effective_page(page: u32) -> u32 {
    if page == 0 { 1 } else { page }
}
