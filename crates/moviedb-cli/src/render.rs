//! Text rendering of movie results and client failures.
//!
//! This is the only place where failures become user-visible text.

use chrono::{Datelike, NaiveDate};
use moviedb_api::tmdb::{MovieDetails, MovieSummary, TmdbError, Video};

/// Base URL of the TMDB image CDN.
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

/// Poster width used for cards and details.
pub const POSTER_SIZE: &str = "w500";

/// Overview length shown in result lists.
pub const OVERVIEW_PREVIEW_CHARS: usize = 120;

/// Number of cast members shown in details.
const TOP_CAST: usize = 5;

/// Number of similar movies shown in details.
const SIMILAR_SHOWN: usize = 5;

/// Placeholder for missing values.
const NOT_AVAILABLE: &str = "N/A";

/// Coarse rating bucket, used to pick a badge style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingTier {
    /// 8.0 and above.
    High,
    /// 6.0 up to 8.0.
    Good,
    /// 4.0 up to 6.0.
    Mixed,
    /// Below 4.0.
    Low,
}

impl RatingTier {
    /// Buckets a 0-10 vote average.
    #[must_use]
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 8.0 {
            Self::High
        } else if rating >= 6.0 {
            Self::Good
        } else if rating >= 4.0 {
            Self::Mixed
        } else {
            Self::Low
        }
    }

    /// Short marker printed next to the rating.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::High => "+++",
            Self::Good => "++",
            Self::Mixed => "+",
            Self::Low => "-",
        }
    }
}

/// Full poster URL for a poster path.
#[must_use]
pub fn poster_url(poster_path: Option<&str>, size: &str) -> Option<String> {
    poster_path
        .filter(|p| !p.is_empty())
        .map(|p| format!("{IMAGE_BASE_URL}{size}{p}"))
}

/// Vote average with one decimal; `N/A` when absent or zero.
#[must_use]
pub fn format_rating(rating: Option<f64>) -> String {
    rating
        .filter(|r| *r > 0.0)
        .map_or_else(|| String::from(NOT_AVAILABLE), |r| format!("{r:.1}"))
}

fn parse_release_date(date: Option<&str>) -> Option<NaiveDate> {
    date.and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
}

/// Year of a `YYYY-MM-DD` release date.
#[must_use]
pub fn release_year(date: Option<&str>) -> Option<i32> {
    parse_release_date(date).map(|d| d.year())
}

/// Long-form release date (e.g., "31 March 1999"), or "Unknown".
#[must_use]
pub fn format_release_date(date: Option<&str>) -> String {
    parse_release_date(date).map_or_else(
        || String::from("Unknown"),
        |d| d.format("%-d %B %Y").to_string(),
    )
}

/// Overview cut to `max_chars` characters with a trailing ellipsis.
#[must_use]
pub fn truncate_overview(overview: Option<&str>, max_chars: usize) -> String {
    let Some(text) = overview.map(str::trim).filter(|t| !t.is_empty()) else {
        return String::from("No description available.");
    };
    if text.chars().count() <= max_chars {
        return String::from(text);
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

/// Picks the video to present as the trailer.
///
/// First YouTube `Trailer`, else the first YouTube video of any type.
#[must_use]
pub fn trailer(details: &MovieDetails) -> Option<&Video> {
    let videos = &details.videos.as_ref()?.results;
    let youtube = || videos.iter().filter(|v| v.site == "YouTube");
    youtube()
        .find(|v| v.kind.as_deref() == Some("Trailer"))
        .or_else(|| youtube().next())
}

/// Watch URL for a video, when its site is known.
#[must_use]
pub fn video_url(video: &Video) -> Option<String> {
    match video.site.as_str() {
        "YouTube" => Some(format!("https://www.youtube.com/watch?v={}", video.key)),
        "Vimeo" => Some(format!("https://vimeo.com/{}", video.key)),
        _ => None,
    }
}

/// One-line summary for result lists.
#[must_use]
pub fn summary_line(movie: &MovieSummary) -> String {
    let year = release_year(movie.release_date.as_deref())
        .map_or_else(String::new, |y| format!(" ({y})"));
    let original = movie
        .original_title
        .as_deref()
        .filter(|o| *o != movie.title)
        .map_or_else(String::new, |o| format!(" \"{o}\""));
    let rating = movie.vote_average.filter(|r| *r > 0.0).map_or_else(
        || String::from(NOT_AVAILABLE),
        |r| format!("{r:.1} {}", RatingTier::from_rating(r).marker()),
    );
    let popularity = movie
        .popularity
        .map_or_else(|| String::from("-"), |p| format!("{p:.0}"));

    format!(
        "{}\t{}{}{}\trating: {}\tvotes: {}\tpopularity: {}",
        movie.id,
        movie.title,
        year,
        original,
        rating,
        movie.vote_count.unwrap_or_default(),
        popularity,
    )
}

/// Second line of a result card: release date and overview preview.
#[must_use]
pub fn overview_line(movie: &MovieSummary) -> String {
    format!(
        "\t{} | {}",
        format_release_date(movie.release_date.as_deref()),
        truncate_overview(movie.overview.as_deref(), OVERVIEW_PREVIEW_CHARS),
    )
}

/// Multi-line detail view.
#[must_use]
pub fn details_lines(details: &MovieDetails) -> Vec<String> {
    let movie = &details.summary;
    let mut lines = vec![format!("{} [{}]", movie.title, movie.id)];

    if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
        lines.push(format!("\"{tagline}\""));
    }
    lines.push(format!(
        "Overview: {}",
        movie
            .overview
            .as_deref()
            .filter(|o| !o.is_empty())
            .unwrap_or("No overview available.")
    ));
    lines.push(format!("Rating: {}", format_rating(movie.vote_average)));
    lines.push(format!(
        "Release date: {}",
        movie
            .release_date
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(NOT_AVAILABLE)
    ));
    lines.push(format!(
        "Runtime: {}",
        details
            .runtime
            .filter(|r| *r > 0)
            .map_or_else(|| String::from(NOT_AVAILABLE), |r| format!("{r} min"))
    ));
    lines.push(format!(
        "Votes: {}",
        movie
            .vote_count
            .filter(|c| *c > 0)
            .map_or_else(|| String::from(NOT_AVAILABLE), |c| c.to_string())
    ));

    if !details.genres.is_empty() {
        let genres: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
        lines.push(format!("Genres: {}", genres.join(", ")));
    }
    if !details.production_companies.is_empty() {
        let companies: Vec<&str> = details
            .production_companies
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        lines.push(format!("Production: {}", companies.join(", ")));
    }
    if let Some(url) = poster_url(movie.poster_path.as_deref(), POSTER_SIZE) {
        lines.push(format!("Poster: {url}"));
    }
    if let Some(credits) = details.credits.as_ref().filter(|c| !c.cast.is_empty()) {
        let cast: Vec<String> = credits
            .cast
            .iter()
            .take(TOP_CAST)
            .map(|c| match c.character.as_deref().filter(|ch| !ch.is_empty()) {
                Some(character) => format!("{} as {character}", c.name),
                None => c.name.clone(),
            })
            .collect();
        lines.push(format!("Cast: {}", cast.join(", ")));
    }
    if let Some(url) = trailer(details).and_then(video_url) {
        lines.push(format!("Trailer: {url}"));
    }
    if let Some(similar) = details.similar.as_ref().filter(|s| !s.is_empty()) {
        lines.push(String::from("Similar:"));
        lines.extend(
            similar
                .results
                .iter()
                .take(SIMILAR_SHOWN)
                .map(|m| format!("  {}", summary_line(m))),
        );
    }

    lines
}

/// User-facing text for a client failure.
#[must_use]
pub fn describe_failure(error: &TmdbError) -> String {
    match error {
        TmdbError::Configuration(_) => String::from(
            "API configuration is invalid: no TMDB API key or access token is configured",
        ),
        TmdbError::InvalidCredential { .. } => String::from("Invalid API key"),
        TmdbError::NotFound { .. } => String::from("Endpoint or movie not found"),
        TmdbError::RateLimited { .. } => {
            String::from("Too many requests - try again in a few minutes")
        }
        TmdbError::UpstreamServer { .. } => String::from("Server error - try again later"),
        TmdbError::Http { status, .. } => format!("HTTP error! status: {status}"),
        TmdbError::Timeout { .. } => String::from("The request took too long - try again"),
        TmdbError::Transport(_) => {
            String::from("Could not reach the movie database - check your connection")
        }
        TmdbError::MalformedResponse { .. } => String::from("Invalid response from the server"),
    }
}
