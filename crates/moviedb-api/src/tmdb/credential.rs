//! Static TMDB access credential.

use std::fmt;

use reqwest::RequestBuilder;

/// Static access credential attached to every request.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// v3 API key, sent as the `api_key` query parameter.
    ApiKey(String),
    /// v4 read access token, sent as `Authorization: Bearer`.
    BearerToken(String),
}

impl Credential {
    /// Returns `true` if the secret is empty or whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.secret().trim().is_empty()
    }

    const fn secret(&self) -> &String {
        match self {
            Self::ApiKey(s) | Self::BearerToken(s) => s,
        }
    }

    /// Attaches the credential to an outgoing request.
    pub(crate) fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::ApiKey(key) => request.query(&[("api_key", key)]),
            Self::BearerToken(token) => request.bearer_auth(token),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
            Self::BearerToken(_) => f.write_str("BearerToken(<redacted>)"),
        }
    }
}
