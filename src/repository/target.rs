//! The repository being backed up: service location, credentials, repository id.

use std::fmt;

use url::Url;

use super::constants::{
    ASSETS_RESOURCE, CONTINUATION_TOKEN_PARAM, PING_PATH, REPOSITORY_PARAM, REST_PATH,
};
use super::error::RepositoryError;

/// HTTP Basic credentials for the repository service.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Creates a credential pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The user name sent with every request.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The password sent with every request.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Immutable description of the repository a backup run targets.
///
/// Built once at startup and shared by reference with every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryTarget {
    base_url: Url,
    credentials: Credentials,
    repository: String,
    api_version: String,
}

impl RepositoryTarget {
    /// Validates and assembles a target.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::InvalidBaseUrl`] when `base_url` is not an
    /// absolute http(s) URL with a host, and [`RepositoryError::InvalidTarget`]
    /// when the repository id or API version is empty or contains `/`.
    pub fn new(
        base_url: &str,
        credentials: Credentials,
        repository: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Result<Self, RepositoryError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed =
            Url::parse(trimmed).map_err(|_| RepositoryError::invalid_base_url(base_url))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(RepositoryError::invalid_base_url(base_url));
        }

        let repository = repository.into();
        validate_segment("repository", &repository)?;
        let api_version = api_version.into();
        validate_segment("api version", &api_version)?;

        Ok(Self {
            base_url: parsed,
            credentials,
            repository,
            api_version,
        })
    }

    /// The service base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Credentials attached to every request.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The repository identifier.
    #[must_use]
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// The REST API version segment (e.g. `v1`).
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Builds the asset listing URL.
    ///
    /// `continuation_token` is appended as the `continuationToken` query
    /// parameter only when present; the first page request omits it.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::InvalidBaseUrl`] if the joined URL fails to parse.
    pub fn assets_url(&self, continuation_token: Option<&str>) -> Result<Url, RepositoryError> {
        let raw = format!(
            "{}{REST_PATH}/{}/{ASSETS_RESOURCE}",
            self.base_url(),
            self.api_version
        );
        let mut url = Url::parse(&raw).map_err(|_| RepositoryError::invalid_base_url(raw))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair(REPOSITORY_PARAM, &self.repository);
            if let Some(token) = continuation_token {
                query.append_pair(CONTINUATION_TOKEN_PARAM, token);
            }
        }
        Ok(url)
    }

    /// Builds the health endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::InvalidBaseUrl`] if the joined URL fails to parse.
    pub fn ping_url(&self) -> Result<Url, RepositoryError> {
        let raw = format!("{}{PING_PATH}", self.base_url());
        Url::parse(&raw).map_err(|_| RepositoryError::invalid_base_url(raw))
    }
}

fn validate_segment(field: &str, value: &str) -> Result<(), RepositoryError> {
    if value.trim().is_empty() {
        return Err(RepositoryError::invalid_target(format!(
            "{field} must not be empty"
        )));
    }
    if value.contains('/') {
        return Err(RepositoryError::invalid_target(format!(
            "{field} must not contain '/': {value}"
        )));
    }
    Ok(())
}
