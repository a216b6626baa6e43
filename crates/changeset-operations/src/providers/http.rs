use changeset_core::DependencyManifest;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::error::OperationError;
use crate::traits::{ManifestFetcher, ManifestLocation};
use crate::{DEFAULT_MANIFEST_BASE_URL, Result};

/// Fetches raw file contents from a GitHub-style raw content host.
pub struct HttpManifestFetcher {
    client: Client,
    base_url: String,
}

impl HttpManifestFetcher {
    /// Fetcher for `https://raw.githubusercontent.com`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value or the HTTP
    /// client cannot be built.
    pub fn new(token: &SecretString) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_MANIFEST_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value or the HTTP
    /// client cannot be built.
    pub fn with_base_url(token: &SecretString, base_url: &str) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Token {}", token.expose_secret()))
            .map_err(OperationError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("dependency-changesets/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(OperationError::HttpClient)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn manifest_url(&self, location: ManifestLocation<'_>) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.base_url,
            location.repository.owner,
            location.repository.name,
            location.git_ref,
            location.path.trim_start_matches('/'),
        )
    }
}

impl ManifestFetcher for HttpManifestFetcher {
    fn fetch_manifest(
        &self,
        location: ManifestLocation<'_>,
    ) -> Result<Option<DependencyManifest>> {
        let url = self.manifest_url(location);
        debug!(%url, "fetching base manifest");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| OperationError::ManifestFetch {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(OperationError::ManifestFetchStatus {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .map_err(|source| OperationError::ManifestFetch {
                url: url.clone(),
                source,
            })?;

        DependencyManifest::from_json(&body)
            .map(Some)
            .map_err(|source| OperationError::ManifestFetchParse { url, source })
    }
}
