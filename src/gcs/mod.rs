// Remote object retrieval from Google Cloud Storage
mod credential;
mod error;

#[cfg(test)]
mod tests;

pub use credential::{BearerCredential, BearerCredentialFactory, CredentialFactory};
pub use error::{CredentialError, FetchError};

use reqwest::Url;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_GCS_ENDPOINT: &str = "https://storage.googleapis.com";

const GCS_SCHEME: &str = "gs://";

/// Retrieves the raw bytes of a remote object
pub trait ObjectFetcher: Send + Sync {
    fn fetch(
        &self,
        uri: &str,
        credential: Option<&BearerCredential>,
    ) -> Result<Vec<u8>, FetchError>;
}

/// A parsed `gs://bucket/object` reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcsObject {
    pub bucket: String,
    pub name: String,
}

impl GcsObject {
    pub fn parse(uri: &str) -> Result<Self, FetchError> {
        let path = uri
            .strip_prefix(GCS_SCHEME)
            .ok_or_else(|| FetchError::InvalidUri(format!("expected gs:// scheme: {uri}")))?;

        match path.split_once('/') {
            Some((bucket, name)) if !bucket.is_empty() && !name.is_empty() => Ok(Self {
                bucket: bucket.to_string(),
                name: name.to_string(),
            }),
            _ => Err(FetchError::InvalidUri(format!(
                "expected gs://<bucket>/<object>: {uri}"
            ))),
        }
    }

    /// JSON API download URL for this object
    pub fn media_url(&self, endpoint: &str) -> Result<Url, FetchError> {
        let mut url =
            Url::parse(endpoint).map_err(|e| FetchError::InvalidEndpoint(e.to_string()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| FetchError::InvalidEndpoint(endpoint.to_string()))?;
            // Object names may contain '/', push() encodes it as %2F
            segments
                .pop_if_empty()
                .extend(["storage", "v1", "b", self.bucket.as_str(), "o"])
                .push(&self.name);
        }
        url.query_pairs_mut().append_pair("alt", "media");
        Ok(url)
    }
}

pub struct GcsFetcher {
    http: Client,
    endpoint: String,
}

impl GcsFetcher {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, FetchError> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }
}

impl ObjectFetcher for GcsFetcher {
    fn fetch(
        &self,
        uri: &str,
        credential: Option<&BearerCredential>,
    ) -> Result<Vec<u8>, FetchError> {
        let object = GcsObject::parse(uri)?;
        let url = object.media_url(&self.endpoint)?;

        let mut request = self.http.get(url);
        if let Some(credential) = credential {
            request = credential.authorize(request);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                uri: uri.to_string(),
            });
        }

        let bytes = response.bytes()?;
        debug!(uri, size = bytes.len(), "Downloaded object");
        Ok(bytes.to_vec())
    }
}
