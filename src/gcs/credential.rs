use reqwest::blocking::RequestBuilder;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use std::fmt;

use super::CredentialError;

/// Builds the credential used for a single remote fetch
pub trait CredentialFactory: Send + Sync {
    fn build(&self, token: &str) -> Result<BearerCredential, CredentialError>;
}

/// Short-lived OAuth bearer credential.
///
/// Holds the prepared `Authorization` header rather than the raw token; the
/// header value is marked sensitive so it is never printed.
#[derive(Clone)]
pub struct BearerCredential {
    header: HeaderValue,
}

impl BearerCredential {
    pub fn new(token: &str) -> Result<Self, CredentialError> {
        let mut header = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| CredentialError::InvalidToken)?;
        header.set_sensitive(true);
        Ok(Self { header })
    }

    pub fn authorization_header(&self) -> &HeaderValue {
        &self.header
    }

    /// Attach the credential to an outgoing request
    pub fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(AUTHORIZATION, self.header.clone())
    }
}

impl fmt::Debug for BearerCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerCredential").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BearerCredentialFactory;

impl CredentialFactory for BearerCredentialFactory {
    fn build(&self, token: &str) -> Result<BearerCredential, CredentialError> {
        BearerCredential::new(token)
    }
}
