use std::env;
use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::CloudinaryURL;

pub const CLOUD_NAME_VAR: &str = "CLOUDINARY_CLOUD_NAME";
pub const API_KEY_VAR: &str = "CLOUDINARY_API_KEY";
pub const API_SECRET_VAR: &str = "CLOUDINARY_API_SECRET";
pub const API_BASE_URL_VAR: &str = "CLOUDINARY_API_BASE_URL";

/// Account credentials for the Cloudinary upload API.
///
/// Every field is optional: a missing value only becomes an error once a
/// request actually needs it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub cloud_name: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MissingCredentialError {
    #[error("Must supply cloud_name")]
    CloudName,
    #[error("Must supply api_key")]
    ApiKey,
    #[error("Must supply api_secret")]
    ApiSecret,
}

/// Borrowed view of a complete set of credentials.
pub(crate) struct ResolvedCredentials<'a> {
    pub cloud_name: &'a str,
    pub api_key: &'a str,
    pub api_secret: &'a str,
}

impl Credentials {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: Some(cloud_name.into()),
            api_key: Some(api_key.into()),
            api_secret: Some(api_secret.into()),
        }
    }

    /// Reads the three `CLOUDINARY_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds credentials from an arbitrary key lookup. Empty values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            cloud_name: read(CLOUD_NAME_VAR),
            api_key: read(API_KEY_VAR),
            api_secret: read(API_SECRET_VAR),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.resolve().is_ok()
    }

    pub(crate) fn resolve(&self) -> Result<ResolvedCredentials<'_>, MissingCredentialError> {
        Ok(ResolvedCredentials {
            cloud_name: self
                .cloud_name
                .as_deref()
                .ok_or(MissingCredentialError::CloudName)?,
            api_key: self
                .api_key
                .as_deref()
                .ok_or(MissingCredentialError::ApiKey)?,
            api_secret: self
                .api_secret
                .as_deref()
                .ok_or(MissingCredentialError::ApiSecret)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Everything a [`crate::CloudinaryClient`] needs to talk to the service.
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub credentials: Credentials,
    pub api_base_url: CloudinaryURL,
}

impl CloudinaryConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_base_url: CloudinaryURL::default(),
        }
    }

    /// Configures the client from the environment.
    ///
    /// Safe to call any number of times and never fails. Missing credentials are
    /// reported by the first upload or delete instead.
    pub fn from_env() -> Self {
        let credentials = Credentials::from_env();
        let api_base_url = env::var(API_BASE_URL_VAR)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(CloudinaryURL::new)
            .unwrap_or_default();

        debug!(
            has_cloud_name = credentials.cloud_name.is_some(),
            has_api_key = credentials.api_key.is_some(),
            has_api_secret = credentials.api_secret.is_some(),
            api_base_url = api_base_url.as_ref(),
            "cloudinary configured"
        );

        Self {
            credentials,
            api_base_url,
        }
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = CloudinaryURL::new(url);
        self
    }
}
