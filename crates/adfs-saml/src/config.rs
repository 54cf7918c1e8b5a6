//! Configuration management for ADFS integrations.
//!
//! Settings are read from a TOML file:
//!
//! ```toml
//! [idp]
//! sso_url = "https://adfs.example.com/adfs/ls"
//!
//! [application]
//! id = "My App"
//! url = "https://app.example.com"
//! issue_instant = "2019-08-27T10:00:00Z"
//!
//! [failure]
//! redirect_url = "https://app.example.com/"
//! status = "adfs-failed"
//!
//! [response_log]
//! directory = "/var/lib/app/sto/adfs"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{SamlError, SamlResult};
use crate::types::AuthnRequest;
use crate::verification::FailureRedirect;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdfsConfig {
    /// Identity provider settings.
    pub idp: IdpConfig,
    /// Relying party (application) settings.
    pub application: ApplicationConfig,
    /// Where users are sent when authentication fails.
    pub failure: FailureConfig,
    /// Optional audit log of raw responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_log: Option<ResponseLogConfig>,
}

/// Identity provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdpConfig {
    /// ADFS SSO endpoint receiving the `SAMLRequest`.
    pub sso_url: String,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application identifier, sent as the request ID.
    pub id: String,
    /// Application URL, sent as the issuer entity ID.
    pub url: String,
    /// Issue timestamp placed in requests.
    #[serde(default)]
    pub issue_instant: String,
}

/// Failure redirect configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureConfig {
    /// URL users are redirected to when authentication fails.
    pub redirect_url: String,
    /// Value of the `status` query parameter on failure.
    #[serde(default)]
    pub status: String,
}

/// Response log configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseLogConfig {
    /// Directory receiving one `.log` file per response.
    pub directory: PathBuf,
}

impl AdfsConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(content: &str) -> SamlResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| SamlError::Config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> SamlResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SamlError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Checks that the values needed to build a request are present.
    pub fn validate(&self) -> SamlResult<()> {
        if self.idp.sso_url.trim().is_empty() {
            return Err(SamlError::Config("idp.sso_url is required".to_string()));
        }
        if self.application.id.trim().is_empty() {
            return Err(SamlError::Config("application.id is required".to_string()));
        }
        if self.application.url.trim().is_empty() {
            return Err(SamlError::Config("application.url is required".to_string()));
        }
        Ok(())
    }

    /// Builds a fully populated authentication request.
    #[must_use]
    pub fn authn_request(&self) -> AuthnRequest {
        AuthnRequest::new()
            .with_destination(&self.idp.sso_url)
            .with_app_id(&self.application.id)
            .with_app_url(&self.application.url)
            .with_issue_instant(&self.application.issue_instant)
    }

    /// Returns the failure redirect settings.
    #[must_use]
    pub fn failure_redirect(&self) -> FailureRedirect {
        FailureRedirect::new(&self.failure.redirect_url, &self.failure.status)
    }
}
