//! Verification of responses posted back by ADFS.
//!
//! [`VerificationService`] is the glue a web layer calls with the posted
//! `SAMLResponse` field. It never talks HTTP itself: it returns a
//! [`VerificationOutcome`] and the caller runs its own success handler or
//! sends the failure redirect.
//!
//! ```rust,ignore
//! let service = VerificationService::new(Arc::new(directory), config.failure_redirect());
//! match service.verify(&form.saml_response).await {
//!     VerificationOutcome::Authenticated { user, .. } => on_success(user),
//!     VerificationOutcome::Rejected { redirect, .. } => redirect_to(redirect.location()),
//! }
//! ```

mod directory;
mod store;

use std::sync::Arc;

pub use directory::*;
pub use store::*;

use crate::error::SamlError;
use crate::types::SamlResponse;

/// Where to send the user when authentication fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRedirect {
    redirect_url: String,
    status: String,
}

impl FailureRedirect {
    /// Creates a failure redirect to `redirect_url` carrying `status`.
    pub fn new(redirect_url: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            redirect_url: redirect_url.into(),
            status: status.into(),
        }
    }

    /// Returns the redirect target without the status parameter.
    #[must_use]
    pub fn redirect_url(&self) -> &str {
        &self.redirect_url
    }

    /// Returns the failure status reported to the target.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns the `Location` header value, `<url>?status=<status>`.
    #[must_use]
    pub fn location(&self) -> String {
        format!(
            "{}?status={}",
            self.redirect_url,
            urlencoding::encode(&self.status)
        )
    }

    /// Returns the HTTP status code sent with the redirect.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        401
    }
}

/// Why a posted response did not sign anyone in.
#[derive(Debug)]
pub enum RejectReason {
    /// The response could not be decoded or parsed.
    Invalid(SamlError),
    /// ADFS reported a non-success status.
    NotSuccess {
        /// The reported status code, if any.
        status_code: Option<String>,
    },
    /// No application user matches the reported username.
    UnknownUser(String),
    /// The user directory failed.
    Directory(DirectoryError),
}

impl RejectReason {
    /// Returns a stable label for operator-facing diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Invalid(err) => err.kind(),
            Self::NotSuccess { .. } => "status_not_success",
            Self::UnknownUser(_) => "unknown_user",
            Self::Directory(_) => "directory_error",
        }
    }
}

/// Result of verifying a posted response.
#[derive(Debug)]
pub enum VerificationOutcome<U> {
    /// The IdP reported success and the user exists in the application.
    Authenticated {
        /// The signed-in user.
        user: U,
        /// The parsed response.
        response: SamlResponse,
    },
    /// Authentication failed; the caller should send `redirect`.
    Rejected {
        /// Diagnostic reason, not meant for end users.
        reason: RejectReason,
        /// The parsed response, when parsing succeeded.
        response: Option<SamlResponse>,
        /// Failure redirect to send.
        redirect: FailureRedirect,
    },
}

impl<U> VerificationOutcome<U> {
    /// Returns true if a user was authenticated.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Returns the parsed response, if there is one.
    #[must_use]
    pub fn response(&self) -> Option<&SamlResponse> {
        match self {
            Self::Authenticated { response, .. } => Some(response),
            Self::Rejected { response, .. } => response.as_ref(),
        }
    }
}

/// Turns posted `SAMLResponse` values into authenticated users.
pub struct VerificationService<D: UserDirectory> {
    directory: Arc<D>,
    failure: FailureRedirect,
    store: Option<Arc<dyn ResponseStore>>,
}

impl<D: UserDirectory> VerificationService<D> {
    /// Creates a new verification service.
    pub fn new(directory: Arc<D>, failure: FailureRedirect) -> Self {
        Self {
            directory,
            failure,
            store: None,
        }
    }

    /// Stores every successfully parsed response in `store`.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn ResponseStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Returns the failure redirect settings.
    #[must_use]
    pub fn failure_redirect(&self) -> &FailureRedirect {
        &self.failure
    }

    /// Verifies the value of a posted `SAMLResponse` form field.
    pub async fn verify(&self, saml_response: &str) -> VerificationOutcome<D::User> {
        let response = match SamlResponse::parse(saml_response) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(kind = e.kind(), "rejecting SAML response: {}", e);
                return self.reject(RejectReason::Invalid(e), None);
            }
        };

        if let Some(store) = &self.store {
            if let Err(e) = store.store(&response).await {
                tracing::warn!("failed to store SAML response: {}", e);
            }
        }

        if !response.is_success() {
            tracing::info!(
                username = %response.username(),
                status = response.status_code().unwrap_or_default(),
                "ADFS reported authentication failure"
            );
            let status_code = response.status_code().map(str::to_string);
            return self.reject(RejectReason::NotSuccess { status_code }, Some(response));
        }

        match self.directory.find_by_username(response.username()).await {
            Ok(Some(user)) => {
                tracing::info!(
                    username = %response.username(),
                    user_id = %user.id(),
                    app = %response.app_name(),
                    "ADFS authentication succeeded"
                );
                VerificationOutcome::Authenticated { user, response }
            }
            Ok(None) => {
                tracing::info!(username = %response.username(), "no application user for ADFS username");
                let username = response.username().to_string();
                self.reject(RejectReason::UnknownUser(username), Some(response))
            }
            Err(e) => {
                tracing::warn!("user directory lookup failed: {}", e);
                self.reject(RejectReason::Directory(e), Some(response))
            }
        }
    }

    fn reject(
        &self,
        reason: RejectReason,
        response: Option<SamlResponse>,
    ) -> VerificationOutcome<D::User> {
        VerificationOutcome::Rejected {
            reason,
            response,
            redirect: self.failure.clone(),
        }
    }
}
