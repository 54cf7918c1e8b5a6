//! Shared fixtures for the end-to-end tests: ADFS-shaped response
//! documents and an in-memory user directory.

use std::collections::HashMap;

use adfs_saml::verification::{AdfsUser, DirectoryError, UserDirectory};
use base64::Engine;

pub use adfs_saml::status_codes::{REQUESTER, SUCCESS};

/// Initializes test logging once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("adfs_saml=debug")
        .with_test_writer()
        .try_init();
}

/// Builder for ADFS-shaped response documents.
pub struct AdfsResponseFixture {
    status: String,
    username: Option<String>,
    in_response_to: Option<String>,
}

impl AdfsResponseFixture {
    /// A successful response for `username` answering `app_id`.
    pub fn success(username: &str, app_id: &str) -> Self {
        Self {
            status: SUCCESS.to_string(),
            username: Some(username.to_string()),
            in_response_to: Some(app_id.replace(' ', "_")),
        }
    }

    /// Overrides the status code.
    pub fn status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    /// Removes the username attribute.
    pub fn without_username(mut self) -> Self {
        self.username = None;
        self
    }

    /// Removes the `InResponseTo` attribute.
    pub fn without_in_response_to(mut self) -> Self {
        self.in_response_to = None;
        self
    }

    /// Renders the response XML.
    pub fn xml(&self) -> String {
        let in_response_to = self
            .in_response_to
            .as_ref()
            .map(|id| format!(r#" InResponseTo="{id}""#))
            .unwrap_or_default();
        let statement = self
            .username
            .as_ref()
            .map(|name| {
                format!(
                    r#"<AttributeStatement><Attribute Name="http://schemas.xmlsoap.org/ws/2005/05/identity/claims/upn"><AttributeValue>{name}</AttributeValue></Attribute><Attribute Name="http://schemas.microsoft.com/ws/2008/06/identity/claims/role"><AttributeValue>Domain Users</AttributeValue></Attribute></AttributeStatement>"#
                )
            })
            .unwrap_or_default();

        format!(
            r#"<samlp:Response ID="_5f1c7b0e-8a52-4c6f-9d47-2d8a1f0c9e11" Version="2.0" IssueInstant="2019-08-27T10:00:05.123Z" Destination="https://app.example.com/verify-identity" Consent="urn:oasis:names:tc:SAML:2.0:consent:unspecified"{in_response_to} xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol">
  <Issuer xmlns="urn:oasis:names:tc:SAML:2.0:assertion">http://adfs.example.com/adfs/services/trust</Issuer>
  <samlp:Status>
    <samlp:StatusCode Value="{status}" />
  </samlp:Status>
  <Assertion ID="_a1b2" IssueInstant="2019-08-27T10:00:05.123Z" Version="2.0" xmlns="urn:oasis:names:tc:SAML:2.0:assertion">
    <Issuer>http://adfs.example.com/adfs/services/trust</Issuer>
    <Subject><SubjectConfirmation Method="urn:oasis:names:tc:SAML:2.0:cm:bearer"><SubjectConfirmationData NotOnOrAfter="2019-08-27T10:05:05.123Z" Recipient="https://app.example.com/verify-identity" /></SubjectConfirmation></Subject>
    <Conditions NotBefore="2019-08-27T10:00:05.107Z" NotOnOrAfter="2019-08-27T11:00:05.107Z"><AudienceRestriction><Audience>https://app.example.com</Audience></AudienceRestriction></Conditions>
    {statement}
  </Assertion>
</samlp:Response>"#,
            status = self.status,
        )
    }

    /// Renders the base64 `SAMLResponse` form value.
    pub fn encoded(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(self.xml())
    }
}

/// Application user used by the directory fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppUser {
    pub id: u64,
    pub email: String,
}

impl AdfsUser for AppUser {
    fn id(&self) -> String {
        self.id.to_string()
    }
}

/// In-memory user directory keyed by email.
#[derive(Default)]
pub struct InMemoryDirectory {
    users: HashMap<String, AppUser>,
}

impl InMemoryDirectory {
    /// Adds a user.
    pub fn with_user(mut self, id: u64, email: &str) -> Self {
        self.users.insert(
            email.to_string(),
            AppUser {
                id,
                email: email.to_string(),
            },
        );
        self
    }
}

#[async_trait::async_trait]
impl UserDirectory for InMemoryDirectory {
    type User = AppUser;

    async fn find_by_username(&self, username: &str) -> Result<Option<AppUser>, DirectoryError> {
        Ok(self.users.get(username).cloned())
    }
}
