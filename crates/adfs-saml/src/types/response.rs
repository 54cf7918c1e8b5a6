//! SAML Response types.
//!
//! Response messages posted back by ADFS after an authentication attempt.
//!
//! No signature over the response or its assertion is verified here. The
//! values read from the document are only as trustworthy as the channel
//! that delivered it.

use serde::Serialize;

use super::StatusCode;
use crate::bindings::HttpPostBinding;
use crate::error::{SamlError, SamlResult};
use crate::xml::XmlElement;

/// Parsed SAML Response.
///
/// Built once from the posted transport string and never mutated. Either
/// every field is populated or construction fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamlResponse {
    /// Application name recovered from `InResponseTo`.
    app_name: String,

    /// Whether the IdP reported a success status.
    is_success: bool,

    /// Lower-cased subject identifier from the first `AttributeValue`.
    username: String,

    #[serde(skip)]
    status_code: StatusCode,

    #[serde(skip)]
    raw_xml: String,
}

impl SamlResponse {
    /// Decodes and parses the value of a posted `SAMLResponse` form field.
    ///
    /// # Errors
    ///
    /// - [`SamlError::MalformedTransportEncoding`] if the value is not base64
    /// - [`SamlError::XmlParse`] if the payload is not well-formed XML
    /// - [`SamlError::MalformedStatusStructure`] if `Status/StatusCode` is missing
    /// - [`SamlError::MissingUsernameAttribute`] if no `AttributeValue` carries text
    pub fn parse(transport: &str) -> SamlResult<Self> {
        let xml = HttpPostBinding::decode_response(transport)?;
        Self::from_xml(xml)
    }

    /// Parses an already decoded response document.
    pub fn from_xml(xml: String) -> SamlResult<Self> {
        let root = XmlElement::parse(&xml)?;
        if !root.is_named("Response") {
            tracing::debug!("unexpected SAML response root element '{}'", root.name());
        }

        let status_code = StatusCode::from_response(&root)?;
        let is_success = status_code.is_success();

        let username = extract_username(&root)?;
        let app_name = root
            .attribute("InResponseTo")
            .unwrap_or_default()
            .replace('_', " ");

        tracing::debug!(
            username = %username,
            app_name = %app_name,
            success = is_success,
            "parsed SAML response"
        );

        Ok(Self {
            app_name,
            is_success,
            username,
            status_code,
            raw_xml: xml,
        })
    }

    /// Returns true if the response status is success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.is_success
    }

    /// Returns the lower-cased username of the subject.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the part of the username before the first `@`.
    #[must_use]
    pub fn username_local_part(&self) -> &str {
        self.username
            .split_once('@')
            .map_or(self.username.as_str(), |(local, _)| local)
    }

    /// Returns the application name the IdP echoed back, with underscores
    /// turned back into spaces. Empty if `InResponseTo` was absent.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Returns the raw status code value, if one was present.
    #[must_use]
    pub fn status_code(&self) -> Option<&str> {
        self.status_code.value.as_deref()
    }

    /// Returns the decoded response document.
    #[must_use]
    pub fn raw_xml(&self) -> &str {
        &self.raw_xml
    }

    /// Returns the decoded response document for audit logging.
    #[must_use]
    pub fn xml_string(&self) -> &str {
        self.raw_xml()
    }
}

/// Reads the username from the first `AttributeValue` in document order.
fn extract_username(root: &XmlElement) -> SamlResult<String> {
    let value = root
        .descendants_named("AttributeValue")
        .into_iter()
        .next()
        .ok_or(SamlError::MissingUsernameAttribute)?;

    let username = value.text();
    let username = username.trim();
    if username.is_empty() {
        return Err(SamlError::MissingUsernameAttribute);
    }

    Ok(username.to_lowercase())
}
