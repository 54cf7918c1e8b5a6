//! SAML Status types.
//!
//! Status information returned in SAML protocol responses.

use super::status_codes;
use crate::error::{SamlError, SamlResult};
use crate::xml::XmlElement;

/// SAML status code as read from a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCode {
    /// The status code URI value, if the `Value` attribute was present.
    pub value: Option<String>,
}

impl StatusCode {
    /// Reads the status code of a `Response` root element.
    ///
    /// The response must contain a `Status` element with a `StatusCode`
    /// child. A missing `Value` attribute is not an error and simply yields a
    /// non-success code.
    pub fn from_response(root: &XmlElement) -> SamlResult<Self> {
        let status = root.child("Status").ok_or_else(|| {
            SamlError::MalformedStatusStructure(format!(
                "'{}' has no Status element",
                root.name()
            ))
        })?;

        let code = status.child("StatusCode").ok_or_else(|| {
            SamlError::MalformedStatusStructure("Status has no StatusCode element".to_string())
        })?;

        Ok(Self {
            value: code.attribute("Value").map(str::to_string),
        })
    }

    /// Returns true if this is a success status code.
    ///
    /// The comparison is exact and case-sensitive.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.value.as_deref() == Some(status_codes::SUCCESS)
    }
}
