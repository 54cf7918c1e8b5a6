//! SAML error types.
//!
//! Provides error types for building outbound requests, decoding and parsing
//! inbound responses, and loading integration settings.

use thiserror::Error;

/// Result type for SAML operations.
pub type SamlResult<T> = Result<T, SamlError>;

/// SAML protocol errors.
#[derive(Debug, Error)]
pub enum SamlError {
    /// The transport string is not valid base64.
    #[error("malformed transport encoding: {0}")]
    MalformedTransportEncoding(String),

    /// The decoded payload is not UTF-8 text or not well-formed markup.
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    /// The response lacks the `Status`/`StatusCode` nesting.
    #[error("malformed status structure: {0}")]
    MalformedStatusStructure(String),

    /// The response carries no `AttributeValue` for the username claim.
    #[error("the attribute 'username' is missing from the SAML response, add it to the relying party claim rules")]
    MissingUsernameAttribute,

    /// Writing or compressing the outbound document failed.
    #[error("encoding failure: {0}")]
    EncodingFailure(String),

    /// Invalid or unreadable integration settings.
    #[error("configuration error: {0}")]
    Config(String),

    /// File system error from a response store.
    #[error("IO error: {0}")]
    Io(String),
}

impl SamlError {
    /// Returns a stable label for operator-facing diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MalformedTransportEncoding(_) => "malformed_transport_encoding",
            Self::XmlParse(_) => "xml_parse",
            Self::MalformedStatusStructure(_) => "malformed_status_structure",
            Self::MissingUsernameAttribute => "missing_username_attribute",
            Self::EncodingFailure(_) => "encoding_failure",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
        }
    }

    /// Returns true if the error came from an untrusted inbound document.
    ///
    /// These all surface as "authentication failed" to the end user.
    #[must_use]
    pub const fn is_response_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedTransportEncoding(_)
                | Self::XmlParse(_)
                | Self::MalformedStatusStructure(_)
                | Self::MissingUsernameAttribute
        )
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        if self.is_response_error() {
            401
        } else {
            500
        }
    }
}

impl From<quick_xml::Error> for SamlError {
    fn from(err: quick_xml::Error) -> Self {
        Self::XmlParse(err.to_string())
    }
}

impl From<base64::DecodeError> for SamlError {
    fn from(err: base64::DecodeError) -> Self {
        Self::MalformedTransportEncoding(err.to_string())
    }
}

impl From<std::io::Error> for SamlError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
