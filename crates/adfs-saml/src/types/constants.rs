//! SAML 2.0 constants and URIs.
//!
//! The namespaces, binding and name ID format URIs below are part of the wire
//! contract with ADFS and must be reproduced verbatim.

/// SAML 2.0 assertion namespace URI.
pub const SAML_NS: &str = "urn:oasis:names:tc:SAML:2.0:assertion";

/// SAML 2.0 protocol namespace URI.
pub const SAMLP_NS: &str = "urn:oasis:names:tc:SAML:2.0:protocol";

/// Prefix bound to [`SAMLP_NS`] in outbound documents.
pub const SAMLP_PREFIX: &str = "saml2p";

/// Prefix bound to [`SAML_NS`] in outbound documents.
pub const SAML_PREFIX: &str = "saml2";

/// SAML protocol version emitted in requests.
pub const SAML_VERSION: &str = "2.0";

/// HTTP-POST binding URI, requested as the response `ProtocolBinding`.
pub const HTTP_POST_BINDING: &str = "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST";

/// Unspecified name ID format, the only format the request policy asks for.
pub const NAMEID_FORMAT_UNSPECIFIED: &str = "urn:oasis:names:tc:SAML:1.1:nameid-format:unspecified";

// ============================================================================
// Status Codes
// ============================================================================

/// Top-level SAML status code URIs.
pub mod status_codes {
    /// The request succeeded.
    pub const SUCCESS: &str = "urn:oasis:names:tc:SAML:2.0:status:Success";

    /// The request could not be performed due to an error on the requester's side.
    pub const REQUESTER: &str = "urn:oasis:names:tc:SAML:2.0:status:Requester";
}
