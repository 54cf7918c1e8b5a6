//! SAML AuthnRequest types.
//!
//! Authentication request message sent by the application to ADFS.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{
    HTTP_POST_BINDING, NAMEID_FORMAT_UNSPECIFIED, SAMLP_NS, SAMLP_PREFIX, SAML_NS, SAML_PREFIX,
    SAML_VERSION,
};
use crate::bindings::HttpPostBinding;
use crate::error::{SamlError, SamlResult};

/// SAML Authentication Request.
///
/// All fields start empty. An empty request still serializes to a
/// structurally valid document, so callers must set every field before the
/// request is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthnRequest {
    destination: String,
    app_id: String,
    app_url: String,
    issue_instant: String,
}

impl AuthnRequest {
    /// Creates an empty authentication request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ADFS SSO endpoint, e.g. `https://adfs.example.com/adfs/ls`.
    pub fn set_destination(&mut self, url: impl Into<String>) {
        self.destination = url.into();
    }

    /// Sets the application identifier used as the request `ID`.
    ///
    /// Spaces are replaced with underscores.
    pub fn set_app_id(&mut self, id: &str) {
        self.app_id = id.replace(' ', "_");
    }

    /// Sets the application URL used as the issuer entity ID.
    pub fn set_app_url(&mut self, url: impl Into<String>) {
        self.app_url = url.into();
    }

    /// Sets the issue timestamp. The value is passed through unchanged.
    pub fn set_issue_instant(&mut self, timestamp: impl Into<String>) {
        self.issue_instant = timestamp.into();
    }

    /// Sets the destination URL.
    #[must_use]
    pub fn with_destination(mut self, url: impl Into<String>) -> Self {
        self.set_destination(url);
        self
    }

    /// Sets the application identifier.
    #[must_use]
    pub fn with_app_id(mut self, id: &str) -> Self {
        self.set_app_id(id);
        self
    }

    /// Sets the application URL.
    #[must_use]
    pub fn with_app_url(mut self, url: impl Into<String>) -> Self {
        self.set_app_url(url);
        self
    }

    /// Sets the issue timestamp.
    #[must_use]
    pub fn with_issue_instant(mut self, timestamp: impl Into<String>) -> Self {
        self.set_issue_instant(timestamp);
        self
    }

    /// Returns the destination URL.
    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Returns the normalized application identifier.
    #[must_use]
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Returns the application URL.
    #[must_use]
    pub fn app_url(&self) -> &str {
        &self.app_url
    }

    /// Returns the issue timestamp.
    #[must_use]
    pub fn issue_instant(&self) -> &str {
        &self.issue_instant
    }

    /// Serializes the request to XML.
    ///
    /// Attribute values and the issuer text are XML-escaped.
    pub fn serialize(&self) -> SamlResult<String> {
        let mut writer = Writer::new(Vec::new());

        let root_name = format!("{SAMLP_PREFIX}:AuthnRequest");
        let mut root = BytesStart::new(root_name.as_str());
        root.push_attribute((format!("xmlns:{SAMLP_PREFIX}").as_str(), SAMLP_NS));
        root.push_attribute(("Destination", self.destination.as_str()));
        root.push_attribute(("ForceAuthn", "false"));
        root.push_attribute(("ID", self.app_id.as_str()));
        root.push_attribute(("IssueInstant", self.issue_instant.as_str()));
        root.push_attribute(("ProtocolBinding", HTTP_POST_BINDING));
        root.push_attribute(("Version", SAML_VERSION));
        write(&mut writer, Event::Start(root))?;

        let issuer_name = format!("{SAML_PREFIX}:Issuer");
        let mut issuer = BytesStart::new(issuer_name.as_str());
        issuer.push_attribute((format!("xmlns:{SAML_PREFIX}").as_str(), SAML_NS));
        write(&mut writer, Event::Start(issuer))?;
        write(&mut writer, Event::Text(BytesText::new(&self.app_url)))?;
        write(&mut writer, Event::End(BytesEnd::new(issuer_name.as_str())))?;

        let policy_name = format!("{SAMLP_PREFIX}:NameIDPolicy");
        let mut policy = BytesStart::new(policy_name.as_str());
        policy.push_attribute(("AllowCreate", "true"));
        policy.push_attribute(("Format", NAMEID_FORMAT_UNSPECIFIED));
        write(&mut writer, Event::Empty(policy))?;

        write(&mut writer, Event::End(BytesEnd::new(root_name.as_str())))?;

        String::from_utf8(writer.into_inner())
            .map_err(|e| SamlError::EncodingFailure(format!("serialized request is not UTF-8: {e}")))
    }

    /// Serializes the request and encodes it for the HTTP-POST binding
    /// (raw DEFLATE, then base64).
    pub fn encode(&self) -> SamlResult<String> {
        let xml = self.serialize()?;
        HttpPostBinding::encode_request(&xml)
    }
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> SamlResult<()> {
    writer
        .write_event(event)
        .map_err(|e| SamlError::EncodingFailure(format!("XML write error: {e}")))
}
