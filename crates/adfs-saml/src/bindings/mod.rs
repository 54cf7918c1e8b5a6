//! SAML bindings implementation.
//!
//! ADFS integrations use the HTTP-POST binding in both directions, with one
//! twist: outbound requests are DEFLATE-compressed before base64 encoding,
//! while inbound responses are plain base64.
//!
//! # Usage
//!
//! ```rust,ignore
//! use adfs_saml::bindings::HttpPostBinding;
//!
//! let encoded = HttpPostBinding::encode_request(&request_xml)?;
//! let html = HttpPostBinding::auto_submit_form("https://adfs.example.com/adfs/ls", &encoded, None);
//! ```

mod post;

pub use post::*;
