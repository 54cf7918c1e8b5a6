//! SAML 2.0 Web-Browser SSO helper for ADFS.
//!
//! This crate provides the protocol side of an ADFS integration:
//!
//! - **AuthnRequest building** - Serialize and encode the request sent to the IdP
//! - **Response parsing** - Decode the posted response and extract the status,
//!   the authenticated username and the application name
//! - **HTTP-POST binding** - DEFLATE/base64 transport encoding and auto-submit forms
//! - **Verification** - A framework-agnostic service that turns a posted
//!   response into an authenticated user or a failure redirect
//!
//! # Architecture
//!
//! - [`types`] - Core SAML types and data structures
//! - [`xml`] - Minimal XML tree used by the response parser
//! - [`bindings`] - HTTP-POST binding implementation
//! - [`verification`] - User lookup, failure redirect and response logging
//! - [`config`] - Integration settings
//! - [`error`] - Error types for SAML operations
//!
//! # Example
//!
//! ```rust,ignore
//! use adfs_saml::{AuthnRequest, SamlResponse};
//!
//! let mut request = AuthnRequest::new();
//! request.set_destination("https://adfs.example.com/adfs/ls");
//! request.set_app_id("My App");
//! request.set_app_url("https://app.example.com");
//! request.set_issue_instant("2019-08-27T10:00:00Z");
//! let saml_request = request.encode()?;
//!
//! let response = SamlResponse::parse(&posted_saml_response)?;
//! if response.is_success() {
//!     println!("{} signed in to {}", response.username(), response.app_name());
//! }
//! ```
//!
//! # Security
//!
//! XML signatures on responses are not verified.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bindings;
pub mod config;
pub mod error;
pub mod types;
pub mod verification;
pub mod xml;

pub use config::AdfsConfig;
pub use error::{SamlError, SamlResult};
pub use types::*;
