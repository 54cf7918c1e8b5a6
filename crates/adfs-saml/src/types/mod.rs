//! SAML 2.0 types and data structures.
//!
//! This module contains the outbound authentication request, the parsed
//! inbound response, and the protocol constants both rely on.

mod authn_request;
mod constants;
mod response;
mod status;

pub use authn_request::*;
pub use constants::*;
pub use response::*;
pub use status::*;
