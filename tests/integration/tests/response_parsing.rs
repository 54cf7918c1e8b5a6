//! SAML response parsing tests over ADFS-shaped documents.

use adfs_saml::{AuthnRequest, SamlError, SamlResponse};

use adfs_integration_tests::{AdfsResponseFixture, REQUESTER};

/// Tests the canonical success case.
#[test]
fn test_success_response() -> anyhow::Result<()> {
    let encoded = AdfsResponseFixture::success("Alice@Example.com", "My App").encoded();
    let response = SamlResponse::parse(&encoded)?;

    assert!(response.is_success());
    assert_eq!(response.username(), "alice@example.com");
    assert_eq!(response.app_name(), "My App");
    Ok(())
}

/// Tests that the application name survives the request/response round trip.
#[test]
fn test_app_id_round_trip() -> anyhow::Result<()> {
    let mut request = AuthnRequest::new();
    request.set_app_id("My App");
    assert_eq!(request.app_id(), "My_App");

    let encoded = AdfsResponseFixture::success("alice@example.com", request.app_id()).encoded();
    let response = SamlResponse::parse(&encoded)?;
    assert_eq!(response.app_name(), "My App");
    Ok(())
}

/// Tests that status and identity are extracted independently.
#[test]
fn test_failure_status_keeps_identity() -> anyhow::Result<()> {
    let encoded = AdfsResponseFixture::success("Bob@Example.com", "My App")
        .status(REQUESTER)
        .encoded();
    let response = SamlResponse::parse(&encoded)?;

    assert!(!response.is_success());
    assert_eq!(response.status_code(), Some(REQUESTER));
    assert_eq!(response.username(), "bob@example.com");
    assert_eq!(response.app_name(), "My App");
    Ok(())
}

/// Tests that the first claim value is used as the username.
#[test]
fn test_username_is_first_attribute_value() -> anyhow::Result<()> {
    let encoded = AdfsResponseFixture::success("carol@example.com", "My App").encoded();
    let response = SamlResponse::parse(&encoded)?;
    assert_eq!(response.username(), "carol@example.com");
    assert!(response.raw_xml().contains("Domain Users"));
    Ok(())
}

/// Tests that a missing `InResponseTo` yields an empty application name.
#[test]
fn test_missing_in_response_to() -> anyhow::Result<()> {
    let encoded = AdfsResponseFixture::success("dave@example.com", "My App")
        .without_in_response_to()
        .encoded();
    let response = SamlResponse::parse(&encoded)?;
    assert_eq!(response.app_name(), "");
    Ok(())
}

/// Tests that a response without claims is rejected distinctly.
#[test]
fn test_missing_username_attribute() {
    let encoded = AdfsResponseFixture::success("erin@example.com", "My App")
        .without_username()
        .encoded();
    let err = SamlResponse::parse(&encoded).unwrap_err();
    assert!(matches!(err, SamlError::MissingUsernameAttribute));
    assert_eq!(err.kind(), "missing_username_attribute");
}

/// Tests that invalid base64 never yields a response.
#[test]
fn test_invalid_transport_encoding() {
    let err = SamlResponse::parse("PHNhbWxw?!").unwrap_err();
    assert!(matches!(err, SamlError::MalformedTransportEncoding(_)));
    assert_eq!(err.http_status(), 401);
}
