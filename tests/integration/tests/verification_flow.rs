//! Verification service tests, from posted form value to outcome.

use std::sync::Arc;

use adfs_saml::verification::{
    FileResponseStore, RejectReason, VerificationOutcome, VerificationService,
};
use adfs_saml::AdfsConfig;

use adfs_integration_tests::{init_tracing, AdfsResponseFixture, InMemoryDirectory, REQUESTER};

fn config(log_dir: &std::path::Path) -> anyhow::Result<AdfsConfig> {
    let content = format!(
        r#"
[idp]
sso_url = "https://adfs.example.com/adfs/ls"

[application]
id = "My App"
url = "https://app.example.com"

[failure]
redirect_url = "https://app.example.com/home"
status = "adfs-failed"

[response_log]
directory = "{}"
"#,
        log_dir.display()
    );
    Ok(AdfsConfig::from_toml_str(&content)?)
}

fn service(config: &AdfsConfig) -> VerificationService<InMemoryDirectory> {
    let directory = InMemoryDirectory::default().with_user(7, "alice@example.com");
    VerificationService::new(Arc::new(directory), config.failure_redirect())
}

/// Tests a complete successful sign-in with response logging.
#[tokio::test]
async fn test_known_user_is_authenticated_and_logged() -> anyhow::Result<()> {
    init_tracing();
    let log_dir = std::env::temp_dir().join(format!("adfs-it-{}", uuid::Uuid::new_v4()));
    let config = config(&log_dir)?;
    let directory = config
        .response_log
        .as_ref()
        .map(|log| log.directory.clone())
        .expect("response log configured");
    let service = service(&config).with_store(Arc::new(FileResponseStore::new(directory)));

    let posted = AdfsResponseFixture::success("Alice@Example.com", "My App").encoded();
    let outcome = service.verify(&posted).await;

    match outcome {
        VerificationOutcome::Authenticated { user, response } => {
            assert_eq!(user.id, 7);
            assert_eq!(user.email, "alice@example.com");
            assert_eq!(response.app_name(), "My App");
        }
        VerificationOutcome::Rejected { reason, .. } => {
            panic!("unexpected rejection: {}", reason.kind())
        }
    }

    let mut entries = tokio::fs::read_dir(&log_dir).await?;
    let entry = entries.next_entry().await?.expect("one log file");
    assert!(entry.file_name().to_string_lossy().ends_with("-alice.log"));

    tokio::fs::remove_dir_all(&log_dir).await?;
    Ok(())
}

/// Tests that every failure path ends in the configured redirect.
#[tokio::test]
async fn test_failures_redirect_with_status() -> anyhow::Result<()> {
    init_tracing();
    let config = config(&std::env::temp_dir())?;
    let service = service(&config);

    let cases = [
        (
            AdfsResponseFixture::success("alice@example.com", "My App")
                .status(REQUESTER)
                .encoded(),
            "status_not_success",
        ),
        (
            AdfsResponseFixture::success("mallory@example.com", "My App").encoded(),
            "unknown_user",
        ),
        (
            AdfsResponseFixture::success("alice@example.com", "My App")
                .without_username()
                .encoded(),
            "missing_username_attribute",
        ),
        ("%%%".to_string(), "malformed_transport_encoding"),
    ];

    for (posted, expected_kind) in cases {
        match service.verify(&posted).await {
            VerificationOutcome::Rejected { reason, redirect, .. } => {
                assert_eq!(reason.kind(), expected_kind);
                assert_eq!(
                    redirect.location(),
                    "https://app.example.com/home?status=adfs-failed"
                );
                assert_eq!(redirect.http_status(), 401);
            }
            VerificationOutcome::Authenticated { .. } => {
                panic!("expected rejection for {expected_kind}")
            }
        }
    }
    Ok(())
}

/// Tests that a parse failure is reported as an invalid response.
#[tokio::test]
async fn test_parse_failure_reason_carries_error() -> anyhow::Result<()> {
    let config = config(&std::env::temp_dir())?;
    let outcome = service(&config).verify("bm90IHhtbA==").await;

    assert!(outcome.response().is_none());
    match outcome {
        VerificationOutcome::Rejected {
            reason: RejectReason::Invalid(err),
            ..
        } => assert!(err.is_response_error()),
        other => panic!("unexpected outcome: {other:?}"),
    }
    Ok(())
}
