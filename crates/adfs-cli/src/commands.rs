//! Command implementations.

use std::io::Read;

use adfs_saml::bindings::HttpPostBinding;
use adfs_saml::verification::{FileResponseStore, ResponseStore};
use adfs_saml::{AdfsConfig, AuthnRequest, SamlResponse};
use anyhow::{bail, Context};

use crate::cli::RequestFormat;
use crate::output::{success, warning};

/// Builds the configured AuthnRequest, applying the issue instant overrides.
fn build_request(config: &AdfsConfig, issue_instant: Option<String>, now: bool) -> AuthnRequest {
    let mut request = config.authn_request();
    if let Some(timestamp) = issue_instant {
        request.set_issue_instant(timestamp);
    } else if now {
        request.set_issue_instant(chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string());
    }
    request
}

/// Prints the configured AuthnRequest in the requested format.
pub fn run_request(
    config: &AdfsConfig,
    format: RequestFormat,
    issue_instant: Option<String>,
    now: bool,
    relay_state: Option<&str>,
) -> anyhow::Result<()> {
    let request = build_request(config, issue_instant, now);

    if request.issue_instant().is_empty() {
        warning("issue instant is empty; set application.issue_instant or pass --now");
    }

    tracing::debug!(
        destination = %request.destination(),
        id = %request.app_id(),
        "building AuthnRequest"
    );

    let output = match format {
        RequestFormat::Xml => request.serialize()?,
        RequestFormat::Encoded => request.encode()?,
        RequestFormat::Form => {
            HttpPostBinding::auto_submit_form(request.destination(), &request.encode()?, relay_state)
        }
    };
    println!("{output}");
    Ok(())
}

/// Decodes a SAMLResponse value and prints its summary or XML.
pub async fn run_inspect(
    config: &AdfsConfig,
    response: Option<String>,
    xml: bool,
    store: bool,
) -> anyhow::Result<()> {
    let log = match (store, &config.response_log) {
        (true, None) => bail!("--store requires a [response_log] section in the settings file"),
        (true, Some(log)) => Some(log),
        (false, _) => None,
    };

    let encoded = match response {
        Some(value) => value,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read SAMLResponse from stdin")?;
            buf
        }
    };

    let response = SamlResponse::parse(encoded.trim())
        .map_err(|e| anyhow::anyhow!("{} ({})", e, e.kind()))?;

    if let Some(log) = log {
        let path = FileResponseStore::new(&log.directory).store(&response).await?;
        success(&format!("stored response in {}", path.display()));
    }

    if xml {
        println!("{}", response.xml_string());
    } else {
        println!("{}", serde_json::to_string_pretty(&response)?);
    }

    if !response.is_success() {
        warning(&format!(
            "status is not success: {}",
            response.status_code().unwrap_or("<none>")
        ));
    }
    Ok(())
}
