//! HTTP-POST Binding implementation.
//!
//! Encodes outbound requests as raw DEFLATE + base64 form values and decodes
//! base64 responses posted back by the IdP.

use base64::Engine;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::io::{Read, Write};

use crate::error::{SamlError, SamlResult};

/// Form field carrying an encoded request.
pub const SAML_REQUEST_FIELD: &str = "SAMLRequest";

/// Maximum accepted size of an encoded response (512 KB), checked before
/// decoding.
pub const MAX_ENCODED_RESPONSE_SIZE: usize = 512 * 1024;

/// Maximum decompressed size when inflating a request (64 KB).
const MAX_DECOMPRESSED_SIZE: u64 = 64 * 1024;

/// HTTP-POST binding encoder/decoder.
pub struct HttpPostBinding;

impl HttpPostBinding {
    /// Compresses a request document with raw DEFLATE and base64-encodes it.
    pub fn encode_request(xml: &str) -> SamlResult<String> {
        let compressed = deflate_compress(xml.as_bytes())?;
        Ok(base64::engine::general_purpose::STANDARD.encode(compressed))
    }

    /// Reverses [`HttpPostBinding::encode_request`].
    pub fn decode_request(encoded: &str) -> SamlResult<String> {
        let compressed = decode_base64(encoded)?;
        let xml_bytes = deflate_decompress(&compressed)?;
        String::from_utf8(xml_bytes)
            .map_err(|e| SamlError::XmlParse(format!("Invalid UTF-8 in message: {e}")))
    }

    /// Decodes a `SAMLResponse` form value into the response document.
    ///
    /// ASCII whitespace (line breaks inserted by some form encoders) is
    /// ignored. No inflate step is applied.
    pub fn decode_response(encoded: &str) -> SamlResult<String> {
        if encoded.len() > MAX_ENCODED_RESPONSE_SIZE {
            return Err(SamlError::MalformedTransportEncoding(format!(
                "encoded SAMLResponse exceeds maximum size ({} > {} bytes)",
                encoded.len(),
                MAX_ENCODED_RESPONSE_SIZE
            )));
        }

        let decoded = decode_base64(encoded)?;
        String::from_utf8(decoded)
            .map_err(|e| SamlError::XmlParse(format!("Invalid UTF-8 in message: {e}")))
    }

    /// Renders an HTML page that auto-submits the encoded request to the IdP.
    #[must_use]
    pub fn auto_submit_form(destination: &str, encoded: &str, relay_state: Option<&str>) -> String {
        let relay_state_input = relay_state
            .map(|rs| {
                format!(
                    r#"<input type="hidden" name="RelayState" value="{}"/>"#,
                    html_escape(rs)
                )
            })
            .unwrap_or_default();

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>SAML POST Binding</title>
</head>
<body onload="document.forms[0].submit()">
    <noscript>
        <p>JavaScript is disabled. Click the button below to continue.</p>
    </noscript>
    <form method="post" action="{}">
        <input type="hidden" name="{}" value="{}"/>
        {}
        <noscript>
            <input type="submit" value="Continue"/>
        </noscript>
    </form>
</body>
</html>"#,
            html_escape(destination),
            SAML_REQUEST_FIELD,
            html_escape(encoded),
            relay_state_input
        )
    }
}

fn decode_base64(encoded: &str) -> SamlResult<Vec<u8>> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    Ok(base64::engine::general_purpose::STANDARD.decode(compact)?)
}

/// Compresses data using DEFLATE (raw, no zlib header).
fn deflate_compress(data: &[u8]) -> SamlResult<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| SamlError::EncodingFailure(format!("Compression error: {e}")))?;
    encoder
        .finish()
        .map_err(|e| SamlError::EncodingFailure(format!("Compression finish error: {e}")))
}

/// Decompresses raw DEFLATE data with a size cap.
fn deflate_decompress(data: &[u8]) -> SamlResult<Vec<u8>> {
    let mut decompressed = Vec::new();
    DeflateDecoder::new(data)
        .take(MAX_DECOMPRESSED_SIZE + 1)
        .read_to_end(&mut decompressed)
        .map_err(|e| SamlError::MalformedTransportEncoding(format!("Decompression error: {e}")))?;

    if decompressed.len() as u64 > MAX_DECOMPRESSED_SIZE {
        return Err(SamlError::MalformedTransportEncoding(format!(
            "decompressed message exceeds {MAX_DECOMPRESSED_SIZE} bytes"
        )));
    }
    Ok(decompressed)
}

/// Escapes HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
