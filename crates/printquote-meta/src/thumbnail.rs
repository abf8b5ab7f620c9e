//! Embedded preview thumbnail recovery.
//!
//! Several slicers embed a base64-encoded PNG preview between
//! `; thumbnail begin WxH N` and `; thumbnail end` comment markers, the
//! payload spread over `; `-prefixed continuation lines. A missing or
//! undecodable block yields `None`, never an error.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::debug;

const BEGIN_MARKER: &str = "; thumbnail begin";
const END_MARKER: &str = "; thumbnail end";

/// Extract and decode the first embedded thumbnail, as PNG bytes.
pub fn extract_thumbnail(text: &str) -> Option<Vec<u8>> {
    let start = text.find(BEGIN_MARKER)?;
    let end = text[start..].find(END_MARKER).map(|p| start + p)?;

    // Skip the begin line itself (it carries dimensions and byte count),
    // then strip the comment prefix and all whitespace from the payload.
    let mut encoded = String::new();
    for line in text[start..end].lines().skip(1) {
        let line = line.trim().trim_start_matches(';').trim();
        encoded.push_str(line);
    }
    encoded.retain(|c| !c.is_whitespace());

    if encoded.is_empty() {
        return None;
    }
    match STANDARD.decode(encoded.as_bytes()) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            debug!(error = %e, "thumbnail block present but not valid base64");
            None
        }
    }
}
