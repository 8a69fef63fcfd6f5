//! # Build Output Identification
//!
//! This module extracts a stable image reference from the free-form text a
//! container image build emits. Different backend versions and drivers
//! confirm success in different formats, so extraction is a pure text scan
//! over an ordered table of `(matcher, extractor)` pairs rather than a
//! dependency on one exact backend version:
//!
//! 1. The legacy builder prints `Successfully built <short-id>`; the short
//!    id is returned verbatim.
//! 2. BuildKit prints `writing image sha256:<digest> done`; the digest is
//!    validated as exactly 64 hex characters and returned as
//!    `sha256:<digest>`.
//!
//! Supporting a third format is one new row in [`MARKERS`]; callers never
//! change.

use crate::error::{Error, Result};

/// A recognized success marker: a human-readable name plus an extractor
/// that, given one output line, either ignores it (`None`) or produces the
/// image reference (or a validation error) parsed from it.
type Marker = (&'static str, fn(&str) -> Option<Result<String>>);

/// Recognized success markers, tried in priority order on every line.
const MARKERS: &[Marker] = &[
    ("successfully-built", extract_legacy_build_id),
    ("writing-image-digest", extract_buildkit_digest),
];

const LEGACY_MARKER: &str = "Successfully built ";
const BUILDKIT_MARKER: &str = "writing image sha256:";

/// Scan build output for a recognized success marker and return the image
/// reference it names.
///
/// Lines are scanned in order; on each line the markers in [`MARKERS`] are
/// tried in priority order and the first match wins. Fails with
/// [`Error::ImageIdNotFound`] when no line carries a marker, and with
/// [`Error::MalformedDigest`] when a digest marker is present but its
/// digest is not 64 hex characters.
pub fn extract_image_reference(output: &str) -> Result<String> {
    let mut lines = 0;
    for line in output.lines() {
        lines += 1;
        for (_, extract) in MARKERS {
            if let Some(result) = extract(line) {
                return result;
            }
        }
    }
    Err(Error::ImageIdNotFound { lines })
}

/// Legacy builder confirmation: `Successfully built <short-id>`.
fn extract_legacy_build_id(line: &str) -> Option<Result<String>> {
    let rest = line.trim_start().strip_prefix(LEGACY_MARKER)?;
    let id = rest.split_whitespace().next()?;
    Some(Ok(id.to_string()))
}

/// BuildKit confirmation: `... writing image sha256:<64 hex> done`.
fn extract_buildkit_digest(line: &str) -> Option<Result<String>> {
    let start = line.find(BUILDKIT_MARKER)? + BUILDKIT_MARKER.len();
    let digest: &str = line[start..]
        .split_whitespace()
        .next()
        .unwrap_or("");

    if digest.len() != 64 || !digest.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Some(Err(Error::MalformedDigest {
            digest: digest.to_string(),
        }));
    }
    Some(Ok(format!("sha256:{}", digest)))
}
