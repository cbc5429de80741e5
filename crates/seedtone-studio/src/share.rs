// SPDX-License-Identifier: MIT
//! Share codec: a snapshot as URL-safe base64 of versioned JSON.
//!
//! ```text
//! {"v":1,"seed":"…","mode":"dark","mood":"Neon","palette":{…},"fonts":{…}}
//!     │  UTF-8
//!     ▼
//! base64url, no padding  →  token
//! ```
//!
//! Decoding accepts padded or unpadded input. Unknown `mode`/`mood` strings
//! fall back to the defaults; anything else that does not validate (a bad
//! hex value, missing fonts, a non-string seed, `v != 1`) is an error.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::snapshot::Snapshot;

/// The only payload version this codec reads or writes.
pub const SHARE_VERSION: u64 = 1;

const URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("not base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("payload is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported payload version {found}")]
    UnsupportedVersion { found: String },
}

#[derive(Serialize)]
struct PayloadRef<'a> {
    v: u64,
    #[serde(flatten)]
    snapshot: &'a Snapshot,
}

/// The versioned JSON form, as stored for the last-session snapshot.
#[must_use]
pub fn to_json(snapshot: &Snapshot) -> String {
    let payload = PayloadRef {
        v: SHARE_VERSION,
        snapshot,
    };
    serde_json::to_string(&payload).unwrap_or_default()
}

/// Parse the versioned JSON form.
///
/// # Errors
///
/// [`ShareError::Json`] for malformed JSON or fields that fail validation,
/// [`ShareError::UnsupportedVersion`] when `v` is absent or not `1`.
pub fn from_json(json: &str) -> Result<Snapshot, ShareError> {
    let value: Value = serde_json::from_str(json)?;
    let version = value.get("v");
    if version.and_then(Value::as_u64) != Some(SHARE_VERSION) {
        return Err(ShareError::UnsupportedVersion {
            found: version.map_or_else(|| "(missing)".to_owned(), Value::to_string),
        });
    }
    // `v` is not a snapshot field and is ignored here.
    Ok(serde_json::from_value(value)?)
}

/// Encode a snapshot as a share token.
#[must_use]
pub fn encode(snapshot: &Snapshot) -> String {
    URL_SAFE.encode(to_json(snapshot))
}

/// Decode a share token. Surrounding whitespace is ignored.
///
/// # Errors
///
/// Any [`ShareError`]; the caller decides whether to fall back.
pub fn decode(token: &str) -> Result<Snapshot, ShareError> {
    let bytes = URL_SAFE.decode(token.trim())?;
    let json = String::from_utf8(bytes)?;
    from_json(&json)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
