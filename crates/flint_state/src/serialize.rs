//! The versioned binary envelope for persisted compilation states.
//!
//! Layout: a 4-byte little-endian header length, a bincode-encoded header
//! (magic bytes, format version, payload checksum), then the bincode-encoded
//! [`CompilationState`]. Decoding validates every layer and treats any
//! mismatch as a cache miss: a stale or corrupt state only costs a full
//! rebuild, which is always correct.

use flint_common::ContentHash;
use serde::{Deserialize, Serialize};

use crate::error::StateError;
use crate::state::CompilationState;

/// Magic bytes identifying a Flint state entry.
const STATE_MAGIC: [u8; 4] = *b"FLNT";

/// Current state format version. Increment on any change to the header or
/// payload encoding.
const STATE_FORMAT_VERSION: u32 = 1;

/// Header prepended to every persisted state for validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StateHeader {
    /// Magic bytes: must be `b"FLNT"`.
    magic: [u8; 4],
    /// State format version.
    format_version: u32,
    /// Content hash of the payload (for integrity checks).
    checksum: ContentHash,
}

/// Encodes a state into its versioned envelope.
pub fn encode_state(state: &CompilationState) -> Result<Vec<u8>, StateError> {
    let payload = bincode::serde::encode_to_vec(state, bincode::config::standard())
        .map_err(|e| StateError::Serialization {
            reason: e.to_string(),
        })?;

    let header = StateHeader {
        magic: STATE_MAGIC,
        format_version: STATE_FORMAT_VERSION,
        checksum: ContentHash::from_bytes(&payload),
    };
    let header_bytes = bincode::serde::encode_to_vec(&header, bincode::config::standard())
        .map_err(|e| StateError::Serialization {
            reason: e.to_string(),
        })?;

    let header_len = header_bytes.len() as u32;
    let mut output = Vec::with_capacity(4 + header_bytes.len() + payload.len());
    output.extend_from_slice(&header_len.to_le_bytes());
    output.extend_from_slice(&header_bytes);
    output.extend_from_slice(&payload);
    Ok(output)
}

/// Decodes a state from its envelope, validating magic, version, and
/// checksum.
///
/// Returns `None` on any validation or decode failure; the caller treats
/// that as "no previous state".
pub fn decode_state(raw: &[u8]) -> Option<CompilationState> {
    if raw.len() < 4 {
        return None;
    }
    let header_len = u32::from_le_bytes(raw[..4].try_into().ok()?) as usize;
    if raw.len() < 4 + header_len {
        return None;
    }

    let header: StateHeader =
        bincode::serde::decode_from_slice(&raw[4..4 + header_len], bincode::config::standard())
            .ok()?
            .0;

    if header.magic != STATE_MAGIC {
        return None;
    }
    if header.format_version != STATE_FORMAT_VERSION {
        return None;
    }

    let payload = &raw[4 + header_len..];
    if ContentHash::from_bytes(payload) != header.checksum {
        return None;
    }

    bincode::serde::decode_from_slice(payload, bincode::config::standard())
        .ok()
        .map(|(state, _)| state)
}
