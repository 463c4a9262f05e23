// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Encoding probes used by signature extraction.
//!
//! Probes only recognize framing. Whether the unwrapped bytes are a valid
//! PKCS#7 structure is decided later by the decode primitive.

use std::borrow::Cow;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use p7s_abstractions::Encoding;

/// Standard alphabet with required padding; non-zero trailing bits are tolerated.
const STANDARD_TOLERANT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical),
);

/// The first PEM block found in an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PemBlock {
    /// Text between `-----BEGIN ` and `-----`, e.g. `PKCS7`.
    pub label: String,
    /// Base64-decoded body.
    pub contents: Vec<u8>,
}

const PEM_BEGIN: &[u8] = b"-----BEGIN ";

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

/// Locate and decode the first well-formed PEM block anywhere in `data`.
///
/// Malformed blocks (mismatched labels, invalid Base64 body) are skipped and
/// the search resumes after their `BEGIN` line. Returns `None` when no
/// well-formed block remains.
pub fn decode_pem_block(data: &[u8]) -> Option<PemBlock> {
    let mut rest = data;
    while let Some(start) = find(rest, PEM_BEGIN) {
        let candidate = &rest[start..];
        match pem::parse(candidate) {
            Ok(block) => {
                return Some(PemBlock {
                    label: block.tag().to_string(),
                    contents: block.into_contents(),
                })
            }
            Err(e) => {
                tracing::trace!(
                    offset = data.len() - candidate.len(),
                    error = %e,
                    "skipping malformed PEM block"
                );
                rest = &candidate[PEM_BEGIN.len()..];
            }
        }
    }
    None
}

/// Decode the entire input as standard Base64.
///
/// Line breaks (CR and LF) are ignored so wrapped output from common tools is
/// accepted. Any other character outside the alphabet fails the probe.
pub fn decode_base64(data: &[u8]) -> Option<Vec<u8>> {
    let stripped: Cow<'_, [u8]> = if data.iter().any(|b| matches!(b, b'\r' | b'\n')) {
        Cow::Owned(data.iter().copied().filter(|b| !matches!(b, b'\r' | b'\n')).collect())
    } else {
        Cow::Borrowed(data)
    };

    STANDARD_TOLERANT.decode(stripped.as_ref()).ok()
}

/// Result of running the encoding probes over an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unwrapped<'a> {
    Pem(PemBlock),
    Base64(Vec<u8>),
    Der(&'a [u8]),
}

impl Unwrapped<'_> {
    pub fn encoding(&self) -> Encoding {
        match self {
            Unwrapped::Pem(_) => Encoding::Pem,
            Unwrapped::Base64(_) => Encoding::Base64,
            Unwrapped::Der(_) => Encoding::Der,
        }
    }

    /// Bytes to hand to structural decoding.
    pub fn bytes(&self) -> &[u8] {
        match self {
            Unwrapped::Pem(block) => &block.contents,
            Unwrapped::Base64(decoded) => decoded,
            Unwrapped::Der(raw) => raw,
        }
    }
}

/// Run the probes in order: PEM, then whole-input Base64, else raw DER.
///
/// The first probe whose framing matches wins, regardless of whether the
/// unwrapped bytes turn out to be valid PKCS#7.
pub fn unwrap_encoding(data: &[u8]) -> Unwrapped<'_> {
    if let Some(block) = decode_pem_block(data) {
        return Unwrapped::Pem(block);
    }
    tracing::trace!(len = data.len(), "no PEM block found");

    if let Some(decoded) = decode_base64(data) {
        return Unwrapped::Base64(decoded);
    }
    tracing::trace!(len = data.len(), "input is not standard Base64");

    Unwrapped::Der(data)
}
