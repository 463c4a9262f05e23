// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Test-only utilities for building PKCS#7 fixtures.
//!
//! This crate exists to keep the production crates free of fixture code while
//! still letting every crate in this repo build SignedData blobs byte by byte.

use std::sync::Mutex;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use p7s_abstractions::{Certificate, DecodedSignedData, Pkcs7DecodeError, Pkcs7Decoder};

/// DER `OBJECT IDENTIFIER` for id-signedData (1.2.840.113549.1.7.2).
pub const OID_SIGNED_DATA: &[u8] = &[0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x07, 0x02];

/// DER `OBJECT IDENTIFIER` for id-data (1.2.840.113549.1.7.1).
pub const OID_DATA: &[u8] = &[0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x07, 0x01];

/// DER `OBJECT IDENTIFIER` for id-sha256 (2.16.840.1.101.3.4.2.1).
pub const OID_SHA256: &[u8] = &[0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01];

const TAG_INTEGER: u8 = 0x02;
const TAG_OCTET_STRING: u8 = 0x04;
const TAG_NULL: u8 = 0x05;
const TAG_SEQUENCE: u8 = 0x30;
const TAG_SET: u8 = 0x31;
const TAG_CTX_0: u8 = 0xa0;

/// Encode a single TLV with a definite DER length.
pub fn der_tlv(tag: u8, content: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(content.len() + 6);
    out.push(tag);

    let len = content.len();
    if len < 0x80 {
        out.push(len as u8);
    } else {
        let bytes = len.to_be_bytes();
        let skip = bytes.iter().take_while(|b| **b == 0).count();
        out.push(0x80 | (bytes.len() - skip) as u8);
        out.extend_from_slice(&bytes[skip..]);
    }

    out.extend_from_slice(content);
    out
}

/// Encode a constructed TLV with BER indefinite length.
pub fn ber_indefinite(tag: u8, content: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(content.len() + 4);
    out.push(tag);
    out.push(0x80);
    out.extend_from_slice(content);
    out.extend_from_slice(&[0x00, 0x00]);
    out
}

fn concat(parts: &[&[u8]]) -> Vec<u8> {
    parts.iter().flat_map(|p| p.iter().copied()).collect()
}

/// DER of a SignedData SEQUENCE with an empty signerInfos set.
///
/// `certificates` are embedded verbatim, in the given order. `None` omits the
/// `certificates` field entirely.
pub fn signed_data(content: Option<&[u8]>, certificates: Option<&[Vec<u8>]>) -> Vec<u8> {
    let version = der_tlv(TAG_INTEGER, &[0x01]);
    let sha256 = der_tlv(TAG_SEQUENCE, &concat(&[OID_SHA256, &der_tlv(TAG_NULL, &[])]));
    let digest_algorithms = der_tlv(TAG_SET, &sha256);

    let econtent = match content {
        Some(c) => der_tlv(TAG_CTX_0, &der_tlv(TAG_OCTET_STRING, c)),
        None => Vec::new(),
    };
    let encap_content_info = der_tlv(TAG_SEQUENCE, &concat(&[OID_DATA, &econtent]));

    let certs = match certificates {
        Some(certs) => der_tlv(TAG_CTX_0, &certs.concat()),
        None => Vec::new(),
    };

    let signer_infos = der_tlv(TAG_SET, &[]);

    der_tlv(
        TAG_SEQUENCE,
        &concat(&[&version, &digest_algorithms, &encap_content_info, &certs, &signer_infos]),
    )
}

/// DER of a ContentInfo wrapping `inner` under `content_type_oid` (a full OID TLV).
pub fn content_info(content_type_oid: &[u8], inner: &[u8]) -> Vec<u8> {
    der_tlv(TAG_SEQUENCE, &concat(&[content_type_oid, &der_tlv(TAG_CTX_0, inner)]))
}

/// DER of a complete PKCS#7 SignedData ContentInfo.
pub fn pkcs7_der(content: Option<&[u8]>, certificates: &[Vec<u8>]) -> Vec<u8> {
    content_info(OID_SIGNED_DATA, &signed_data(content, Some(certificates)))
}

/// Same as [`pkcs7_der`], but the ContentInfo and its `[0]` wrapper use BER
/// indefinite lengths.
pub fn pkcs7_ber_indefinite(content: Option<&[u8]>, certificates: &[Vec<u8>]) -> Vec<u8> {
    let inner = signed_data(content, Some(certificates));
    ber_indefinite(TAG_SEQUENCE, &concat(&[OID_SIGNED_DATA, &ber_indefinite(TAG_CTX_0, &inner)]))
}

/// PEM armor `der` under `label`.
pub fn pem_armor(label: &str, der: &[u8]) -> String {
    pem::encode(&pem::Pem::new(label, der.to_vec()))
}

/// Standard Base64 on a single line.
pub fn base64_line(der: &[u8]) -> String {
    STANDARD.encode(der)
}

/// Standard Base64 wrapped at `width` characters with CRLF line endings.
pub fn base64_wrapped(der: &[u8], width: usize) -> String {
    let line = STANDARD.encode(der);
    line.as_bytes()
        .chunks(width)
        .map(|c| String::from_utf8_lossy(c).into_owned())
        .collect::<Vec<_>>()
        .join("\r\n")
}

/// Generate a self-signed certificate DER for `name`.
pub fn self_signed_cert_der(name: &str) -> Vec<u8> {
    let certified = rcgen::generate_simple_self_signed([name.to_string()]).unwrap();
    certified.cert.der().to_vec()
}

/// A decode primitive with a scripted answer that records every input it sees.
pub struct MockDecoder {
    result: Result<DecodedSignedData, Pkcs7DecodeError>,
    calls: Mutex<Vec<Vec<u8>>>,
}

impl MockDecoder {
    pub fn succeeding(certificates: Vec<Certificate>) -> Self {
        Self {
            result: Ok(DecodedSignedData { certificates }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: Pkcs7DecodeError) -> Self {
        Self {
            result: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Inputs passed to `decode`, oldest first.
    pub fn calls(&self) -> Vec<Vec<u8>> {
        self.calls.lock().unwrap().clone()
    }
}

impl Pkcs7Decoder for MockDecoder {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn decode(&self, der: &[u8]) -> Result<DecodedSignedData, Pkcs7DecodeError> {
        self.calls.lock().unwrap().push(der.to_vec());
        self.result.clone()
    }
}
