// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The PKCS#7 structural decode primitive.
//!
//! Backends implement [`Pkcs7Decoder`]; the generic signature decoder in
//! `p7s-common` only ever talks to this trait, so backends can be swapped or
//! mocked without touching the encoding cascade.

use crate::Certificate;

/// Dotted form of the `id-signedData` content type (RFC 5652 § 5.1).
pub const ID_SIGNED_DATA: &str = "1.2.840.113549.1.7.2";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Pkcs7DecodeError {
    #[error("input data is empty")]
    Empty,

    #[error("unsupported content type '{0}' (expected signed-data {ID_SIGNED_DATA})")]
    UnsupportedContentType(String),

    #[error("{0}")]
    Malformed(String),
}

/// What the decode primitive reports for a structurally valid SignedData.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedSignedData {
    /// Entries of `certificates [0] IMPLICIT CertificateSet`, in set order.
    pub certificates: Vec<Certificate>,
}

/// Decodes DER (or BER, backend permitting) bytes as a ContentInfo carrying SignedData.
///
/// Contract:
/// - Reject empty input, truncated or malformed ASN.1, trailing data and any
///   content type other than signed-data.
/// - Return the certificate set in the order it appears; an absent set is an
///   empty list, not an error.
pub trait Pkcs7Decoder: Send + Sync {
    fn name(&self) -> &'static str;

    fn decode(&self, der: &[u8]) -> Result<DecodedSignedData, Pkcs7DecodeError>;
}

impl<D: Pkcs7Decoder + ?Sized> Pkcs7Decoder for &D {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn decode(&self, der: &[u8]) -> Result<DecodedSignedData, Pkcs7DecodeError> {
        (**self).decode(der)
    }
}
