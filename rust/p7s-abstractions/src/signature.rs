// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Signature value types.

use x509_parser::certificate::X509Certificate;
use x509_parser::error::X509Error;

use crate::decoder::{DecodedSignedData, Pkcs7DecodeError};

/// An opaque signer certificate handle.
///
/// Holds the DER encoding of one entry of the SignedData `certificates` set.
/// Nothing here interprets validity, trust or revocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Certificate {
    der: Vec<u8>,
}

impl Certificate {
    pub fn from_der(der: impl Into<Vec<u8>>) -> Self {
        Self { der: der.into() }
    }

    pub fn as_der(&self) -> &[u8] {
        &self.der
    }

    pub fn into_der(self) -> Vec<u8> {
        self.der
    }

    /// Borrowing X.509 view of the certificate, for callers that need to look inside.
    pub fn parse_x509(&self) -> Result<X509Certificate<'_>, X509Error> {
        let (_, cert) = x509_parser::parse_x509_certificate(&self.der).map_err(|e| match e {
            x509_parser::nom::Err::Error(e) | x509_parser::nom::Err::Failure(e) => e,
            x509_parser::nom::Err::Incomplete(_) => X509Error::InvalidCertificate,
        })?;
        Ok(cert)
    }
}

impl AsRef<[u8]> for Certificate {
    fn as_ref(&self) -> &[u8] {
        &self.der
    }
}

/// A structurally valid PKCS#7 signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Bytes that were fed to structural decoding (after any encoding unwrap).
    content: Vec<u8>,
    /// Signer certificates, in the order the decode primitive reported them.
    certificates: Vec<Certificate>,
}

impl Signature {
    /// Build a signature from `content` and the result of decoding it.
    ///
    /// Empty content never decodes, so it is rejected here as well.
    pub fn from_decoded(
        content: Vec<u8>,
        decoded: DecodedSignedData,
    ) -> Result<Self, Pkcs7DecodeError> {
        if content.is_empty() {
            return Err(Pkcs7DecodeError::Empty);
        }
        Ok(Self {
            content,
            certificates: decoded.certificates,
        })
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn certificates(&self) -> &[Certificate] {
        &self.certificates
    }

    pub fn into_parts(self) -> (Vec<u8>, Vec<Certificate>) {
        (self.content, self.certificates)
    }
}
