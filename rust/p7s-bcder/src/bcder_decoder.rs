// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! ContentInfo / SignedData decoding via `bcder`.

use bcder::decode::{self, Constructed, DecodeError};
use bcder::oid::ConstOid;
use bcder::{Integer, Mode, Oid, Tag};

use p7s_abstractions::{Certificate, DecodedSignedData, Pkcs7DecodeError, Pkcs7Decoder};

/// id-signedData, 1.2.840.113549.1.7.2.
const SIGNED_DATA: ConstOid = Oid(&[42, 134, 72, 134, 247, 13, 1, 7, 2]);

/// PKCS#7 SignedData decoder with selectable BER/DER strictness.
#[derive(Debug, Clone, Copy)]
pub struct BcderDecoder {
    mode: Mode,
}

impl BcderDecoder {
    /// BER decoder.
    pub fn new() -> Self {
        Self { mode: Mode::Ber }
    }

    /// DER-only decoder.
    pub fn strict() -> Self {
        Self { mode: Mode::Der }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}

impl Default for BcderDecoder {
    fn default() -> Self {
        Self::new()
    }
}

enum ContentInfo {
    SignedData(Vec<Vec<u8>>),
    Unsupported(String),
}

fn take_content_info<S: decode::Source>(
    cons: &mut Constructed<S>,
) -> Result<ContentInfo, DecodeError<S::Error>> {
    cons.take_sequence(|cons| {
        let content_type = Oid::take_from(cons)?;
        if content_type != SIGNED_DATA {
            cons.skip_all()?;
            return Ok(ContentInfo::Unsupported(content_type.to_string()));
        }
        let certificates = cons.take_constructed_if(Tag::CTX_0, take_signed_data)?;
        Ok(ContentInfo::SignedData(certificates))
    })
}

fn take_signed_data<S: decode::Source>(
    cons: &mut Constructed<S>,
) -> Result<Vec<Vec<u8>>, DecodeError<S::Error>> {
    cons.take_sequence(|cons| {
        Integer::take_from(cons)?; // version
        cons.take_set(|cons| cons.skip_all())?; // digestAlgorithms
        cons.take_sequence(|cons| cons.skip_all())?; // encapContentInfo
        let certificates = cons
            .take_opt_constructed_if(Tag::CTX_0, take_certificate_set)?
            .unwrap_or_default();
        cons.take_opt_constructed_if(Tag::CTX_1, |cons| cons.skip_all())?; // crls
        cons.take_set(|cons| cons.skip_all())?; // signerInfos
        Ok(certificates)
    })
}

/// Captures each `Certificate` choice of the set verbatim, in order.
///
/// Any other choice is left unconsumed, which fails the enclosing value.
fn take_certificate_set<S: decode::Source>(
    cons: &mut Constructed<S>,
) -> Result<Vec<Vec<u8>>, DecodeError<S::Error>> {
    let mut certificates = Vec::new();
    loop {
        let mut found = false;
        let captured = cons.capture(|cons| {
            found = cons.take_opt_sequence(|cons| cons.skip_all())?.is_some();
            Ok(())
        })?;
        if !found {
            break;
        }
        certificates.push(captured.as_slice().to_vec());
    }
    Ok(certificates)
}

impl Pkcs7Decoder for BcderDecoder {
    fn name(&self) -> &'static str {
        match self.mode {
            Mode::Der => "bcder-der",
            _ => "bcder",
        }
    }

    fn decode(&self, der: &[u8]) -> Result<DecodedSignedData, Pkcs7DecodeError> {
        if der.is_empty() {
            return Err(Pkcs7DecodeError::Empty);
        }

        let content_info = self
            .mode
            .decode(der, take_content_info)
            .map_err(|e| Pkcs7DecodeError::Malformed(e.to_string()))?;

        let raw_certificates = match content_info {
            ContentInfo::SignedData(certificates) => certificates,
            ContentInfo::Unsupported(oid) => return Err(Pkcs7DecodeError::UnsupportedContentType(oid)),
        };

        let mut certificates = Vec::with_capacity(raw_certificates.len());
        for raw in raw_certificates {
            x509_parser::parse_x509_certificate(&raw).map_err(|e| {
                Pkcs7DecodeError::Malformed(format!("invalid certificate in certificate set: {e}"))
            })?;
            certificates.push(Certificate::from_der(raw));
        }

        Ok(DecodedSignedData { certificates })
    }
}
