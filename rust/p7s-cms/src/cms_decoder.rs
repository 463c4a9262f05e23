// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! ContentInfo / SignedData decoding via `cms`.
//!
//! ```text
//! ContentInfo ::= SEQUENCE {
//!     contentType ContentType,
//!     content [0] EXPLICIT ANY DEFINED BY contentType }
//!
//! SignedData ::= SEQUENCE {
//!     version CMSVersion,
//!     digestAlgorithms DigestAlgorithmIdentifiers,
//!     encapContentInfo EncapsulatedContentInfo,
//!     certificates [0] IMPLICIT CertificateSet OPTIONAL,
//!     crls [1] IMPLICIT RevocationInfoChoices OPTIONAL,
//!     signerInfos SignerInfos }
//! ```

use cms::cert::CertificateChoices;
use cms::content_info::ContentInfo;
use cms::signed_data::SignedData;
use der::asn1::{AnyRef, ObjectIdentifier};
use der::{Decode as _, Reader as _, SliceReader, Tag, TagNumber};

use p7s_abstractions::{Certificate, DecodedSignedData, Pkcs7DecodeError, Pkcs7Decoder, ID_SIGNED_DATA};

const SIGNED_DATA_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap(ID_SIGNED_DATA);

/// Strict DER decoder for PKCS#7 SignedData.
#[derive(Debug, Clone, Copy, Default)]
pub struct CmsDecoder;

impl CmsDecoder {
    pub fn new() -> Self {
        Self
    }
}

fn malformed(e: der::Error) -> Pkcs7DecodeError {
    Pkcs7DecodeError::Malformed(e.to_string())
}

const CERTIFICATES_TAG: Tag = Tag::ContextSpecific {
    constructed: true,
    number: TagNumber::N0,
};

/// Raw `certificates` entries of an already validated SignedData body, in
/// encoding order. `SetOfVec` sorts on decode, so the order is read here.
fn certificate_entries(signed_data: &[u8]) -> der::Result<Vec<&[u8]>> {
    let mut reader = SliceReader::new(signed_data)?;
    reader.tlv_bytes()?; // version
    reader.tlv_bytes()?; // digestAlgorithms
    reader.tlv_bytes()?; // encapContentInfo
    if reader.peek_tag()? != CERTIFICATES_TAG {
        return Ok(Vec::new());
    }

    let set = AnyRef::decode(&mut reader)?;
    let mut entries = SliceReader::new(set.value())?;
    let mut certificates = Vec::new();
    while !entries.is_finished() {
        certificates.push(entries.tlv_bytes()?);
    }
    Ok(certificates)
}

impl Pkcs7Decoder for CmsDecoder {
    fn name(&self) -> &'static str {
        "cms"
    }

    fn decode(&self, der: &[u8]) -> Result<DecodedSignedData, Pkcs7DecodeError> {
        if der.is_empty() {
            return Err(Pkcs7DecodeError::Empty);
        }

        let content_info = ContentInfo::from_der(der).map_err(malformed)?;
        if content_info.content_type != SIGNED_DATA_OID {
            return Err(Pkcs7DecodeError::UnsupportedContentType(
                content_info.content_type.to_string(),
            ));
        }

        let signed_data: SignedData = content_info.content.decode_as().map_err(malformed)?;

        let Some(set) = signed_data.certificates else {
            return Ok(DecodedSignedData::default());
        };
        if set.0.iter().any(|choice| !matches!(choice, CertificateChoices::Certificate(_))) {
            return Err(Pkcs7DecodeError::Malformed(
                "certificate set entry is not an X.509 certificate".to_string(),
            ));
        }

        let certificates = certificate_entries(content_info.content.value())
            .map_err(malformed)?
            .into_iter()
            .map(|raw| Certificate::from_der(raw.to_vec()))
            .collect();

        Ok(DecodedSignedData { certificates })
    }
}
