// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use thiserror::Error;

use crate::Pkcs7DecodeError;

/// The given bytes, after any encoding unwrap, are not a structurally valid
/// PKCS#7/ASN.1 SignedData.
///
/// The wrapped cause is for diagnostics only; callers should branch on the
/// variant, not on the message text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error(
        "signature parsing error as 'PKCS #7': content does not match 'ASN.1' structure format, \
         more details: {0}"
    )]
    Format(#[source] Pkcs7DecodeError),
}

impl SignatureError {
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::Format(_))
    }

    /// The underlying decode failure.
    pub fn cause(&self) -> &Pkcs7DecodeError {
        match self {
            Self::Format(cause) => cause,
        }
    }
}

/// Failures of reader-based extraction.
#[derive(Debug, Error)]
pub enum ReadSignatureError {
    #[error("failed to read signature bytes: {0}")]
    Io(#[from] std::io::Error),

    #[error("signature input exceeded max length of {max_len} bytes")]
    TooLarge { max_len: usize },

    #[error(transparent)]
    Signature(#[from] SignatureError),
}
