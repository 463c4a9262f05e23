// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! PKCS#7 signature parsing and extraction.

use std::io::Read;

use p7s_abstractions::{
    Encoding, Pkcs7Decoder, ReadSignatureError, Signature, SignatureError, SignatureFormat,
};

use crate::encoding::unwrap_encoding;
use crate::reader::read_bounded;

/// File extension for detached PKCS#7 signatures.
pub const P7S_EXTENSION: &str = ".p7s";

/// PKCS#7 signature format backed by the decode primitive `D`.
///
/// Stateless apart from the decoder, which is itself immutable; share one
/// instance across threads freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pkcs7Signatures<D> {
    decoder: D,
}

impl<D: Pkcs7Decoder> Pkcs7Signatures<D> {
    pub fn new(decoder: D) -> Self {
        Self { decoder }
    }

    pub fn decoder_name(&self) -> &'static str {
        self.decoder.name()
    }

    /// Parse `data` as DER-encoded PKCS#7 SignedData.
    ///
    /// On success the signature content is byte-identical to `data`.
    pub fn parse(&self, data: &[u8]) -> Result<Signature, SignatureError> {
        match self.decoder.decode(data) {
            Ok(decoded) => {
                Signature::from_decoded(data.to_vec(), decoded).map_err(SignatureError::Format)
            }
            Err(e) => {
                tracing::debug!(decoder = self.decoder.name(), error = %e, "PKCS #7 decode failed");
                Err(SignatureError::Format(e))
            }
        }
    }

    /// Extract a signature from PEM, Base64 or DER input.
    pub fn extract(&self, data: &[u8]) -> Result<Signature, SignatureError> {
        self.extract_with_encoding(data).map(|(signature, _)| signature)
    }

    /// Like [`Self::extract`], also reporting which encoding was committed to.
    ///
    /// Once a framing matches, the outcome of parsing the unwrapped bytes is
    /// final: a PEM block with a broken body is not retried as Base64 or DER.
    pub fn extract_with_encoding(&self, data: &[u8]) -> Result<(Signature, Encoding), SignatureError> {
        let unwrapped = unwrap_encoding(data);
        let encoding = unwrapped.encoding();
        tracing::debug!(%encoding, len = unwrapped.bytes().len(), "extracting signature");

        let signature = self.parse(unwrapped.bytes())?;
        Ok((signature, encoding))
    }

    /// Read at most `max_len` bytes from `reader` and extract a signature from them.
    pub fn extract_from_reader(
        &self,
        reader: impl Read,
        max_len: usize,
    ) -> Result<Signature, ReadSignatureError> {
        let data = read_bounded(reader, max_len)?;
        Ok(self.extract(&data)?)
    }
}

impl<D: Pkcs7Decoder> SignatureFormat for Pkcs7Signatures<D> {
    fn parse(&self, data: &[u8]) -> Result<Signature, SignatureError> {
        Pkcs7Signatures::parse(self, data)
    }

    fn extract(&self, data: &[u8]) -> Result<Signature, SignatureError> {
        Pkcs7Signatures::extract(self, data)
    }

    fn extension(&self) -> &'static str {
        P7S_EXTENSION
    }
}
