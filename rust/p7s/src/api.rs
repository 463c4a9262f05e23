// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::io::Read;

use p7s_abstractions::{Encoding, ReadSignatureError, Signature, SignatureError, SignatureFormat};
use p7s_bcder::BcderDecoder;
use p7s_common::{read_bounded, Pkcs7Signatures, P7S_EXTENSION};

use crate::ExtractSettings;

fn default_signatures() -> Pkcs7Signatures<BcderDecoder> {
    Pkcs7Signatures::new(BcderDecoder::new())
}

/// Build the signature format selected by `settings`.
pub fn signature_format(settings: &ExtractSettings) -> Box<dyn SignatureFormat> {
    settings.backend.format()
}

/// Parse BER or DER encoded PKCS#7 SignedData.
pub fn parse_signature(der: &[u8]) -> Result<Signature, SignatureError> {
    default_signatures().parse(der)
}

/// Extract a signature from PEM, Base64 or DER input.
pub fn extract_signature(data: &[u8]) -> Result<Signature, SignatureError> {
    default_signatures().extract(data)
}

/// Extract a signature and report which encoding the input was in.
pub fn extract_signature_with_encoding(data: &[u8]) -> Result<(Signature, Encoding), SignatureError> {
    default_signatures().extract_with_encoding(data)
}

/// Extract a signature from an input stream using default settings.
pub fn extract_signature_from_reader(reader: impl Read) -> Result<Signature, ReadSignatureError> {
    extract_signature_from_reader_with_settings(reader, &ExtractSettings::default())
}

/// Extract a signature from an input stream, honoring backend and length limit.
pub fn extract_signature_from_reader_with_settings(
    reader: impl Read,
    settings: &ExtractSettings,
) -> Result<Signature, ReadSignatureError> {
    let data = read_bounded(reader, settings.max_input_len)?;
    tracing::debug!(
        backend = ?settings.backend,
        len = data.len(),
        "read signature input"
    );
    Ok(signature_format(settings).extract(&data)?)
}

/// File extension handled by this crate.
pub fn signature_extension() -> &'static str {
    P7S_EXTENSION
}
