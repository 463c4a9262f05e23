// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! High-level PKCS#7 signature extraction facade.
//!
//! This crate is the primary Rust entry point for turning a `.p7s` blob of
//! unknown encoding (PEM, Base64 or raw DER) into a [`Signature`]: the signed
//! content bytes plus the embedded signer certificates.
//!
//! Design note: parsing and extraction are exposed directly at the crate root;
//! backend selection lives in [`ExtractSettings`].

mod api;
mod backend;
mod settings;

pub use backend::{BcderSignatures, CmsSignatures, Pkcs7Backend};
pub use settings::{ExtractSettings, DEFAULT_MAX_INPUT_LEN};

pub use p7s_abstractions::{
    Certificate, DecodedSignedData, Encoding, Pkcs7DecodeError, Pkcs7Decoder, ReadSignatureError,
    Signature, SignatureError, SignatureFormat,
};
pub use p7s_bcder::BcderDecoder;
pub use p7s_cms::CmsDecoder;
pub use p7s_common::{Pkcs7Signatures, P7S_EXTENSION};

pub use api::{
    extract_signature,
    extract_signature_from_reader,
    extract_signature_from_reader_with_settings,
    extract_signature_with_encoding,
    parse_signature,
    signature_extension,
    signature_format,
};
