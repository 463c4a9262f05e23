// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Encoding probes and the generic PKCS#7 signature decoder.
//!
//! [`Pkcs7Signatures`] owns the encoding cascade and is generic over the
//! structural decode primitive, which backends provide through
//! [`p7s_abstractions::Pkcs7Decoder`].

pub mod encoding;
pub mod reader;
pub mod signatures;

pub use encoding::{decode_base64, decode_pem_block, unwrap_encoding, PemBlock, Unwrapped};
pub use reader::read_bounded;
pub use signatures::{Pkcs7Signatures, P7S_EXTENSION};
