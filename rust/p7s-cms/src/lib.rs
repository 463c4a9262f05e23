// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! PKCS#7 decode primitive built on RustCrypto `cms` and `der`.
//!
//! Decoding is strict DER: indefinite lengths and other BER-only constructs
//! are rejected.

pub mod cms_decoder;

pub use cms_decoder::CmsDecoder;
