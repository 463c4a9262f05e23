// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared interfaces and datatypes for the PKCS#7 signature crates.
//!
//! This crate exists to prevent circular dependencies across:
//! - the generic decoder and encoding probes (`p7s-common`)
//! - decode primitive backends (`p7s-cms`, `p7s-bcder`)
//! - the high-level facade (`p7s`)
//!
//! It is intentionally kept small and stable.

pub mod decoder;
pub mod error;
pub mod format;
pub mod signature;

pub use decoder::{DecodedSignedData, Pkcs7DecodeError, Pkcs7Decoder, ID_SIGNED_DATA};
pub use error::{ReadSignatureError, SignatureError};
pub use format::{Encoding, SignatureFormat};
pub use signature::{Certificate, Signature};
