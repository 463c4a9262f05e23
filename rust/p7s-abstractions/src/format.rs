// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The per-format capability contract consumed by registries.

use std::fmt;

use crate::{Signature, SignatureError};

/// Which encoding the extraction cascade committed to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// PEM armor found somewhere in the input.
    Pem,
    /// The whole input was standard Base64.
    Base64,
    /// Neither framing matched; the input was parsed as-is.
    Der,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Pem => "pem",
            Encoding::Base64 => "base64",
            Encoding::Der => "der",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A signature format implementation.
///
/// Every format exposes the same capability set so that a registry can route
/// files by [`SignatureFormat::extension`] and treat formats interchangeably.
pub trait SignatureFormat: Send + Sync {
    /// Parse bytes the caller asserts are already DER.
    fn parse(&self, data: &[u8]) -> Result<Signature, SignatureError>;

    /// Detect the encoding (PEM, Base64 or DER) and parse the unwrapped bytes.
    fn extract(&self, data: &[u8]) -> Result<Signature, SignatureError>;

    /// File extension token for this format, including the leading dot.
    fn extension(&self) -> &'static str;
}

impl<F: SignatureFormat + ?Sized> SignatureFormat for Box<F> {
    fn parse(&self, data: &[u8]) -> Result<Signature, SignatureError> {
        (**self).parse(data)
    }

    fn extract(&self, data: &[u8]) -> Result<Signature, SignatureError> {
        (**self).extract(data)
    }

    fn extension(&self) -> &'static str {
        (**self).extension()
    }
}
