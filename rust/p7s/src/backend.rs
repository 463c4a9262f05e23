// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use p7s_abstractions::SignatureFormat;
use p7s_bcder::BcderDecoder;
use p7s_cms::CmsDecoder;
use p7s_common::Pkcs7Signatures;

/// PKCS#7 signatures decoded with RustCrypto `cms` (strict DER).
pub type CmsSignatures = Pkcs7Signatures<CmsDecoder>;

/// PKCS#7 signatures decoded with `bcder` (BER tolerant).
pub type BcderSignatures = Pkcs7Signatures<BcderDecoder>;

/// Available structural decode backends.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Pkcs7Backend {
    /// NLnetLabs `bcder`; accepts BER, including indefinite lengths.
    #[default]
    Bcder,
    /// RustCrypto `cms`; strict DER.
    Cms,
}

impl Pkcs7Backend {
    pub(crate) fn format(self) -> Box<dyn SignatureFormat> {
        match self {
            Pkcs7Backend::Cms => Box::new(CmsSignatures::new(CmsDecoder::new())),
            Pkcs7Backend::Bcder => Box::new(BcderSignatures::new(BcderDecoder::new())),
        }
    }
}
