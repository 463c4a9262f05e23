// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! PKCS#7 decode primitive built on NLnetLabs `bcder`.
//!
//! Unlike the `cms` backend this one accepts BER by default, which is what a
//! number of signing tools actually emit (indefinite-length ContentInfo in
//! particular). Certificates are captured verbatim from the input.

pub mod bcder_decoder;

pub use bcder_decoder::BcderDecoder;
