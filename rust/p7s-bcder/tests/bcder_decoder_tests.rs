// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for the `bcder` backed decode primitive.

use p7s_abstractions::{Certificate, Encoding, Pkcs7DecodeError, Pkcs7Decoder};
use p7s_bcder::BcderDecoder;
use p7s_common::Pkcs7Signatures;
use p7s_test_utils::*;
use proptest::prelude::*;

#[test]
fn decodes_signed_data_and_preserves_certificate_order() {
    let a = self_signed_cert_der("a.example");
    let b = self_signed_cert_der("b.example");
    let der = pkcs7_der(Some(b"hello"), &[b.clone(), a.clone()]);

    let decoded = BcderDecoder::new().decode(&der).unwrap();
    assert_eq!(
        decoded.certificates,
        vec![Certificate::from_der(b), Certificate::from_der(a)]
    );
}

#[test]
fn parse_returns_input_bytes_unchanged() {
    let cert_der = self_signed_cert_der("example.test");
    let der = pkcs7_der(Some(b"hello"), &[cert_der.clone()]);

    let sig = Pkcs7Signatures::new(BcderDecoder::new()).parse(&der).unwrap();
    assert_eq!(sig.content(), der.as_slice());
    assert_eq!(sig.certificates(), &[Certificate::from_der(cert_der)]);
}

#[test]
fn empty_or_absent_certificate_set_is_not_an_error() {
    let with_empty_set = pkcs7_der(Some(b"hello"), &[]);
    assert!(BcderDecoder::new().decode(&with_empty_set).unwrap().certificates.is_empty());

    let without_set = content_info(OID_SIGNED_DATA, &signed_data(None, None));
    assert!(BcderDecoder::strict().decode(&without_set).unwrap().certificates.is_empty());
}

#[test]
fn rejects_empty_input() {
    assert_eq!(BcderDecoder::new().decode(&[]).unwrap_err(), Pkcs7DecodeError::Empty);
}

#[test]
fn rejects_wrong_content_type() {
    let data = content_info(OID_DATA, &der_tlv(0x04, b"hello"));
    assert_eq!(
        BcderDecoder::new().decode(&data).unwrap_err(),
        Pkcs7DecodeError::UnsupportedContentType("1.2.840.113549.1.7.1".to_string())
    );
}

#[test]
fn rejects_truncated_and_trailing_data() {
    let der = pkcs7_der(Some(b"hello"), &[]);

    let truncated = &der[..der.len() - 1];
    assert!(matches!(BcderDecoder::new().decode(truncated), Err(Pkcs7DecodeError::Malformed(_))));

    let mut trailing = der.clone();
    trailing.push(0x00);
    assert!(matches!(BcderDecoder::new().decode(&trailing), Err(Pkcs7DecodeError::Malformed(_))));
}

#[test]
fn ber_indefinite_length_depends_on_mode() {
    let cert_der = self_signed_cert_der("example.test");
    let ber = pkcs7_ber_indefinite(Some(b"hello"), &[cert_der.clone()]);

    let decoded = BcderDecoder::new().decode(&ber).unwrap();
    assert_eq!(decoded.certificates, vec![Certificate::from_der(cert_der)]);

    assert!(matches!(BcderDecoder::strict().decode(&ber), Err(Pkcs7DecodeError::Malformed(_))));
}

#[test]
fn rejects_certificate_set_entries_that_are_not_certificates() {
    let not_a_sequence = pkcs7_der(None, &[der_tlv(0x04, b"not a cert")]);
    assert!(matches!(
        BcderDecoder::new().decode(&not_a_sequence),
        Err(Pkcs7DecodeError::Malformed(_))
    ));

    let bogus_sequence = pkcs7_der(None, &[der_tlv(0x30, &[0x02, 0x01, 0x01])]);
    let err = BcderDecoder::new().decode(&bogus_sequence).unwrap_err();
    assert!(err.to_string().contains("invalid certificate in certificate set"));
}

#[test]
fn decoder_name_reflects_mode() {
    assert_eq!(BcderDecoder::default().name(), "bcder");
    assert_eq!(BcderDecoder::strict().name(), "bcder-der");
}

#[test]
fn pem_wrapped_signature_yields_same_certificates() {
    let der = pkcs7_der(Some(b"hello"), &[self_signed_cert_der("example.test")]);
    let signatures = Pkcs7Signatures::new(BcderDecoder::new());

    let parsed = signatures.parse(&der).unwrap();
    let armored = format!("leading text\n{}", pem_armor("PKCS7", &der));
    let (extracted, encoding) = signatures.extract_with_encoding(armored.as_bytes()).unwrap();

    assert_eq!(encoding, Encoding::Pem);
    assert_eq!(extracted.certificates(), parsed.certificates());
    assert_eq!(extracted.content(), der.as_slice());
}

#[test]
fn pem_commit_does_not_retry_base64_or_der() {
    let signatures = Pkcs7Signatures::new(BcderDecoder::new());
    let der = pkcs7_der(Some(b"hello"), &[]);

    // A valid signature follows a PEM block whose body is garbage. The PEM
    // block wins and its failure is final.
    let mut input = pem_armor("PKCS7", b"garbage").into_bytes();
    input.extend_from_slice(&der);
    assert!(signatures.extract(&input).unwrap_err().is_format_error());
}

proptest! {
    #[test]
    fn parse_never_panics_on_arbitrary_bytes(data in proptest::collection::vec(any::<u8>(), 0..512)) {
        let result = Pkcs7Signatures::new(BcderDecoder::new()).parse(&data);
        prop_assert!(result.is_err());
    }
}
