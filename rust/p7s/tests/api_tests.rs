// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! End-to-end tests for the `p7s` facade.

use p7s::{
    extract_signature, extract_signature_from_reader, extract_signature_from_reader_with_settings,
    extract_signature_with_encoding, parse_signature, signature_extension, signature_format,
    Certificate, Encoding, ExtractSettings, Pkcs7Backend, Pkcs7DecodeError, ReadSignatureError,
    SignatureFormat, DEFAULT_MAX_INPUT_LEN,
};
use p7s_test_utils::*;

#[test]
fn hello_signature_round_trips_through_every_encoding() {
    let cert_der = self_signed_cert_der("signer.example");
    let der = pkcs7_der(Some(b"hello"), &[cert_der.clone()]);

    let parsed = parse_signature(&der).unwrap();
    assert_eq!(parsed.content(), der.as_slice());
    assert_eq!(parsed.certificates(), &[Certificate::from_der(cert_der)]);

    for (input, expected_encoding) in [
        (pem_armor("PKCS7", &der).into_bytes(), Encoding::Pem),
        (base64_line(&der).into_bytes(), Encoding::Base64),
        (der.clone(), Encoding::Der),
    ] {
        let (sig, encoding) = extract_signature_with_encoding(&input).unwrap();
        assert_eq!(encoding, expected_encoding);
        assert_eq!(sig, parsed);
    }
}

#[test]
fn signer_certificate_is_readable_as_x509() {
    let der = pkcs7_der(Some(b"hello"), &[self_signed_cert_der("signer.example")]);
    let sig = extract_signature(&der).unwrap();

    let x509 = sig.certificates()[0].parse_x509().unwrap();
    let san = x509.subject_alternative_name().unwrap().unwrap();
    assert!(format!("{:?}", san.value.general_names).contains("signer.example"));
}

#[test]
fn parse_rejects_empty_and_garbage_with_format_error() {
    let err = parse_signature(&[]).unwrap_err();
    assert!(err.is_format_error());
    assert_eq!(err.cause(), &Pkcs7DecodeError::Empty);

    let err = parse_signature(b"\x30\x03\x02\x01").unwrap_err();
    assert!(matches!(err.cause(), Pkcs7DecodeError::Malformed(_)));
}

#[test]
fn extract_of_pem_with_bad_body_reports_format_error() {
    let armored = pem_armor("PKCS7", b"not asn.1");
    assert!(extract_signature(armored.as_bytes()).unwrap_err().is_format_error());
}

#[test]
fn extract_skips_malformed_pem_block_before_signature() {
    let der = pkcs7_der(Some(b"hello"), &[self_signed_cert_der("signer.example")]);
    let input = format!(
        "-----BEGIN PKCS7-----\nAAAA\n-----END CERTIFICATE-----\n{}",
        pem_armor("PKCS7", &der)
    );

    let (sig, encoding) = extract_signature_with_encoding(input.as_bytes()).unwrap();
    assert_eq!(encoding, Encoding::Pem);
    assert_eq!(sig, parse_signature(&der).unwrap());
}

#[test]
fn backends_agree_on_der_input() {
    let a = self_signed_cert_der("a.example");
    let b = self_signed_cert_der("b.example");

    for certs in [[a.clone(), b.clone()], [b.clone(), a.clone()]] {
        let der = pkcs7_der(Some(b"hello"), &certs);
        let bcder = signature_format(&ExtractSettings::default()).extract(&der).unwrap();
        let cms = signature_format(&ExtractSettings::default().with_backend(Pkcs7Backend::Cms))
            .extract(&der)
            .unwrap();
        assert_eq!(cms, bcder);

        let expected: Vec<Certificate> = certs.iter().cloned().map(Certificate::from_der).collect();
        assert_eq!(bcder.certificates(), expected.as_slice());
    }
}

#[test]
fn default_backend_accepts_ber_that_cms_rejects() {
    let ber = pkcs7_ber_indefinite(Some(b"hello"), &[self_signed_cert_der("signer.example")]);

    let sig = extract_signature(&ber).unwrap();
    assert_eq!(sig.content(), ber.as_slice());
    assert_eq!(sig.certificates().len(), 1);

    let base64 = base64_wrapped(&ber, 64);
    let (sig, encoding) = extract_signature_with_encoding(base64.as_bytes()).unwrap();
    assert_eq!(encoding, Encoding::Base64);
    assert_eq!(sig.content(), ber.as_slice());

    let settings = ExtractSettings::default().with_backend(Pkcs7Backend::Cms);
    assert!(signature_format(&settings).extract(&ber).unwrap_err().is_format_error());
}

#[test]
fn reader_extraction_honors_settings() {
    let der = pkcs7_der(Some(b"hello"), &[]);
    let armored = pem_armor("PKCS7", &der).into_bytes();

    let sig = extract_signature_from_reader(std::io::Cursor::new(armored.clone())).unwrap();
    assert_eq!(sig.content(), der.as_slice());

    let settings = ExtractSettings::default().with_max_input_len(armored.len() - 1);
    let err = extract_signature_from_reader_with_settings(std::io::Cursor::new(armored), &settings)
        .unwrap_err();
    assert!(matches!(err, ReadSignatureError::TooLarge { .. }));
}

#[test]
fn settings_defaults() {
    let settings = ExtractSettings::default();
    assert_eq!(settings.backend(), Pkcs7Backend::Bcder);
    assert_eq!(settings.max_input_len(), DEFAULT_MAX_INPUT_LEN);
}

#[test]
fn extension_is_constant_for_every_backend() {
    assert_eq!(signature_extension(), ".p7s");
    for backend in [Pkcs7Backend::Cms, Pkcs7Backend::Bcder] {
        let format = signature_format(&ExtractSettings::default().with_backend(backend));
        assert_eq!(format.extension(), ".p7s");
    }
}
