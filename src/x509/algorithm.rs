// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! AlgorithmIdentifier parsing.
//!
//! ```asn1
//! AlgorithmIdentifier ::= SEQUENCE {
//!     algorithm   OBJECT IDENTIFIER,
//!     parameters  ANY DEFINED BY algorithm OPTIONAL
//! }
//! ```

use crate::error::Result;
use crate::tlv::{tag, Cursor};
use crate::x509::oids::{match_oid, CurveParameter, OidTable, CURVES};

/// Decoded `parameters` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmParameters {
    /// Field omitted
    Absent,
    /// Explicit NULL
    Null,
    /// Named curve OID
    Curve(CurveParameter),
}

/// An AlgorithmIdentifier resolved against one registry table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmIdentifier<T> {
    pub algorithm: T,
    pub parameters: AlgorithmParameters,
}

/// Read an AlgorithmIdentifier and resolve its OID against `table`.
///
/// Parameters are lenient: a curve OID that is not P-256, or any other
/// parameter type, is reported as [`CurveParameter::Unknown`] and skipped.
/// A NULL with non-empty content is still an encoding error.
pub fn parse_algorithm_identifier<T: Copy>(
    cursor: &mut Cursor<'_>,
    table: &OidTable<T>,
) -> Result<AlgorithmIdentifier<T>> {
    let mut seq = cursor.read_nested(tag::SEQUENCE)?;
    let algorithm = match_oid(&mut seq, table)?;

    let parameters = match seq.peek_tag() {
        None => AlgorithmParameters::Absent,
        Some(tag::NULL) => {
            seq.read_null()?;
            AlgorithmParameters::Null
        }
        Some(tag::OBJECT_IDENTIFIER) => {
            let oid = seq.read_oid()?;
            AlgorithmParameters::Curve(CURVES.lookup(oid).unwrap_or(CurveParameter::Unknown))
        }
        Some(_) => AlgorithmParameters::Curve(CurveParameter::Unknown),
    };

    Ok(AlgorithmIdentifier {
        algorithm,
        parameters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto_backend::SignatureAlgorithm;
    use crate::error::Error;
    use crate::x509::oids::{
        OidCategory, PublicKeyAlgorithm, PUBLIC_KEY_ALGORITHMS, SIGNATURE_ALGORITHMS,
    };

    const ECDSA_SHA256_ALG: [u8; 12] = [
        0x30, 0x0A, 0x06, 0x08, 0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x04, 0x03, 0x02,
    ];

    const EC_P256_ALG: [u8; 21] = [
        0x30, 0x13, 0x06, 0x07, 0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x02, 0x01, 0x06, 0x08, 0x2A, 0x86,
        0x48, 0xCE, 0x3D, 0x03, 0x01, 0x07,
    ];

    #[test]
    fn test_absent_parameters() {
        let mut cursor = Cursor::new(&ECDSA_SHA256_ALG);
        let alg = parse_algorithm_identifier(&mut cursor, &SIGNATURE_ALGORITHMS).unwrap();
        assert_eq!(alg.algorithm, SignatureAlgorithm::EcdsaWithSha256);
        assert_eq!(alg.parameters, AlgorithmParameters::Absent);
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_p256_curve() {
        let mut cursor = Cursor::new(&EC_P256_ALG);
        let alg = parse_algorithm_identifier(&mut cursor, &PUBLIC_KEY_ALGORITHMS).unwrap();
        assert_eq!(alg.algorithm, PublicKeyAlgorithm::Ecdsa);
        assert_eq!(
            alg.parameters,
            AlgorithmParameters::Curve(CurveParameter::P256)
        );
    }

    #[test]
    fn test_unknown_curve_is_lenient() {
        // secp384r1 - 1.3.132.0.34
        let der = [
            0x30, 0x10, 0x06, 0x07, 0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x02, 0x01, 0x06, 0x05, 0x2B,
            0x81, 0x04, 0x00, 0x22,
        ];
        let alg = parse_algorithm_identifier(&mut Cursor::new(&der), &PUBLIC_KEY_ALGORITHMS)
            .unwrap();
        assert_eq!(
            alg.parameters,
            AlgorithmParameters::Curve(CurveParameter::Unknown)
        );
    }

    #[test]
    fn test_null_parameters() {
        // rsaEncryption, NULL
        let der = [
            0x30, 0x0D, 0x06, 0x09, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x01, 0x05,
            0x00,
        ];
        let alg = parse_algorithm_identifier(&mut Cursor::new(&der), &PUBLIC_KEY_ALGORITHMS)
            .unwrap();
        assert_eq!(alg.algorithm, PublicKeyAlgorithm::Rsa);
        assert_eq!(alg.parameters, AlgorithmParameters::Null);

        let bad_null = [
            0x30, 0x0E, 0x06, 0x09, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x01, 0x05,
            0x01, 0x00,
        ];
        assert!(
            parse_algorithm_identifier(&mut Cursor::new(&bad_null), &PUBLIC_KEY_ALGORITHMS)
                .unwrap_err()
                .is_encoding()
        );
    }

    #[test]
    fn test_unknown_algorithm_oid() {
        assert_eq!(
            parse_algorithm_identifier(&mut Cursor::new(&EC_P256_ALG), &SIGNATURE_ALGORITHMS),
            Err(Error::UnknownOid(OidCategory::SignatureAlgorithm))
        );
    }
}
