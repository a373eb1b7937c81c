// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! SubjectPublicKeyInfo decoding.
//!
//! ```asn1
//! SubjectPublicKeyInfo ::= SEQUENCE {
//!     algorithm         AlgorithmIdentifier,
//!     subjectPublicKey  BIT STRING
//! }
//! ```
//!
//! The BIT STRING content is interpreted according to the algorithm:
//! - ecPublicKey: uncompressed point `04 || x || y` on the named curve
//! - rsaEncryption: `SEQUENCE { modulus INTEGER, publicExponent INTEGER }`
//! - EPID group key: `SEQUENCE { groupId INTEGER, h1 ECPoint, h2 ECPoint, w G2ECPoint }`

use crate::error::{EncodingError, Error, Result};
use crate::tlv::{tag, Cursor};
use crate::x509::algorithm::{parse_algorithm_identifier, AlgorithmParameters};
use crate::x509::oids::{CurveParameter, PublicKeyAlgorithm, PUBLIC_KEY_ALGORITHMS};

/// Size of one P-256 (or EPID G1/G2 component) coordinate.
pub const COORDINATE_SIZE: usize = 32;

/// Uncompressed point marker.
const UNCOMPRESSED_POINT: u8 = 0x04;

/// BIT STRING length of an uncompressed P-256 point, unused-bits octet included.
const ECDSA_BIT_STRING_LEN: usize = 2 + 2 * COORDINATE_SIZE;

type Coordinate<'a> = &'a [u8; COORDINATE_SIZE];

/// RSA public key components, sign pad stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsaPublicKey<'a> {
    pub modulus: &'a [u8],
    pub exponent: &'a [u8],
}

/// ECDSA public key as big-endian affine coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcdsaPublicKey<'a> {
    pub x: Coordinate<'a>,
    pub y: Coordinate<'a>,
    pub curve: CurveParameter,
}

/// EPID group public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpidGroupPublicKey<'a> {
    pub group_id: u32,
    pub h1x: Coordinate<'a>,
    pub h1y: Coordinate<'a>,
    pub h2x: Coordinate<'a>,
    pub h2y: Coordinate<'a>,
    pub wx0: Coordinate<'a>,
    pub wx1: Coordinate<'a>,
    pub wx2: Coordinate<'a>,
    pub wy0: Coordinate<'a>,
    pub wy1: Coordinate<'a>,
    pub wy2: Coordinate<'a>,
}

/// Subject public key, by algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicKey<'a> {
    Rsa(RsaPublicKey<'a>),
    Ecdsa(EcdsaPublicKey<'a>),
    Epid(EpidGroupPublicKey<'a>),
}

impl<'a> PublicKey<'a> {
    pub fn as_ecdsa(&self) -> Option<&EcdsaPublicKey<'a>> {
        match self {
            PublicKey::Ecdsa(key) => Some(key),
            _ => None,
        }
    }
}

/// Decoded SubjectPublicKeyInfo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectPublicKeyInfo<'a> {
    pub algorithm: PublicKeyAlgorithm,
    pub parameters: AlgorithmParameters,
    /// BIT STRING content after the unused-bits octet; hashed for key identifiers
    pub encoded: &'a [u8],
    pub key: PublicKey<'a>,
}

fn coordinates<const N: usize>(bytes: &[u8]) -> Result<[Coordinate<'_>; N]> {
    if bytes.len() != N * COORDINATE_SIZE {
        return Err(Error::encoding(EncodingError::InvalidPublicKey));
    }
    let mut out = [&[0u8; COORDINATE_SIZE]; N];
    for (slot, chunk) in out.iter_mut().zip(bytes.chunks_exact(COORDINATE_SIZE)) {
        *slot = chunk
            .try_into()
            .map_err(|_| Error::encoding(EncodingError::InvalidPublicKey))?;
    }
    Ok(out)
}

/// Strip the 0x04 marker off an uncompressed point and split it into `N` coordinates.
fn uncompressed_point<const N: usize>(bytes: &[u8]) -> Result<[Coordinate<'_>; N]> {
    match bytes {
        [UNCOMPRESSED_POINT, rest @ ..] => coordinates(rest),
        _ => Err(Error::encoding(EncodingError::InvalidPublicKey)),
    }
}

fn parse_ecdsa_key(bit_string: &[u8], curve: CurveParameter) -> Result<EcdsaPublicKey<'_>> {
    if bit_string.len() + 1 != ECDSA_BIT_STRING_LEN {
        return Err(Error::encoding(EncodingError::InvalidPublicKey));
    }
    let [x, y] = uncompressed_point::<2>(bit_string)?;
    Ok(EcdsaPublicKey { x, y, curve })
}

fn parse_rsa_key(bit_string: &[u8]) -> Result<RsaPublicKey<'_>> {
    let mut outer = Cursor::new(bit_string);
    let mut seq = outer.read_nested(tag::SEQUENCE)?;
    let modulus = seq.read_integer(true)?.bytes;
    let exponent = seq.read_integer(true)?.bytes;
    seq.finish()?;
    outer.finish()?;
    Ok(RsaPublicKey { modulus, exponent })
}

fn parse_epid_key(bit_string: &[u8]) -> Result<EpidGroupPublicKey<'_>> {
    let mut outer = Cursor::new(bit_string);
    let mut seq = outer.read_nested(tag::SEQUENCE)?;
    let group_id = seq.read_integer(false)?.to_u32()?;
    let [h1x, h1y] = uncompressed_point::<2>(seq.read(tag::OCTET_STRING)?)?;
    let [h2x, h2y] = uncompressed_point::<2>(seq.read(tag::OCTET_STRING)?)?;
    let [wx0, wx1, wx2, wy0, wy1, wy2] = uncompressed_point::<6>(seq.read(tag::OCTET_STRING)?)?;
    seq.finish()?;
    outer.finish()?;
    Ok(EpidGroupPublicKey {
        group_id,
        h1x,
        h1y,
        h2x,
        h2y,
        wx0,
        wx1,
        wx2,
        wy0,
        wy1,
        wy2,
    })
}

/// Read SubjectPublicKeyInfo and decode the key for its algorithm.
pub fn parse_subject_public_key_info<'a>(
    cursor: &mut Cursor<'a>,
) -> Result<SubjectPublicKeyInfo<'a>> {
    let mut seq = cursor.read_nested(tag::SEQUENCE)?;
    let alg = parse_algorithm_identifier(&mut seq, &PUBLIC_KEY_ALGORITHMS)?;
    let encoded = seq.read_bit_string()?;
    seq.finish()?;

    let key = match alg.algorithm {
        PublicKeyAlgorithm::Ecdsa => {
            let curve = match alg.parameters {
                AlgorithmParameters::Curve(curve) => curve,
                _ => CurveParameter::Unknown,
            };
            PublicKey::Ecdsa(parse_ecdsa_key(encoded, curve)?)
        }
        PublicKeyAlgorithm::Rsa => PublicKey::Rsa(parse_rsa_key(encoded)?),
        PublicKeyAlgorithm::Epid => PublicKey::Epid(parse_epid_key(encoded)?),
        PublicKeyAlgorithm::Epid11 | PublicKeyAlgorithm::Epid20 => {
            return Err(Error::UnsupportedAlgorithm("EPID group key version"));
        }
    };

    Ok(SubjectPublicKeyInfo {
        algorithm: alg.algorithm,
        parameters: alg.parameters,
        encoded,
        key,
    })
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use super::*;
    use alloc::vec::Vec;

    const EC_P256_ALG: [u8; 21] = [
        0x30, 0x13, 0x06, 0x07, 0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x02, 0x01, 0x06, 0x08, 0x2A, 0x86,
        0x48, 0xCE, 0x3D, 0x03, 0x01, 0x07,
    ];

    fn spki(alg: &[u8], bit_string_content: &[u8]) -> Vec<u8> {
        let bit_len = bit_string_content.len() + 1;
        let mut bit = Vec::new();
        bit.push(tag::BIT_STRING);
        push_len(&mut bit, bit_len);
        bit.push(0);
        bit.extend_from_slice(bit_string_content);

        let mut out = Vec::new();
        out.push(tag::SEQUENCE);
        push_len(&mut out, alg.len() + bit.len());
        out.extend_from_slice(alg);
        out.extend_from_slice(&bit);
        out
    }

    fn push_len(out: &mut Vec<u8>, len: usize) {
        if len < 0x80 {
            out.push(len as u8);
        } else if len < 0x100 {
            out.extend_from_slice(&[0x81, len as u8]);
        } else {
            out.extend_from_slice(&[0x82, (len >> 8) as u8, len as u8]);
        }
    }

    fn point(marker: u8, coordinates: usize) -> Vec<u8> {
        let mut p = Vec::new();
        p.push(marker);
        for i in 0..coordinates {
            p.extend_from_slice(&[i as u8 + 1; COORDINATE_SIZE]);
        }
        p
    }

    // ── ECDSA ──

    #[test]
    fn test_ecdsa_p256_key() {
        let der = spki(&EC_P256_ALG, &point(0x04, 2));
        let mut cursor = Cursor::new(&der);
        let info = parse_subject_public_key_info(&mut cursor).unwrap();
        assert!(cursor.is_empty());
        assert_eq!(info.algorithm, PublicKeyAlgorithm::Ecdsa);
        assert_eq!(info.encoded.len(), 65);
        let key = info.key.as_ecdsa().unwrap();
        assert_eq!(key.x, &[1u8; 32]);
        assert_eq!(key.y, &[2u8; 32]);
        assert_eq!(key.curve, CurveParameter::P256);
    }

    #[test]
    fn test_ecdsa_compressed_point_rejected() {
        let der = spki(&EC_P256_ALG, &point(0x02, 2));
        assert_eq!(
            parse_subject_public_key_info(&mut Cursor::new(&der)),
            Err(Error::encoding(EncodingError::InvalidPublicKey))
        );
    }

    #[test]
    fn test_ecdsa_wrong_length_rejected() {
        let mut content = point(0x04, 2);
        content.pop();
        let der = spki(&EC_P256_ALG, &content);
        assert_eq!(
            parse_subject_public_key_info(&mut Cursor::new(&der)),
            Err(Error::encoding(EncodingError::InvalidPublicKey))
        );
    }

    // ── RSA ──

    #[test]
    fn test_rsa_key() {
        let rsa_alg = [
            0x30, 0x0D, 0x06, 0x09, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x01, 0x05,
            0x00,
        ];
        // SEQUENCE { INTEGER 00 C1 C2, INTEGER 01 00 01 }
        let key = [
            0x30, 0x0A, 0x02, 0x03, 0x00, 0xC1, 0xC2, 0x02, 0x03, 0x01, 0x00, 0x01,
        ];
        let der = spki(&rsa_alg, &key);
        let info = parse_subject_public_key_info(&mut Cursor::new(&der)).unwrap();
        assert_eq!(
            info.key,
            PublicKey::Rsa(RsaPublicKey {
                modulus: &[0xC1, 0xC2],
                exponent: &[0x01, 0x00, 0x01],
            })
        );
    }

    // ── EPID ──

    fn epid_alg(last_arc: u8) -> [u8; 14] {
        [
            0x30, 0x0C, 0x06, 0x0A, 0x2A, 0x86, 0x48, 0x86, 0xF8, 0x4D, 0x01, 0x09, 0x04, last_arc,
        ]
    }

    fn epid_key_body() -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&[0x02, 0x04, 0x00, 0x00, 0x01, 0x23]);
        for (marker, coords) in [(0x04, 2), (0x04, 2), (0x04, 6)] {
            let p = point(marker, coords);
            body.push(tag::OCTET_STRING);
            push_len(&mut body, p.len());
            body.extend_from_slice(&p);
        }
        let mut seq = Vec::new();
        seq.push(tag::SEQUENCE);
        push_len(&mut seq, body.len());
        seq.extend_from_slice(&body);
        seq
    }

    #[test]
    fn test_epid_group_key() {
        let der = spki(&epid_alg(0x01), &epid_key_body());
        let info = parse_subject_public_key_info(&mut Cursor::new(&der)).unwrap();
        match info.key {
            PublicKey::Epid(key) => {
                assert_eq!(key.group_id, 0x123);
                assert_eq!(key.h1x, &[1u8; 32]);
                assert_eq!(key.h2y, &[2u8; 32]);
                assert_eq!(key.wx0, &[1u8; 32]);
                assert_eq!(key.wy2, &[6u8; 32]);
            }
            other => panic!("unexpected key {:?}", other),
        }
    }

    #[test]
    fn test_later_epid_versions_unsupported() {
        let der = spki(&epid_alg(0x02), &epid_key_body());
        assert!(matches!(
            parse_subject_public_key_info(&mut Cursor::new(&der)),
            Err(Error::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_unknown_key_algorithm() {
        // ecdsa-with-SHA256 is not a public key algorithm
        let alg = [
            0x30, 0x0A, 0x06, 0x08, 0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x04, 0x03, 0x02,
        ];
        let der = spki(&alg, &point(0x04, 2));
        assert_eq!(
            parse_subject_public_key_info(&mut Cursor::new(&der)),
            Err(Error::UnknownOid(
                crate::x509::oids::OidCategory::PublicKeyAlgorithm
            ))
        );
    }
}
