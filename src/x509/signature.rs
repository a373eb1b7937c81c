// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate signature decoding and verification.
//!
//! The `signatureValue` BIT STRING is decoded according to the certificate's
//! signature algorithm:
//!
//! ```asn1
//! Ecdsa-Sig-Value ::= SEQUENCE { r INTEGER, s INTEGER }
//! ```
//!
//! RSA signatures are the raw BIT STRING content.
//!
//! Verification dispatches on the algorithm recorded in the issuer info.
//! Only ECDSA with SHA-256 on P-256 is verified; ring takes both the key and
//! the fixed-width signature as big-endian bytes, so components are copied
//! into scratch without reordering.

use crate::certificate::public_key::{PublicKey, COORDINATE_SIZE};
use crate::crypto_backend::{CryptoBackend, SignatureAlgorithm};
use crate::error::{EncodingError, Error, Result};
use crate::scratch::Scratch;
use crate::tlv::{tag, Cursor};
use crate::x509::chain::IssuerInfo;
use crate::x509::oids::CurveParameter;

/// `r || s`, each component left-padded to the coordinate size.
pub const ECDSA_SIGNATURE_SIZE: usize = 2 * COORDINATE_SIZE;

/// `0x04 || x || y`.
pub const ECDSA_PUBLIC_KEY_SIZE: usize = 1 + 2 * COORDINATE_SIZE;

/// Largest RSA signature accepted (2048-bit modulus).
pub const MAX_RSA_SIGNATURE_SIZE: usize = 256;

/// Decoded signatureValue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureValue<'a> {
    /// ECDSA components, sign pad stripped
    Ecdsa { r: &'a [u8], s: &'a [u8] },
    /// RSA signature octets
    Rsa(&'a [u8]),
}

/// Read the signatureValue BIT STRING for `algorithm`.
pub fn parse_signature_value<'a>(
    cursor: &mut Cursor<'a>,
    algorithm: SignatureAlgorithm,
) -> Result<SignatureValue<'a>> {
    let content = cursor.read_bit_string()?;

    if algorithm.is_ecdsa() {
        let mut outer = Cursor::new(content);
        let mut seq = outer.read_nested(tag::SEQUENCE)?;
        let r = seq.read_integer(true)?.bytes;
        let s = seq.read_integer(true)?.bytes;
        seq.finish()?;
        outer.finish()?;
        if r.len() > COORDINATE_SIZE || s.len() > COORDINATE_SIZE {
            return Err(Error::encoding(EncodingError::InvalidInteger));
        }
        Ok(SignatureValue::Ecdsa { r, s })
    } else {
        if content.len() > MAX_RSA_SIGNATURE_SIZE {
            return Err(Error::encoding(EncodingError::LengthOutOfBounds));
        }
        Ok(SignatureValue::Rsa(content))
    }
}

fn copy_right_aligned(dst: &mut [u8], src: &[u8]) {
    let start = dst.len() - src.len();
    dst[start..].copy_from_slice(src);
}

/// Verify `signature` over `tbs` with the key and algorithm in `issuer`.
pub fn verify_signature<B: CryptoBackend>(
    issuer: &IssuerInfo<'_>,
    tbs: &[u8],
    signature: &SignatureValue<'_>,
    backend: &B,
    scratch: &mut Scratch<'_>,
) -> Result<()> {
    match issuer.algorithm {
        SignatureAlgorithm::EcdsaWithSha256 => {}
        other => {
            log::error!("issuer signature algorithm {} is not supported", other.name());
            return Err(Error::UnsupportedAlgorithm(other.name()));
        }
    }

    let key = match &issuer.public_key {
        PublicKey::Ecdsa(key) => key,
        _ => {
            log::error!("issuer key is not an ECDSA key");
            return Err(Error::UnsupportedAlgorithm("non-ECDSA issuer key"));
        }
    };
    if key.curve != CurveParameter::P256 {
        log::error!("issuer key curve {:?} is not P-256", key.curve);
        return Err(Error::UnsupportedAlgorithm("issuer key curve"));
    }

    let (r, s) = match signature {
        SignatureValue::Ecdsa { r, s } => (*r, *s),
        SignatureValue::Rsa(_) => {
            log::error!("certificate carries an RSA signature under an ECDSA issuer");
            return Err(Error::InvalidSignature);
        }
    };

    let normalized = scratch.alloc(ECDSA_SIGNATURE_SIZE)?;
    let (r_slot, s_slot) = normalized.split_at_mut(COORDINATE_SIZE);
    copy_right_aligned(r_slot, r);
    copy_right_aligned(s_slot, s);

    let point = scratch.alloc(ECDSA_PUBLIC_KEY_SIZE)?;
    point[0] = 0x04;
    point[1..1 + COORDINATE_SIZE].copy_from_slice(key.x);
    point[1 + COORDINATE_SIZE..].copy_from_slice(key.y);

    backend.verify_signature(issuer.algorithm, tbs, normalized, point)?;
    log::trace!("signature verified");
    Ok(())
}
