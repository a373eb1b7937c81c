// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! X.509 Certificate field extraction
//!
//! ```asn1
//! Certificate ::= SEQUENCE {
//!     tbsCertificate       TBSCertificate,
//!     signatureAlgorithm   AlgorithmIdentifier,
//!     signatureValue       BIT STRING
//! }
//!
//! TBSCertificate ::= SEQUENCE {
//!     version         [0]  EXPLICIT Version DEFAULT v1,
//!     serialNumber         CertificateSerialNumber,
//!     signature            AlgorithmIdentifier,
//!     issuer               Name,
//!     validity             Validity,
//!     subject              Name,
//!     subjectPublicKeyInfo SubjectPublicKeyInfo,
//!     issuerUniqueID  [1]  IMPLICIT UniqueIdentifier OPTIONAL,
//!     subjectUniqueID [2]  IMPLICIT UniqueIdentifier OPTIONAL,
//!     extensions      [3]  EXPLICIT Extensions OPTIONAL
//! }
//! ```
//!
//! The signature is verified against the issuer before any field of the
//! TBSCertificate is decoded. Fields are decoded in order with no
//! backtracking, and any deviation rejects the whole certificate.

pub mod name;
pub mod public_key;

use crate::crypto_backend::{CryptoBackend, SignatureAlgorithm};
use crate::error::{EncodingError, Error, Result};
use crate::scratch::Scratch;
use crate::time::{parse_validity, Validity};
use crate::tlv::{tag, Cursor};
use crate::x509::algorithm::parse_algorithm_identifier;
use crate::x509::chain::IssuerInfo;
use crate::x509::extensions::{parse_extensions, Extensions};
use crate::x509::oids::SIGNATURE_ALGORITHMS;
use crate::x509::signature::{parse_signature_value, verify_signature, SignatureValue};

use self::name::{parse_name, DistinguishedName};
use self::public_key::{parse_subject_public_key_info, SubjectPublicKeyInfo};

/// Longest serial number accepted, sign pad included.
pub const MAX_SERIAL_NUMBER_LEN: usize = 20;

/// X.509 certificate version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    V1,
    V2,
    V3,
}

impl Version {
    /// Human version number (the encoded value plus one).
    pub fn number(&self) -> u32 {
        match self {
            Version::V1 => 1,
            Version::V2 => 2,
            Version::V3 => 3,
        }
    }
}

/// Fields of one accepted certificate.
///
/// Every slice borrows from the chain buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CertificateFields<'a> {
    /// Complete DER encoding of the certificate
    pub raw: &'a [u8],
    /// Complete DER encoding of the TBSCertificate (the signed bytes)
    pub tbs: &'a [u8],
    pub version: Version,
    /// Serial number magnitude, sign pad stripped
    pub serial_number: &'a [u8],
    pub signature_algorithm: SignatureAlgorithm,
    pub issuer: DistinguishedName<'a>,
    pub validity: Validity,
    pub subject: DistinguishedName<'a>,
    pub subject_public_key_info: SubjectPublicKeyInfo<'a>,
    pub issuer_unique_id: Option<&'a [u8]>,
    pub subject_unique_id: Option<&'a [u8]>,
    pub extensions: Extensions<'a>,
    pub signature: SignatureValue<'a>,
}

impl<'a> CertificateFields<'a> {
    /// True when Basic Constraints is present with cA set.
    pub fn is_ca(&self) -> bool {
        self.extensions
            .basic_constraints
            .map(|bc| bc.ca)
            .unwrap_or(false)
    }
}

fn parse_version(body: &mut Cursor<'_>) -> Result<Version> {
    let explicit = match body.read_optional(tag::CONTEXT_CONSTRUCTED_0)? {
        Some(explicit) => explicit,
        None => {
            log::error!("certificate version is absent (v1)");
            return Err(Error::InvalidVersion(1));
        }
    };
    let mut explicit = Cursor::new(explicit);
    let value = explicit.read_integer(false)?.to_u32()?;
    explicit.finish()?;

    match value {
        2 => Ok(Version::V3),
        other => {
            log::error!("unsupported certificate version {}", other.saturating_add(1));
            Err(Error::InvalidVersion(other.saturating_add(1)))
        }
    }
}

fn parse_serial_number<'a>(body: &mut Cursor<'a>) -> Result<&'a [u8]> {
    let serial = body.read_integer(true)?;
    if serial.encoded_len() > MAX_SERIAL_NUMBER_LEN {
        return Err(Error::encoding(EncodingError::SerialNumberTooLong));
    }
    Ok(serial.bytes)
}

/// Parse one DER certificate and verify its signature against `issuer`.
///
/// `der` must hold exactly one certificate. The normalized key and
/// signature are written to `scratch`.
pub fn parse_certificate<'a, B: CryptoBackend>(
    der: &'a [u8],
    issuer: &IssuerInfo<'_>,
    backend: &B,
    scratch: &mut Scratch<'_>,
) -> Result<CertificateFields<'a>> {
    let mut outer = Cursor::new(der);
    let mut cert = outer.read_nested(tag::SEQUENCE)?;
    outer.finish()?;

    let tbs = cert.read_element(tag::SEQUENCE)?;

    // Trailer first, so nothing inside the TBSCertificate is acted on
    // before its signature has been checked.
    let signature_algorithm =
        parse_algorithm_identifier(&mut cert, &SIGNATURE_ALGORITHMS)?.algorithm;
    let signature = parse_signature_value(&mut cert, signature_algorithm)?;
    cert.finish()?;
    verify_signature(issuer, tbs.raw, &signature, backend, scratch)?;

    let mut body = Cursor::new(tbs.value);
    let version = parse_version(&mut body)?;
    let serial_number = parse_serial_number(&mut body)?;
    let tbs_algorithm = parse_algorithm_identifier(&mut body, &SIGNATURE_ALGORITHMS)?.algorithm;
    let issuer_name = parse_name(&mut body)?;
    let validity = parse_validity(&mut body)?;
    let subject = parse_name(&mut body)?;
    let subject_public_key_info = parse_subject_public_key_info(&mut body)?;
    let issuer_unique_id = body.read_optional(tag::CONTEXT_1)?;
    let subject_unique_id = body.read_optional(tag::CONTEXT_2)?;
    let extensions = match body.read_optional(tag::CONTEXT_CONSTRUCTED_3)? {
        Some(explicit) => parse_extensions(explicit)?,
        None => Extensions::default(),
    };
    body.finish()?;

    if tbs_algorithm != signature_algorithm {
        log::error!("signature algorithm in the TBSCertificate does not match the trailer");
        return Err(Error::encoding(EncodingError::SignatureAlgorithmMismatch));
    }

    Ok(CertificateFields {
        raw: der,
        tbs: tbs.raw,
        version,
        serial_number,
        signature_algorithm,
        issuer: issuer_name,
        validity,
        subject,
        subject_public_key_info,
        issuer_unique_id,
        subject_unique_id,
        extensions,
        signature,
    })
}
