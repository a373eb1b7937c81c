// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate Chain Handling
//!
//! A chain is one or more DER certificates concatenated with no header or
//! separator, root first and leaf last. The end of each certificate is
//! found from its own outer SEQUENCE length.
//!
//! # Walk
//!
//! Each certificate is verified against a rolling [`IssuerInfo`], which
//! starts out as the installed root key and is rebuilt from the subject of
//! every non-leaf certificate. A path length budget, tightened by each
//! certificate's Basic Constraints, bounds how many CA certificates may
//! follow. Only the leaf's fields are returned.

use crate::certificate::public_key::{EcdsaPublicKey, PublicKey};
use crate::certificate::{parse_certificate, CertificateFields};
use crate::crypto_backend::{CryptoBackend, SignatureAlgorithm, SHA1_DIGEST_SIZE};
use crate::error::{EncodingError, Error, Result};
use crate::scratch::Scratch;
use crate::tlv::{tag, Cursor};
use crate::x509::extensions::ProductType;
use crate::x509::validator::{validate_profile, ValidationOptions};

/// Most certificates accepted in one chain.
pub const MAX_CHAIN_LENGTH: usize = 5;

/// Position of a certificate within its chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateLevel {
    /// First certificate, signed by the installed root key
    Root,
    Intermediate,
    /// Last certificate in the buffer
    Leaf,
}

/// What the next certificate is verified against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssuerInfo<'a> {
    pub public_key: PublicKey<'a>,
    /// Algorithm the next signature is verified with
    pub algorithm: SignatureAlgorithm,
    /// SHA-1 of the encoded public key
    pub key_hash: [u8; SHA1_DIGEST_SIZE],
    /// Expected issuer common name of the next certificate
    pub common_name: Option<&'a [u8]>,
    pub product_type: Option<ProductType>,
}

impl<'a> IssuerInfo<'a> {
    /// Issuer info for the installed root key.
    pub fn from_root_key<B: CryptoBackend>(
        x: &'a [u8; 32],
        y: &'a [u8; 32],
        backend: &B,
    ) -> Result<Self> {
        let mut point = [0u8; 65];
        point[0] = 0x04;
        point[1..33].copy_from_slice(x);
        point[33..].copy_from_slice(y);
        Ok(Self {
            public_key: PublicKey::Ecdsa(EcdsaPublicKey {
                x,
                y,
                curve: crate::x509::oids::CurveParameter::P256,
            }),
            algorithm: SignatureAlgorithm::EcdsaWithSha256,
            key_hash: backend.sha1_digest(&point)?,
            common_name: None,
            product_type: None,
        })
    }

    /// Issuer info for certificates signed by the subject of `cert`.
    ///
    /// The next signature is checked with the algorithm `cert` itself was
    /// signed with.
    pub fn from_certificate<B: CryptoBackend>(
        cert: &CertificateFields<'a>,
        backend: &B,
    ) -> Result<Self> {
        let spki = &cert.subject_public_key_info;
        Ok(Self {
            public_key: spki.key,
            algorithm: cert.signature_algorithm,
            key_hash: backend.sha1_digest(spki.encoded)?,
            common_name: cert.subject.non_empty_common_name(),
            product_type: cert.extensions.product_type,
        })
    }

    #[cfg(test)]
    pub(crate) fn for_test() -> IssuerInfo<'static> {
        const COORDINATE: [u8; 32] = [0x01; 32];
        IssuerInfo {
            public_key: PublicKey::Ecdsa(EcdsaPublicKey {
                x: &COORDINATE,
                y: &COORDINATE,
                curve: crate::x509::oids::CurveParameter::P256,
            }),
            algorithm: SignatureAlgorithm::EcdsaWithSha256,
            key_hash: [0; SHA1_DIGEST_SIZE],
            common_name: None,
            product_type: None,
        }
    }
}

/// Rolling state of one chain walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainValidationState<'a> {
    /// CA certificates that may still follow; `u32::MAX` is unbounded
    pub path_len_budget: u32,
    pub level: CertificateLevel,
    pub issuer: IssuerInfo<'a>,
    /// Number of certificates accepted so far
    pub index: usize,
}

impl<'a> ChainValidationState<'a> {
    pub fn new(root: IssuerInfo<'a>) -> Self {
        Self {
            path_len_budget: u32::MAX,
            level: CertificateLevel::Root,
            issuer: root,
            index: 0,
        }
    }

    /// Move past a non-leaf certificate.
    fn advance(&mut self, next: IssuerInfo<'a>, path_len_constraint: Option<u32>) {
        self.path_len_budget = match path_len_constraint {
            Some(limit) if limit < self.path_len_budget => limit,
            _ => self.path_len_budget.saturating_sub(1),
        };
        self.issuer = next;
        self.level = CertificateLevel::Intermediate;
    }
}

/// Length of the certificate at the start of `data`, header included.
fn certificate_len(data: &[u8]) -> Result<usize> {
    let mut cursor = Cursor::new(data);
    let len = cursor
        .read_tag_length(tag::SEQUENCE, false)?
        .ok_or(Error::Internal("mandatory read returned no element"))?;
    Ok(data.len() - cursor.len() + len)
}

fn require<'a>(value: Option<&'a [u8]>, field: &'static str) -> Result<&'a [u8]> {
    value.ok_or_else(|| {
        log::error!("certificate is missing {}", field);
        Error::missing_field(field)
    })
}

/// Walk `chain` from root to leaf and return the leaf's fields.
pub fn validate_chain<'a, B: CryptoBackend>(
    chain: &'a [u8],
    root: IssuerInfo<'_>,
    backend: &B,
    options: &ValidationOptions,
    scratch: &mut Scratch<'_>,
) -> Result<CertificateFields<'a>> {
    if chain.is_empty() {
        return Err(Error::InvalidArgs("empty certificate chain"));
    }

    let mut state = ChainValidationState::new(root);
    let mut rest = chain;

    loop {
        if state.index > 0 && (rest.len() < 2 || rest[0] != tag::SEQUENCE) {
            log::error!("{} stray bytes after certificate {}", rest.len(), state.index - 1);
            return Err(Error::InvalidArgs("trailing bytes after certificate chain"));
        }
        let cert_len = certificate_len(rest).map_err(|e| {
            log::error!("certificate {} has a malformed header", state.index);
            e
        })?;
        let (der, tail) = rest.split_at(cert_len);
        if tail.is_empty() {
            state.level = CertificateLevel::Leaf;
        }
        log::trace!("certificate {} at level {:?}", state.index, state.level);

        if state.path_len_budget == 0 && state.level != CertificateLevel::Leaf {
            log::error!("path length budget exhausted at certificate {}", state.index);
            return Err(Error::BasicConstraintsViolation);
        }
        if state.index >= MAX_CHAIN_LENGTH {
            log::error!("chain is longer than {} certificates", MAX_CHAIN_LENGTH);
            return Err(Error::InvalidArgs("certificate chain too long"));
        }

        let cert = parse_certificate(der, &state.issuer, backend, scratch)?;

        let issuer_cn = require(cert.issuer.non_empty_common_name(), "issuer common name")?;
        require(cert.subject.non_empty_common_name(), "subject common name")?;
        require(cert.subject.non_empty_organization(), "subject organization")?;

        if let Some(expected) = state.issuer.common_name {
            if expected != issuer_cn {
                log::error!("issuer name of certificate {} does not match", state.index);
                return Err(Error::encoding(EncodingError::IssuerNameMismatch));
            }
        }

        if let Some(now) = &options.validation_time {
            if options.profile.checks_validity() {
                cert.validity.check(now)?;
            }
        }

        validate_profile(options.profile, &cert, state.level, &state.issuer, backend)?;

        if state.level == CertificateLevel::Leaf {
            log::trace!("chain of {} certificates accepted", state.index + 1);
            return Ok(cert);
        }

        let next = IssuerInfo::from_certificate(&cert, backend)?;
        let path_len_constraint = cert
            .extensions
            .basic_constraints
            .and_then(|bc| bc.path_len_constraint);
        state.advance(next, path_len_constraint);
        state.index += 1;
        rest = tail;
    }
}

/// Byte range of certificate `index` within `cert_chain`.
///
/// An `index` of -1 selects the last certificate. Returns `(start, end)`
/// offsets.
pub fn get_cert_from_cert_chain(cert_chain: &[u8], index: isize) -> Result<(usize, usize)> {
    if cert_chain.is_empty() {
        return Err(Error::InvalidArgs("empty certificate chain"));
    }

    let mut offset = 0usize;
    let mut cert_index = 0isize;

    while offset < cert_chain.len() {
        let cert_len = certificate_len(&cert_chain[offset..])?;
        let end = offset + cert_len;

        if cert_index == index || (index == -1 && end == cert_chain.len()) {
            return Ok((offset, end));
        }

        cert_index += 1;
        offset = end;
    }

    Err(Error::InvalidArgs("certificate index not found in chain"))
}
