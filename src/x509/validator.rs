// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate profile checks.
//!
//! A profile is an extra set of rules applied to every certificate of a
//! chain after it has been parsed and its signature verified. The
//! [`CertificateProfile::Generic`] profile adds nothing; the others pin the
//! extension sets expected of Intel platform-service chains.

use crate::certificate::public_key::PublicKey;
use crate::certificate::CertificateFields;
use crate::crypto_backend::CryptoBackend;
use crate::error::{Error, ProfileViolation, Result};
use crate::x509::chain::{CertificateLevel, IssuerInfo};
use crate::x509::extensions::KeyUsage;
use crate::x509::oids::CurveParameter;

// ============================================================================
// Validation Options
// ============================================================================

/// Rule set applied on top of structural and signature checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CertificateProfile {
    /// No extra rules
    #[default]
    Generic,
    /// Chain of a platform-service verifier certificate
    Verifier,
    /// Chain ending in an OCSP responder certificate
    OcspResponder,
    /// Chain ending in an EPID group certificate
    EpidGroup,
}

impl CertificateProfile {
    /// Whether validity periods are enforced for this profile when a
    /// validation time is configured.
    pub fn checks_validity(&self) -> bool {
        !matches!(
            self,
            CertificateProfile::EpidGroup | CertificateProfile::OcspResponder
        )
    }
}

/// Options for chain validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationOptions {
    /// Profile rules applied to each certificate
    pub profile: CertificateProfile,

    /// Instant to check validity periods against; `None` skips the check
    pub validation_time: Option<der::DateTime>,
}

impl ValidationOptions {
    /// Create a new ValidationOptions with the generic profile and no time check
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, profile: CertificateProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_validation_time(mut self, now: der::DateTime) -> Self {
        self.validation_time = Some(now);
        self
    }
}

// ============================================================================
// Profile rules
// ============================================================================

const CA_KEY_USAGE: u16 = KeyUsage::KEY_CERT_SIGN;
const LEAF_KEY_USAGE: u16 = KeyUsage::DIGITAL_SIGNATURE | KeyUsage::NON_REPUDIATION;

fn violation(kind: ProfileViolation) -> Error {
    log::error!("certificate profile violation: {}", kind);
    Error::profile(kind)
}

fn expect_key_usage(cert: &CertificateFields<'_>, expected: u16) -> Result<()> {
    let found = cert.extensions.key_usage.map(|ku| ku.bits()).unwrap_or(0);
    if found != expected {
        return Err(violation(ProfileViolation::KeyUsage { expected, found }));
    }
    Ok(())
}

fn check_verifier<B: CryptoBackend>(
    cert: &CertificateFields<'_>,
    level: CertificateLevel,
    issuer: &IssuerInfo<'_>,
    backend: &B,
) -> Result<()> {
    let is_leaf = level == CertificateLevel::Leaf;
    let extensions = &cert.extensions;

    let bc = extensions
        .basic_constraints
        .ok_or_else(|| violation(ProfileViolation::MissingBasicConstraints))?;
    if is_leaf && bc.ca {
        return Err(violation(ProfileViolation::UnexpectedCa));
    }
    if !is_leaf && !bc.ca {
        return Err(violation(ProfileViolation::NotCa));
    }

    if let PublicKey::Ecdsa(key) = &cert.subject_public_key_info.key {
        if key.curve != CurveParameter::P256 {
            return Err(violation(ProfileViolation::Curve));
        }
    }

    if is_leaf {
        expect_key_usage(cert, LEAF_KEY_USAGE)?;
    } else {
        expect_key_usage(cert, CA_KEY_USAGE)?;
        let key_hash = backend.sha1_digest(cert.subject_public_key_info.encoded)?;
        if extensions.subject_key_id != Some(&key_hash[..]) {
            return Err(violation(ProfileViolation::SubjectKeyIdentifier));
        }
    }

    if extensions.authority_key_id != Some(&issuer.key_hash[..]) {
        return Err(violation(ProfileViolation::AuthorityKeyIdentifier));
    }

    match (extensions.product_type, issuer.product_type) {
        (Some(product), _) if !product.is_valid() => {
            Err(violation(ProfileViolation::ProductType))
        }
        (None, _) => Err(violation(ProfileViolation::ProductType)),
        (Some(product), Some(expected)) if product != expected => {
            Err(violation(ProfileViolation::ProductType))
        }
        _ => Ok(()),
    }
}

fn check_ocsp_responder(cert: &CertificateFields<'_>, level: CertificateLevel) -> Result<()> {
    if level != CertificateLevel::Leaf {
        return Ok(());
    }
    expect_key_usage(cert, LEAF_KEY_USAGE)?;
    let ocsp = cert
        .extensions
        .extended_key_usage
        .map(|eku| eku.is_ocsp_signing())
        .unwrap_or(false);
    if !ocsp {
        return Err(violation(ProfileViolation::ExtendedKeyUsage));
    }
    match cert.extensions.basic_constraints {
        None => Err(violation(ProfileViolation::MissingBasicConstraints)),
        Some(bc) if bc.ca => Err(violation(ProfileViolation::UnexpectedCa)),
        Some(_) => Ok(()),
    }
}

fn check_epid_group(cert: &CertificateFields<'_>, level: CertificateLevel) -> Result<()> {
    if level == CertificateLevel::Leaf
        && !matches!(cert.subject_public_key_info.key, PublicKey::Epid(_))
    {
        return Err(violation(ProfileViolation::KeyAlgorithm));
    }
    Ok(())
}

/// Apply `profile` to one certificate at position `level` of its chain.
pub fn validate_profile<B: CryptoBackend>(
    profile: CertificateProfile,
    cert: &CertificateFields<'_>,
    level: CertificateLevel,
    issuer: &IssuerInfo<'_>,
    backend: &B,
) -> Result<()> {
    match profile {
        CertificateProfile::Generic => Ok(()),
        CertificateProfile::Verifier => check_verifier(cert, level, issuer, backend),
        CertificateProfile::OcspResponder => check_ocsp_responder(cert, level),
        CertificateProfile::EpidGroup => check_epid_group(cert, level),
    }
}
