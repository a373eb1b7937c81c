// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! X.509 v3 Certificate Extensions.
//!
//! ```asn1
//! Extensions ::= SEQUENCE SIZE (1..MAX) OF Extension
//! Extension ::= SEQUENCE {
//!     extnID      OBJECT IDENTIFIER,
//!     critical    BOOLEAN DEFAULT FALSE,
//!     extnValue   OCTET STRING
//! }
//! ```
//!
//! # Decoded Extensions
//!
//! - Authority Key Identifier - key identifier of the issuing key
//! - Subject Key Identifier - key identifier of the subject key
//! - Key Usage - permitted uses of the subject key
//! - Extended Key Usage - OCSP signing only
//! - Basic Constraints - CA flag and path length limit
//! - Certificate Policies - the Intel SIGMA policy and its CPS URI
//! - Product Type - Intel product family of the subject
//!
//! Any other extension is skipped unless it is marked critical.

use core::fmt;

use crate::error::{Error, Result};
use crate::tlv::{tag, Cursor};
use crate::x509::oids::{
    ExtensionId, CPS_QUALIFIER, EXTENSIONS, INTEL_SIGMA_POLICY, OCSP_SIGNING,
};

// ============================================================================
// Basic Constraints - RFC 5280 Section 4.2.1.9
// ============================================================================

/// Basic Constraints extension.
///
/// ```asn1
/// BasicConstraints ::= SEQUENCE {
///     cA                      BOOLEAN DEFAULT FALSE,
///     pathLenConstraint       INTEGER (0..MAX) OPTIONAL
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasicConstraints {
    /// Whether the subject is a CA
    pub ca: bool,

    /// Maximum number of CA certificates that may follow; `None` is unbounded
    pub path_len_constraint: Option<u32>,
}

impl BasicConstraints {
    /// Create a new BasicConstraints for a non-CA certificate
    pub fn new_end_entity() -> Self {
        Self {
            ca: false,
            path_len_constraint: None,
        }
    }

    /// Create a new BasicConstraints for a CA certificate
    pub fn new_ca(path_len: Option<u32>) -> Self {
        Self {
            ca: true,
            path_len_constraint: path_len,
        }
    }

    fn parse(value: &mut Cursor<'_>) -> Result<Self> {
        let mut seq = value.read_nested(tag::SEQUENCE)?;
        let ca = seq.read_optional_boolean()?.unwrap_or(false);
        let path_len_constraint = seq
            .read_optional_integer(true)?
            .map(|int| int.to_u32())
            .transpose()?;
        seq.finish()?;
        Ok(Self {
            ca,
            path_len_constraint,
        })
    }
}

// ============================================================================
// Key Usage - RFC 5280 Section 4.2.1.3
// ============================================================================

/// Key Usage bit flags.
///
/// ```asn1
/// KeyUsage ::= BIT STRING {
///     digitalSignature        (0),
///     nonRepudiation          (1),
///     keyEncipherment         (2),
///     dataEncipherment        (3),
///     keyAgreement            (4),
///     keyCertSign             (5),
///     cRLSign                 (6),
///     encipherOnly            (7),
///     decipherOnly            (8)
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyUsage {
    bits: u16,
}

impl KeyUsage {
    // The first content octet is the high byte, so bit 0 of the BIT STRING
    // (0x80 in byte 0) is bit 15 here.

    /// Digital signature (bit 0)
    pub const DIGITAL_SIGNATURE: u16 = 1 << 15;
    /// Non-repudiation / content commitment (bit 1)
    pub const NON_REPUDIATION: u16 = 1 << 14;
    /// Key encipherment (bit 2)
    pub const KEY_ENCIPHERMENT: u16 = 1 << 13;
    /// Data encipherment (bit 3)
    pub const DATA_ENCIPHERMENT: u16 = 1 << 12;
    /// Key agreement (bit 4)
    pub const KEY_AGREEMENT: u16 = 1 << 11;
    /// Certificate signing (bit 5)
    pub const KEY_CERT_SIGN: u16 = 1 << 10;
    /// CRL signing (bit 6)
    pub const CRL_SIGN: u16 = 1 << 9;
    /// Encipher only (bit 7)
    pub const ENCIPHER_ONLY: u16 = 1 << 8;
    /// Decipher only (bit 8)
    pub const DECIPHER_ONLY: u16 = 1 << 7;

    const NAMES: [(u16, &'static str); 9] = [
        (Self::DIGITAL_SIGNATURE, "digitalSignature"),
        (Self::NON_REPUDIATION, "nonRepudiation"),
        (Self::KEY_ENCIPHERMENT, "keyEncipherment"),
        (Self::DATA_ENCIPHERMENT, "dataEncipherment"),
        (Self::KEY_AGREEMENT, "keyAgreement"),
        (Self::KEY_CERT_SIGN, "keyCertSign"),
        (Self::CRL_SIGN, "cRLSign"),
        (Self::ENCIPHER_ONLY, "encipherOnly"),
        (Self::DECIPHER_ONLY, "decipherOnly"),
    ];

    /// Create a new KeyUsage from bit flags
    pub const fn new(bits: u16) -> Self {
        Self { bits }
    }

    pub const fn bits(&self) -> u16 {
        self.bits
    }

    /// Check if a specific usage is enabled
    pub fn has(&self, usage: u16) -> bool {
        (self.bits & usage) != 0
    }

    /// Parse the BIT STRING carrying one or two octets of flags.
    ///
    /// Trailing unused bits are allowed here, unlike key and signature bit strings.
    fn parse(value: &mut Cursor<'_>) -> Result<Self> {
        let bits = match value.read(tag::BIT_STRING)? {
            [unused, first] if *unused < 8 => u16::from_be_bytes([*first, 0]),
            [unused, first, second] if *unused < 8 => u16::from_be_bytes([*first, *second]),
            _ => return Err(Error::encoding(crate::error::EncodingError::InvalidBitString)),
        };
        Ok(Self { bits })
    }
}

impl fmt::Display for KeyUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (bit, name) in Self::NAMES {
            if self.has(bit) {
                if !first {
                    f.write_str(", ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Extended Key Usage - RFC 5280 Section 4.2.1.12
// ============================================================================

/// Extended Key Usage bitmap.
///
/// ```asn1
/// ExtKeyUsageSyntax ::= SEQUENCE SIZE (1..MAX) OF KeyPurposeId
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtendedKeyUsage {
    bits: u32,
}

impl ExtendedKeyUsage {
    /// id-kp-OCSPSigning
    pub const OCSP_SIGN: u32 = 1;

    pub const fn new(bits: u32) -> Self {
        Self { bits }
    }

    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Check if this certificate can sign OCSP responses
    pub fn is_ocsp_signing(&self) -> bool {
        self.bits & Self::OCSP_SIGN != 0
    }

    fn parse(value: &mut Cursor<'_>) -> Result<Self> {
        let mut seq = value.read_nested(tag::SEQUENCE)?;
        let mut bits = 0;
        while !seq.is_empty() {
            let purpose = seq.read_oid()?;
            if purpose != OCSP_SIGNING.as_bytes() {
                return Err(Error::UnsupportedType("extended key usage purpose"));
            }
            bits |= Self::OCSP_SIGN;
        }
        Ok(Self { bits })
    }
}

// ============================================================================
// Intel Product Type
// ============================================================================

/// Product family, ENUMERATED in extension 1.2.840.113741.1.9.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ProductType {
    Reserved = 0,
    MediaVault = 1,
    IdentityProtectionTechnology = 2,
    CapabilityLicensingServices = 3,
    IntelDaTestCertificate = 4,
}

impl ProductType {
    pub fn from_value(value: u8) -> Result<Self> {
        match value {
            0 => Ok(ProductType::Reserved),
            1 => Ok(ProductType::MediaVault),
            2 => Ok(ProductType::IdentityProtectionTechnology),
            3 => Ok(ProductType::CapabilityLicensingServices),
            4 => Ok(ProductType::IntelDaTestCertificate),
            _ => Err(Error::UnsupportedType("product type")),
        }
    }

    pub fn is_valid(&self) -> bool {
        *self != ProductType::Reserved
    }

    fn parse(value: &mut Cursor<'_>) -> Result<Self> {
        match value.read(tag::ENUMERATED)? {
            [v] => Self::from_value(*v),
            _ => Err(Error::encoding(crate::error::EncodingError::InvalidInteger)),
        }
    }
}

// ============================================================================
// Decoded extension set
// ============================================================================

/// Extensions recognized in one certificate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extensions<'a> {
    pub authority_key_id: Option<&'a [u8]>,
    pub subject_key_id: Option<&'a [u8]>,
    pub key_usage: Option<KeyUsage>,
    pub extended_key_usage: Option<ExtendedKeyUsage>,
    pub basic_constraints: Option<BasicConstraints>,
    /// CPS URI of the Intel SIGMA certificate policy
    pub certificate_policy_uri: Option<&'a [u8]>,
    pub product_type: Option<ProductType>,
}

/// AuthorityKeyIdentifier ::= SEQUENCE {
///     keyIdentifier             [0] KeyIdentifier           OPTIONAL,
///     authorityCertIssuer       [1] GeneralNames            OPTIONAL,
///     authorityCertSerialNumber [2] CertificateSerialNumber OPTIONAL }
fn parse_authority_key_id<'a>(value: &mut Cursor<'a>) -> Result<Option<&'a [u8]>> {
    let mut seq = value.read_nested(tag::SEQUENCE)?;
    let key_id = match seq.peek_tag() {
        Some(tag::CONTEXT_0) => Some(seq.read(tag::CONTEXT_0)?),
        Some(tag::CONTEXT_CONSTRUCTED_0) => {
            let mut explicit = seq.read_nested(tag::CONTEXT_CONSTRUCTED_0)?;
            let key_id = explicit.read(tag::OCTET_STRING)?;
            explicit.finish()?;
            Some(key_id)
        }
        _ => None,
    };
    // issuer and serial are not used
    while !seq.is_empty() {
        seq.read_any()?;
    }
    Ok(key_id)
}

/// Returns the CPS URI when the Intel SIGMA policy carries one.
fn parse_certificate_policies<'a>(value: &mut Cursor<'a>) -> Result<Option<&'a [u8]>> {
    let mut policies = value.read_nested(tag::SEQUENCE)?;
    let mut uri = None;
    while !policies.is_empty() {
        let mut info = policies.read_nested(tag::SEQUENCE)?;
        let policy = info.read_oid()?;
        if policy != INTEL_SIGMA_POLICY.as_bytes() {
            log::trace!("skipping unrecognized certificate policy");
            continue;
        }
        if let Some(qualifiers) = info.read_optional(tag::SEQUENCE)? {
            let mut qualifiers = Cursor::new(qualifiers);
            while !qualifiers.is_empty() {
                let mut qualifier = qualifiers.read_nested(tag::SEQUENCE)?;
                let id = qualifier.read_oid()?;
                if id == CPS_QUALIFIER.as_bytes() {
                    uri = Some(qualifier.read(tag::IA5_STRING)?);
                    qualifier.finish()?;
                }
            }
        }
        info.finish()?;
    }
    Ok(uri)
}

fn parse_extension<'a>(
    id: ExtensionId,
    value: &mut Cursor<'a>,
    out: &mut Extensions<'a>,
) -> Result<()> {
    log::trace!("parsing extension {:?}", id);
    match id {
        ExtensionId::AuthorityKeyIdentifier => out.authority_key_id = parse_authority_key_id(value)?,
        ExtensionId::SubjectKeyIdentifier => {
            out.subject_key_id = Some(value.read(tag::OCTET_STRING)?)
        }
        ExtensionId::KeyUsage => out.key_usage = Some(KeyUsage::parse(value)?),
        ExtensionId::BasicConstraints => {
            out.basic_constraints = Some(BasicConstraints::parse(value)?)
        }
        ExtensionId::CertificatePolicies => {
            out.certificate_policy_uri = parse_certificate_policies(value)?
        }
        ExtensionId::ExtendedKeyUsage => {
            out.extended_key_usage = Some(ExtendedKeyUsage::parse(value)?)
        }
        ExtensionId::ProductType => out.product_type = Some(ProductType::parse(value)?),
    }
    value.finish()
}

/// Decode the content of the `[3]` extensions wrapper.
pub fn parse_extensions(explicit: &[u8]) -> Result<Extensions<'_>> {
    let mut outer = Cursor::new(explicit);
    let mut list = outer.read_nested(tag::SEQUENCE)?;
    outer.finish()?;

    let mut out = Extensions::default();
    while !list.is_empty() {
        let mut ext = list.read_nested(tag::SEQUENCE)?;
        let oid = ext.read_oid()?;
        let critical = ext.read_optional_boolean()?.unwrap_or(false);
        let value = ext.read(tag::OCTET_STRING)?;
        ext.finish()?;

        match EXTENSIONS.lookup(oid) {
            Some(id) => parse_extension(id, &mut Cursor::new(value), &mut out)?,
            None if critical => {
                log::error!("unsupported critical extension");
                return Err(Error::UnsupportedCriticalExtension);
            }
            None => log::trace!("skipping unrecognized non-critical extension"),
        }
    }
    Ok(out)
}

// ============================================================================
// Tests
// ============================================================================
