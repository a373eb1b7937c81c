// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Object Identifier registry
//!
//! Static tables mapping DER-encoded OID content octets to the enumerations
//! the certificate parser works with. Lookups compare the full content
//! octets, so a prefix of a known OID never matches.
//!
//! # Intel OIDs
//! Product-specific OIDs live under the Intel enterprise arc 1.2.840.113741.

use core::fmt;

use const_oid::ObjectIdentifier;

use crate::crypto_backend::SignatureAlgorithm;
use crate::error::{Error, Result};
use crate::tlv::Cursor;

/// Table an OID is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OidCategory {
    SignatureAlgorithm,
    PublicKeyAlgorithm,
    HashAlgorithm,
    CurveParameter,
    NameAttribute,
    Extension,
}

impl fmt::Display for OidCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OidCategory::SignatureAlgorithm => "signature algorithm",
            OidCategory::PublicKeyAlgorithm => "public key algorithm",
            OidCategory::HashAlgorithm => "hash algorithm",
            OidCategory::CurveParameter => "curve parameter",
            OidCategory::NameAttribute => "name attribute",
            OidCategory::Extension => "extension",
        };
        f.write_str(name)
    }
}

/// A category and its rows.
#[derive(Debug)]
pub struct OidTable<T: 'static> {
    category: OidCategory,
    rows: &'static [(ObjectIdentifier, T)],
}

impl<T: Copy> OidTable<T> {
    pub const fn category(&self) -> OidCategory {
        self.category
    }

    /// Row matching the OID content octets, if any.
    pub fn lookup(&self, content: &[u8]) -> Option<T> {
        self.rows
            .iter()
            .find(|(oid, _)| oid.as_bytes() == content)
            .map(|(_, value)| *value)
    }

    /// Row matching the OID content octets, or [`Error::UnknownOid`].
    pub fn resolve(&self, content: &[u8]) -> Result<T> {
        self.lookup(content).ok_or(Error::UnknownOid(self.category))
    }
}

/// Read one OBJECT IDENTIFIER and resolve it against `table`.
pub fn match_oid<T: Copy>(cursor: &mut Cursor<'_>, table: &OidTable<T>) -> Result<T> {
    let content = cursor.read_oid()?;
    table.resolve(content)
}

// =============================================================================
// Signature algorithms
// =============================================================================

pub const MD2_WITH_RSA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.2");
pub const MD4_WITH_RSA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.3");
pub const MD5_WITH_RSA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.4");
pub const SHA1_WITH_RSA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.5");
pub const RSAES_OAEP: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.7");
pub const MGF1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.8");
pub const P_SPECIFIED: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.9");
pub const RSASSA_PSS: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.10");
pub const SHA256_WITH_RSA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.11");
pub const SHA384_WITH_RSA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.12");
pub const SHA512_WITH_RSA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.13");
pub const SHA224_WITH_RSA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.14");

/// ecdsa-with-SHA1 - 1.2.840.10045.4.1
pub const ECDSA_WITH_SHA1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.1");

/// ecdsa-with-SHA256 - 1.2.840.10045.4.3.2
pub const ECDSA_WITH_SHA256: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.2");

pub static SIGNATURE_ALGORITHMS: OidTable<SignatureAlgorithm> = OidTable {
    category: OidCategory::SignatureAlgorithm,
    rows: &[
        (MD2_WITH_RSA, SignatureAlgorithm::RsaWithMd2),
        (MD4_WITH_RSA, SignatureAlgorithm::RsaWithMd4),
        (MD5_WITH_RSA, SignatureAlgorithm::RsaWithMd5),
        (SHA1_WITH_RSA, SignatureAlgorithm::RsaWithSha1),
        (RSAES_OAEP, SignatureAlgorithm::RsaesOaep),
        (MGF1, SignatureAlgorithm::RsaMgf1),
        (P_SPECIFIED, SignatureAlgorithm::RsaPSpecified),
        (RSASSA_PSS, SignatureAlgorithm::RsassaPss),
        (SHA256_WITH_RSA, SignatureAlgorithm::RsaWithSha256),
        (SHA384_WITH_RSA, SignatureAlgorithm::RsaWithSha384),
        (SHA512_WITH_RSA, SignatureAlgorithm::RsaWithSha512),
        (SHA224_WITH_RSA, SignatureAlgorithm::RsaWithSha224),
        (ECDSA_WITH_SHA1, SignatureAlgorithm::EcdsaWithSha1),
        (ECDSA_WITH_SHA256, SignatureAlgorithm::EcdsaWithSha256),
    ],
};

// =============================================================================
// Public key algorithms
// =============================================================================

/// Subject public key algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicKeyAlgorithm {
    Rsa,
    Ecdsa,
    /// EPID group key, SIGMA 1.0 layout
    Epid,
    /// EPID group key, SIGMA 1.1 layout (not parsed)
    Epid11,
    /// EPID group key, SIGMA 2.0 layout (not parsed)
    Epid20,
}

/// RSA Encryption - 1.2.840.113549.1.1.1
pub const RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

/// EC Public Key - 1.2.840.10045.2.1
pub const EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

pub const EPID_GROUP_KEY: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113741.1.9.4.1");
pub const EPID_GROUP_KEY_1_1: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113741.1.9.4.2");
pub const EPID_GROUP_KEY_2_0: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113741.1.9.4.3");

pub static PUBLIC_KEY_ALGORITHMS: OidTable<PublicKeyAlgorithm> = OidTable {
    category: OidCategory::PublicKeyAlgorithm,
    rows: &[
        (RSA_ENCRYPTION, PublicKeyAlgorithm::Rsa),
        (EC_PUBLIC_KEY, PublicKeyAlgorithm::Ecdsa),
        (EPID_GROUP_KEY, PublicKeyAlgorithm::Epid),
        (EPID_GROUP_KEY_1_1, PublicKeyAlgorithm::Epid11),
        (EPID_GROUP_KEY_2_0, PublicKeyAlgorithm::Epid20),
    ],
};

// =============================================================================
// Hash algorithms
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha1,
    Sha256,
}

/// SHA-1 - 1.3.14.3.2.26
pub const SHA1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.14.3.2.26");

/// SHA-256 - 2.16.840.1.101.3.4.2.1
pub const SHA256: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.1");

pub static HASH_ALGORITHMS: OidTable<HashAlgorithm> = OidTable {
    category: OidCategory::HashAlgorithm,
    rows: &[(SHA1, HashAlgorithm::Sha1), (SHA256, HashAlgorithm::Sha256)],
};

// =============================================================================
// Elliptic curves
// =============================================================================

/// Curve named in AlgorithmIdentifier parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveParameter {
    /// NIST P-256 (prime256v1)
    P256,
    /// Any other parameter
    Unknown,
}

/// prime256v1 - 1.2.840.10045.3.1.7
pub const SECP256R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");

pub static CURVES: OidTable<CurveParameter> = OidTable {
    category: OidCategory::CurveParameter,
    rows: &[(SECP256R1, CurveParameter::P256)],
};

// =============================================================================
// Name attributes
// =============================================================================

/// Recognized relative distinguished name attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameAttribute {
    CommonName,
    Organization,
    Country,
    Locality,
    State,
    OrganizationalUnit,
    UserId,
}

pub const COMMON_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.3");
pub const COUNTRY_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.6");
pub const LOCALITY_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.7");
pub const STATE_OR_PROVINCE_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.8");
pub const ORGANIZATION_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.10");
pub const ORGANIZATIONAL_UNIT_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.11");

/// userId - 0.9.2342.19200300.100.1.1
pub const USER_ID: ObjectIdentifier = ObjectIdentifier::new_unwrap("0.9.2342.19200300.100.1.1");

pub static NAME_ATTRIBUTES: OidTable<NameAttribute> = OidTable {
    category: OidCategory::NameAttribute,
    rows: &[
        (COMMON_NAME, NameAttribute::CommonName),
        (ORGANIZATION_NAME, NameAttribute::Organization),
        (COUNTRY_NAME, NameAttribute::Country),
        (LOCALITY_NAME, NameAttribute::Locality),
        (STATE_OR_PROVINCE_NAME, NameAttribute::State),
        (ORGANIZATIONAL_UNIT_NAME, NameAttribute::OrganizationalUnit),
        (USER_ID, NameAttribute::UserId),
    ],
};

// =============================================================================
// Certificate extensions
// =============================================================================

/// Extensions the parser decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionId {
    AuthorityKeyIdentifier,
    SubjectKeyIdentifier,
    KeyUsage,
    BasicConstraints,
    CertificatePolicies,
    ExtendedKeyUsage,
    ProductType,
}

/// Authority Key Identifier - 2.5.29.35
pub const AUTHORITY_KEY_IDENTIFIER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.35");

/// Subject Key Identifier - 2.5.29.14
pub const SUBJECT_KEY_IDENTIFIER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.14");

/// Key Usage - 2.5.29.15
pub const KEY_USAGE: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.15");

/// Basic Constraints - 2.5.29.19
pub const BASIC_CONSTRAINTS: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.19");

/// Certificate Policies - 2.5.29.32
pub const CERTIFICATE_POLICIES: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.32");

/// Extended Key Usage - 2.5.29.37
pub const EXTENDED_KEY_USAGE: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.37");

/// Intel product type - 1.2.840.113741.1.9.2
pub const PRODUCT_TYPE: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113741.1.9.2");

pub static EXTENSIONS: OidTable<ExtensionId> = OidTable {
    category: OidCategory::Extension,
    rows: &[
        (AUTHORITY_KEY_IDENTIFIER, ExtensionId::AuthorityKeyIdentifier),
        (SUBJECT_KEY_IDENTIFIER, ExtensionId::SubjectKeyIdentifier),
        (KEY_USAGE, ExtensionId::KeyUsage),
        (BASIC_CONSTRAINTS, ExtensionId::BasicConstraints),
        (CERTIFICATE_POLICIES, ExtensionId::CertificatePolicies),
        (EXTENDED_KEY_USAGE, ExtensionId::ExtendedKeyUsage),
        (PRODUCT_TYPE, ExtensionId::ProductType),
    ],
};

// =============================================================================
// Values carried inside extensions
// =============================================================================

/// Intel SIGMA certificate policy - 1.2.840.113741.1.9.1
pub const INTEL_SIGMA_POLICY: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113741.1.9.1");

/// id-qt-cps - 1.3.6.1.5.5.7.2.1
pub const CPS_QUALIFIER: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.2.1");

/// id-kp-OCSPSigning - 1.3.6.1.5.5.7.3.9
pub const OCSP_SIGNING: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.3.9");
