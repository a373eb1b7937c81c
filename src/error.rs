// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Error types for certificate chain parsing and verification
//!
//! Every variant is `Copy` and carries only static data so the validation
//! core can report failures without allocating.

use core::fmt;

use crate::x509::oids::OidCategory;

/// Result type alias for certificate chain operations
pub type Result<T> = core::result::Result<T, Error>;

/// Error returned by every fallible operation in this crate.
///
/// All errors are fatal for the current call; there is no partial result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A TLV's tag, length or bounds violates the grammar at this position
    EncodingError(EncodingError),

    /// Certificate version is not v3 (value is the decoded version number)
    InvalidVersion(u32),

    /// A known algorithm that is not implemented in this build
    UnsupportedAlgorithm(&'static str),

    /// An OID matched no row of the table for its category
    UnknownOid(OidCategory),

    /// Cryptographic verification failed
    InvalidSignature,

    /// A CA certificate exceeds the inherited path length budget
    BasicConstraintsViolation,

    /// Empty or undersized buffers, or trailing/missing bytes after the chain
    InvalidArgs(&'static str),

    /// An extension marked critical is not recognized
    UnsupportedCriticalExtension,

    /// A recognized extension carries a value this build does not handle
    UnsupportedType(&'static str),

    /// Current time is outside the certificate validity period
    ExpiredCertificate,

    /// Certificate does not satisfy the selected certificate profile
    ProfileViolation(ProfileViolation),

    /// Internal error (should not occur in normal operation)
    Internal(&'static str),
}

/// Precise grammar violation behind [`Error::EncodingError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingError {
    /// Tag at the cursor differs from the mandatory tag
    UnexpectedTag { expected: u8, found: u8 },

    /// Cursor reached the end of its range while reading a header
    UnexpectedEnd,

    /// Length octets use a form other than short, 0x81 or 0x82
    UnsupportedLengthForm(u8),

    /// Declared length overflows or runs past the enclosing range
    LengthOutOfBounds,

    /// Integer is empty, negative where positivity is required, or too wide
    InvalidInteger,

    /// BOOLEAN is not a single 0x00 or 0xFF octet
    InvalidBoolean,

    /// BIT STRING has non-zero unused bits or a bad length
    InvalidBitString,

    /// UTCTime or GeneralizedTime value is malformed or out of range
    InvalidTime,

    /// Subject public key does not match its declared algorithm layout
    InvalidPublicKey,

    /// A mandatory field is absent
    MissingField(&'static str),

    /// Signature algorithm in the body differs from the trailer
    SignatureAlgorithmMismatch,

    /// Issuer common name differs from the previous subject common name
    IssuerNameMismatch,

    /// Bytes remain after the last field of a structure
    TrailingData,

    /// Serial number is longer than 20 octets
    SerialNumberTooLong,

    /// Name attribute value uses an unsupported string type
    InvalidString(u8),

    /// PEM armor could not be decoded
    InvalidPem,

    /// SubjectPublicKeyInfo could not be decoded
    InvalidSpki,
}

/// Certificate profile requirement that was not met.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileViolation {
    /// Basic Constraints extension is absent
    MissingBasicConstraints,

    /// Non-leaf certificate is not marked as a CA
    NotCa,

    /// Leaf certificate is marked as a CA
    UnexpectedCa,

    /// Key Usage does not match the required bitmap
    KeyUsage { expected: u16, found: u16 },

    /// Extended Key Usage lacks the required purpose
    ExtendedKeyUsage,

    /// Subject Key Identifier is absent or does not hash the subject key
    SubjectKeyIdentifier,

    /// Authority Key Identifier is absent or does not hash the issuer key
    AuthorityKeyIdentifier,

    /// Public key is on a curve other than P-256
    Curve,

    /// Product type is absent or differs from the issuer's
    ProductType,

    /// Public key algorithm does not fit the profile
    KeyAlgorithm,
}

// ============================================================================
// Error Display Implementation (works in both std and no_std)
// ============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EncodingError(e) => write!(f, "Encoding error: {}", e),
            Error::InvalidVersion(v) => write!(f, "Invalid certificate version: {}", v),
            Error::UnsupportedAlgorithm(algo) => write!(f, "Unsupported algorithm: {}", algo),
            Error::UnknownOid(category) => write!(f, "Unknown {} OID", category),
            Error::InvalidSignature => write!(f, "Signature verification failed"),
            Error::BasicConstraintsViolation => {
                write!(f, "Basic constraints path length exceeded")
            }
            Error::InvalidArgs(msg) => write!(f, "Invalid arguments: {}", msg),
            Error::UnsupportedCriticalExtension => {
                write!(f, "Unsupported critical extension")
            }
            Error::UnsupportedType(what) => write!(f, "Unsupported type: {}", what),
            Error::ExpiredCertificate => write!(f, "Certificate outside its validity period"),
            Error::ProfileViolation(e) => write!(f, "Profile violation: {}", e),
            Error::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::UnexpectedTag { expected, found } => write!(
                f,
                "Invalid tag: expected 0x{:02x}, found 0x{:02x}",
                expected, found
            ),
            EncodingError::UnexpectedEnd => write!(f, "Unexpected end of input"),
            EncodingError::UnsupportedLengthForm(b) => {
                write!(f, "Unsupported length form 0x{:02x}", b)
            }
            EncodingError::LengthOutOfBounds => write!(f, "Length exceeds enclosing range"),
            EncodingError::InvalidInteger => write!(f, "Invalid integer"),
            EncodingError::InvalidBoolean => write!(f, "Invalid boolean"),
            EncodingError::InvalidBitString => write!(f, "Invalid bit string"),
            EncodingError::InvalidTime => write!(f, "Invalid time encoding"),
            EncodingError::InvalidPublicKey => write!(f, "Invalid public key encoding"),
            EncodingError::MissingField(field) => write!(f, "Missing required field: {}", field),
            EncodingError::SignatureAlgorithmMismatch => {
                write!(f, "Signature algorithm mismatch between body and trailer")
            }
            EncodingError::IssuerNameMismatch => write!(f, "Issuer name mismatch in chain"),
            EncodingError::TrailingData => write!(f, "Trailing data after structure"),
            EncodingError::SerialNumberTooLong => write!(f, "Serial number longer than 20 bytes"),
            EncodingError::InvalidString(tag) => {
                write!(f, "Unsupported string type 0x{:02x}", tag)
            }
            EncodingError::InvalidPem => write!(f, "Invalid PEM"),
            EncodingError::InvalidSpki => write!(f, "Invalid SubjectPublicKeyInfo"),
        }
    }
}

impl fmt::Display for ProfileViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileViolation::MissingBasicConstraints => {
                write!(f, "Basic Constraints extension missing")
            }
            ProfileViolation::NotCa => write!(f, "Certificate is not a CA but used as one"),
            ProfileViolation::UnexpectedCa => {
                write!(f, "Certificate is a CA but used as end-entity")
            }
            ProfileViolation::KeyUsage { expected, found } => write!(
                f,
                "Key usage 0x{:04x} does not match required 0x{:04x}",
                found, expected
            ),
            ProfileViolation::ExtendedKeyUsage => write!(f, "Extended key usage violation"),
            ProfileViolation::SubjectKeyIdentifier => {
                write!(f, "Subject key identifier mismatch")
            }
            ProfileViolation::AuthorityKeyIdentifier => {
                write!(f, "Authority key identifier mismatch")
            }
            ProfileViolation::Curve => write!(f, "Unsupported curve"),
            ProfileViolation::ProductType => write!(f, "Product type mismatch"),
            ProfileViolation::KeyAlgorithm => write!(f, "Public key algorithm not allowed"),
        }
    }
}

// ============================================================================
// std::error::Error implementation (when std feature is enabled)
// ============================================================================

#[cfg(feature = "std")]
impl std::error::Error for Error {}

// ============================================================================
// Conversions from external crate errors
// ============================================================================

/// Convert from der crate errors
impl From<der::Error> for Error {
    fn from(err: der::Error) -> Self {
        match err.kind() {
            der::ErrorKind::DateTime => Error::EncodingError(EncodingError::InvalidTime),
            der::ErrorKind::Overflow | der::ErrorKind::Overlength => {
                Error::EncodingError(EncodingError::LengthOutOfBounds)
            }
            _ => Error::EncodingError(EncodingError::InvalidSpki),
        }
    }
}

/// Convert from spki errors
impl From<spki::Error> for Error {
    fn from(_: spki::Error) -> Self {
        Error::EncodingError(EncodingError::InvalidSpki)
    }
}

/// Convert from PEM decoding errors
impl From<pem_rfc7468::Error> for Error {
    fn from(_: pem_rfc7468::Error) -> Self {
        Error::EncodingError(EncodingError::InvalidPem)
    }
}

// ============================================================================
// Helper constructors for common error cases
// ============================================================================

impl Error {
    /// Wrap an encoding error kind
    pub const fn encoding(kind: EncodingError) -> Self {
        Error::EncodingError(kind)
    }

    /// Create a missing field error
    pub const fn missing_field(field: &'static str) -> Self {
        Error::EncodingError(EncodingError::MissingField(field))
    }

    /// Create an unexpected tag error
    pub const fn unexpected_tag(expected: u8, found: u8) -> Self {
        Error::EncodingError(EncodingError::UnexpectedTag { expected, found })
    }

    /// Create a profile violation error
    pub const fn profile(kind: ProfileViolation) -> Self {
        Error::ProfileViolation(kind)
    }

    /// True for any [`Error::EncodingError`]
    pub fn is_encoding(&self) -> bool {
        matches!(self, Error::EncodingError(_))
    }
}

// ============================================================================
// Tests
// ============================================================================
