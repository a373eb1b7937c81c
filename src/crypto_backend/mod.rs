// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Cryptographic backend abstraction for signature verification.
//!
//! The certificate parser never touches a primitive directly. It hands the
//! signed bytes, the normalized signature and the issuer key to a
//! [`CryptoBackend`], so the crate can sit on top of whatever library the
//! platform provides.

use crate::error::Result;

#[cfg(feature = "ring-backend")]
mod ring;
#[cfg(feature = "ring-backend")]
pub use self::ring::*;

/// Signature algorithm identifiers known to the registry.
///
/// Only [`SignatureAlgorithm::EcdsaWithSha256`] is verified in this build;
/// the rest are recognized so they can be reported as unsupported instead of
/// unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    RsaWithMd2,
    RsaWithMd4,
    RsaWithMd5,
    RsaWithSha1,
    RsaesOaep,
    RsaMgf1,
    RsaPSpecified,
    RsassaPss,
    RsaWithSha256,
    RsaWithSha384,
    RsaWithSha512,
    RsaWithSha224,
    /// ECDSA with SHA-1
    EcdsaWithSha1,
    /// ECDSA with SHA-256
    EcdsaWithSha256,
}

impl SignatureAlgorithm {
    pub fn is_ecdsa(&self) -> bool {
        matches!(
            self,
            SignatureAlgorithm::EcdsaWithSha1 | SignatureAlgorithm::EcdsaWithSha256
        )
    }

    pub fn is_rsa(&self) -> bool {
        !self.is_ecdsa()
    }

    /// Short human-readable name, used in error reports.
    pub fn name(&self) -> &'static str {
        match self {
            SignatureAlgorithm::RsaWithMd2 => "md2WithRSAEncryption",
            SignatureAlgorithm::RsaWithMd4 => "md4WithRSAEncryption",
            SignatureAlgorithm::RsaWithMd5 => "md5WithRSAEncryption",
            SignatureAlgorithm::RsaWithSha1 => "sha1WithRSAEncryption",
            SignatureAlgorithm::RsaesOaep => "RSAES-OAEP",
            SignatureAlgorithm::RsaMgf1 => "MGF1",
            SignatureAlgorithm::RsaPSpecified => "pSpecified",
            SignatureAlgorithm::RsassaPss => "RSASSA-PSS",
            SignatureAlgorithm::RsaWithSha256 => "sha256WithRSAEncryption",
            SignatureAlgorithm::RsaWithSha384 => "sha384WithRSAEncryption",
            SignatureAlgorithm::RsaWithSha512 => "sha512WithRSAEncryption",
            SignatureAlgorithm::RsaWithSha224 => "sha224WithRSAEncryption",
            SignatureAlgorithm::EcdsaWithSha1 => "ecdsa-with-SHA1",
            SignatureAlgorithm::EcdsaWithSha256 => "ecdsa-with-SHA256",
        }
    }
}

/// Length of a SHA-1 digest.
pub const SHA1_DIGEST_SIZE: usize = 20;

/// Crypto backend trait for signature verification.
///
/// Keys and signatures are passed in the fixed big-endian layouts the
/// parser normalizes them to:
/// - ECDSA P-256 public key: `0x04 || x || y` (65 bytes)
/// - ECDSA signature: `r || s`, each left-padded to 32 bytes (64 bytes)
pub trait CryptoBackend {
    /// Verify a signature; failure must be reported as
    /// [`Error::InvalidSignature`](crate::Error::InvalidSignature).
    fn verify_signature(
        &self,
        algorithm: SignatureAlgorithm,
        tbs_data: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<()>;

    /// SHA-1 digest, used for key identifiers and issuer key hashes.
    fn sha1_digest(&self, data: &[u8]) -> Result<[u8; SHA1_DIGEST_SIZE]>;
}

impl<B: CryptoBackend + ?Sized> CryptoBackend for &B {
    fn verify_signature(
        &self,
        algorithm: SignatureAlgorithm,
        tbs_data: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<()> {
        (**self).verify_signature(algorithm, tbs_data, signature, public_key)
    }

    fn sha1_digest(&self, data: &[u8]) -> Result<[u8; SHA1_DIGEST_SIZE]> {
        (**self).sha1_digest(data)
    }
}
