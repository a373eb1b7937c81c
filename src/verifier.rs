// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Chain verification entry point.
//!
//! A [`Verifier`] holds the root of trust and the validation settings. The
//! root key is fixed when the verifier is built; every call to
//! [`Verifier::parse_certificate_chain`] is independent and only reads the
//! verifier, so one verifier may be shared between threads.
//!
//! # Example
//! ```no_run
//! use pse_x509::{RootPublicKey, Verifier};
//!
//! # fn example(root_spki: &[u8], chain: &[u8]) -> pse_x509::Result<()> {
//! let verifier = Verifier::new(RootPublicKey::from_spki_der(root_spki)?);
//! let mut scratch = vec![0u8; verifier.required_scratch()];
//! let leaf = verifier.parse_certificate_chain(chain, &mut scratch)?;
//! assert_eq!(leaf.version.number(), 3);
//! # Ok(())
//! # }
//! ```

use crate::certificate::public_key::COORDINATE_SIZE;
use crate::certificate::CertificateFields;
use crate::crypto_backend::CryptoBackend;
#[cfg(feature = "ring-backend")]
use crate::crypto_backend::RingBackend;
use crate::error::{EncodingError, Error, Result};
use crate::scratch::{Scratch, PER_CERTIFICATE_SCRATCH};
use crate::x509::chain::{validate_chain, IssuerInfo, MAX_CHAIN_LENGTH};
use crate::x509::oids::{EC_PUBLIC_KEY, SECP256R1};
use crate::x509::validator::{CertificateProfile, ValidationOptions};

/// Scratch size that fits the longest accepted chain.
pub const DEFAULT_SCRATCH_CAPACITY: usize = MAX_CHAIN_LENGTH * PER_CERTIFICATE_SCRATCH;

const PUBLIC_KEY_PEM_LABEL: &str = "PUBLIC KEY";

/// Root-of-trust P-256 public key, as big-endian affine coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootPublicKey {
    pub x: [u8; COORDINATE_SIZE],
    pub y: [u8; COORDINATE_SIZE],
}

impl RootPublicKey {
    pub const fn from_coordinates(x: [u8; COORDINATE_SIZE], y: [u8; COORDINATE_SIZE]) -> Self {
        Self { x, y }
    }

    /// From `0x04 || x || y`.
    pub fn from_uncompressed_point(point: &[u8]) -> Result<Self> {
        match point {
            [0x04, rest @ ..] if rest.len() == 2 * COORDINATE_SIZE => {
                let (x, y) = rest.split_at(COORDINATE_SIZE);
                Ok(Self {
                    x: x.try_into()
                        .map_err(|_| Error::encoding(EncodingError::InvalidPublicKey))?,
                    y: y.try_into()
                        .map_err(|_| Error::encoding(EncodingError::InvalidPublicKey))?,
                })
            }
            _ => Err(Error::encoding(EncodingError::InvalidPublicKey)),
        }
    }

    /// From a DER SubjectPublicKeyInfo holding an id-ecPublicKey on P-256.
    pub fn from_spki_der(der: &[u8]) -> Result<Self> {
        let spki = spki::SubjectPublicKeyInfoRef::try_from(der)?;
        if spki.algorithm.oid != EC_PUBLIC_KEY {
            return Err(Error::encoding(EncodingError::InvalidSpki));
        }
        if spki.algorithm.parameters_oid()? != SECP256R1 {
            return Err(Error::UnsupportedAlgorithm("root key curve"));
        }
        let point = spki
            .subject_public_key
            .as_bytes()
            .ok_or(Error::encoding(EncodingError::InvalidSpki))?;
        Self::from_uncompressed_point(point)
    }

    /// From a PEM "PUBLIC KEY" block.
    pub fn from_pem(pem: &str) -> Result<Self> {
        let (label, der) = pem_rfc7468::decode_vec(pem.as_bytes())?;
        if label != PUBLIC_KEY_PEM_LABEL {
            return Err(Error::encoding(EncodingError::InvalidPem));
        }
        Self::from_spki_der(&der)
    }

    fn issuer_info<B: CryptoBackend>(&self, backend: &B) -> Result<IssuerInfo<'_>> {
        IssuerInfo::from_root_key(&self.x, &self.y, backend)
    }
}

/// Certificate chain verifier.
#[derive(Debug, Clone)]
pub struct Verifier<B: CryptoBackend> {
    root: RootPublicKey,
    backend: B,
    scratch_capacity: usize,
    options: ValidationOptions,
}

#[cfg(feature = "ring-backend")]
impl Verifier<RingBackend> {
    /// Verifier using the ring backend.
    pub fn new(root: RootPublicKey) -> Self {
        Self::with_backend(root, RingBackend)
    }
}

impl<B: CryptoBackend> Verifier<B> {
    pub fn with_backend(root: RootPublicKey, backend: B) -> Self {
        Self {
            root,
            backend,
            scratch_capacity: DEFAULT_SCRATCH_CAPACITY,
            options: ValidationOptions::default(),
        }
    }

    /// Minimum scratch length accepted by the parse calls.
    pub fn with_scratch_capacity(mut self, capacity: usize) -> Self {
        self.scratch_capacity = capacity;
        self
    }

    pub fn with_profile(mut self, profile: CertificateProfile) -> Self {
        self.options.profile = profile;
        self
    }

    /// Enforce validity periods against `now`.
    pub fn with_validation_time(mut self, now: der::DateTime) -> Self {
        self.options.validation_time = Some(now);
        self
    }

    /// Enforce validity periods against the system clock.
    #[cfg(feature = "std")]
    pub fn with_current_time(self) -> Result<Self> {
        Ok(self.with_validation_time(crate::time::current_time()?))
    }

    pub fn root(&self) -> &RootPublicKey {
        &self.root
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Scratch length callers must provide.
    pub fn required_scratch(&self) -> usize {
        self.scratch_capacity
    }

    /// Validate `chain` against the installed root key.
    pub fn parse_certificate_chain<'a>(
        &self,
        chain: &'a [u8],
        scratch: &mut [u8],
    ) -> Result<CertificateFields<'a>> {
        self.parse_certificate_chain_with_root(chain, scratch, &self.root)
    }

    /// Validate `chain` against `root` instead of the installed key.
    pub fn parse_certificate_chain_with_root<'a>(
        &self,
        chain: &'a [u8],
        scratch: &mut [u8],
        root: &RootPublicKey,
    ) -> Result<CertificateFields<'a>> {
        if chain.is_empty() {
            return Err(Error::InvalidArgs("empty certificate chain"));
        }
        if scratch.len() < self.scratch_capacity {
            log::error!(
                "scratch buffer of {} bytes is smaller than {}",
                scratch.len(),
                self.scratch_capacity
            );
            return Err(Error::InvalidArgs("scratch buffer too small"));
        }

        let issuer = root.issuer_info(&self.backend)?;
        let mut scratch = Scratch::new(scratch);
        validate_chain(chain, issuer, &self.backend, &self.options, &mut scratch)
    }
}
