// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Ring cryptographic backend implementation.

use super::{CryptoBackend, SignatureAlgorithm, SHA1_DIGEST_SIZE};
use crate::error::{Error, Result};
use ring::digest;
use ring::signature::{self, UnparsedPublicKey};

/// Ring-based cryptographic backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct RingBackend;

impl CryptoBackend for RingBackend {
    fn verify_signature(
        &self,
        algorithm: SignatureAlgorithm,
        tbs_data: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<()> {
        log::trace!("Verifying signature with algorithm {:?}", algorithm);

        let ring_algo: &dyn signature::VerificationAlgorithm = match algorithm {
            SignatureAlgorithm::EcdsaWithSha256 => &signature::ECDSA_P256_SHA256_FIXED,
            other => return Err(Error::UnsupportedAlgorithm(other.name())),
        };

        let pk = UnparsedPublicKey::new(ring_algo, public_key);

        pk.verify(tbs_data, signature).map_err(|_| {
            log::error!("Signature verification failed");
            Error::InvalidSignature
        })?;

        log::trace!("Signature verification successful");
        Ok(())
    }

    fn sha1_digest(&self, data: &[u8]) -> Result<[u8; SHA1_DIGEST_SIZE]> {
        let hash = digest::digest(&digest::SHA1_FOR_LEGACY_USE_ONLY, data);
        hash.as_ref()
            .try_into()
            .map_err(|_| Error::Internal("SHA-1 digest has unexpected length"))
    }
}
