// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Platform Service X.509 Chain Verification
//!
//! A no_std, allocation-free parser and verifier for the short DER
//! certificate chains presented during platform-service session
//! establishment.
//!
//! # Features
//! - Bounds-checked DER tag-length-value decoding without an ASN.1 library
//! - Static OID registry for algorithms, name attributes and extensions
//! - Zero-copy extraction of certificate fields, EPID group keys included
//! - Root-to-leaf chain walk with name binding and path length limits
//! - ECDSA P-256 / SHA-256 signature verification through a pluggable backend
//!
//! # Example
//! ```no_run
//! use pse_x509::{RootPublicKey, Verifier};
//!
//! # fn example(x: [u8; 32], y: [u8; 32], chain: &[u8]) -> pse_x509::Result<()> {
//! let verifier = Verifier::new(RootPublicKey::from_coordinates(x, y));
//! let mut scratch = [0u8; pse_x509::DEFAULT_SCRATCH_CAPACITY];
//! let leaf = verifier.parse_certificate_chain(chain, &mut scratch)?;
//! let _ = leaf.subject.common_name;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod certificate;
pub mod crypto_backend;
pub mod error;
pub mod pem;
pub mod scratch;
pub mod time;
pub mod tlv;
pub mod verifier;
pub mod x509;

pub use certificate::name::DistinguishedName;
pub use certificate::public_key::{PublicKey, SubjectPublicKeyInfo};
pub use certificate::{parse_certificate, CertificateFields, Version};
pub use crypto_backend::{CryptoBackend, SignatureAlgorithm};
#[cfg(feature = "ring-backend")]
pub use crypto_backend::RingBackend;
pub use error::{EncodingError, Error, ProfileViolation, Result};
pub use pem::chain_from_pem;
pub use verifier::{RootPublicKey, Verifier, DEFAULT_SCRATCH_CAPACITY};
pub use x509::extensions::{BasicConstraints, ExtendedKeyUsage, Extensions, KeyUsage, ProductType};
pub use x509::{
    get_cert_from_cert_chain, CertificateLevel, CertificateProfile, IssuerInfo, ValidationOptions,
    MAX_CHAIN_LENGTH,
};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        CertificateFields, CertificateProfile, Error, Result, RootPublicKey, Verifier,
    };
}
