// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! X.509 chain validation
//!
//! - [`oids`] and [`algorithm`]: the static OID registry
//! - [`extensions`]: the v3 extensions this crate understands
//! - [`signature`]: signature decoding and verification dispatch
//! - [`validator`]: certificate profiles
//! - [`chain`]: the root-to-leaf walk

pub mod algorithm;
pub mod chain;
pub mod extensions;
pub mod oids;
pub mod signature;
pub mod validator;

pub use chain::{
    get_cert_from_cert_chain, validate_chain, CertificateLevel, ChainValidationState, IssuerInfo,
    MAX_CHAIN_LENGTH,
};
pub use validator::{validate_profile, CertificateProfile, ValidationOptions};
