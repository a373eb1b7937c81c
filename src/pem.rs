// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! PEM input helpers.
//!
//! Chains are often distributed as a text file of concatenated
//! `CERTIFICATE` blocks. [`chain_from_pem`] turns such a file into the DER
//! chain buffer the verifier expects.

extern crate alloc;

use alloc::vec::Vec;

use crate::error::{EncodingError, Error, Result};

const CERTIFICATE_LABEL: &str = "CERTIFICATE";
const BEGIN_MARKER: &str = "-----BEGIN ";
const END_MARKER: &str = "-----END ";
const BOUNDARY_TAIL: &str = "-----";

fn invalid_pem() -> Error {
    Error::encoding(EncodingError::InvalidPem)
}

/// Length of the PEM block at the start of `text`, end boundary and its
/// line ending included.
fn block_len(text: &str) -> Result<usize> {
    let end = text.find(END_MARKER).ok_or_else(invalid_pem)?;
    let label_start = end + END_MARKER.len();
    let close = text[label_start..]
        .find(BOUNDARY_TAIL)
        .ok_or_else(invalid_pem)?;
    let mut len = label_start + close + BOUNDARY_TAIL.len();
    if text[len..].starts_with("\r\n") {
        len += 2;
    } else if text[len..].starts_with('\n') {
        len += 1;
    }
    Ok(len)
}

/// Decode every `CERTIFICATE` block in `pem`, in order, into one DER chain.
///
/// Text between blocks is ignored. A block with any other label, or no
/// block at all, is an error.
pub fn chain_from_pem(pem: &str) -> Result<Vec<u8>> {
    let mut chain = Vec::new();
    let mut rest = pem;

    while let Some(start) = rest.find(BEGIN_MARKER) {
        let block = &rest[start..];
        let len = block_len(block)?;
        let (label, der) = pem_rfc7468::decode_vec(block[..len].as_bytes())?;
        if label != CERTIFICATE_LABEL {
            log::error!("unexpected PEM block {}", label);
            return Err(invalid_pem());
        }
        chain.extend_from_slice(&der);
        rest = &block[len..];
    }

    if chain.is_empty() {
        return Err(invalid_pem());
    }
    Ok(chain)
}
