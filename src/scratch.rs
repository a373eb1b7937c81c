// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Caller-supplied working memory.
//!
//! Values the crypto backend needs in a fixed layout (the uncompressed issuer
//! key, the `r || s` signature) are written into a buffer owned by the
//! caller. [`Scratch`] hands out non-overlapping, zeroed regions of it and
//! fails once it is used up; nothing is allocated on the heap.

use crate::error::{Error, Result};

/// Bytes reserved per certificate for the normalized key and signature.
pub const PER_CERTIFICATE_SCRATCH: usize = 256;

/// Bump allocator over a caller buffer.
#[derive(Debug)]
pub struct Scratch<'a> {
    free: &'a mut [u8],
}

impl<'a> Scratch<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self { free: buffer }
    }

    /// Bytes still available.
    pub fn remaining(&self) -> usize {
        self.free.len()
    }

    /// Carve `len` zeroed bytes off the front of the free region.
    pub fn alloc(&mut self, len: usize) -> Result<&'a mut [u8]> {
        if len > self.free.len() {
            log::error!(
                "scratch exhausted: need {} bytes, {} left",
                len,
                self.free.len()
            );
            return Err(Error::InvalidArgs("scratch buffer too small"));
        }
        let free = core::mem::take(&mut self.free);
        let (head, tail) = free.split_at_mut(len);
        self.free = tail;
        head.fill(0);
        Ok(head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_is_zeroed_and_disjoint() {
        let mut buffer = [0xAAu8; 8];
        let mut scratch = Scratch::new(&mut buffer);
        let a = scratch.alloc(3).unwrap();
        let b = scratch.alloc(5).unwrap();
        assert_eq!(a, &[0, 0, 0]);
        a[0] = 1;
        b[0] = 2;
        assert_eq!(scratch.remaining(), 0);
        assert_eq!(buffer, [1, 0, 0, 2, 0, 0, 0, 0]);
    }

    #[test]
    fn test_exhausted() {
        let mut buffer = [0u8; 4];
        let mut scratch = Scratch::new(&mut buffer);
        assert!(scratch.alloc(4).is_ok());
        assert_eq!(
            scratch.alloc(1),
            Err(Error::InvalidArgs("scratch buffer too small"))
        );
        assert!(scratch.alloc(0).is_ok());
    }
}
