// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

#![no_main]

use libfuzzer_sys::fuzz_target;

use pse_x509::{get_cert_from_cert_chain, CertificateProfile, RootPublicKey, Verifier};

fuzz_target!(|chain: &[u8]| {
    let _ = get_cert_from_cert_chain(chain, 0);
    let _ = get_cert_from_cert_chain(chain, -1);

    // Signatures will not verify, but every framing and length path before
    // verification is reached.
    let root = RootPublicKey::from_coordinates([0x6B; 32], [0x4F; 32]);
    let mut scratch = [0u8; pse_x509::DEFAULT_SCRATCH_CAPACITY];
    for profile in [
        CertificateProfile::Generic,
        CertificateProfile::Verifier,
        CertificateProfile::OcspResponder,
        CertificateProfile::EpidGroup,
    ] {
        let verifier = Verifier::new(root).with_profile(profile);
        let _ = verifier.parse_certificate_chain(chain, &mut scratch);
    }

    if let Ok(text) = core::str::from_utf8(chain) {
        let _ = pse_x509::chain_from_pem(text);
        let _ = RootPublicKey::from_pem(text);
    }
    let _ = RootPublicKey::from_spki_der(chain);
});
