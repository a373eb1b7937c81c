// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Runtime certificate builder for integration tests.
//!
//! Certificates are assembled with a small DER writer and signed with ring
//! P-256 keys, so every test chain is fresh and really signed.

#![allow(dead_code)]

use const_oid::ObjectIdentifier;
use der::Encode;
use pse_x509::RootPublicKey;
use ring::digest;
use ring::rand::SystemRandom;
use ring::signature::{EcdsaKeyPair, KeyPair, ECDSA_P256_SHA256_ASN1_SIGNING};

pub const SEQUENCE: u8 = 0x30;
pub const SET: u8 = 0x31;
pub const INTEGER: u8 = 0x02;
pub const BIT_STRING: u8 = 0x03;
pub const OCTET_STRING: u8 = 0x04;
pub const OID: u8 = 0x06;
pub const ENUMERATED: u8 = 0x0A;
pub const UTF8_STRING: u8 = 0x0C;
pub const UTC_TIME: u8 = 0x17;

pub const ECDSA_WITH_SHA256: &str = "1.2.840.10045.4.3.2";
pub const ECDSA_WITH_SHA1: &str = "1.2.840.10045.4.1";

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ── DER writer ──

pub fn tlv(tag: u8, content: &[u8]) -> Vec<u8> {
    let length = der::Length::try_from(content.len()).unwrap();
    let mut out = vec![tag];
    out.extend_from_slice(&length.to_der().unwrap());
    out.extend_from_slice(content);
    out
}

pub fn seq(parts: &[Vec<u8>]) -> Vec<u8> {
    tlv(SEQUENCE, &parts.concat())
}

pub fn oid(dotted: &str) -> Vec<u8> {
    tlv(OID, ObjectIdentifier::new_unwrap(dotted).as_bytes())
}

/// Minimal DER INTEGER for a non-negative value.
pub fn uint(value: u32) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let first = bytes.iter().position(|b| *b != 0).unwrap_or(3);
    let mut content = Vec::new();
    if bytes[first] & 0x80 != 0 {
        content.push(0);
    }
    content.extend_from_slice(&bytes[first..]);
    tlv(INTEGER, &content)
}

pub fn bit_string(content: &[u8]) -> Vec<u8> {
    let mut body = vec![0u8];
    body.extend_from_slice(content);
    tlv(BIT_STRING, &body)
}

pub fn sha1(data: &[u8]) -> Vec<u8> {
    digest::digest(&digest::SHA1_FOR_LEGACY_USE_ONLY, data)
        .as_ref()
        .to_vec()
}

// ── keys ──

pub struct Key {
    pair: EcdsaKeyPair,
    rng: SystemRandom,
}

impl Key {
    pub fn generate() -> Self {
        let rng = SystemRandom::new();
        let pkcs8 = EcdsaKeyPair::generate_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, &rng).unwrap();
        let pair =
            EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, pkcs8.as_ref(), &rng)
                .unwrap();
        Self { pair, rng }
    }

    /// `04 || x || y`
    pub fn point(&self) -> &[u8] {
        self.pair.public_key().as_ref()
    }

    pub fn root(&self) -> RootPublicKey {
        RootPublicKey::from_uncompressed_point(self.point()).unwrap()
    }

    /// DER Ecdsa-Sig-Value over `message`.
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        self.pair.sign(&self.rng, message).unwrap().as_ref().to_vec()
    }

    pub fn spki(&self) -> Vec<u8> {
        seq(&[
            seq(&[oid("1.2.840.10045.2.1"), oid("1.2.840.10045.3.1.7")]),
            bit_string(self.point()),
        ])
    }

    /// SHA-1 of the encoded point, as used for key identifiers.
    pub fn key_id(&self) -> Vec<u8> {
        sha1(self.point())
    }
}

/// EPID 2.0 group key SPKI: group id, then h1, h2 and w as uncompressed
/// points of 2, 2 and 6 coordinates filled with `1`, `2`, ...
pub fn epid_group_spki(group_id: u32) -> Vec<u8> {
    let point = |coordinates: u8| {
        let mut p = vec![0x04];
        for i in 0..coordinates {
            p.extend_from_slice(&[i + 1; 32]);
        }
        tlv(OCTET_STRING, &p)
    };
    let key = seq(&[uint(group_id), point(2), point(2), point(6)]);
    seq(&[seq(&[oid("1.2.840.113741.1.9.4.1")]), bit_string(&key)])
}

/// rsaEncryption SPKI with a toy modulus.
pub fn rsa_spki() -> Vec<u8> {
    let mut modulus = vec![0x00];
    modulus.extend_from_slice(&[0xC5; 128]);
    let key = seq(&[tlv(INTEGER, &modulus), uint(65537)]);
    seq(&[
        seq(&[oid("1.2.840.113549.1.1.1"), vec![0x05, 0x00]]),
        bit_string(&key),
    ])
}

// ── certificate template ──

#[derive(Clone, Debug)]
pub struct CertTemplate {
    /// Encoded version value; `None` omits the `[0]` field
    pub version: Option<u32>,
    pub serial: Vec<u8>,
    pub tbs_algorithm: &'static str,
    pub signature_algorithm: &'static str,
    pub issuer_cn: String,
    pub subject_cn: String,
    pub subject_org: String,
    pub not_before: &'static str,
    pub not_after: &'static str,
    /// `(cA, pathLenConstraint)`
    pub basic_constraints: Option<(bool, Option<u32>)>,
    pub key_usage: Option<u16>,
    pub subject_key_id: Option<Vec<u8>>,
    pub authority_key_id: Option<Vec<u8>>,
    pub product_type: Option<u8>,
    pub ocsp_signing: bool,
    /// Pre-encoded SubjectPublicKeyInfo replacing the subject's ECDSA key
    pub subject_public_key_info: Option<Vec<u8>>,
    /// Pre-encoded Extension SEQUENCEs appended after the others
    pub extra_extensions: Vec<Vec<u8>>,
}

impl CertTemplate {
    pub fn new(issuer_cn: &str, subject_cn: &str) -> Self {
        Self {
            version: Some(2),
            serial: vec![0x01, 0x23, 0x45],
            tbs_algorithm: ECDSA_WITH_SHA256,
            signature_algorithm: ECDSA_WITH_SHA256,
            issuer_cn: issuer_cn.into(),
            subject_cn: subject_cn.into(),
            subject_org: "Intel Corporation".into(),
            not_before: "200101000000Z",
            not_after: "491231235959Z",
            basic_constraints: None,
            key_usage: None,
            subject_key_id: None,
            authority_key_id: None,
            product_type: None,
            ocsp_signing: false,
            subject_public_key_info: None,
            extra_extensions: Vec::new(),
        }
    }

    pub fn ca(mut self, path_len: Option<u32>) -> Self {
        self.basic_constraints = Some((true, path_len));
        self
    }

    pub fn end_entity(mut self) -> Self {
        self.basic_constraints = Some((false, None));
        self
    }
}

pub fn extension(id: &str, critical: bool, value: &[u8]) -> Vec<u8> {
    let mut parts = vec![oid(id)];
    if critical {
        parts.push(vec![0x01, 0x01, 0xFF]);
    }
    parts.push(tlv(OCTET_STRING, value));
    seq(&parts)
}

fn name(cn: &str, org: Option<&str>) -> Vec<u8> {
    let mut rdns = vec![tlv(
        SET,
        &seq(&[oid("2.5.4.3"), tlv(UTF8_STRING, cn.as_bytes())]),
    )];
    if let Some(org) = org {
        rdns.push(tlv(
            SET,
            &seq(&[oid("2.5.4.10"), tlv(UTF8_STRING, org.as_bytes())]),
        ));
    }
    seq(&rdns)
}

fn key_usage_bits(bits: u16) -> Vec<u8> {
    let [high, low] = bits.to_be_bytes();
    let (content, last) = if low == 0 {
        (vec![high], high)
    } else {
        (vec![high, low], low)
    };
    let unused = if last == 0 { 0 } else { last.trailing_zeros() as u8 };
    let mut body = vec![unused];
    body.extend_from_slice(&content);
    tlv(BIT_STRING, &body)
}

fn extensions(template: &CertTemplate) -> Vec<Vec<u8>> {
    let mut exts = Vec::new();
    if let Some((ca, path_len)) = template.basic_constraints {
        let mut parts = Vec::new();
        if ca {
            parts.push(vec![0x01, 0x01, 0xFF]);
        }
        if let Some(path_len) = path_len {
            parts.push(uint(path_len));
        }
        exts.push(extension("2.5.29.19", true, &seq(&parts)));
    }
    if let Some(bits) = template.key_usage {
        exts.push(extension("2.5.29.15", true, &key_usage_bits(bits)));
    }
    if let Some(ski) = &template.subject_key_id {
        exts.push(extension("2.5.29.14", false, &tlv(OCTET_STRING, ski)));
    }
    if let Some(aki) = &template.authority_key_id {
        exts.push(extension("2.5.29.35", false, &seq(&[tlv(0x80, aki)])));
    }
    if template.ocsp_signing {
        exts.push(extension(
            "2.5.29.37",
            false,
            &seq(&[oid("1.3.6.1.5.5.7.3.9")]),
        ));
    }
    if let Some(product) = template.product_type {
        exts.push(extension(
            "1.2.840.113741.1.9.2",
            false,
            &tlv(ENUMERATED, &[product]),
        ));
    }
    exts.extend(template.extra_extensions.iter().cloned());
    exts
}

/// The TBSCertificate for `template` with `subject`'s key.
pub fn tbs(template: &CertTemplate, subject: &Key) -> Vec<u8> {
    let mut parts = Vec::new();
    if let Some(version) = template.version {
        parts.push(tlv(0xA0, &uint(version)));
    }
    parts.push(tlv(INTEGER, &template.serial));
    parts.push(seq(&[oid(template.tbs_algorithm)]));
    parts.push(name(&template.issuer_cn, Some("Intel Corporation")));
    parts.push(seq(&[
        tlv(UTC_TIME, template.not_before.as_bytes()),
        tlv(UTC_TIME, template.not_after.as_bytes()),
    ]));
    let org = if template.subject_org.is_empty() {
        None
    } else {
        Some(template.subject_org.as_str())
    };
    parts.push(name(&template.subject_cn, org));
    match &template.subject_public_key_info {
        Some(spki) => parts.push(spki.clone()),
        None => parts.push(subject.spki()),
    }
    let exts = extensions(template);
    if !exts.is_empty() {
        parts.push(tlv(0xA3, &seq(&exts)));
    }
    seq(&parts)
}

/// Sign `template` for `subject` with `issuer`.
pub fn build(template: &CertTemplate, subject: &Key, issuer: &Key) -> Vec<u8> {
    let tbs = tbs(template, subject);
    let signature = issuer.sign(&tbs);
    seq(&[
        tbs,
        seq(&[oid(template.signature_algorithm)]),
        bit_string(&signature),
    ])
}

// ── chains ──

pub struct TestChain {
    pub root: Key,
    pub keys: Vec<Key>,
    pub templates: Vec<CertTemplate>,
    pub certs: Vec<Vec<u8>>,
}

impl TestChain {
    pub fn der(&self) -> Vec<u8> {
        self.certs.concat()
    }

    /// Re-sign certificate `index` after `edit` changes its template.
    pub fn rebuild(&mut self, index: usize, edit: impl FnOnce(&mut CertTemplate)) {
        edit(&mut self.templates[index]);
        let issuer = if index == 0 {
            &self.root
        } else {
            &self.keys[index - 1]
        };
        self.certs[index] = build(&self.templates[index], &self.keys[index], issuer);
    }
}

pub fn subject_cn(index: usize) -> String {
    format!("PSE Cert {}", index)
}

/// Templates for a chain of `len` certificates rooted in the installed key.
pub fn generic_templates(len: usize) -> Vec<CertTemplate> {
    (0..len)
        .map(|i| {
            let issuer = if i == 0 {
                "PSE Root Key".to_string()
            } else {
                subject_cn(i - 1)
            };
            let template = CertTemplate::new(&issuer, &subject_cn(i));
            if i + 1 == len {
                template.end_entity()
            } else {
                template.ca(None)
            }
        })
        .collect()
}

pub fn build_chain(templates: Vec<CertTemplate>) -> TestChain {
    let root = Key::generate();
    let keys: Vec<Key> = (0..templates.len()).map(|_| Key::generate()).collect();
    let certs = templates
        .iter()
        .enumerate()
        .map(|(i, template)| {
            let issuer = if i == 0 { &root } else { &keys[i - 1] };
            build(template, &keys[i], issuer)
        })
        .collect();
    TestChain {
        root,
        keys,
        templates,
        certs,
    }
}

pub fn generic_chain(len: usize) -> TestChain {
    build_chain(generic_templates(len))
}

/// Chain that satisfies the Verifier profile: key identifiers, key usage
/// and product type on every certificate.
pub fn verifier_profile_chain(len: usize) -> TestChain {
    let mut chain = generic_chain(len);
    for i in 0..len {
        let issuer_id = if i == 0 {
            chain.root.key_id()
        } else {
            chain.keys[i - 1].key_id()
        };
        let subject_id = chain.keys[i].key_id();
        chain.rebuild(i, |template| {
            template.authority_key_id = Some(issuer_id);
            template.product_type = Some(2);
            if i + 1 == len {
                template.key_usage = Some(0x8000 | 0x4000);
            } else {
                template.key_usage = Some(0x0400);
                template.subject_key_id = Some(subject_id);
            }
        });
    }
    chain
}
