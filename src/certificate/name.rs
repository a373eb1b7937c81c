// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Distinguished Name (DN) support for issuer and subject fields.
//!
//! ```asn1
//! Name ::= SEQUENCE OF RelativeDistinguishedName
//! RelativeDistinguishedName ::= SET OF AttributeTypeAndValue
//! AttributeTypeAndValue ::= SEQUENCE { type OBJECT IDENTIFIER, value ANY }
//! ```
//!
//! Only the attributes in [`NameAttribute`] are kept. Values are zero-copy
//! views of the string content; attributes with other OIDs are skipped.

use core::fmt;

use crate::error::{EncodingError, Error, Result};
use crate::tlv::{tag, Cursor};
use crate::x509::oids::{NameAttribute, NAME_ATTRIBUTES};

/// Recognized attributes of one Name.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct DistinguishedName<'a> {
    /// Complete DER encoding of the Name
    pub raw: &'a [u8],
    pub common_name: Option<&'a [u8]>,
    pub organization: Option<&'a [u8]>,
    pub country: Option<&'a [u8]>,
    pub locality: Option<&'a [u8]>,
    pub state: Option<&'a [u8]>,
    pub organizational_unit: Option<&'a [u8]>,
    pub user_id: Option<&'a [u8]>,
}

impl<'a> DistinguishedName<'a> {
    /// Value of a recognized attribute.
    pub fn get(&self, attribute: NameAttribute) -> Option<&'a [u8]> {
        match attribute {
            NameAttribute::CommonName => self.common_name,
            NameAttribute::Organization => self.organization,
            NameAttribute::Country => self.country,
            NameAttribute::Locality => self.locality,
            NameAttribute::State => self.state,
            NameAttribute::OrganizationalUnit => self.organizational_unit,
            NameAttribute::UserId => self.user_id,
        }
    }

    fn slot(&mut self, attribute: NameAttribute) -> &mut Option<&'a [u8]> {
        match attribute {
            NameAttribute::CommonName => &mut self.common_name,
            NameAttribute::Organization => &mut self.organization,
            NameAttribute::Country => &mut self.country,
            NameAttribute::Locality => &mut self.locality,
            NameAttribute::State => &mut self.state,
            NameAttribute::OrganizationalUnit => &mut self.organizational_unit,
            NameAttribute::UserId => &mut self.user_id,
        }
    }

    /// Common name, treating an empty value as absent.
    pub fn non_empty_common_name(&self) -> Option<&'a [u8]> {
        self.common_name.filter(|v| !v.is_empty())
    }

    /// Organization, treating an empty value as absent.
    pub fn non_empty_organization(&self) -> Option<&'a [u8]> {
        self.organization.filter(|v| !v.is_empty())
    }
}

impl fmt::Debug for DistinguishedName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for (label, value) in [
            ("CN", self.common_name),
            ("O", self.organization),
            ("OU", self.organizational_unit),
            ("C", self.country),
            ("ST", self.state),
            ("L", self.locality),
            ("UID", self.user_id),
        ] {
            if let Some(value) = value {
                list.entry(&format_args!(
                    "{}={}",
                    label,
                    core::str::from_utf8(value).unwrap_or("<non-utf8>")
                ));
            }
        }
        list.finish()
    }
}

/// Read one Name.
///
/// Attribute values must be UTF8String, PrintableString or IA5String.
/// A repeated attribute keeps its last value.
pub fn parse_name<'a>(cursor: &mut Cursor<'a>) -> Result<DistinguishedName<'a>> {
    let element = cursor.read_element(tag::SEQUENCE)?;
    let mut name = DistinguishedName {
        raw: element.raw,
        ..Default::default()
    };

    let mut rdns = Cursor::new(element.value);
    while !rdns.is_empty() {
        let mut set = rdns.read_nested(tag::SET)?;
        while !set.is_empty() {
            let mut atv = set.read_nested(tag::SEQUENCE)?;
            let oid = atv.read_oid()?;
            let value = atv.read_any()?;
            atv.finish()?;

            match value.tag {
                tag::UTF8_STRING | tag::PRINTABLE_STRING | tag::IA5_STRING => {}
                other => return Err(Error::encoding(EncodingError::InvalidString(other))),
            }

            match NAME_ATTRIBUTES.lookup(oid) {
                Some(attribute) => *name.slot(attribute) = Some(value.value),
                None => log::trace!("skipping unrecognized name attribute"),
            }
        }
    }

    Ok(name)
}
