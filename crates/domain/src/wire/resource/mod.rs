//! Resource data codecs, selected by record type.
//!
//! [`ResourceKind::for_type`] is the registry: a total mapping from a type
//! code to the codec that reads and writes its RDATA. Unknown types fall back
//! to [`Resource::Opaque`], which preserves the bytes verbatim.

mod address;
mod mail;
mod soa;
mod svcb;
mod text;

pub use address::read_address;
pub use mail::MailExchange;
pub use soa::StartOfAuthority;
pub use svcb::{ServiceBinding, SvcParamKey, SvcParamValue};
pub use text::TextResource;

use super::buffer::{WireReader, WireWrite};
use super::error::Result;
use super::name::Name;
use super::types::RecordType;
use std::net::IpAddr;

/// The codec responsible for a record type's RDATA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Address,
    Alias,
    Text,
    MailExchange,
    StartOfAuthority,
    ServiceBinding,
    Opaque,
}

impl ResourceKind {
    pub fn for_type(record_type: RecordType) -> Self {
        match record_type {
            RecordType::A | RecordType::AAAA => Self::Address,
            RecordType::CNAME | RecordType::NS | RecordType::PTR => Self::Alias,
            RecordType::TXT | RecordType::SPF => Self::Text,
            RecordType::SOA => Self::StartOfAuthority,
            RecordType::MX => Self::MailExchange,
            RecordType::SVCB | RecordType::HTTPS => Self::ServiceBinding,
            _ => Self::Opaque,
        }
    }
}

/// Decoded RDATA of a resource record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Address(IpAddr),
    /// CNAME, NS and PTR targets.
    Alias(Name),
    Text(TextResource),
    MailExchange(MailExchange),
    StartOfAuthority(StartOfAuthority),
    ServiceBinding(ServiceBinding),
    Opaque(Vec<u8>),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Address(_) => ResourceKind::Address,
            Self::Alias(_) => ResourceKind::Alias,
            Self::Text(_) => ResourceKind::Text,
            Self::MailExchange(_) => ResourceKind::MailExchange,
            Self::StartOfAuthority(_) => ResourceKind::StartOfAuthority,
            Self::ServiceBinding(_) => ResourceKind::ServiceBinding,
            Self::Opaque(_) => ResourceKind::Opaque,
        }
    }

    /// Reads RDATA declared as `length` bytes starting at the reader position.
    ///
    /// Codecs read their natural structure; the caller verifies that the
    /// cursor ended exactly `length` bytes later.
    pub fn read(kind: ResourceKind, reader: &mut WireReader<'_>, length: usize) -> Result<Self> {
        let end = reader.position() + length;
        Ok(match kind {
            ResourceKind::Address => Self::Address(read_address(reader, length)?),
            ResourceKind::Alias => Self::Alias(Name::read(reader)?),
            ResourceKind::Text => Self::Text(TextResource::read(reader, end)?),
            ResourceKind::MailExchange => Self::MailExchange(MailExchange::read(reader)?),
            ResourceKind::StartOfAuthority => {
                Self::StartOfAuthority(StartOfAuthority::read(reader)?)
            }
            ResourceKind::ServiceBinding => {
                Self::ServiceBinding(ServiceBinding::read(reader, end)?)
            }
            ResourceKind::Opaque => Self::Opaque(reader.read_slice(length)?.to_vec()),
        })
    }

    pub fn write<W: WireWrite + ?Sized>(&self, writer: &mut W) -> Result<()> {
        match self {
            Self::Address(IpAddr::V4(ip)) => writer.put_slice(&ip.octets()),
            Self::Address(IpAddr::V6(ip)) => writer.put_slice(&ip.octets()),
            Self::Alias(name) => name.write(writer),
            Self::Text(text) => text.write(writer),
            Self::MailExchange(mx) => mx.write(writer),
            Self::StartOfAuthority(soa) => soa.write(writer),
            Self::ServiceBinding(svcb) => svcb.write(writer),
            Self::Opaque(bytes) => writer.put_slice(bytes),
        }
    }

    pub fn as_address(&self) -> Option<IpAddr> {
        match self {
            Self::Address(ip) => Some(*ip),
            _ => None,
        }
    }

    pub fn as_alias(&self) -> Option<&Name> {
        match self {
            Self::Alias(name) => Some(name),
            _ => None,
        }
    }
}
