//! SVCB and HTTPS data (RFC 9460).
//!
//! Parameters are kept in key order. Each value is read from exactly the
//! bytes its length prefix declares.

use crate::wire::buffer::{WireReader, WireWrite};
use crate::wire::error::{Result, WireError};
use crate::wire::name::Name;
use crate::wire::types::wire_enum;
use std::collections::BTreeMap;
use std::net::{Ipv4Addr, Ipv6Addr};

wire_enum! {
    /// Service parameter key.
    pub enum SvcParamKey ("key") {
        Mandatory = 0 => "mandatory",
        Alpn = 1 => "alpn",
        NoDefaultAlpn = 2 => "no-default-alpn",
        Port = 3 => "port",
        Ipv4Hint = 4 => "ipv4hint",
        Ech = 5 => "ech",
        Ipv6Hint = 6 => "ipv6hint",
        DohPath = 7 => "dohpath",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SvcParamValue {
    Alpn(Vec<Vec<u8>>),
    Port(u16),
    Ipv4Hint(Vec<Ipv4Addr>),
    Ipv6Hint(Vec<Ipv6Addr>),
    DohPath(Vec<u8>),
    /// Mandatory, no-default-alpn, ech and unregistered keys.
    Opaque(Vec<u8>),
}

impl SvcParamValue {
    fn read(key: SvcParamKey, reader: &mut WireReader<'_>, end: usize) -> Result<Self> {
        let length = end.saturating_sub(reader.position());
        Ok(match key {
            SvcParamKey::Alpn => {
                let mut ids = Vec::new();
                while reader.position() < end {
                    let len = reader.read_u8()?;
                    ids.push(reader.read_slice(usize::from(len))?.to_vec());
                }
                Self::Alpn(ids)
            }
            SvcParamKey::Port => Self::Port(reader.read_u16()?),
            SvcParamKey::Ipv4Hint => {
                let mut addrs = Vec::with_capacity(length / 4);
                while reader.position() < end {
                    let b = reader.read_slice(4)?;
                    addrs.push(Ipv4Addr::new(b[0], b[1], b[2], b[3]));
                }
                Self::Ipv4Hint(addrs)
            }
            SvcParamKey::Ipv6Hint => {
                let mut addrs = Vec::with_capacity(length / 16);
                while reader.position() < end {
                    let mut octets = [0u8; 16];
                    octets.copy_from_slice(reader.read_slice(16)?);
                    addrs.push(Ipv6Addr::from(octets));
                }
                Self::Ipv6Hint(addrs)
            }
            SvcParamKey::DohPath => Self::DohPath(reader.read_slice(length)?.to_vec()),
            _ => Self::Opaque(reader.read_slice(length)?.to_vec()),
        })
    }

    fn write<W: WireWrite + ?Sized>(&self, writer: &mut W) -> Result<()> {
        match self {
            Self::Alpn(ids) => {
                for id in ids {
                    let len = u8::try_from(id.len()).map_err(|_| WireError::StringTooLong(id.len()))?;
                    writer.put_u8(len)?;
                    writer.put_slice(id)?;
                }
                Ok(())
            }
            Self::Port(port) => writer.put_u16(*port),
            Self::Ipv4Hint(addrs) => {
                for addr in addrs {
                    writer.put_slice(&addr.octets())?;
                }
                Ok(())
            }
            Self::Ipv6Hint(addrs) => {
                for addr in addrs {
                    writer.put_slice(&addr.octets())?;
                }
                Ok(())
            }
            Self::DohPath(bytes) | Self::Opaque(bytes) => writer.put_slice(bytes),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceBinding {
    pub priority: u16,
    pub target: Name,
    pub params: BTreeMap<u16, SvcParamValue>,
}

impl ServiceBinding {
    /// Priority zero marks AliasMode.
    pub fn is_alias_mode(&self) -> bool {
        self.priority == 0
    }

    pub fn param(&self, key: SvcParamKey) -> Option<&SvcParamValue> {
        self.params.get(&u16::from(key))
    }

    pub(crate) fn read(reader: &mut WireReader<'_>, end: usize) -> Result<Self> {
        let priority = reader.read_u16()?;
        let target = Name::read(reader)?;
        let mut params = BTreeMap::new();
        let mut previous: Option<u16> = None;

        while reader.position() < end {
            let key = reader.read_u16()?;
            if let Some(previous) = previous.filter(|&p| key <= p) {
                return Err(WireError::SvcParamOutOfOrder { key, previous });
            }
            previous = Some(key);
            let len = usize::from(reader.read_u16()?);
            let param_end = reader.position() + len;
            let value = SvcParamValue::read(SvcParamKey::from(key), reader, param_end)?;
            if reader.position() != param_end {
                return Err(WireError::SvcParamLengthMismatch {
                    key,
                    expected: param_end,
                    actual: reader.position(),
                });
            }
            params.insert(key, value);
        }

        Ok(Self {
            priority,
            target,
            params,
        })
    }

    pub(crate) fn write<W: WireWrite + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.put_u16(self.priority)?;
        self.target.write(writer)?;
        for (key, value) in &self.params {
            writer.put_u16(*key)?;
            let len_at = writer.position();
            writer.put_u16(0)?;
            value.write(writer)?;
            let len = writer.position() - len_at - 2;
            writer.patch_u16(len_at, len as u16)?;
        }
        Ok(())
    }
}
