use crate::wire::buffer::{WireReader, WireWrite};
use crate::wire::error::Result;
use crate::wire::name::Name;

/// SOA data (RFC 1035 §3.3.13).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartOfAuthority {
    pub primary_ns: Name,
    pub responsible: Name,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

impl StartOfAuthority {
    pub(crate) fn read(reader: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            primary_ns: Name::read(reader)?,
            responsible: Name::read(reader)?,
            serial: reader.read_u32()?,
            refresh: reader.read_u32()?,
            retry: reader.read_u32()?,
            expire: reader.read_u32()?,
            minimum: reader.read_u32()?,
        })
    }

    pub(crate) fn write<W: WireWrite + ?Sized>(&self, writer: &mut W) -> Result<()> {
        self.primary_ns.write(writer)?;
        self.responsible.write(writer)?;
        for value in [
            self.serial,
            self.refresh,
            self.retry,
            self.expire,
            self.minimum,
        ] {
            writer.put_u32(value)?;
        }
        Ok(())
    }
}
