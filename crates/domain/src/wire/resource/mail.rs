use crate::wire::buffer::{WireReader, WireWrite};
use crate::wire::error::Result;
use crate::wire::name::Name;

/// MX data (RFC 1035 §3.3.9).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailExchange {
    pub preference: u16,
    pub exchange: Name,
}

impl MailExchange {
    pub(crate) fn read(reader: &mut WireReader<'_>) -> Result<Self> {
        let preference = reader.read_u16()?;
        let exchange = Name::read(reader)?;
        Ok(Self {
            preference,
            exchange,
        })
    }

    pub(crate) fn write<W: WireWrite + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.put_u16(self.preference)?;
        self.exchange.write(writer)
    }
}
