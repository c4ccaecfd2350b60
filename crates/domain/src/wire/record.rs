use super::buffer::{WireReader, WireWrite};
use super::error::{Result, WireError};
use super::name::Name;
use super::resource::{Resource, ResourceKind};
use super::types::{RecordClass, RecordType};

/// A resource record from the answer, authority or additional section.
///
/// `resource` is `None` when the record was received with zero-length data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: Name,
    pub record_type: RecordType,
    pub class: RecordClass,
    pub ttl: u32,
    pub resource: Option<Resource>,
}

impl ResourceRecord {
    pub fn new(name: Name, record_type: RecordType, ttl: u32, resource: Resource) -> Self {
        Self {
            name,
            record_type,
            class: RecordClass::IN,
            ttl,
            resource: Some(resource),
        }
    }

    pub fn read(reader: &mut WireReader<'_>) -> Result<Self> {
        let name = Name::read(reader)?;
        let record_type = RecordType::from(reader.read_u16()?);
        let class = RecordClass::from(reader.read_u16()?);
        let ttl = reader.read_u32()?;
        let length = usize::from(reader.read_u16()?);

        let resource = if length == 0 {
            None
        } else {
            let start = reader.position();
            let expected = start + length;
            if expected > reader.data().len() {
                return Err(WireError::UnexpectedEof { offset: expected });
            }
            let resource = Resource::read(ResourceKind::for_type(record_type), reader, length)?;
            if reader.position() != expected {
                return Err(WireError::ResourceLengthMismatch {
                    record_type: u16::from(record_type),
                    expected,
                    actual: reader.position(),
                });
            }
            Some(resource)
        };

        Ok(Self {
            name,
            record_type,
            class,
            ttl,
            resource,
        })
    }

    pub fn write<W: WireWrite + ?Sized>(&self, writer: &mut W) -> Result<()> {
        self.name.write(writer)?;
        writer.put_u16(u16::from(self.record_type))?;
        writer.put_u16(u16::from(self.class))?;
        writer.put_u32(self.ttl)?;

        let len_at = writer.position();
        writer.put_u16(0)?;
        if let Some(resource) = &self.resource {
            resource.write(writer)?;
        }
        let len = writer.position() - len_at - 2;
        let len = u16::try_from(len).map_err(|_| WireError::BufferFull {
            needed: len,
            capacity: usize::from(u16::MAX),
        })?;
        writer.patch_u16(len_at, len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_zero_length_has_no_resource() {
        let data = b"\x00\x00\x01\x00\x01\x00\x00\x00\x3c\x00\x00";
        let mut reader = WireReader::new(data);
        let record = ResourceRecord::read(&mut reader).unwrap();
        assert_eq!(record.record_type, RecordType::A);
        assert_eq!(record.ttl, 60);
        assert!(record.resource.is_none());
        assert_eq!(reader.position(), data.len());
    }

    #[test]
    fn test_undersized_codec_read_is_reported() {
        // CNAME with rdlength 4 but name "\x01a\x00" (3 bytes) then padding.
        let data = b"\x00\x00\x05\x00\x01\x00\x00\x00\x3c\x00\x04\x01a\x00\xff";
        let mut reader = WireReader::new(data);
        assert_eq!(
            ResourceRecord::read(&mut reader),
            Err(WireError::ResourceLengthMismatch {
                record_type: 5,
                expected: 15,
                actual: 14
            })
        );
    }

    #[test]
    fn test_write_patches_length() {
        let record = ResourceRecord::new(
            Name::parse("a").unwrap(),
            RecordType::A,
            300,
            Resource::Address(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1))),
        );
        let mut out = Vec::new();
        record.write(&mut out).unwrap();
        assert_eq!(
            out,
            b"\x01a\x00\x00\x01\x00\x01\x00\x00\x01\x2c\x00\x04\x0a\x00\x00\x01"
        );
    }
}
