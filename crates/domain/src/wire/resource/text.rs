use crate::wire::buffer::{WireReader, WireWrite};
use crate::wire::error::{Result, WireError};
use std::borrow::Cow;

/// TXT/SPF data: one or more length-prefixed character strings.
/// Never compressed; bytes are kept as received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextResource {
    pub strings: Vec<Vec<u8>>,
}

impl TextResource {
    pub fn new<I, S>(strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        Self {
            strings: strings.into_iter().map(|s| s.as_ref().to_vec()).collect(),
        }
    }

    /// Lossy UTF-8 view of each string.
    pub fn texts(&self) -> impl Iterator<Item = Cow<'_, str>> {
        self.strings.iter().map(|s| String::from_utf8_lossy(s))
    }

    pub(crate) fn read(reader: &mut WireReader<'_>, end: usize) -> Result<Self> {
        let mut strings = Vec::new();
        while reader.position() < end {
            let len = reader.read_u8()?;
            strings.push(reader.read_slice(usize::from(len))?.to_vec());
        }
        Ok(Self { strings })
    }

    pub(crate) fn write<W: WireWrite + ?Sized>(&self, writer: &mut W) -> Result<()> {
        for string in &self.strings {
            let len = u8::try_from(string.len()).map_err(|_| WireError::StringTooLong(string.len()))?;
            writer.put_u8(len)?;
            writer.put_slice(string)?;
        }
        Ok(())
    }
}
