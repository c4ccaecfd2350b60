//! Whole-message codec.

use super::buffer::{SliceWriter, WireReader, WireWrite};
use super::error::{Result, WireError};
use super::header::Header;
use super::name::Name;
use super::record::ResourceRecord;
use super::types::{RecordClass, RecordType, ResponseCode};
use super::MAX_UDP_PAYLOAD;

/// A DNS message: header, single question and the three record sections.
///
/// The header's section counts are authoritative on the wire. After pushing
/// records directly into the vectors call [`Message::sync_counts`], or use
/// the `push_*` helpers which keep them in step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub header: Header,
    pub answers: Vec<ResourceRecord>,
    pub nameservers: Vec<ResourceRecord>,
    pub additional: Vec<ResourceRecord>,
}

impl Message {
    /// A recursive query with a random transaction id.
    pub fn query(name: Name, query_type: RecordType) -> Self {
        let mut header = Header::for_question(fastrand::u16(..), name, query_type, RecordClass::IN);
        header.set_recursion_desired(true);
        Self {
            header,
            ..Self::default()
        }
    }

    /// An empty response echoing the query's id, question, opcode and RD bit.
    pub fn response_to(query: &Message) -> Self {
        let mut header = Header::for_question(
            query.header.id,
            query.header.query_name.clone(),
            query.header.query_type,
            query.header.query_class,
        );
        header.question_count = query.header.question_count;
        header.set_response(true);
        header.set_opcode(query.header.opcode());
        header.set_recursion_desired(query.header.recursion_desired());
        Self {
            header,
            ..Self::default()
        }
    }

    /// An empty response carrying `code`.
    pub fn error_response(query: &Message, code: ResponseCode) -> Self {
        let mut response = Self::response_to(query);
        response.header.set_response_code(code);
        response
    }

    pub fn push_answer(&mut self, record: ResourceRecord) {
        self.answers.push(record);
        self.sync_counts();
    }

    pub fn push_nameserver(&mut self, record: ResourceRecord) {
        self.nameservers.push(record);
        self.sync_counts();
    }

    pub fn push_additional(&mut self, record: ResourceRecord) {
        self.additional.push(record);
        self.sync_counts();
    }

    /// Sets the header's record counts from the section lengths.
    pub fn sync_counts(&mut self) {
        self.header.answer_count = saturate(self.answers.len());
        self.header.nameserver_count = saturate(self.nameservers.len());
        self.header.additional_count = saturate(self.additional.len());
    }

    /// Smallest TTL across the answer section.
    pub fn min_answer_ttl(&self) -> Option<u32> {
        self.answers.iter().map(|r| r.ttl).min()
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut reader = WireReader::new(data);
        let header = Header::read(&mut reader)?;

        let answers = read_section(&mut reader, header.answer_count)?;
        let nameservers = read_section(&mut reader, header.nameserver_count)?;
        let additional = read_section(&mut reader, header.additional_count)?;

        Ok(Self {
            header,
            answers,
            nameservers,
            additional,
        })
    }

    /// Encodes into `buf`, returning the number of bytes written.
    pub fn encode_into(&self, buf: &mut [u8]) -> Result<usize> {
        let mut writer = SliceWriter::new(buf);
        self.write(&mut writer)?;
        Ok(writer.position())
    }

    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(512);
        self.write(&mut out)?;
        if out.len() > MAX_UDP_PAYLOAD {
            return Err(WireError::BufferFull {
                needed: out.len(),
                capacity: MAX_UDP_PAYLOAD,
            });
        }
        Ok(out)
    }

    pub fn write<W: WireWrite + ?Sized>(&self, writer: &mut W) -> Result<()> {
        check_count("answer", self.header.answer_count, self.answers.len())?;
        check_count("authority", self.header.nameserver_count, self.nameservers.len())?;
        check_count("additional", self.header.additional_count, self.additional.len())?;

        self.header.write(writer)?;
        for record in self
            .answers
            .iter()
            .chain(&self.nameservers)
            .chain(&self.additional)
        {
            record.write(writer)?;
        }
        Ok(())
    }
}

fn read_section(reader: &mut WireReader<'_>, count: u16) -> Result<Vec<ResourceRecord>> {
    // Each record needs at least 11 bytes; don't trust the count for capacity.
    let capacity = usize::from(count).min(reader.remaining() / 11);
    let mut records = Vec::with_capacity(capacity);
    for _ in 0..count {
        records.push(ResourceRecord::read(reader)?);
    }
    Ok(records)
}

fn check_count(section: &'static str, declared: u16, actual: usize) -> Result<()> {
    if usize::from(declared) != actual {
        return Err(WireError::SectionCountMismatch {
            section,
            declared,
            actual,
        });
    }
    Ok(())
}

#[inline]
fn saturate(len: usize) -> u16 {
    u16::try_from(len).unwrap_or(u16::MAX)
}
