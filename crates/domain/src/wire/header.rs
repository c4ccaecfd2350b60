//! The fixed 12-byte message header plus the single question it carries.

use super::buffer::{WireReader, WireWrite};
use super::error::{Result, WireError};
use super::name::Name;
use super::types::{Opcode, RecordClass, RecordType, ResponseCode};

const RESPONSE_BIT: u16 = 1 << 15;
const OPCODE_SHIFT: u16 = 11;
const OPCODE_MASK: u16 = 0b1111 << OPCODE_SHIFT;
const AUTHORITATIVE_BIT: u16 = 1 << 10;
const TRUNCATED_BIT: u16 = 1 << 9;
const RECURSION_DESIRED_BIT: u16 = 1 << 8;
const RECURSION_AVAILABLE_BIT: u16 = 1 << 7;
const RESPONSE_CODE_MASK: u16 = 0b1111;

/// Message header. Section counts are kept alongside the records they
/// describe and are checked against them on both decode and encode.
///
/// Flag accessors only ever touch their own bits of [`Header::flags`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    pub flags: u16,
    pub question_count: u16,
    pub answer_count: u16,
    pub nameserver_count: u16,
    pub additional_count: u16,
    pub query_name: Name,
    pub query_type: RecordType,
    pub query_class: RecordClass,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            id: 0,
            flags: 0,
            question_count: 0,
            answer_count: 0,
            nameserver_count: 0,
            additional_count: 0,
            query_name: Name::root(),
            query_type: RecordType::Unknown(0),
            query_class: RecordClass::Unknown(0),
        }
    }
}

impl Header {
    /// A header asking a single question.
    pub fn for_question(id: u16, name: Name, query_type: RecordType, class: RecordClass) -> Self {
        Self {
            id,
            question_count: 1,
            query_name: name,
            query_type,
            query_class: class,
            ..Self::default()
        }
    }

    #[inline]
    fn flag(&self, bit: u16) -> bool {
        self.flags & bit != 0
    }

    #[inline]
    fn set_flag(&mut self, bit: u16, value: bool) {
        if value {
            self.flags |= bit;
        } else {
            self.flags &= !bit;
        }
    }

    pub fn is_response(&self) -> bool {
        self.flag(RESPONSE_BIT)
    }

    pub fn set_response(&mut self, value: bool) {
        self.set_flag(RESPONSE_BIT, value);
    }

    pub fn opcode(&self) -> Opcode {
        Opcode::from((self.flags & OPCODE_MASK) >> OPCODE_SHIFT)
    }

    pub fn set_opcode(&mut self, opcode: Opcode) {
        let bits = (u16::from(opcode) << OPCODE_SHIFT) & OPCODE_MASK;
        self.flags = (self.flags & !OPCODE_MASK) | bits;
    }

    pub fn is_authoritative(&self) -> bool {
        self.flag(AUTHORITATIVE_BIT)
    }

    pub fn set_authoritative(&mut self, value: bool) {
        self.set_flag(AUTHORITATIVE_BIT, value);
    }

    pub fn is_truncated(&self) -> bool {
        self.flag(TRUNCATED_BIT)
    }

    pub fn set_truncated(&mut self, value: bool) {
        self.set_flag(TRUNCATED_BIT, value);
    }

    pub fn recursion_desired(&self) -> bool {
        self.flag(RECURSION_DESIRED_BIT)
    }

    pub fn set_recursion_desired(&mut self, value: bool) {
        self.set_flag(RECURSION_DESIRED_BIT, value);
    }

    pub fn recursion_available(&self) -> bool {
        self.flag(RECURSION_AVAILABLE_BIT)
    }

    pub fn set_recursion_available(&mut self, value: bool) {
        self.set_flag(RECURSION_AVAILABLE_BIT, value);
    }

    pub fn response_code(&self) -> ResponseCode {
        ResponseCode::from(self.flags & RESPONSE_CODE_MASK)
    }

    pub fn set_response_code(&mut self, code: ResponseCode) {
        let bits = u16::from(code) & RESPONSE_CODE_MASK;
        self.flags = (self.flags & !RESPONSE_CODE_MASK) | bits;
    }

    pub fn read(reader: &mut WireReader<'_>) -> Result<Self> {
        let id = reader.read_u16()?;
        let flags = reader.read_u16()?;
        let question_count = reader.read_u16()?;
        let answer_count = reader.read_u16()?;
        let nameserver_count = reader.read_u16()?;
        let additional_count = reader.read_u16()?;

        let mut header = Self {
            id,
            flags,
            question_count,
            answer_count,
            nameserver_count,
            additional_count,
            ..Self::default()
        };

        match question_count {
            0 => {}
            1 => {
                header.query_name = Name::read(reader)?;
                header.query_type = RecordType::from(reader.read_u16()?);
                header.query_class = RecordClass::from(reader.read_u16()?);
            }
            other => return Err(WireError::UnsupportedQuestionCount(other)),
        }

        Ok(header)
    }

    pub fn write<W: WireWrite + ?Sized>(&self, writer: &mut W) -> Result<()> {
        if self.question_count > 1 {
            return Err(WireError::UnsupportedQuestionCount(self.question_count));
        }

        writer.put_u16(self.id)?;
        writer.put_u16(self.flags)?;
        writer.put_u16(self.question_count)?;
        writer.put_u16(self.answer_count)?;
        writer.put_u16(self.nameserver_count)?;
        writer.put_u16(self.additional_count)?;

        if self.question_count == 1 {
            self.query_name.write(writer)?;
            writer.put_u16(u16::from(self.query_type))?;
            writer.put_u16(u16::from(self.query_class))?;
        }
        Ok(())
    }
}
