//! Domain names and the label codec (RFC 1035 §3.1, §4.1.4).
//!
//! Names are written uncompressed. On read, compression pointers are
//! followed with a strictly decreasing target bound: every pointer must
//! land before the start of the segment that led to it, so a walk can
//! never revisit bytes and always terminates.
//!
//! Labels are arbitrary octets. The text form escapes `.` and `\` with a
//! backslash and any byte outside printable ASCII as `\DDD`, so distinct
//! label sequences never share a rendering.

use super::buffer::{WireReader, WireWrite};
use super::error::{Result, WireError};
use super::{MAX_LABEL_LENGTH, MAX_NAME_LENGTH};
use compact_str::CompactString;
use smallvec::SmallVec;
use std::fmt::{self, Write as _};
use std::str::{Chars, FromStr};

/// Upper bound on pointer hops for a single name. The decreasing-target
/// rule already guarantees termination; this caps the work per name.
const MAX_COMPRESSION_JUMPS: usize = 128;

const POINTER_MASK: u8 = 0b1100_0000;

pub type Label = SmallVec<[u8; 24]>;

/// A domain name as an ordered list of labels, root label implied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Name {
    labels: SmallVec<[Label; 4]>,
}

impl Name {
    /// The root name (`.`), encoded as a single zero byte.
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a name from individual labels, validating each one.
    pub fn from_labels<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut name = Self::root();
        let mut wire_len = 1;
        for label in labels {
            let label = label.as_ref();
            if label.is_empty() {
                return Err(WireError::EmptyLabel(String::new()));
            }
            if label.len() > MAX_LABEL_LENGTH {
                return Err(WireError::LabelTooLong {
                    length: label.len(),
                });
            }
            wire_len += 1 + label.len();
            if wire_len > MAX_NAME_LENGTH {
                return Err(WireError::NameTooLong { length: wire_len });
            }
            name.labels.push(Label::from_slice(label));
        }
        Ok(name)
    }

    /// Parses the text form. A single trailing dot is accepted, and
    /// `\.`, `\\` and `\DDD` escapes are understood.
    pub fn parse(name: &str) -> Result<Self> {
        if name.is_empty() || name == "." {
            return Ok(Self::root());
        }

        let mut labels: SmallVec<[Label; 4]> = SmallVec::new();
        let mut current = Label::new();
        let mut chars = name.chars();
        while let Some(c) = chars.next() {
            match c {
                '.' => {
                    if current.is_empty() {
                        return Err(WireError::EmptyLabel(name.to_string()));
                    }
                    labels.push(std::mem::take(&mut current));
                }
                '\\' => push_escaped(&mut chars, &mut current, name)?,
                _ => {
                    let mut utf8 = [0u8; 4];
                    current.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
                }
            }
        }
        if !current.is_empty() {
            labels.push(current);
        }

        Self::from_labels(labels)
    }

    pub fn labels(&self) -> impl Iterator<Item = &[u8]> {
        self.labels.iter().map(Label::as_slice)
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Uncompressed encoded size, including the terminating zero byte.
    pub fn wire_len(&self) -> usize {
        1 + self.labels.iter().map(|l| 1 + l.len()).sum::<usize>()
    }

    /// Lowercased escaped text form, used wherever names act as lookup keys.
    /// Two names share a key exactly when they are equal ignoring ASCII case.
    pub fn to_lowercase_key(&self) -> CompactString {
        let mut key = CompactString::with_capacity(self.wire_len());
        // Writing into a CompactString cannot fail.
        let _ = self.write_text(&mut key, true);
        key
    }

    pub fn eq_ignore_case(&self, other: &Name) -> bool {
        self.labels.len() == other.labels.len()
            && self
                .labels
                .iter()
                .zip(other.labels.iter())
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }

    fn write_text<W: fmt::Write>(&self, out: &mut W, lowercase: bool) -> fmt::Result {
        if self.labels.is_empty() {
            return out.write_char('.');
        }
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                out.write_char('.')?;
            }
            for &byte in label.iter() {
                let byte = if lowercase {
                    byte.to_ascii_lowercase()
                } else {
                    byte
                };
                match byte {
                    b'.' | b'\\' => {
                        out.write_char('\\')?;
                        out.write_char(char::from(byte))?;
                    }
                    0x21..=0x7e => out.write_char(char::from(byte))?,
                    _ => write!(out, "\\{:03}", byte)?,
                }
            }
        }
        Ok(())
    }

    /// Reads a possibly compressed name at the reader's position.
    ///
    /// On return the reader sits just past the name as it appears at the
    /// starting position: past the terminator for an uncompressed name, or
    /// two bytes past the first pointer otherwise.
    pub fn read(reader: &mut WireReader<'_>) -> Result<Self> {
        let data = reader.data();
        let mut pos = reader.position();
        let mut limit = pos;
        let mut resume = None;
        let mut jumps = 0;
        let mut wire_len = 1;
        let mut labels = SmallVec::new();

        loop {
            let len_byte = *data.get(pos).ok_or(WireError::UnexpectedEof { offset: pos })?;

            match len_byte & POINTER_MASK {
                POINTER_MASK => {
                    let low = *data
                        .get(pos + 1)
                        .ok_or(WireError::UnexpectedEof { offset: pos + 1 })?;
                    let target = usize::from(u16::from_be_bytes([len_byte & !POINTER_MASK, low]));

                    if target >= limit {
                        return Err(WireError::InvalidCompressionPointer {
                            offset: pos,
                            target,
                        });
                    }

                    jumps += 1;
                    if jumps > MAX_COMPRESSION_JUMPS {
                        return Err(WireError::TooManyCompressionJumps {
                            max_jumps: MAX_COMPRESSION_JUMPS,
                        });
                    }

                    if resume.is_none() {
                        resume = Some(pos + 2);
                    }
                    limit = target;
                    pos = target;
                }
                0 => {
                    let len = usize::from(len_byte);
                    if len == 0 {
                        reader.set_position(resume.unwrap_or(pos + 1));
                        return Ok(Self { labels });
                    }

                    let begin = pos + 1;
                    let end = begin + len;
                    if end > data.len() {
                        return Err(WireError::UnexpectedEof { offset: end });
                    }

                    wire_len += 1 + len;
                    if wire_len > MAX_NAME_LENGTH {
                        return Err(WireError::NameTooLong { length: wire_len });
                    }

                    labels.push(Label::from_slice(&data[begin..end]));
                    pos = end;
                }
                _ => {
                    return Err(WireError::UnknownLabelType {
                        offset: pos,
                        byte: len_byte,
                    })
                }
            }
        }
    }

    /// Writes the name uncompressed: length-prefixed labels, then a zero byte.
    pub fn write<W: WireWrite + ?Sized>(&self, writer: &mut W) -> Result<()> {
        for label in &self.labels {
            if label.len() > MAX_LABEL_LENGTH {
                return Err(WireError::LabelTooLong {
                    length: label.len(),
                });
            }
            writer.put_u8(label.len() as u8)?;
            writer.put_slice(label)?;
        }
        writer.put_u8(0)
    }
}

/// Consumes the escape following a backslash: three decimal digits for a
/// raw byte, otherwise the next character taken literally.
fn push_escaped(chars: &mut Chars<'_>, label: &mut Label, name: &str) -> Result<()> {
    let invalid = || WireError::InvalidEscape(name.to_string());
    let first = chars.next().ok_or_else(invalid)?;

    match first.to_digit(10) {
        Some(high) => {
            let mut value = high;
            for _ in 0..2 {
                let digit = chars
                    .next()
                    .and_then(|c| c.to_digit(10))
                    .ok_or_else(invalid)?;
                value = value * 10 + digit;
            }
            label.push(u8::try_from(value).map_err(|_| invalid())?);
        }
        None => {
            let mut utf8 = [0u8; 4];
            label.extend_from_slice(first.encode_utf8(&mut utf8).as_bytes());
        }
    }
    Ok(())
}

impl FromStr for Name {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_text(f, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_at(buf: &[u8], offset: usize) -> (Result<Name>, usize) {
        let mut reader = WireReader::new(buf);
        reader.set_position(offset);
        let name = Name::read(&mut reader);
        (name, reader.position())
    }

    #[test]
    fn test_parse_and_display() {
        let name = Name::parse("www.Example.com.").unwrap();
        assert_eq!(name.label_count(), 3);
        assert_eq!(name.to_string(), "www.Example.com");
        assert_eq!(name.to_lowercase_key(), "www.example.com");
        assert_eq!(Name::parse("").unwrap(), Name::root());
        assert_eq!(Name::root().to_string(), ".");
    }

    #[test]
    fn test_parse_rejects_bad_labels() {
        assert!(matches!(
            Name::parse("a..b"),
            Err(WireError::EmptyLabel(_))
        ));
        let long = "x".repeat(64);
        assert_eq!(
            Name::parse(&long),
            Err(WireError::LabelTooLong { length: 64 })
        );
        let huge = vec!["abcdefghij"; 26].join(".");
        assert!(matches!(
            Name::parse(&huge),
            Err(WireError::NameTooLong { .. })
        ));
    }

    #[test]
    fn test_write_uncompressed() {
        let mut buf = Vec::new();
        Name::parse("example.com").unwrap().write(&mut buf).unwrap();
        assert_eq!(buf, b"\x07example\x03com\x00");
    }

    #[test]
    fn test_read_plain_name_advances_past_terminator() {
        let buf = b"\x03www\x07example\x03com\x00\xff";
        let (name, pos) = read_at(buf, 0);
        assert_eq!(name.unwrap().to_string(), "www.example.com");
        assert_eq!(pos, 17);
    }

    #[test]
    fn test_read_pointer_restores_cursor_after_first_pointer() {
        // "example.com" at 0, then "www" + pointer to 0 at 13.
        let buf = b"\x07example\x03com\x00\x03www\xc0\x00\xaa";
        let (name, pos) = read_at(buf, 13);
        assert_eq!(name.unwrap().to_string(), "www.example.com");
        assert_eq!(pos, 19);
    }

    #[test]
    fn test_read_follows_pointer_chain() {
        // 0: "com", 5: "example" + ptr(0), 15: "www" + ptr(5)
        let buf = b"\x03com\x00\x07example\xc0\x00\x03www\xc0\x05";
        let (name, pos) = read_at(buf, 15);
        assert_eq!(name.unwrap().to_string(), "www.example.com");
        assert_eq!(pos, buf.len());
    }

    #[test]
    fn test_self_pointer_is_rejected() {
        let (name, _) = read_at(&[0xC0, 0xC0], 0);
        assert!(matches!(
            name,
            Err(WireError::InvalidCompressionPointer { .. })
        ));

        let (name, _) = read_at(&[0xC0, 0x00], 0);
        assert_eq!(
            name,
            Err(WireError::InvalidCompressionPointer {
                offset: 0,
                target: 0
            })
        );
    }

    #[test]
    fn test_pointer_into_own_labels_is_rejected() {
        // "a" then a pointer back to the start of the same name.
        let buf = b"\x00\x01a\xc0\x01";
        let (name, _) = read_at(buf, 1);
        assert!(matches!(
            name,
            Err(WireError::InvalidCompressionPointer { .. })
        ));
    }

    #[test]
    fn test_two_pointers_cycling_are_rejected() {
        // 2: ptr -> 4, 4: ptr -> 2 (forward pointer fails first)
        let buf = b"\x00\x00\xc0\x04\xc0\x02";
        let (name, _) = read_at(buf, 2);
        assert!(name.is_err());
        let (name, _) = read_at(buf, 4);
        assert!(name.is_err());
    }

    #[test]
    fn test_truncated_label_is_eof() {
        let (name, _) = read_at(b"\x05ab", 0);
        assert_eq!(name, Err(WireError::UnexpectedEof { offset: 6 }));
    }

    #[test]
    fn test_reserved_label_type_is_rejected() {
        let (name, _) = read_at(&[0x40, 0x00], 0);
        assert_eq!(
            name,
            Err(WireError::UnknownLabelType {
                offset: 0,
                byte: 0x40
            })
        );
    }

    #[test]
    fn test_dot_inside_label_gets_its_own_key() {
        let single = Name::from_labels(["www.example", "com"]).unwrap();
        let split = Name::parse("www.example.com").unwrap();

        assert_ne!(single, split);
        assert_eq!(single.to_string(), r"www\.example.com");
        assert_ne!(single.to_lowercase_key(), split.to_lowercase_key());
        assert_eq!(Name::parse(r"www\.example.com").unwrap(), single);
    }

    #[test]
    fn test_binary_label_survives_read_display_and_write() {
        let buf = b"\x02\xffa\x03com\x00";
        let (name, pos) = read_at(buf, 0);
        let name = name.unwrap();
        assert_eq!(pos, buf.len());
        assert_eq!(name.labels().next(), Some(&b"\xffa"[..]));
        assert_eq!(name.to_string(), r"\255a.com");
        assert_eq!(Name::parse(r"\255a.com").unwrap(), name);

        let mut out = Vec::new();
        name.write(&mut out).unwrap();
        assert_eq!(out, buf);
    }

    #[test]
    fn test_lowercase_key_ignores_ascii_case_only() {
        let upper = Name::parse("WWW.Example.COM").unwrap();
        let lower = Name::parse("www.example.com").unwrap();
        assert!(upper.eq_ignore_case(&lower));
        assert_eq!(upper.to_lowercase_key(), lower.to_lowercase_key());
        assert_eq!(Name::root().to_lowercase_key(), ".");
    }

    #[test]
    fn test_bad_escapes_are_rejected() {
        assert!(matches!(
            Name::parse(r"ab\2"),
            Err(WireError::InvalidEscape(_))
        ));
        assert!(matches!(
            Name::parse(r"\256.com"),
            Err(WireError::InvalidEscape(_))
        ));
        assert!(matches!(
            Name::parse("trailing\\"),
            Err(WireError::InvalidEscape(_))
        ));
    }
}
