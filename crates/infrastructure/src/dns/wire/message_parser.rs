//! DNS Message Decoder
//!
//! Walks a response with an explicit cursor: the 12-byte header, the question
//! section, then the answer, authority and additional records in order. Every
//! read is bounds-checked against the datagram.

use super::name::decode_name;
use rootwalk_domain::{
    DomainError, DomainName, Header, Message, Question, RData, RecordType, ResourceRecord,
    ResponseCode, HEADER_LEN,
};
use std::net::Ipv4Addr;
use tracing::debug;

const FLAG_QR: u16 = 1 << 15;
const OPCODE_MASK: u16 = 0x7800;
const OPCODE_SHIFT: u16 = 11;
const FLAG_AA: u16 = 1 << 10;
const FLAG_TC: u16 = 1 << 9;
const FLAG_RD: u16 = 1 << 8;
const FLAG_RA: u16 = 1 << 7;
const Z_MASK: u16 = 0x0070;
const Z_SHIFT: u16 = 4;
const RCODE_MASK: u16 = 0x000F;

struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8], pos: usize) -> Self {
        Self { buf, pos }
    }

    fn take(&mut self, n: usize, what: &str) -> Result<&'a [u8], DomainError> {
        let end = self.pos.checked_add(n).filter(|&end| end <= self.buf.len());
        match end {
            Some(end) => {
                let buf: &'a [u8] = self.buf;
                let bytes = &buf[self.pos..end];
                self.pos = end;
                Ok(bytes)
            }
            None => Err(DomainError::MalformedMessage(format!(
                "{} at offset {} needs {} bytes, message has {}",
                what,
                self.pos,
                n,
                self.buf.len()
            ))),
        }
    }

    fn read_u16(&mut self, what: &str) -> Result<u16, DomainError> {
        let b = self.take(2, what)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn read_u32(&mut self, what: &str) -> Result<u32, DomainError> {
        let b = self.take(4, what)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn read_name(&mut self) -> Result<DomainName, DomainError> {
        let (name, next) = decode_name(self.buf, self.pos)?;
        self.pos = next;
        Ok(name)
    }
}

/// Decodes DNS response messages from wire format
pub struct MessageDecoder;

impl MessageDecoder {
    pub fn decode_header(buf: &[u8]) -> Result<Header, DomainError> {
        let mut cursor = Cursor::new(buf, 0);
        Self::read_header(&mut cursor)
    }

    /// Decodes a complete message.
    ///
    /// A response carrying RCODE 3 is reported as [`DomainError::NameError`]
    /// once its question has been read; the remaining sections are not parsed.
    pub fn decode(buf: &[u8]) -> Result<Message, DomainError> {
        let mut cursor = Cursor::new(buf, 0);
        let header = Self::read_header(&mut cursor)?;

        let mut questions = Vec::new();
        for _ in 0..header.question_count {
            questions.push(Self::read_question(&mut cursor)?);
        }

        if header.rcode == ResponseCode::NXDomain {
            let name = questions
                .first()
                .map(|q| q.name.to_string())
                .unwrap_or_else(|| ".".to_string());
            return Err(DomainError::NameError(name));
        }

        let answers = Self::read_section(&mut cursor, header.answer_count)?;
        let authorities = Self::read_section(&mut cursor, header.authority_count)?;
        let additionals = Self::read_section(&mut cursor, header.additional_count)?;

        if cursor.pos < buf.len() {
            debug!(
                trailing = buf.len() - cursor.pos,
                "Ignoring trailing bytes after last record"
            );
        }

        Ok(Message {
            header,
            questions,
            answers,
            authorities,
            additionals,
        })
    }

    fn read_header(cursor: &mut Cursor<'_>) -> Result<Header, DomainError> {
        let raw = cursor.take(HEADER_LEN, "header")?;
        let word = |i: usize| u16::from_be_bytes([raw[i], raw[i + 1]]);
        let flags = word(2);

        Ok(Header {
            id: word(0),
            response: flags & FLAG_QR != 0,
            opcode: ((flags & OPCODE_MASK) >> OPCODE_SHIFT) as u8,
            authoritative: flags & FLAG_AA != 0,
            truncated: flags & FLAG_TC != 0,
            recursion_desired: flags & FLAG_RD != 0,
            recursion_available: flags & FLAG_RA != 0,
            z: ((flags & Z_MASK) >> Z_SHIFT) as u8,
            rcode: ResponseCode::from_u8((flags & RCODE_MASK) as u8),
            question_count: word(4),
            answer_count: word(6),
            authority_count: word(8),
            additional_count: word(10),
        })
    }

    fn read_question(cursor: &mut Cursor<'_>) -> Result<Question, DomainError> {
        let name = cursor.read_name()?;
        let record_type = RecordType::from_u16(cursor.read_u16("question type")?);
        let class = cursor.read_u16("question class")?;
        Ok(Question {
            name,
            record_type,
            class,
        })
    }

    fn read_section(
        cursor: &mut Cursor<'_>,
        count: u16,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        let mut records = Vec::new();
        for _ in 0..count {
            records.push(Self::read_record(cursor)?);
        }
        Ok(records)
    }

    fn read_record(cursor: &mut Cursor<'_>) -> Result<ResourceRecord, DomainError> {
        let name = cursor.read_name()?;
        let record_type = RecordType::from_u16(cursor.read_u16("record type")?);
        let class = cursor.read_u16("record class")?;
        let ttl = cursor.read_u32("record ttl")?;
        let rdata_length = cursor.read_u16("record rdlength")?;

        let rdata_start = cursor.pos;
        let rdata_bytes = cursor.take(rdata_length as usize, "record data")?;
        let rdata_end = cursor.pos;

        let rdata = Self::read_rdata(
            cursor.buf,
            record_type,
            rdata_start,
            rdata_end,
            rdata_bytes,
        )?;

        Ok(ResourceRecord {
            name,
            record_type,
            class,
            ttl,
            rdata_length,
            rdata,
        })
    }

    /// Interprets rdata. Names inside rdata may point anywhere earlier in the
    /// message, so they are decoded against the full buffer but must end
    /// within the record's own rdata.
    fn read_rdata(
        buf: &[u8],
        record_type: RecordType,
        start: usize,
        end: usize,
        bytes: &[u8],
    ) -> Result<RData, DomainError> {
        let name_within = |offset: usize| -> Result<DomainName, DomainError> {
            let (name, next) = decode_name(buf, offset)?;
            if next > end {
                return Err(DomainError::MalformedMessage(format!(
                    "{} rdata name overruns its record at offset {}",
                    record_type, start
                )));
            }
            Ok(name)
        };

        match record_type {
            RecordType::A => {
                let octets: [u8; 4] = bytes.try_into().map_err(|_| {
                    DomainError::MalformedMessage(format!(
                        "A record at offset {} has rdlength {}",
                        start,
                        bytes.len()
                    ))
                })?;
                Ok(RData::A(Ipv4Addr::from(octets)))
            }
            RecordType::NS => Ok(RData::Ns(name_within(start)?)),
            RecordType::CNAME => Ok(RData::Cname(name_within(start)?)),
            RecordType::MX => {
                if bytes.len() < 3 {
                    return Err(DomainError::MalformedMessage(format!(
                        "MX record at offset {} has rdlength {}",
                        start,
                        bytes.len()
                    )));
                }
                let preference = u16::from_be_bytes([bytes[0], bytes[1]]);
                let exchange = name_within(start + 2)?;
                Ok(RData::Mx {
                    preference,
                    exchange,
                })
            }
            _ => Ok(RData::Unknown(bytes.to_vec())),
        }
    }
}
