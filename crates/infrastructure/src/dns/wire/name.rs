//! Domain name encoding and decoding (RFC 1035 §3.1, §4.1.4)
//!
//! Names are written uncompressed. On the read side a length octet with both
//! high bits set is a compression pointer whose low 14 bits give an offset
//! into the whole message. Pointers must point strictly backwards and may not
//! revisit an offset, which bounds the walk by the message length.

use rootwalk_domain::domain_name::{MAX_LABEL_LEN, MAX_NAME_LEN};
use rootwalk_domain::{DomainError, DomainName};

const POINTER_MASK: u8 = 0xC0;
const POINTER_OFFSET_MASK: u8 = 0x3F;

/// Encodes `name` as length-prefixed labels followed by a zero octet.
pub fn encode_name(name: &DomainName) -> Result<Vec<u8>, DomainError> {
    let mut out = Vec::with_capacity(name.wire_len());
    encode_name_into(name, &mut out)?;
    Ok(out)
}

pub fn encode_name_into(name: &DomainName, out: &mut Vec<u8>) -> Result<(), DomainError> {
    let start = out.len();

    for label in name.labels() {
        if label.len() > MAX_LABEL_LEN {
            return Err(DomainError::LabelTooLong {
                label: label.clone(),
                len: label.len(),
            });
        }
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);

    let len = out.len() - start;
    if len > MAX_NAME_LEN {
        out.truncate(start);
        return Err(DomainError::NameTooLong { len });
    }
    Ok(())
}

/// Decodes the name starting at `offset` in `buf`.
///
/// Returns the name and the offset of the first byte after the name as it
/// appears at `offset`: past the terminating zero, or past the first
/// compression pointer if one was followed.
pub fn decode_name(buf: &[u8], offset: usize) -> Result<(DomainName, usize), DomainError> {
    let mut labels: Vec<String> = Vec::new();
    let mut pos = offset;
    let mut next_offset: Option<usize> = None;
    let mut visited: Vec<usize> = Vec::new();
    let mut wire_len = 1;

    loop {
        let len = *buf.get(pos).ok_or_else(|| {
            DomainError::MalformedMessage(format!("name at offset {} runs past end of message", offset))
        })?;

        match len & POINTER_MASK {
            0x00 if len == 0 => {
                pos += 1;
                break;
            }
            0x00 => {
                let start = pos + 1;
                let end = start + len as usize;
                let label = buf.get(start..end).ok_or_else(|| {
                    DomainError::MalformedMessage(format!(
                        "label at offset {} runs past end of message",
                        pos
                    ))
                })?;

                wire_len += label.len() + 1;
                if wire_len > MAX_NAME_LEN {
                    return Err(DomainError::NameTooLong { len: wire_len });
                }
                if !label.is_ascii() {
                    return Err(DomainError::MalformedMessage(format!(
                        "non-ASCII label at offset {}",
                        pos
                    )));
                }

                labels.push(String::from_utf8_lossy(label).into_owned());
                pos = end;
            }
            POINTER_MASK => {
                let low = *buf.get(pos + 1).ok_or_else(|| {
                    DomainError::MalformedMessage(format!(
                        "compression pointer at offset {} is truncated",
                        pos
                    ))
                })?;
                let target = (((len & POINTER_OFFSET_MASK) as usize) << 8) | low as usize;

                if next_offset.is_none() {
                    next_offset = Some(pos + 2);
                }
                if target >= pos || visited.contains(&target) {
                    return Err(DomainError::PointerCycle { offset: target });
                }
                visited.push(target);
                pos = target;
            }
            _ => {
                return Err(DomainError::MalformedMessage(format!(
                    "reserved label type 0x{:02x} at offset {}",
                    len, pos
                )));
            }
        }
    }

    let name = DomainName::from_labels(labels)?;
    Ok((name, next_offset.unwrap_or(pos)))
}
