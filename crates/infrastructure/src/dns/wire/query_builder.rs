//! DNS Query Encoder
//!
//! Builds iterative (RD=0) single-question queries in wire format.

use super::name::encode_name_into;
use rootwalk_domain::{DomainError, DomainName, Query, QueryType, CLASS_IN, HEADER_LEN};

/// Builds DNS query messages in wire format
pub struct QueryEncoder;

impl QueryEncoder {
    /// Serializes `query`: a 12-byte header with all flags clear and
    /// QDCOUNT=1, the encoded name, then QTYPE and QCLASS=IN.
    pub fn encode(query: &Query) -> Result<Vec<u8>, DomainError> {
        Self::encode_query(query.id, &query.name, query.query_type)
    }

    pub fn encode_query(
        id: u16,
        name: &DomainName,
        query_type: QueryType,
    ) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(HEADER_LEN + name.wire_len() + 4);

        buf.extend_from_slice(&id.to_be_bytes());
        buf.extend_from_slice(&0u16.to_be_bytes()); // flags
        buf.extend_from_slice(&1u16.to_be_bytes()); // qdcount
        buf.extend_from_slice(&0u16.to_be_bytes()); // ancount
        buf.extend_from_slice(&0u16.to_be_bytes()); // nscount
        buf.extend_from_slice(&0u16.to_be_bytes()); // arcount

        encode_name_into(name, &mut buf)?;

        buf.extend_from_slice(&query_type.to_u16().to_be_bytes());
        buf.extend_from_slice(&CLASS_IN.to_be_bytes());

        Ok(buf)
    }
}
