mod record_type;

pub use record_type::{QueryType, RecordType};

use crate::DomainName;
use std::net::Ipv4Addr;

pub const CLASS_IN: u16 = 1;

/// Record data, interpreted for the types the resolver acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RData {
    A(Ipv4Addr),
    Ns(DomainName),
    Cname(DomainName),
    Mx {
        preference: u16,
        exchange: DomainName,
    },
    Unknown(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: DomainName,
    pub record_type: RecordType,
    pub class: u16,
    pub ttl: u32,
    pub rdata_length: u16,
    pub rdata: RData,
}

impl ResourceRecord {
    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        match self.rdata {
            RData::A(addr) => Some(addr),
            _ => None,
        }
    }

    pub fn cname_target(&self) -> Option<&DomainName> {
        match &self.rdata {
            RData::Cname(target) => Some(target),
            _ => None,
        }
    }

    pub fn mx_exchange(&self) -> Option<&DomainName> {
        match &self.rdata {
            RData::Mx { exchange, .. } => Some(exchange),
            _ => None,
        }
    }
}
