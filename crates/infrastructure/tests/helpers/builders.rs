#![allow(dead_code)]
use std::net::Ipv4Addr;

const TYPE_A: u16 = 1;
const TYPE_NS: u16 = 2;
const TYPE_CNAME: u16 = 5;
const TYPE_MX: u16 = 15;
const CLASS_IN: u16 = 1;

/// Writes a name as uncompressed labels.
pub fn wire_name(name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in name.trim_end_matches('.').split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

fn record(owner: &str, rtype: u16, rdata: &[u8]) -> Vec<u8> {
    let mut out = wire_name(owner);
    out.extend_from_slice(&rtype.to_be_bytes());
    out.extend_from_slice(&CLASS_IN.to_be_bytes());
    out.extend_from_slice(&300u32.to_be_bytes());
    out.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
    out.extend_from_slice(rdata);
    out
}

/// Assembles response datagrams record by record.
pub struct ResponseBuilder {
    id: u16,
    flags: u16,
    question: Option<(String, u16)>,
    answers: Vec<Vec<u8>>,
    authorities: Vec<Vec<u8>>,
    additionals: Vec<Vec<u8>>,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self {
            id: 0,
            flags: 0x8000,
            question: None,
            answers: Vec::new(),
            authorities: Vec::new(),
            additionals: Vec::new(),
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn rcode(mut self, rcode: u8) -> Self {
        self.flags = (self.flags & !0x000F) | rcode as u16;
        self
    }

    pub fn authoritative(mut self) -> Self {
        self.flags |= 0x0400;
        self
    }

    pub fn truncated(mut self) -> Self {
        self.flags |= 0x0200;
        self
    }

    pub fn question(mut self, name: &str, qtype: u16) -> Self {
        self.question = Some((name.to_string(), qtype));
        self
    }

    pub fn answer_a(mut self, owner: &str, addr: Ipv4Addr) -> Self {
        self.answers.push(record(owner, TYPE_A, &addr.octets()));
        self
    }

    pub fn answer_cname(mut self, owner: &str, target: &str) -> Self {
        self.answers.push(record(owner, TYPE_CNAME, &wire_name(target)));
        self
    }

    pub fn answer_mx(mut self, owner: &str, preference: u16, exchange: &str) -> Self {
        let mut rdata = preference.to_be_bytes().to_vec();
        rdata.extend_from_slice(&wire_name(exchange));
        self.answers.push(record(owner, TYPE_MX, &rdata));
        self
    }

    pub fn answer_raw(mut self, owner: &str, rtype: u16, rdata: &[u8]) -> Self {
        self.answers.push(record(owner, rtype, rdata));
        self
    }

    pub fn authority_ns(mut self, zone: &str, ns: &str) -> Self {
        self.authorities.push(record(zone, TYPE_NS, &wire_name(ns)));
        self
    }

    pub fn additional_a(mut self, owner: &str, addr: Ipv4Addr) -> Self {
        self.additionals.push(record(owner, TYPE_A, &addr.octets()));
        self
    }

    pub fn additional_raw(mut self, owner: &str, rtype: u16, rdata: &[u8]) -> Self {
        self.additionals.push(record(owner, rtype, rdata));
        self
    }

    /// Referral to a single name server with one glue address.
    pub fn referral(self, zone: &str, ns: &str, glue: Ipv4Addr) -> Self {
        self.authority_ns(zone, ns).additional_a(ns, glue)
    }

    pub fn build(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(512);
        out.extend_from_slice(&self.id.to_be_bytes());
        out.extend_from_slice(&self.flags.to_be_bytes());
        let qdcount: u16 = if self.question.is_some() { 1 } else { 0 };
        out.extend_from_slice(&qdcount.to_be_bytes());
        out.extend_from_slice(&(self.answers.len() as u16).to_be_bytes());
        out.extend_from_slice(&(self.authorities.len() as u16).to_be_bytes());
        out.extend_from_slice(&(self.additionals.len() as u16).to_be_bytes());

        if let Some((name, qtype)) = &self.question {
            out.extend_from_slice(&wire_name(name));
            out.extend_from_slice(&qtype.to_be_bytes());
            out.extend_from_slice(&CLASS_IN.to_be_bytes());
        }
        for rr in self
            .answers
            .iter()
            .chain(&self.authorities)
            .chain(&self.additionals)
        {
            out.extend_from_slice(rr);
        }
        out
    }
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}
