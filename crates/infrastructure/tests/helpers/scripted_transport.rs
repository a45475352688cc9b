#![allow(dead_code)]
use async_trait::async_trait;
use rootwalk_domain::DomainError;
use rootwalk_infrastructure::dns::transport::{DnsTransport, TransportResponse};
use rootwalk_infrastructure::dns::wire::MessageDecoder;
use std::collections::{HashMap, VecDeque};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Reply {
    /// Sent back with the query's ID patched in.
    Respond(Vec<u8>),
    /// Sent back with an ID that differs from the query's.
    WrongId(Vec<u8>),
    /// A leftover datagram with a foreign ID arrives first, then the real
    /// answer with the query's ID.
    StaleThen(Vec<u8>),
    /// Sent back with the query's ID, but from `from` instead of the server.
    FromElsewhere { from: Ipv4Addr, bytes: Vec<u8> },
    /// Sent back exactly as given.
    Raw(Vec<u8>),
    Timeout,
}

/// Sent query as seen by the transport: server, question name, question type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentQuery {
    pub server: Ipv4Addr,
    pub name: String,
    pub qtype: u16,
}

type RouteKey = (Ipv4Addr, String, u16);

/// In-memory transport answering from a fixed script keyed by
/// (server, question name, question type). Each send queues the scripted
/// datagrams; receive hands them out in order and times out once none are
/// left.
pub struct ScriptedTransport {
    routes: HashMap<RouteKey, Reply>,
    sent: Mutex<Vec<SentQuery>>,
    inbox: Mutex<VecDeque<TransportResponse>>,
}

fn with_id(bytes: &[u8], id: u16) -> Vec<u8> {
    let mut bytes = bytes.to_vec();
    bytes[0..2].copy_from_slice(&id.to_be_bytes());
    bytes
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            sent: Mutex::new(Vec::new()),
            inbox: Mutex::new(VecDeque::new()),
        }
    }

    pub fn on(mut self, server: &str, name: &str, qtype: u16, reply: Reply) -> Self {
        let server: Ipv4Addr = server.parse().expect("server must be IPv4");
        self.routes
            .insert((server, name.to_ascii_lowercase(), qtype), reply);
        self
    }

    pub fn sent(&self) -> Vec<SentQuery> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_servers(&self) -> Vec<Ipv4Addr> {
        self.sent().into_iter().map(|q| q.server).collect()
    }

    fn datagrams(&self, id: u16, key: &RouteKey) -> Vec<TransportResponse> {
        let from = SocketAddr::from((key.0, 53));
        let reply = |bytes: Vec<u8>| TransportResponse { bytes, from };

        match self.routes.get(key) {
            Some(Reply::Respond(bytes)) => vec![reply(with_id(bytes, id))],
            Some(Reply::WrongId(bytes)) => vec![reply(with_id(bytes, id.wrapping_add(1)))],
            Some(Reply::StaleThen(bytes)) => vec![
                reply(with_id(bytes, id.wrapping_sub(1))),
                reply(with_id(bytes, id)),
            ],
            Some(Reply::FromElsewhere { from, bytes }) => vec![TransportResponse {
                bytes: with_id(bytes, id),
                from: SocketAddr::from((*from, 53)),
            }],
            Some(Reply::Raw(bytes)) => vec![reply(bytes.clone())],
            Some(Reply::Timeout) | None => Vec::new(),
        }
    }
}

impl Default for ScriptedTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsTransport for ScriptedTransport {
    async fn send(&self, message_bytes: &[u8], server: SocketAddr) -> Result<(), DomainError> {
        let query = MessageDecoder::decode(message_bytes).expect("resolver sent an undecodable query");
        let question = query.questions.first().expect("query has a question");
        assert_eq!(query.header.question_count, 1);
        assert!(!query.header.recursion_desired, "iterative queries must not set RD");

        let ip = match server {
            SocketAddr::V4(v4) => *v4.ip(),
            SocketAddr::V6(_) => panic!("resolver sent to an IPv6 server"),
        };
        let key = (
            ip,
            question.name.to_string().to_ascii_lowercase(),
            question.record_type.to_u16(),
        );

        self.sent.lock().unwrap().push(SentQuery {
            server: ip,
            name: key.1.clone(),
            qtype: key.2,
        });
        let datagrams = self.datagrams(query.header.id, &key);
        self.inbox.lock().unwrap().extend(datagrams);
        Ok(())
    }

    async fn receive(&self, timeout: Duration) -> Result<TransportResponse, DomainError> {
        self.inbox
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(DomainError::TransportTimeout {
                waited_ms: timeout.as_millis() as u64,
            })
    }

    fn protocol_name(&self) -> &'static str {
        "SCRIPTED"
    }
}
