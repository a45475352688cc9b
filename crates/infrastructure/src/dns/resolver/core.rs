use super::config::EngineConfig;
use super::state::{interpret, Answer, ResolutionState, Step};
use crate::dns::transport::DnsTransport;
use crate::dns::wire::{MessageDecoder, QueryEncoder};
use rootwalk_domain::{DomainError, DomainName, Message, Query, QueryType, ResponseCode};
use std::net::{Ipv4Addr, SocketAddr};
use tokio::time::Instant;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMode {
    Address,
    MailExchange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub name: DomainName,
    pub address: Ipv4Addr,
    /// Mail exchange the address belongs to, for mail lookups.
    pub exchange: Option<DomainName>,
}

/// Resolves names by walking referrals down from the root servers.
///
/// Every walk starts from the root set, tries candidate servers strictly in
/// order over the one shared transport, and follows the glue of each
/// referral until some server answers.
pub struct IterativeResolver<T: DnsTransport> {
    transport: T,
    root_servers: Vec<Ipv4Addr>,
    config: EngineConfig,
}

impl<T: DnsTransport> IterativeResolver<T> {
    pub fn new(transport: T, root_servers: Vec<Ipv4Addr>) -> Self {
        info!(
            roots = root_servers.len(),
            protocol = transport.protocol_name(),
            "Iterative resolver created"
        );

        Self {
            transport,
            root_servers,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn root_servers(&self) -> &[Ipv4Addr] {
        &self.root_servers
    }

    pub async fn resolve(
        &self,
        name: &DomainName,
        mode: LookupMode,
    ) -> Result<Resolution, DomainError> {
        match mode {
            LookupMode::Address => self.resolve_address(name).await,
            LookupMode::MailExchange => self.resolve_mail_exchange(name).await,
        }
    }

    pub async fn resolve_address(&self, name: &DomainName) -> Result<Resolution, DomainError> {
        let address = self.lookup_address(name).await?;
        Ok(Resolution {
            name: name.clone(),
            address,
            exchange: None,
        })
    }

    /// Resolves the MX of `name`, then the address of its exchange with a
    /// fresh walk from the root.
    pub async fn resolve_mail_exchange(
        &self,
        name: &DomainName,
    ) -> Result<Resolution, DomainError> {
        let exchange = match self.follow(name, QueryType::MX).await? {
            Answer::Exchange(exchange) => exchange,
            _ => return Err(DomainError::NoAnswer(name.to_string())),
        };

        info!(name = %name, exchange = %exchange, "Mail exchange found, resolving its address");
        let address = self.lookup_address(&exchange).await?;

        Ok(Resolution {
            name: name.clone(),
            address,
            exchange: Some(exchange),
        })
    }

    async fn lookup_address(&self, name: &DomainName) -> Result<Ipv4Addr, DomainError> {
        match self.follow(name, QueryType::A).await? {
            Answer::Address(address) => Ok(address),
            _ => Err(DomainError::NoAnswer(name.to_string())),
        }
    }

    /// Walks for `name`, restarting from the root for each CNAME target
    /// until an answer of the requested type appears.
    async fn follow(&self, name: &DomainName, query_type: QueryType) -> Result<Answer, DomainError> {
        let mut target = name.clone();
        let mut hops = 0;

        loop {
            match self.walk(&target, query_type).await? {
                Answer::Alias(next) => {
                    hops += 1;
                    if hops > self.config.max_cname_chain {
                        return Err(DomainError::CnameChainTooLong {
                            name: name.to_string(),
                            limit: self.config.max_cname_chain,
                        });
                    }
                    info!(alias = %target, canonical = %next, "Following CNAME");
                    target = next;
                }
                answer => return Ok(answer),
            }
        }
    }

    async fn walk(&self, target: &DomainName, query_type: QueryType) -> Result<Answer, DomainError> {
        let query = Query::new(fastrand::u16(..), target.clone(), query_type);
        let query_bytes = QueryEncoder::encode(&query)?;
        let mut state = ResolutionState::new(target.clone(), query_type, self.root_servers.clone());

        loop {
            let message = self
                .query_candidates(&query, &query_bytes, state.candidates())
                .await?;

            info!(
                answers = message.header.answer_count,
                authority = message.header.authority_count,
                additional = message.header.additional_count,
                "Response received"
            );

            match interpret(&message, &state.target, state.query_type)? {
                Step::AnswerFound(answer) => {
                    debug!(name = %target, referrals = state.referrals(), "Walk finished");
                    return Ok(answer);
                }
                Step::Referred(next) => {
                    debug!(name = %target, servers = next.len(), "Following referral");
                    state.refer(next, self.config.max_referrals)?;
                }
            }
        }
    }

    /// Tries each candidate in order until one returns a usable response.
    async fn query_candidates(
        &self,
        query: &Query,
        query_bytes: &[u8],
        candidates: &[Ipv4Addr],
    ) -> Result<Message, DomainError> {
        for (position, ip) in candidates.iter().enumerate() {
            let server = SocketAddr::from((*ip, self.config.port));
            info!(
                server = %ip,
                kind = query.query_type.describe(),
                name = %query.name,
                "Querying server"
            );

            match self.exchange(query, query_bytes, server).await {
                Ok(message) => return Ok(message),
                Err(e) if e.is_server_failure() => {
                    warn!(server = %ip, error = %e, position = position, "Server failed, trying next");
                }
                Err(e) => return Err(e),
            }
        }

        Err(DomainError::ResolutionTimeout(query.name.to_string()))
    }

    /// Sends the query to `server` and waits up to the query timeout for its
    /// reply. Datagrams that are not a response to this query from this
    /// server are dropped and the wait continues until the deadline.
    async fn exchange(
        &self,
        query: &Query,
        query_bytes: &[u8],
        server: SocketAddr,
    ) -> Result<Message, DomainError> {
        self.transport.send(query_bytes, server).await?;

        let timeout = self.config.query_timeout;
        let deadline = Instant::now() + timeout;

        let bytes = loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(DomainError::TransportTimeout {
                    waited_ms: timeout.as_millis() as u64,
                });
            }

            let response = self.transport.receive(remaining).await?;

            if response.from.ip() != server.ip() {
                debug!(
                    expected = %server,
                    received_from = %response.from,
                    "Dropping datagram from unexpected source"
                );
                continue;
            }
            let header = match MessageDecoder::decode_header(&response.bytes) {
                Ok(header) => header,
                Err(e) => {
                    debug!(server = %server, error = %e, "Dropping undecodable datagram");
                    continue;
                }
            };
            if !header.response || header.id != query.id {
                debug!(
                    server = %server,
                    id = header.id,
                    expected_id = query.id,
                    response = header.response,
                    "Dropping datagram that does not answer the query"
                );
                continue;
            }

            break response.bytes;
        };

        let message = MessageDecoder::decode(&bytes)?;

        match message.rcode() {
            ResponseCode::NoError => {}
            rcode => {
                return Err(DomainError::ServerFailure {
                    rcode: rcode.as_str(),
                })
            }
        }

        if message.is_truncated() {
            warn!(server = %server, "Truncated response, using the records it carries");
        }

        Ok(message)
    }
}
