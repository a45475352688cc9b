use rootwalk_domain::{DomainError, DomainName, Message, QueryType, RData};
use std::net::Ipv4Addr;
use tracing::debug;

/// What an answer section yielded for the name being walked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Address(Ipv4Addr),
    Exchange(DomainName),
    /// A CNAME with no record of the requested type beside it.
    Alias(DomainName),
}

/// Where a decoded response leaves the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    AnswerFound(Answer),
    Referred(Vec<Ipv4Addr>),
}

/// Decides the next step from a decoded response.
///
/// With answers present, the first record of the requested type wins and a
/// CNAME is only used when no such record exists. Without answers the
/// authority section is ignored and every A record in the additional section
/// becomes a referral candidate.
pub fn interpret(
    message: &Message,
    target: &DomainName,
    query_type: QueryType,
) -> Result<Step, DomainError> {
    if message.header.answer_count > 0 {
        let mut alias: Option<&DomainName> = None;

        for record in &message.answers {
            match (&record.rdata, query_type) {
                (RData::A(addr), QueryType::A) => {
                    return Ok(Step::AnswerFound(Answer::Address(*addr)));
                }
                (RData::Mx { exchange, .. }, QueryType::MX) => {
                    return Ok(Step::AnswerFound(Answer::Exchange(exchange.clone())));
                }
                (RData::Cname(cname), _) => {
                    alias.get_or_insert(cname);
                }
                _ => {
                    let skipped = DomainError::UnsupportedRRType(record.record_type.to_u16());
                    debug!(owner = %record.name, error = %skipped, "Skipping answer record");
                }
            }
        }

        return match alias {
            Some(cname) => Ok(Step::AnswerFound(Answer::Alias(cname.clone()))),
            None => Err(DomainError::NoAnswer(target.to_string())),
        };
    }

    let glue = message.glue_addresses();
    if glue.is_empty() {
        return Err(DomainError::NoGlueRecords(target.to_string()));
    }
    Ok(Step::Referred(glue))
}

/// Progress of one walk from the root towards an answer for `target`.
#[derive(Debug)]
pub struct ResolutionState {
    pub target: DomainName,
    pub query_type: QueryType,
    candidates: Vec<Ipv4Addr>,
    referrals: usize,
}

impl ResolutionState {
    pub fn new(target: DomainName, query_type: QueryType, roots: Vec<Ipv4Addr>) -> Self {
        Self {
            target,
            query_type,
            candidates: roots,
            referrals: 0,
        }
    }

    pub fn candidates(&self) -> &[Ipv4Addr] {
        &self.candidates
    }

    pub fn referrals(&self) -> usize {
        self.referrals
    }

    /// Replaces the candidate set with the servers a referral named.
    pub fn refer(&mut self, next: Vec<Ipv4Addr>, limit: usize) -> Result<(), DomainError> {
        self.referrals += 1;
        if self.referrals > limit {
            return Err(DomainError::TooManyReferrals {
                name: self.target.to_string(),
                limit,
            });
        }
        self.candidates = next;
        Ok(())
    }
}
