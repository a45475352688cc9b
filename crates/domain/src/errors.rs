use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Label '{label}' is {len} bytes long (maximum 63)")]
    LabelTooLong { label: String, len: usize },

    #[error("Domain name encodes to {len} bytes (maximum 255)")]
    NameTooLong { len: usize },

    #[error("Malformed DNS message: {0}")]
    MalformedMessage(String),

    #[error("Compression pointer to offset {offset} loops or points forward")]
    PointerCycle { offset: usize },

    /// Server answered with RCODE 3 (NXDOMAIN).
    #[error("Name could not be resolved: {0} does not exist")]
    NameError(String),

    #[error("Server returned {rcode}")]
    ServerFailure { rcode: &'static str },

    #[error("Unsupported record type {0} in answer")]
    UnsupportedRRType(u16),

    #[error("No usable answer for {0}")]
    NoAnswer(String),

    #[error("Referral for {0} carried no glue records")]
    NoGlueRecords(String),

    #[error("No candidate server responded for {0}")]
    ResolutionTimeout(String),

    #[error("Gave up on {name} after {limit} referrals")]
    TooManyReferrals { name: String, limit: usize },

    #[error("CNAME chain for {name} exceeds {limit} hops")]
    CnameChainTooLong { name: String, limit: usize },

    #[error("No datagram received within {waited_ms} ms")]
    TransportTimeout { waited_ms: u64 },

    #[error("Transport I/O error: {0}")]
    TransportIo(String),
}

impl DomainError {
    /// Errors that only disqualify the server that produced them.
    pub fn is_server_failure(&self) -> bool {
        matches!(
            self,
            DomainError::MalformedMessage(_)
                | DomainError::PointerCycle { .. }
                | DomainError::ServerFailure { .. }
                | DomainError::TransportTimeout { .. }
                | DomainError::TransportIo(_)
                | DomainError::NameTooLong { .. }
        )
    }
}
