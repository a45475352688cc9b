use crate::dns_record::QueryType;
use crate::DomainName;

/// A single-question, non-recursive query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub id: u16,
    pub name: DomainName,
    pub query_type: QueryType,
}

impl Query {
    pub fn new(id: u16, name: DomainName, query_type: QueryType) -> Self {
        Self {
            id,
            name,
            query_type,
        }
    }
}
