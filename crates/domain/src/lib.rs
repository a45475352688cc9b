//! Rootwalk Domain Layer
pub mod config;
pub mod dns_message;
pub mod dns_query;
pub mod dns_record;
pub mod domain_name;
pub mod errors;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_message::{Header, Message, Question, ResponseCode, HEADER_LEN};
pub use dns_query::Query;
pub use dns_record::{QueryType, RData, RecordType, ResourceRecord, CLASS_IN};
pub use domain_name::DomainName;
pub use errors::DomainError;
