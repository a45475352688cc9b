pub mod message_parser;
pub mod name;
pub mod query_builder;

pub use message_parser::MessageDecoder;
pub use name::{decode_name, encode_name};
pub use query_builder::QueryEncoder;
