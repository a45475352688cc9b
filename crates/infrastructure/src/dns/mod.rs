pub mod resolver;
pub mod root_hints;
pub mod transport;
pub mod wire;

pub use resolver::{EngineConfig, IterativeResolver, LookupMode, Resolution};
pub use root_hints::RootHints;
pub use transport::{DnsTransport, TransportResponse, UdpTransport};
