//! Root server hints
//!
//! A hints file lists one IPv4 address per line. Surrounding whitespace is
//! trimmed, blank lines and `#` comments are skipped, and entries that are
//! not IPv4 addresses are logged and ignored.

use rootwalk_domain::ConfigError;
use std::net::Ipv4Addr;
use std::path::Path;
use tracing::{debug, warn};

/// IPv4 addresses of a.root-servers.net through m.root-servers.net.
pub const IANA_ROOT_SERVERS: [Ipv4Addr; 13] = [
    Ipv4Addr::new(198, 41, 0, 4),
    Ipv4Addr::new(170, 247, 170, 2),
    Ipv4Addr::new(192, 33, 4, 12),
    Ipv4Addr::new(199, 7, 91, 13),
    Ipv4Addr::new(192, 203, 230, 10),
    Ipv4Addr::new(192, 5, 5, 241),
    Ipv4Addr::new(192, 112, 36, 4),
    Ipv4Addr::new(198, 97, 190, 53),
    Ipv4Addr::new(192, 36, 148, 17),
    Ipv4Addr::new(192, 58, 128, 30),
    Ipv4Addr::new(193, 0, 14, 129),
    Ipv4Addr::new(199, 7, 83, 42),
    Ipv4Addr::new(202, 12, 27, 33),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootHints {
    servers: Vec<Ipv4Addr>,
}

impl RootHints {
    pub fn builtin() -> Self {
        Self {
            servers: IANA_ROOT_SERVERS.to_vec(),
        }
    }

    pub fn new(servers: Vec<Ipv4Addr>) -> Self {
        Self { servers }
    }

    pub fn parse(contents: &str) -> Self {
        let mut servers = Vec::new();

        for (line_no, line) in contents.lines().enumerate() {
            let entry = line.trim();
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }
            match entry.parse::<Ipv4Addr>() {
                Ok(addr) => servers.push(addr),
                Err(_) => {
                    warn!(line = line_no + 1, entry = %entry, "Skipping invalid root hint");
                }
            }
        }

        Self { servers }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.display().to_string(), e.to_string()))?;

        let hints = Self::parse(&contents);
        if hints.servers.is_empty() {
            return Err(ConfigError::Validation(format!(
                "Root hints file {} lists no IPv4 addresses",
                path.display()
            )));
        }

        debug!(path = %path.display(), servers = hints.servers.len(), "Root hints loaded");
        Ok(hints)
    }

    /// Reads `path` when one is configured, otherwise uses the built-in list.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(Path::new(path)),
            None => Ok(Self::builtin()),
        }
    }

    pub fn servers(&self) -> &[Ipv4Addr] {
        &self.servers
    }

    pub fn into_servers(self) -> Vec<Ipv4Addr> {
        self.servers
    }
}
