use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Seconds to wait for each server's reply.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_max_referrals")]
    pub max_referrals: usize,

    #[serde(default = "default_max_cname_chain")]
    pub max_cname_chain: usize,

    /// File listing root server addresses, one per line.
    #[serde(default)]
    pub root_hints: Option<String>,
}

impl ResolverConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            query_timeout: default_query_timeout(),
            port: default_port(),
            max_referrals: default_max_referrals(),
            max_cname_chain: default_max_cname_chain(),
            root_hints: None,
        }
    }
}

fn default_query_timeout() -> u64 {
    10
}

fn default_port() -> u16 {
    53
}

fn default_max_referrals() -> usize {
    16
}

fn default_max_cname_chain() -> usize {
    8
}
