use rootwalk_domain::config::ResolverConfig;
use std::time::Duration;

/// Limits and timing for one resolver instance.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub query_timeout: Duration,

    pub port: u16,

    pub max_referrals: usize,

    pub max_cname_chain: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from(&ResolverConfig::default())
    }
}

impl From<&ResolverConfig> for EngineConfig {
    fn from(config: &ResolverConfig) -> Self {
        Self {
            query_timeout: config.query_timeout(),
            port: config.port,
            max_referrals: config.max_referrals,
            max_cname_chain: config.max_cname_chain,
        }
    }
}

impl EngineConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_max_referrals(mut self, max_referrals: usize) -> Self {
        self.max_referrals = max_referrals;
        self
    }

    pub fn with_max_cname_chain(mut self, max_cname_chain: usize) -> Self {
        self.max_cname_chain = max_cname_chain;
        self
    }
}
