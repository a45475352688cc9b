use rootwalk_domain::Config;
use rootwalk_infrastructure::dns::{EngineConfig, IterativeResolver, RootHints, UdpTransport};
use tracing::{error, info};

pub async fn build_resolver(config: &Config) -> anyhow::Result<IterativeResolver<UdpTransport>> {
    let hints = RootHints::load(config.resolver.root_hints.as_deref()).map_err(|e| {
        error!("Failed to load root hints: {}", e);
        anyhow::anyhow!(e)
    })?;

    let transport = UdpTransport::bind().await.map_err(|e| {
        error!("Failed to open UDP socket: {}", e);
        anyhow::anyhow!(e)
    })?;

    let resolver = IterativeResolver::new(transport, hints.into_servers())
        .with_config(EngineConfig::from(&config.resolver));

    info!(
        roots = resolver.root_servers().len(),
        timeout_secs = config.resolver.query_timeout,
        "Resolver ready"
    );

    Ok(resolver)
}
