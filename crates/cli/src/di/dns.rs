use ferrous_resolver_application::ports::DnsResolver;
use ferrous_resolver_domain::Config;
use ferrous_resolver_infrastructure::dns::{TtlCache, UdpClient, UdpServer};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub server: UdpServer,
    pub cache: Option<Arc<TtlCache>>,
}

impl DnsServices {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let upstream = config.upstream_addr()?;
        let client = Arc::new(UdpClient::with_timeout(upstream, config.upstream.timeout()).await?);
        info!(
            upstream = %upstream,
            timeout_ms = config.upstream.timeout_ms,
            "Upstream client initialized"
        );

        let (resolver, cache) = if config.cache.enabled {
            let cache = Arc::new(TtlCache::new(client));
            info!(purge_interval_secs = config.cache.purge_interval_secs, "Cache enabled");
            (cache.clone() as Arc<dyn DnsResolver>, Some(cache))
        } else {
            info!("Cache disabled");
            (client as Arc<dyn DnsResolver>, None)
        };

        let server = UdpServer::from_config(config.bind_addr()?, &config.server, resolver).await?;

        Ok(Self { server, cache })
    }
}
