use crate::wire::MAX_UDP_PAYLOAD;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound on concurrently handled datagrams. Unbounded when unset.
    #[serde(default)]
    pub max_in_flight: Option<usize>,

    #[serde(default = "default_recv_buffer_size")]
    pub recv_buffer_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            max_in_flight: None,
            recv_buffer_size: default_recv_buffer_size(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    53
}

fn default_recv_buffer_size() -> usize {
    MAX_UDP_PAYLOAD
}
