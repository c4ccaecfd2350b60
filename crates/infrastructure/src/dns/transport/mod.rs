pub mod key;
pub mod udp;

pub use key::TransactionKey;
pub use udp::UdpClient;
