pub mod cache;
pub mod server;
pub mod transport;

pub use cache::{CacheKey, TtlCache};
pub use server::{ServerHandle, UdpServer};
pub use transport::{TransactionKey, UdpClient};
