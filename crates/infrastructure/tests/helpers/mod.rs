#![allow(dead_code)]
pub mod builders;
pub mod dns_server_mock;
pub mod mock_resolver;

pub use builders::*;
pub use dns_server_mock::{MockDnsServer, MockReply};
pub use mock_resolver::CountingResolver;
