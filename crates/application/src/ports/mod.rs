mod dns_resolver;
mod query_filter;

pub use dns_resolver::DnsResolver;
pub use query_filter::QueryFilter;
