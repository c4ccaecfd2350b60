use ferrous_resolver_domain::{Message, Name, RecordType, Resource, ResourceRecord};
use std::net::{IpAddr, Ipv4Addr};

pub const EXAMPLE_IP: Ipv4Addr = Ipv4Addr::new(93, 184, 216, 34);

pub fn query(domain: &str, record_type: RecordType) -> Message {
    Message::query(Name::parse(domain).unwrap(), record_type)
}

pub fn query_with_id(domain: &str, id: u16) -> Message {
    let mut q = query(domain, RecordType::A);
    q.header.id = id;
    q
}

/// Response to `query` with one A record per TTL in `ttls`.
pub fn a_answer(query: &Message, ttls: &[u32], ip: Ipv4Addr) -> Message {
    let mut answer = Message::response_to(query);
    answer.header.set_recursion_available(true);
    for ttl in ttls {
        answer.push_answer(ResourceRecord::new(
            query.header.query_name.clone(),
            RecordType::A,
            *ttl,
            Resource::Address(IpAddr::V4(ip)),
        ));
    }
    answer
}

pub fn first_address(message: &Message) -> Option<IpAddr> {
    message
        .answers
        .first()
        .and_then(|r| r.resource.as_ref())
        .and_then(Resource::as_address)
}
