use compact_str::CompactString;
use ferrous_resolver_domain::{Message, RecordClass, RecordType};

/// Correlates an outbound query with the datagram that answers it.
///
/// The name is lowercased so upstreams that randomize case still match.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransactionKey {
    pub id: u16,
    pub domain: CompactString,
    pub record_type: RecordType,
    pub class: RecordClass,
}

impl TransactionKey {
    #[inline]
    pub fn from_message(message: &Message) -> Self {
        let header = &message.header;
        Self {
            id: header.id,
            domain: header.query_name.to_lowercase_key(),
            record_type: header.query_type,
            class: header.query_class,
        }
    }
}
