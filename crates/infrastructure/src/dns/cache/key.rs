use compact_str::CompactString;
use ferrous_resolver_domain::{Message, Name, RecordClass, RecordType};

/// Question identity: lowercased name, type and class.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub domain: CompactString,
    pub record_type: RecordType,
    pub class: RecordClass,
}

impl CacheKey {
    #[inline]
    pub fn new(name: &Name, record_type: RecordType, class: RecordClass) -> Self {
        Self {
            domain: name.to_lowercase_key(),
            record_type,
            class,
        }
    }

    #[inline]
    pub fn from_query(query: &Message) -> Self {
        let header = &query.header;
        Self::new(&header.query_name, header.query_type, header.query_class)
    }
}
