//! DNS wire format (RFC 1035): names, header, resource data and messages.

pub mod buffer;
pub mod error;
pub mod header;
pub mod message;
pub mod name;
pub mod record;
pub mod resource;
pub mod types;

pub use buffer::{SliceWriter, WireReader, WireWrite};
pub use error::WireError;
pub use header::Header;
pub use message::Message;
pub use name::{Label, Name};
pub use record::ResourceRecord;
pub use resource::{
    MailExchange, Resource, ResourceKind, ServiceBinding, StartOfAuthority, SvcParamKey,
    SvcParamValue, TextResource,
};
pub use types::{Opcode, RecordClass, RecordType, ResponseCode};

/// Largest UDP payload a datagram can carry.
pub const MAX_UDP_PAYLOAD: usize = 65527;

pub const HEADER_LEN: usize = 12;

pub const MAX_NAME_LENGTH: usize = 255;

pub const MAX_LABEL_LENGTH: usize = 63;
