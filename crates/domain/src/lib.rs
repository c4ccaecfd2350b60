//! Ferrous Resolver Domain Layer
pub mod config;
pub mod errors;
pub mod wire;

pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use wire::{
    Header, Message, Name, Opcode, RecordClass, RecordType, Resource, ResourceKind,
    ResourceRecord, ResponseCode, WireError,
};
