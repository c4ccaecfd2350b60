use crate::wire::buffer::WireReader;
use crate::wire::error::{Result, WireError};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Reads an A (4 bytes) or AAAA (16 bytes) address; any other length is a
/// format error.
pub fn read_address(reader: &mut WireReader<'_>, length: usize) -> Result<IpAddr> {
    match length {
        4 => {
            let bytes = reader.read_slice(4)?;
            Ok(IpAddr::V4(Ipv4Addr::new(bytes[0], bytes[1], bytes[2], bytes[3])))
        }
        16 => {
            let mut octets = [0u8; 16];
            octets.copy_from_slice(reader.read_slice(16)?);
            Ok(IpAddr::V6(Ipv6Addr::from(octets)))
        }
        other => Err(WireError::InvalidAddressLength(other)),
    }
}
