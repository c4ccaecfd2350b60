#![allow(dead_code)]
pub mod packets;

pub use packets::*;
