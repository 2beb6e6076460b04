//! Infrastructure layer: concrete implementations of the domain
//! interfaces and the wire-protocol DTOs.

pub mod broadcaster;
pub mod dto;
pub mod store;
