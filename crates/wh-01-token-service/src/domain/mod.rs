//! # Domain Layer
//!
//! Token claims, the signing secret and header inspection. No clocks, no I/O.

pub mod claims;
pub mod errors;
pub mod header;
pub mod secret;
