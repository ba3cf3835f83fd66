//! # Ports Layer
//!
//! - `inbound`: what request middleware calls
//! - `outbound`: what the service needs from its environment

pub mod inbound;
pub mod outbound;
