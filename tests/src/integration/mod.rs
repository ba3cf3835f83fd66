//! # Integration Flows
//!
//! Each file exercises several crates together the way a warehouse service
//! would use them.

pub mod auth_flows;
pub mod bus_flows;
