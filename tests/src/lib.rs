//! # Warehouse Backbone Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/  # Cross-crate flows
//! │   ├── auth_flows.rs # Token service across instances and threads
//! │   └── bus_flows.rs  # Envelopes through the channel registry
//! │
//! └── benches/          # Criterion benchmarks
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p wh-tests
//!
//! # By category
//! cargo test -p wh-tests integration::auth_flows
//! cargo test -p wh-tests integration::bus_flows
//!
//! # Benchmarks
//! cargo bench -p wh-tests
//! ```

pub mod integration;
