//! # Edge-Scout Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Generator and model throughput
//! └── src/integration/  # Multi-run and real-socket flows
//!     ├── learning_loop.rs
//!     ├── exploration.rs
//!     ├── loopback.rs
//!     └── interrupt.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p scout-tests
//! cargo test -p scout-tests integration::loopback
//! cargo bench -p scout-tests
//! ```

pub mod integration;
