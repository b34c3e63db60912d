//! # ZChain SDK Test Suite
//!
//! End-to-end scenarios wired through `SdkContext` over a mock transport.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs     # mock network, confirmation chains
//!     ├── scenarios.rs    # balance, verification, nonce and tie-break cases
//!     └── lifecycle.rs    # bootstrap, refresh, execute
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sdk-tests
//! cargo bench -p sdk-tests
//! ```

#![allow(dead_code)]

pub mod integration;
