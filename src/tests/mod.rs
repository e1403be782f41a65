//! Integration and unit tests for the ZahnArchiv application.
//!
//! This module organizes all test modules for the application, providing
//! coverage for the HTTP surface and the components behind it.
//!
//! ## Test Modules
//!
//! - **api_tests**: End-to-end tests over the assembled router
//! - **auth_tests**: Credential store and session-token service tests
//! - **query_tests**: Role scoping, filtering, and pagination tests
//! - **db_tests**: Schema and constraint tests
//! - **config_tests**: Configuration loading and validation tests
//! - **error_tests**: Error mapping and response shape tests
//!
//! ## Running Tests
//!
//! Tests can be run using:
//! ```bash
//! cargo test
//! ```
//!
//! Individual test modules can be run with:
//! ```bash
//! cargo test api_tests
//! cargo test query_tests
//! # etc.
//! ```

pub mod auth_tests;
pub mod config_tests;
