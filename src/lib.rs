//! # ZahnArchiv Backend Library
//!
//! Core library for ZahnArchiv, a REST backend that lets uploader and
//! reviewer staff register, authenticate, and exchange patient-scan
//! metadata records.
//!
//! ## Architecture
//!
//! The application is built using:
//! - **Axum**: HTTP server, routing, and middleware layering
//! - **SQLx**: Asynchronous database operations with SQLite
//! - **Tokio**: Async runtime for concurrent request handling
//! - **Serde**: Serialization/deserialization for JSON APIs
//! - **jsonwebtoken / bcrypt**: Signed session tokens and password hashing
//!
//! ## Core Components
//!
//! - [`auth`]: Credential verification and session-token issuance
//! - [`config`]: Application configuration management
//! - [`db`]: Database schema initialization
//! - [`error`]: Centralized error handling and HTTP error responses
//! - [`middleware`]: Session and role guards for protected routes
//! - [`records`]: Scan-record repository and the role-scoped query engine
//! - [`routes`]: HTTP API endpoint handlers and router assembly
//! - [`state`]: Shared application state and component composition
//! - [`types`]: Data transfer objects and shared type definitions

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod records;
pub mod routes;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
