//! Middleware components for HTTP request processing.
//!
//! Two layers guard the protected routes: `auth` validates the bearer token
//! and attaches the verified session claims to the request, `role` then
//! checks the attached claims against the role an endpoint requires. They
//! are layered with Axum's routing system so every protected request passes
//! the session check before any role check runs.

pub mod auth;
pub mod role;
