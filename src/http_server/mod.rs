//! # HTTP Server Module
//!
//! Axum server exposing the package store.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /api/packages` - Create a package from a form submission
//! - `GET /api/packages` - List packages
//! - `GET|PATCH|DELETE /api/packages/:id` - Read, partially update, delete

pub mod health_routes;
pub mod package_routes;
pub mod server;

pub use server::HttpServer;
