//! zippy - delivery package records
//!
//! Validation, persistence and a small HTTP API for sender/receiver/location
//! package records.

pub mod cli;
pub mod config;
pub mod http_server;
pub mod observability;
pub mod package;
pub mod storage;
