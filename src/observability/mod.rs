//! Observability for zippy
//!
//! Structured JSON logging only. Every store mutation and every swallowed
//! persistence failure produces exactly one log line.
//!
//! ```ignore
//! use zippy::observability::Logger;
//!
//! Logger::info("PACKAGE_CREATED", &[("id", "k3x9q1lmz8")]);
//! ```

mod logger;

pub use logger::{Logger, Severity};
