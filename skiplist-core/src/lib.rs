//! Core types shared by the concurrent ordered skiplist engine.
//!
//! This crate carries the parts of the engine that have no business
//! touching a raw pointer: the error type callers can actually observe,
//! and the tunable configuration (fanout, max layer) the engine is built
//! from.
//!
//! # Example
//!
//! ```
//! use skiplist_core::ListConfig;
//!
//! let config = ListConfig::default();
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod error;

pub use config::ListConfig;
pub use error::{Error, Result};
