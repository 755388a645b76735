//! # Configuration
//!
//! Client configuration: API base URL, session file location, request
//! timeout and logging.

mod client;

pub use client::*;
