//! Shared building blocks for the LocalPro Canvas client: wire models, field
//! validation, the portfolio wizard, configuration and template rendering.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![deny(warnings, clippy::pedantic)]
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod models;
pub mod render;
pub mod routes;
pub mod validation;
pub mod wizard;
