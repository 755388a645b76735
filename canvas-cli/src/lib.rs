//! Client library behind the `canvas` command: the HTTP client, credential
//! session, intake flow and logging setup.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![deny(warnings, clippy::pedantic)]
#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod errors;
pub mod intake;
pub mod session;
pub mod telemetry;
