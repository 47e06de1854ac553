//! An in-process HTTP server answered by a one-shot HTTP client.
//!
//! This crate contains all the moving parts. The application itself, via
//! `main.rs`, is only a very tiny frontend.
//!
//! The [`http`] module provides a listener that answers every request with
//! a fixed JSON document and reports what it received on stdout. The
//! [`client`] module sends a single JSON POST request to it. The
//! [`Operation`] ties the two together.

pub use self::config::Config;
pub use self::error::{ExitError, Failed};
pub use self::operation::Operation;

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod log;
pub mod operation;
pub mod utils;
