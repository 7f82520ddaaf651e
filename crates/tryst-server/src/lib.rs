//! # Tryst Server - HTTP Boundary
//!
//! Thin transport shell around [`tryst_core::SessionRegistry`]: each inbound
//! request is decoded into one of the registry operations, forwarded, and
//! the outcome rendered as a JSON response. Every failure, whatever its
//! kind, collapses to a single generic client-error response on the wire.
//!
//! ## Modules
//!
//! - [`config`]: Server configuration with optional TOML file loading
//! - [`server`]: [`SignalServer`] - router, handlers, and process lifecycle
//! - [`wire`]: Request/response shapes with their exact wire field names

#![forbid(unsafe_code)]

pub mod config;
pub mod server;
pub mod wire;

pub use config::ServerConfig;
pub use server::{ServerState, SignalServer};
