//! # Tryst Core - Session Registry
//!
//! This crate implements the session registry and exchange protocol at the
//! heart of the Tryst rendezvous service: a host deposits an opaque
//! connection description and receives an identifier, a guest joins through
//! that identifier and deposits its own description, and the host retrieves
//! the guest's description exactly once, consuming the session.
//!
//! ## Purpose
//!
//! Domain crate providing:
//! - Identifier allocation from a secure random source
//! - Deduplication of sessions by host description
//! - The host/guest state machine governing payload visibility
//! - The one-shot consumption rule that reclaims registry memory
//!
//! ## Modules
//!
//! - [`error`]: Failure taxonomy shared with the transport boundary
//! - [`id`]: Session identifier generation
//! - [`registry`]: [`SessionRegistry`] - the dual-index session store
//! - [`session`]: The [`Session`] record and its lifecycle states
//!
//! ## Design Principles
//!
//! - Single owner: the registry exclusively owns all session records; no
//!   caller holds references across operations
//! - Dual-index consistency: the id index and the description index are
//!   updated together in every operation
//! - One-shot: a matched session is visible to its host exactly once

#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod registry;
pub mod session;

pub use error::{RegistryError, RegistryResult};
pub use id::generate_session_id;
pub use registry::SessionRegistry;
pub use session::{Session, SessionState};
