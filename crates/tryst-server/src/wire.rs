//! Request and response shapes for the HTTP boundary.
//!
//! Field names on the wire are camelCase (`hostId`, `guestDescription`);
//! serde rename attributes bridge them to Rust naming. Absent request fields
//! deserialize to empty strings and are rejected by the registry's own
//! validation, so the boundary never distinguishes "missing" from "empty".

use serde::{Deserialize, Serialize};

/// Error message every failed request carries, regardless of failure kind.
pub const ERROR_MESSAGE: &str = "that's an error";

/// Body of `POST /host`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterHostRequest {
    /// Host connection description to advertise
    #[serde(default)]
    pub description: String,
    /// Optional caller-chosen session id
    #[serde(default)]
    pub id: String,
}

/// Success body of `POST /host`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterHostResponse {
    /// Id guests join the session with
    pub id: String,
}

/// Query parameters of `GET /host`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchHostQuery {
    /// Session id to look up
    #[serde(default)]
    pub id: String,
}

/// Success body of `GET /host`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchHostResponse {
    /// Echo of the looked-up session id
    pub id: String,
    /// The host's connection description
    pub description: String,
}

/// Body of `POST /guest`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterGuestRequest {
    /// Id of the session to join
    #[serde(default)]
    pub host_id: String,
    /// Guest connection description to deposit
    #[serde(default)]
    pub guest_description: String,
}

/// Query parameters of `GET /guest`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchGuestQuery {
    /// Id of the session to poll
    #[serde(default)]
    pub host_id: String,
}

/// Success body of `GET /guest`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchGuestResponse {
    /// Deposited guest description, empty while no guest has joined
    pub guest_description: String,
}

/// Empty success body (`POST /guest`, `GET /debug`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Empty {}

/// Flat error body for every failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Fixed, intentionally uninformative message
    pub error: String,
}

impl ErrorBody {
    /// The one error body the service ever sends.
    pub fn generic() -> Self {
        Self {
            error: ERROR_MESSAGE.to_string(),
        }
    }
}
