//! # roster-client
//!
//! HTTP client for the remote roster API (TibiaData-style).
//!
//! Implements the [`RosterSource`](roster_core::RosterSource) port: full
//! guild snapshot and single-character lookups, decoded through strict typed
//! structs that fail closed on unexpected shapes. Requests carry a hard
//! timeout; timeouts are reported distinctly from generic fetch failures.

pub mod client;
pub mod wire;

pub use client::RosterClient;
