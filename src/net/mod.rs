//! Networking modules for the REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` performs raw HTTP exchanges, `session` mirrors the bearer
//! token into durable storage, `client` layers credential attachment and
//! session-expiry handling over both, `api` names the endpoints, and `types`
//! defines the wire schema.

pub mod api;
pub mod client;
pub mod error;
pub mod session;
#[cfg(test)]
pub(crate) mod testing;
pub mod transport;
pub mod types;
