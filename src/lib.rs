//! # Token Relay Library
//!
//! Keeps a local JSON log of detected token events and forwards each event
//! to a remote HTTP endpoint.
//!
//! Modules:
//! - `config` — config file, endpoint configuration
//! - `store` — append records to a JSON array file, single-writer queue
//! - `forward` — POST payloads to the configured endpoint
//! - `relay` — stdin event pipeline combining both

pub mod config;
pub mod error;
pub mod forward;
pub mod relay;
pub mod store;
pub mod utils;

#[cfg(test)]
mod tests;


pub use crate::config::endpoint::EndpointConfig;
pub use crate::error::RelayError;
pub use crate::forward::client::{send_data_from_env, Forwarder};
pub use crate::store::record_store::{append_record, init_store, store_record};
pub use crate::store::writer::StoreWriter;
