//! Bravia television remote-control integration
//!
//! - `client`: authenticated HTTP client, code table, convenience operations
//! - `command`: JSON channel envelope and response unwrapping
//! - `ircc`: legacy SOAP remote-control envelope

pub mod client;
pub mod command;
pub mod ircc;

pub use client::{BraviaClient, IrccResponse};
pub use command::{unwrap_response, JsonCommand, DEFAULT_API_VERSION};
