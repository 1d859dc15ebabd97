//! bravia-remote - client for the Sony Bravia local remote-control API
//!
//! Talks to the `/sony/system` JSON-RPC style channel for power and system
//! queries, and to the `/sony/IRCC` SOAP channel for remote-control buttons.
//! Both are authenticated with a pre-shared key.

pub mod bravia;
pub mod config;
pub mod error;

pub use bravia::{BraviaClient, IrccResponse, JsonCommand};
pub use error::{BraviaError, Result};
