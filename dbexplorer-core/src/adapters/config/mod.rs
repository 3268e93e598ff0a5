//! Configuration types for database adapters.
//!
//! # Security
//! These structs intentionally do NOT store passwords. The password stays in
//! the connection URL handed to the driver and is redacted everywhere else.

mod connection;

pub use connection::ConnectionConfig;
