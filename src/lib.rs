//! Decrypts encrypted card payloads, validates them and enriches them with
//! card-issuer (BIN) metadata, returning only non-sensitive derived fields.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
pub mod logging;
