//! Domain model: card payloads, BIN records, users and the ports the
//! application layer depends on.

pub mod bin;
pub mod card;
pub mod ports;
pub mod response;
pub mod user;
