//! Application layer: the decrypt, validate and enrich pipeline.
//!
//! `TokenizationService` is the entry point. It runs each request as one
//! sequential pipeline over the domain ports and owns no state shared across
//! requests apart from the lazily loaded private key.

pub mod bin_resolver;
pub mod decryptor;
pub mod tokenizer;
pub mod validator;
