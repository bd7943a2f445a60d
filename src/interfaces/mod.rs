//! Outer adapters driving the application layer.

pub mod csv;
