//! CSV batch interface: request and user input, response output.

pub mod request_reader;
pub mod response_writer;
pub mod user_reader;
