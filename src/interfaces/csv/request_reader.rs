use crate::application::tokenizer::TokenizeRequest;
use crate::domain::user::AuthContext;
use crate::error::{Result, TokenizeError};
use serde::Deserialize;
use std::io::Read;

/// One row of a request batch: the calling user and their ciphertext.
#[derive(Deserialize, Clone)]
pub struct RequestRow {
    pub caller: String,
    #[serde(default)]
    pub request: String,
}

impl RequestRow {
    pub fn auth(&self) -> AuthContext {
        AuthContext::for_user(self.caller.clone())
    }

    pub fn to_request(&self) -> TokenizeRequest {
        TokenizeRequest::new(self.request.clone())
    }
}

/// Reads tokenization requests from a CSV source with `caller,request` columns.
pub struct RequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RequestReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily reads and deserializes request rows.
    pub fn requests(self) -> impl Iterator<Item = Result<RequestRow>> {
        self.reader.into_deserialize().map(|result| {
            result.map_err(|e| {
                TokenizeError::InvalidArgument(format!("malformed request row: {}", e))
            })
        })
    }
}
