use super::bin_resolver::BinResolver;
use super::decryptor::PayloadDecryptor;
use super::validator;
use crate::domain::bin::BinResolution;
use crate::domain::ports::UserDirectoryBox;
use crate::domain::response::TokenizationResponse;
use crate::domain::user::AuthContext;
use crate::error::{Result, TokenizeError};
use serde::Deserialize;
use std::fmt;
use tracing::{info, warn};

const DEFAULT_UNSUPPORTED_MESSAGE: &str = "the card could not be validated, try another card";

/// Inbound call payload: base64 RSA ciphertext of the card JSON.
#[derive(Deserialize, Clone, Default)]
pub struct TokenizeRequest {
    #[serde(default)]
    pub request: Option<String>,
}

impl TokenizeRequest {
    pub fn new(ciphertext: impl Into<String>) -> Self {
        Self {
            request: Some(ciphertext.into()),
        }
    }
}

impl fmt::Debug for TokenizeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenizeRequest")
            .field("request_len", &self.request.as_ref().map(String::len))
            .finish()
    }
}

/// Orchestrates authorization, decryption, validation and BIN enrichment.
///
/// Each call is a straight-line pipeline: the first failing step ends the
/// request and no step is retried. The only durable side effect is the BIN
/// cache write-back performed by the resolver.
pub struct TokenizationService {
    users: UserDirectoryBox,
    decryptor: PayloadDecryptor,
    resolver: BinResolver,
}

impl TokenizationService {
    pub fn new(
        users: UserDirectoryBox,
        decryptor: PayloadDecryptor,
        resolver: BinResolver,
    ) -> Self {
        Self {
            users,
            decryptor,
            resolver,
        }
    }

    /// Runs one tokenization request for the caller described by `auth`.
    pub async fn tokenize(
        &self,
        auth: Option<&AuthContext>,
        request: &TokenizeRequest,
    ) -> Result<TokenizationResponse> {
        let caller = auth
            .and_then(AuthContext::caller_id)
            .ok_or(TokenizeError::Unauthorized)?;

        let result = self.run(caller, request).await;
        match &result {
            Ok(response) => info!(
                caller,
                bin = %response.card_info.bin_short,
                "card tokenized"
            ),
            Err(e) => warn!(caller, code = e.code(), error = %e, "tokenization failed"),
        }
        result
    }

    async fn run(&self, caller: &str, request: &TokenizeRequest) -> Result<TokenizationResponse> {
        let ciphertext = request
            .request
            .as_deref()
            .filter(|r| !r.is_empty())
            .ok_or_else(|| TokenizeError::InvalidArgument("request field required".to_string()))?;

        self.authorize(caller).await?;

        let payload = self.decryptor.decrypt(ciphertext).await?;
        let card = validator::validate_card(payload)?;

        let record = match self.resolver.resolve(&card.number).await {
            BinResolution::Resolved(record) => record,
            BinResolution::Unresolved(message) if message.is_empty() => {
                return Err(TokenizeError::FailedPrecondition(
                    DEFAULT_UNSUPPORTED_MESSAGE.to_string(),
                ));
            }
            BinResolution::Unresolved(message) => {
                return Err(TokenizeError::FailedPrecondition(message));
            }
        };

        Ok(TokenizationResponse::assemble(&card, &record))
    }

    async fn authorize(&self, caller: &str) -> Result<()> {
        let user = self
            .users
            .get(caller)
            .await?
            .ok_or(TokenizeError::UserNotFound)?;

        if user.is_disabled {
            return Err(TokenizeError::UserDisabled);
        }
        Ok(())
    }
}
