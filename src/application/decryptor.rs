use crate::domain::ports::KeySourceBox;
use crate::error::{Result, TokenizeError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey};
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Decrypts base64 RSA/PKCS#1 v1.5 ciphertext into a JSON value.
///
/// The private key is read from the `KeySource` on first use and kept for the
/// lifetime of the decryptor. A failed load is not cached, so the next call
/// tries again.
pub struct PayloadDecryptor {
    key_source: KeySourceBox,
    key: OnceCell<RsaPrivateKey>,
}

impl PayloadDecryptor {
    pub fn new(key_source: KeySourceBox) -> Self {
        Self {
            key_source,
            key: OnceCell::new(),
        }
    }

    /// Decrypts `ciphertext` and parses the UTF-8 plaintext as JSON.
    ///
    /// Bad base64, a padding failure, non-UTF-8 output and malformed JSON all
    /// surface as `DecryptionFailed`.
    pub async fn decrypt(&self, ciphertext: &str) -> Result<Value> {
        let key = self.private_key().await?;

        let encrypted = STANDARD.decode(ciphertext.trim()).map_err(|_| {
            warn!("ciphertext is not valid base64");
            TokenizeError::DecryptionFailed
        })?;

        let plaintext = Zeroizing::new(key.decrypt(Pkcs1v15Encrypt, &encrypted).map_err(|_| {
            warn!("RSA decryption failed");
            TokenizeError::DecryptionFailed
        })?);

        let text = std::str::from_utf8(&plaintext).map_err(|_| {
            warn!("decrypted payload is not UTF-8");
            TokenizeError::DecryptionFailed
        })?;

        let value = serde_json::from_str(text).map_err(|_| {
            warn!("decrypted payload is not valid JSON");
            TokenizeError::DecryptionFailed
        })?;

        debug!(bytes = plaintext.len(), "payload decrypted");
        Ok(value)
    }

    async fn private_key(&self) -> Result<&RsaPrivateKey> {
        self.key
            .get_or_try_init(|| async {
                let pem = Zeroizing::new(self.key_source.load_pem().await?);
                let key = parse_private_key(pem.as_str())?;
                debug!("private key loaded");
                Ok::<_, TokenizeError>(key)
            })
            .await
    }
}

/// Accepts PKCS#8 (`BEGIN PRIVATE KEY`) and PKCS#1 (`BEGIN RSA PRIVATE KEY`).
fn parse_private_key(pem: &str) -> Result<RsaPrivateKey> {
    RsaPrivateKey::from_pkcs8_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
        .map_err(|_| {
            TokenizeError::KeyUnavailable("key is not a valid RSA private key".to_string())
        })
}
