#![allow(dead_code)]

use async_trait::async_trait;
use cardvault::application::bin_resolver::BinResolver;
use cardvault::application::decryptor::PayloadDecryptor;
use cardvault::application::tokenizer::TokenizationService;
use cardvault::domain::bin::IssuerLookupResponse;
use cardvault::domain::ports::{IssuerLookup, KeySource, LookupError, LookupResult};
use cardvault::error::Result;
use cardvault::infrastructure::in_memory::{InMemoryBinStore, InMemoryUserDirectory};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rsa::pkcs8::{EncodePrivateKey, LineEnding};
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

/// One RSA key per test binary; generating keys is slow.
pub fn test_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| {
        RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("failed to generate key")
    })
}

pub fn private_pem() -> String {
    test_key()
        .to_pkcs8_pem(LineEnding::LF)
        .expect("failed to encode key")
        .to_string()
}

pub fn encrypt_bytes(plaintext: &[u8]) -> String {
    let public = test_key().to_public_key();
    let ciphertext = public
        .encrypt(&mut rand::thread_rng(), Pkcs1v15Encrypt, plaintext)
        .expect("failed to encrypt");
    STANDARD.encode(ciphertext)
}

pub fn encrypt_json(value: &Value) -> String {
    encrypt_bytes(value.to_string().as_bytes())
}

pub fn card_payload(number: &str) -> Value {
    json!({
        "nameOnCard": "A B",
        "color": "blue",
        "number": number,
        "validThru": "12/30",
        "cvv": "123"
    })
}

/// Writes `private-<project>.pem` into `dir` and returns its path.
pub fn write_key_file(dir: &Path, project: &str) -> PathBuf {
    let path = dir.join(format!("private-{}.pem", project));
    std::fs::write(&path, private_pem()).expect("failed to write key");
    path
}

/// Key source serving the shared test key from memory.
pub struct StaticKey;

#[async_trait]
impl KeySource for StaticKey {
    async fn load_pem(&self) -> Result<String> {
        Ok(private_pem())
    }
}

pub fn visa_response() -> IssuerLookupResponse {
    IssuerLookupResponse {
        valid: Some("true".to_string()),
        card: Some("VISA".to_string()),
        bank: Some("Bank X".to_string()),
        card_type: Some("credit".to_string()),
        ..Default::default()
    }
}

/// Issuer lookup double that records every BIN it is asked for.
#[derive(Clone)]
pub struct StubLookup {
    calls: Arc<Mutex<Vec<String>>>,
    answer: std::result::Result<IssuerLookupResponse, u16>,
}

impl StubLookup {
    pub fn answering(response: IssuerLookupResponse) -> Self {
        Self {
            calls: Arc::default(),
            answer: Ok(response),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            calls: Arc::default(),
            answer: Err(status),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IssuerLookup for StubLookup {
    async fn lookup(&self, bin_short: &str) -> LookupResult {
        self.calls.lock().unwrap().push(bin_short.to_string());
        match &self.answer {
            Ok(response) => Ok(response.clone()),
            Err(status) => Err(LookupError::Status(*status)),
        }
    }
}

pub fn service(
    users: &InMemoryUserDirectory,
    store: &InMemoryBinStore,
    lookup: &StubLookup,
) -> TokenizationService {
    TokenizationService::new(
        Box::new(users.clone()),
        PayloadDecryptor::new(Box::new(StaticKey)),
        BinResolver::new(Box::new(store.clone()), Box::new(lookup.clone())),
    )
}
