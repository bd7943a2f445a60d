use cardvault::application::bin_resolver::BinResolver;
use cardvault::application::decryptor::PayloadDecryptor;
use cardvault::application::tokenizer::TokenizationService;
use cardvault::config::TokenizerConfig;
use cardvault::domain::ports::{BinCacheStoreBox, UserDirectoryBox};
use cardvault::domain::user::UserRecord;
use cardvault::infrastructure::bincodes::BincodesClient;
use cardvault::infrastructure::in_memory::{InMemoryBinStore, InMemoryUserDirectory};
use cardvault::infrastructure::key_file::PemKeyFile;
#[cfg(feature = "storage-rocksdb")]
use cardvault::infrastructure::rocksdb::RocksDBStore;
use cardvault::interfaces::csv::request_reader::RequestReader;
use cardvault::interfaces::csv::response_writer::ResponseWriter;
use cardvault::interfaces::csv::user_reader::UserReader;
use cardvault::logging::init_logging;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input requests CSV file (`caller,request`)
    input: PathBuf,

    /// Users CSV file (`id,disabled`) loaded into the user directory
    #[arg(long)]
    users: Option<PathBuf>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Directory holding `private-<project>.pem`
    #[arg(long, env = "CARDVAULT_KEYS_DIR")]
    keys_dir: Option<PathBuf>,

    /// Deployment identifier selecting the private key
    #[arg(long, env = "CARDVAULT_PROJECT")]
    project: Option<String>,

    /// Issuer lookup service base URL
    #[arg(long, env = "BINCODES_URL")]
    bincodes_url: Option<String>,

    /// Issuer lookup service API key
    #[arg(long, env = "BINCODES_API_KEY", hide_env_values = true)]
    bincodes_api_key: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> TokenizerConfig {
        let mut config = TokenizerConfig::from_env();
        if let Some(keys_dir) = &self.keys_dir {
            config = config.with_keys_dir(keys_dir);
        }
        if let Some(project) = &self.project {
            config = config.with_project_id(project);
        }
        if let Some(url) = &self.bincodes_url {
            config = config.with_bincodes_url(url);
        }
        if let Some(key) = &self.bincodes_api_key {
            config = config.with_bincodes_api_key(key);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose).into_diagnostic()?;

    let config = cli.config();
    info!(?config, "starting cardvault");

    let users = match &cli.users {
        Some(path) => {
            let file = File::open(path).into_diagnostic()?;
            UserReader::new(file)
                .users()
                .collect::<cardvault::error::Result<Vec<_>>>()
                .into_diagnostic()?
        }
        None => Vec::new(),
    };

    let (bin_store, user_directory) = open_storage(cli.db_path.clone(), users).await?;

    let key_file = PemKeyFile::for_project(&config.keys_dir, &config.project_id);
    let lookup = BincodesClient::new(&config).into_diagnostic()?;
    let service = TokenizationService::new(
        user_directory,
        PayloadDecryptor::new(Box::new(key_file)),
        BinResolver::new(bin_store, Box::new(lookup)),
    );

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = RequestReader::new(file);
    let stdout = io::stdout();
    let mut writer = ResponseWriter::new(stdout.lock());

    for row in reader.requests() {
        match row {
            Ok(row) => {
                let result = service.tokenize(Some(&row.auth()), &row.to_request()).await;
                writer.write_result(&row.caller, &result).into_diagnostic()?;
            }
            // A malformed row has no trustworthy caller, so its failure row is anonymous.
            Err(e) => {
                warn!(error = %e, "Error reading request");
                writer.write_result("", &Err(e)).into_diagnostic()?;
            }
        }
    }
    writer.flush().into_diagnostic()?;

    Ok(())
}

async fn open_storage(
    db_path: Option<PathBuf>,
    users: Vec<UserRecord>,
) -> Result<(BinCacheStoreBox, UserDirectoryBox)> {
    #[cfg(feature = "storage-rocksdb")]
    if let Some(db_path) = db_path {
        let store = RocksDBStore::open(db_path).into_diagnostic()?;
        for user in &users {
            store.put_user(user).into_diagnostic()?;
        }
        return Ok((Box::new(store.clone()), Box::new(store)));
    }

    #[cfg(not(feature = "storage-rocksdb"))]
    if db_path.is_some() {
        warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage."
        );
    }

    let directory = InMemoryUserDirectory::new();
    for user in users {
        directory.insert(user).await;
    }
    Ok((Box::new(InMemoryBinStore::new()), Box::new(directory)))
}
