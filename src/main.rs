//! # Secrets Manager Versioning
//!
//! CLI that pushes a SOPS-encrypted secret file into AWS Secrets Manager as
//! a new, provenance-tagged version.
//!
//! One run performs one protocol pass:
//!
//! 1. **Describe** the secret, creating it with a matching KMS key if missing
//! 2. **Evict** the oldest version once the history exceeds the ceiling
//! 3. **Decrypt** the file with `sops` and hash the plaintext
//! 4. **Push** the plaintext as a new version unless it is already current
//! 5. **Tag** the version with the source commit, timestamp and remote URL
//!
//! ## Usage
//!
//! ```bash
//! secretsmanager-versioning --file sops.json --role arn:aws:iam::111111111111:role/deployer my-service/credentials
//! ```

use anyhow::Result;
use clap::Parser;
use secretsmanager_versioning::config::StoreConfig;
use secretsmanager_versioning::constants::DEFAULT_SOPS_FILE;
use secretsmanager_versioning::git::GitCli;
use secretsmanager_versioning::sops::SopsFile;
use secretsmanager_versioning::store::AwsSecretStore;
use secretsmanager_versioning::workflow::{self, UpdateOutcome};
use std::path::PathBuf;
use std::process;

/// Versioned secret deployments from SOPS-encrypted files
#[derive(Parser)]
#[command(name = "secretsmanager-versioning")]
#[command(about = "Push a SOPS-encrypted file into AWS Secrets Manager as a new version", long_about = None)]
struct Cli {
    /// Name of the secret in Secrets Manager
    secret_name: String,

    /// SOPS-encrypted secret file to push
    #[arg(short, long, default_value = DEFAULT_SOPS_FILE)]
    file: PathBuf,

    /// IAM role to assume for all store calls
    #[arg(short, long)]
    role: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "secretsmanager_versioning=info".into()),
        )
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Usage errors exit 1, not clap's default 2. Help and version
            // requests still exit 0.
            let _ = err.print();
            let code = if err.use_stderr() { 1 } else { 0 };
            process::exit(code);
        }
    };

    let config = StoreConfig::from_env().with_role(cli.role);
    let store = AwsSecretStore::connect(&config).await?;
    let source = SopsFile::new(cli.file);

    let outcome =
        workflow::update_secret_version(&store, &source, &GitCli, &cli.secret_name).await?;

    match outcome {
        UpdateOutcome::Updated { version } => {
            println!(
                "Updating secret {} successful: New version is {}",
                cli.secret_name, version
            );
        }
        UpdateOutcome::AlreadyCurrent { version } => {
            println!(
                "Secret {} already current. Latest version is {}",
                cli.secret_name, version
            );
        }
    }

    Ok(())
}
