//! Command-line and environment configuration.

use anyhow::{bail, Context, Result};
use axum::http::HeaderName;
use clap::Parser;
use docunest_blobstore::{UploadPolicy, DEFAULT_MAX_UPLOAD_BYTES};
use docunest_crypto::{KdfParams, ServerSecret};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Environment variable holding the password-encryption secret.
pub const SECRET_ENV: &str = "ENCRYPTION_SECRET";

#[derive(Parser, Debug, Clone)]
#[command(name = "docunest-server")]
#[command(about = "DocuNest document sharing server")]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, env = "DOCUNEST_PORT", default_value = "3000")]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "DOCUNEST_BIND", default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// SQLite database path
    #[arg(short, long, env = "DOCUNEST_DATABASE", default_value = "docunest.db")]
    pub database: PathBuf,

    /// Directory uploaded files are written to
    #[arg(long, env = "DOCUNEST_STORAGE_DIR", default_value = "uploads")]
    pub storage_dir: PathBuf,

    /// Base URL stored files are reachable under
    /// [default: http://localhost:<port>/files]
    #[arg(long, env = "DOCUNEST_PUBLIC_BASE_URL")]
    pub public_base_url: Option<String>,

    /// Request header carrying the authenticated user id, set by the
    /// authenticating proxy in front of this server
    #[arg(long, env = "DOCUNEST_IDENTITY_HEADER", default_value = "x-docunest-user")]
    pub identity_header: String,

    /// Largest accepted upload, in bytes
    #[arg(long, env = "DOCUNEST_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: u64,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Validated server configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub database: PathBuf,
    pub storage_dir: PathBuf,
    pub public_base_url: String,
    pub identity_header: HeaderName,
    pub upload_policy: UploadPolicy,
    pub secret: ServerSecret,
    pub kdf: KdfParams,
}

impl ServerConfig {
    /// Builds the configuration from parsed arguments and the secret read
    /// from [`SECRET_ENV`].
    pub fn from_args(args: Args, secret: Option<String>) -> Result<Self> {
        let secret = secret
            .with_context(|| format!("{SECRET_ENV} must be set"))
            .and_then(|s| {
                ServerSecret::new(s).with_context(|| format!("{SECRET_ENV} must not be empty"))
            })?;

        let identity_header = HeaderName::from_bytes(args.identity_header.as_bytes())
            .with_context(|| format!("invalid identity header name: {}", args.identity_header))?;

        if args.max_upload_bytes == 0 {
            bail!("max upload size must be positive");
        }

        let public_base_url = args
            .public_base_url
            .unwrap_or_else(|| format!("http://localhost:{}/files", args.port));
        if !public_base_url.starts_with("http://") && !public_base_url.starts_with("https://") {
            bail!("public base URL must be http(s): {public_base_url}");
        }

        Ok(Self {
            bind_addr: SocketAddr::new(args.bind, args.port),
            database: args.database,
            storage_dir: args.storage_dir,
            public_base_url,
            identity_header,
            upload_policy: UploadPolicy::new(args.max_upload_bytes),
            secret,
            kdf: KdfParams::default(),
        })
    }
}
