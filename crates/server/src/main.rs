//! # DID Registrar Service
//!
//! Serves the registration and resolution endpoints against a Sidetree node.
//! Which endpoints are exposed depends on `--mode`.
//!
//! ## Usage
//!
//! ```bash
//! registrar --mode combined \
//!     --domain testnet.example.com \
//!     --sidetree-url https://sidetree.example.com/sidetree/v1 \
//!     --genesis-file-url https://testnet.example.com/genesis.json \
//!     --genesis-file ./genesis.json
//! ```

mod node;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use axum::http::Method;
use clap::{ArgAction, Parser};
use did_registrar::{Config, GenesisFile, Mode, TlsConfig};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::node::SidetreeNode;

#[derive(Parser, Debug)]
#[command(name = "registrar", version, about = "DID registrar and resolver")]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:8080", env = "REGISTRAR_HOST_URL")]
    host: String,

    /// Endpoints to expose: registrar, resolver or combined
    #[arg(long, default_value = "combined", env = "REGISTRAR_MODE")]
    mode: String,

    /// DID method domain
    #[arg(long, env = "BLOC_DOMAIN")]
    domain: String,

    /// Base URL of the Sidetree node's REST API
    #[arg(long, env = "SIDETREE_URL")]
    sidetree_url: String,

    /// Bearer token for resolution requests to the node
    #[arg(long, env = "SIDETREE_READ_TOKEN")]
    sidetree_read_token: Option<String>,

    /// Bearer token for create requests to the node
    #[arg(long, env = "SIDETREE_WRITE_TOKEN")]
    sidetree_write_token: Option<String>,

    /// Reject resolved documents that don't match the requested DID
    #[arg(long, env = "ENABLE_SIGNATURES")]
    enable_signatures: bool,

    /// Trust the platform's root certificates
    #[arg(
        long = "tls-systemcertpool",
        env = "TLS_SYSTEMCERTPOOL",
        default_value_t = true,
        action = ArgAction::Set
    )]
    tls_system_cert_pool: bool,

    /// PEM encoded CA certificates to trust (comma-separated)
    #[arg(long = "tls-cacerts", env = "TLS_CACERTS", value_delimiter = ',')]
    tls_ca_certs: Vec<PathBuf>,

    /// URLs the genesis files were published at, paired in order with
    /// `--genesis-file`
    #[arg(long = "genesis-file-url", env = "GENESIS_FILE_URLS", value_delimiter = ',')]
    genesis_file_urls: Vec<String>,

    /// Genesis files for the consortium
    #[arg(long = "genesis-file", env = "GENESIS_FILES", value_delimiter = ',')]
    genesis_files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "did_registrar=info,server=info,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = Config {
        tls: TlsConfig {
            system_cert_pool: args.tls_system_cert_pool,
            ca_certs: args.tls_ca_certs,
        },
        domain: args.domain,
        mode: args.mode.parse::<Mode>()?,
        read_token: args.sidetree_read_token,
        write_token: args.sidetree_write_token,
        enable_signatures: args.enable_signatures,
        genesis_files: genesis_files(args.genesis_file_urls, args.genesis_files)?,
    };

    let node = SidetreeNode::new(&config, &args.sidetree_url)?;

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);
    let app = did_registrar::router(config.mode, node)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(&args.host)
        .await
        .with_context(|| format!("failed to bind {}", args.host))?;
    tracing::info!(mode = %config.mode, "listening on {}", listener.local_addr()?);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

// Pair each genesis file URL with the contents of the file at the same
// position.
fn genesis_files(urls: Vec<String>, paths: Vec<PathBuf>) -> Result<Vec<GenesisFile>> {
    if urls.len() != paths.len() {
        bail!("{} genesis file URLs given for {} genesis files", urls.len(), paths.len());
    }

    urls.into_iter()
        .zip(paths)
        .map(|(url, path)| {
            let data = std::fs::read(&path)
                .with_context(|| format!("failed to read genesis file {}", path.display()))?;
            Ok(GenesisFile { url, data })
        })
        .collect()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
    tracing::info!("shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_args() {
        let args = Args::try_parse_from([
            "registrar",
            "--mode",
            "resolver",
            "--domain",
            "testnet.example.com",
            "--sidetree-url",
            "https://sidetree.example.com",
            "--tls-systemcertpool",
            "false",
            "--tls-cacerts",
            "a.pem,b.pem",
        ])
        .expect("should parse");

        assert_eq!(args.mode, "resolver");
        assert!(!args.tls_system_cert_pool);
        assert_eq!(args.tls_ca_certs, vec![PathBuf::from("a.pem"), PathBuf::from("b.pem")]);
        assert!(!args.enable_signatures);
    }

    #[test]
    fn mismatched_genesis_files() {
        let err = genesis_files(vec!["https://example.com/genesis".to_string()], vec![])
            .expect_err("should fail");
        assert_eq!(err.to_string(), "1 genesis file URLs given for 0 genesis files");
    }

    #[test]
    fn missing_genesis_file() {
        let err = genesis_files(
            vec!["https://example.com/genesis".to_string()],
            vec![PathBuf::from("/nonexistent/genesis.json")],
        )
        .expect_err("should fail");
        assert_eq!(err.to_string(), "failed to read genesis file /nonexistent/genesis.json");
    }
}
