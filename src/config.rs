//! # Configuration
//!
//! Settings read once at startup. The DID method is constructed from them and
//! the operating mode selects which endpoints are exposed.

use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Registrar configuration.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Trust settings for connections to the DID method.
    #[serde(default)]
    pub tls: TlsConfig,

    /// DID method domain, e.g. `testnet.example.com`.
    pub domain: String,

    /// Which endpoints to expose.
    #[serde(default)]
    pub mode: Mode,

    /// Bearer token for read (resolve) requests to the DID method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_token: Option<String>,

    /// Bearer token for write (create) requests to the DID method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_token: Option<String>,

    /// Verify resolved documents against the requested DID.
    #[serde(default)]
    pub enable_signatures: bool,

    /// Consortium bootstrap files for the DID method.
    #[serde(default)]
    pub genesis_files: Vec<GenesisFile>,
}

/// Transport trust settings.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsConfig {
    /// Trust the platform's root certificates.
    pub system_cert_pool: bool,

    /// Additional PEM encoded CA certificates to trust.
    #[serde(default)]
    pub ca_certs: Vec<PathBuf>,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            system_cert_pool: true,
            ca_certs: vec![],
        }
    }
}

/// A consortium genesis file: the URL it was published at and its contents.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct GenesisFile {
    /// Where the file was published.
    pub url: String,

    /// Raw file contents.
    pub data: Vec<u8>,
}

/// Operating mode: which endpoints the service exposes.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub enum Mode {
    /// Registration only.
    Registrar,

    /// Resolution only.
    Resolver,

    /// Registration and resolution.
    #[default]
    Combined,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registrar" => Ok(Self::Registrar),
            "resolver" => Ok(Self::Resolver),
            "combined" => Ok(Self::Combined),
            _ => Err(Error::InvalidMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for Mode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        mode.to_string()
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registrar => write!(f, "registrar"),
            Self::Resolver => write!(f, "resolver"),
            Self::Combined => write!(f, "combined"),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parse_mode() {
        assert_eq!("registrar".parse::<Mode>().unwrap(), Mode::Registrar);
        assert_eq!("resolver".parse::<Mode>().unwrap(), Mode::Resolver);
        assert_eq!("combined".parse::<Mode>().unwrap(), Mode::Combined);

        let err = "both".parse::<Mode>().expect_err("should fail");
        assert_eq!(err.to_string(), "invalid operation mode: both");
    }

    #[test]
    fn deserialize_config() {
        let config: Config = serde_json::from_value(json!({
            "domain": "testnet.example.com",
            "mode": "registrar",
            "readToken": "r",
            "genesisFiles": [{"url": "https://example.com/genesis.json", "data": [123, 125]}]
        }))
        .expect("should deserialize");

        assert_eq!(config.mode, Mode::Registrar);
        assert!(config.tls.system_cert_pool);
        assert!(!config.enable_signatures);
        assert_eq!(config.genesis_files[0].data, b"{}");
    }

    #[test]
    fn reject_unknown_mode() {
        let err = serde_json::from_value::<Config>(json!({"domain": "d", "mode": "proxy"}))
            .expect_err("should fail");
        assert!(err.to_string().contains("invalid operation mode: proxy"));
    }
}
