//! A DID method served by a remote Sidetree node.

use anyhow::{Context, Result, anyhow, bail};
use did_registrar::{
    Config, CreateOptions, DidMethod, Document, PublicKey, PublicKeyJwk, Resolution,
};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Certificate, Client, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Creates and resolves DIDs through a Sidetree node's REST API.
#[derive(Clone, Debug)]
pub struct SidetreeNode {
    url: Url,
    domain: String,
    http_client: Client,
    read_token: Option<String>,
    write_token: Option<String>,
    enable_signatures: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateRequest<'a> {
    document: &'a Document,
    #[serde(skip_serializing_if = "Option::is_none")]
    recovery_key: Option<PublicKeyJwk>,
    #[serde(skip_serializing_if = "Option::is_none")]
    update_key: Option<PublicKeyJwk>,
}

impl SidetreeNode {
    /// Connect to the node at `url` using the trust settings, tokens and
    /// genesis files in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` is not a valid base URL, a CA certificate
    /// cannot be read, a genesis file is not valid JSON, or the HTTP client
    /// cannot be built.
    pub fn new(config: &Config, url: &str) -> Result<Self> {
        let url = Url::parse(url).with_context(|| format!("invalid sidetree node URL {url}"))?;
        if url.cannot_be_a_base() {
            bail!("invalid sidetree node URL {url}");
        }

        for genesis in &config.genesis_files {
            serde_json::from_slice::<serde_json::Value>(&genesis.data)
                .with_context(|| format!("invalid genesis file for {}", genesis.url))?;
            tracing::info!(url = %genesis.url, domain = %config.domain, "loaded genesis file");
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder()
            .default_headers(headers)
            .tls_built_in_root_certs(config.tls.system_cert_pool);
        for path in &config.tls.ca_certs {
            let pem = std::fs::read(path)
                .with_context(|| format!("failed to read CA certificate {}", path.display()))?;
            let cert = Certificate::from_pem(&pem)
                .with_context(|| format!("invalid CA certificate {}", path.display()))?;
            builder = builder.add_root_certificate(cert);
        }

        Ok(Self {
            url,
            domain: config.domain.clone(),
            http_client: builder.build().context("failed to create HTTP client")?,
            read_token: config.read_token.clone(),
            write_token: config.write_token.clone(),
            enable_signatures: config.enable_signatures,
        })
    }

    // Segments are percent-encoded, so a DID containing `/`, `?` or `#` stays
    // a single path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.url.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("invalid sidetree node URL {}", self.url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl DidMethod for SidetreeNode {
    async fn create(&self, document: Document, options: CreateOptions) -> Result<Resolution> {
        let req = CreateRequest {
            document: &document,
            recovery_key: options.recovery_key.as_ref().map(PublicKey::to_jwk),
            update_key: options.update_key.as_ref().map(PublicKey::to_jwk),
        };
        tracing::debug!(domain = %self.domain, "submitting create operation");

        let mut request = self.http_client.post(self.endpoint(&["operations"])?).json(&req);
        if let Some(token) = &self.write_token {
            request = request.bearer_auth(token);
        }
        let res = request.send().await.context("failed to submit create operation")?;
        unpack_response(res).await
    }

    async fn read(&self, did: &str) -> Result<Resolution> {
        let mut request = self.http_client.get(self.endpoint(&["identifiers", did])?);
        if let Some(token) = &self.read_token {
            request = request.bearer_auth(token);
        }
        let res = request.send().await.context("failed to query identifier")?;
        let resolution: Resolution = unpack_response(res).await?;

        if self.enable_signatures && resolution.did_document.id != did {
            bail!("resolved document {} does not match {did}", resolution.did_document.id);
        }
        Ok(resolution)
    }
}

// Non-success responses carry the status and the node's error text.
async fn unpack_response<T: DeserializeOwned>(res: Response) -> Result<T> {
    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        bail!("sidetree node returned {status}: {body}");
    }
    res.json::<T>().await.context("failed to deserialize node response")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode, header};
    use axum::response::{IntoResponse, Response};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use did_registrar::{GenesisFile, key};
    use serde_json::{Value, json};

    use super::*;

    const FORGED: &str = "did:sidetree:forged";
    const MISSING: &str = "did:sidetree:missing";

    // A fake node that assigns `did:sidetree:abc` to every created document.
    async fn spawn_node() -> String {
        async fn operations(headers: HeaderMap, Json(body): Json<Value>) -> Response {
            let auth = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok());
            if auth != Some("Bearer write") {
                return (StatusCode::UNAUTHORIZED, "bad token").into_response();
            }
            let mut doc = body["document"].clone();
            doc["id"] = json!("did:sidetree:abc");
            Json(json!({
                "didDocument": doc,
                "didDocumentMetadata": {"method": {"recoveryKey": body["recoveryKey"]}}
            }))
            .into_response()
        }

        async fn identifiers(Path(did): Path<String>) -> Response {
            match did.as_str() {
                MISSING => (StatusCode::NOT_FOUND, "not found").into_response(),
                FORGED => Json(json!({"didDocument": {"id": "did:sidetree:other"}})).into_response(),
                _ => Json(json!({"didDocument": {"id": did}})).into_response(),
            }
        }

        let router = Router::new()
            .route("/operations", post(operations))
            .route("/identifiers/{did}", get(identifiers));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("should bind");
        let addr = listener.local_addr().expect("should have address");
        tokio::spawn(async move { axum::serve(listener, router).await });

        format!("http://{addr}/")
    }

    fn config() -> Config {
        Config {
            domain: "testnet.example.com".to_string(),
            write_token: Some("write".to_string()),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn create() {
        let node = SidetreeNode::new(&config(), &spawn_node().await).expect("should build node");
        let raw = key::decode_value("11qYAYKxCrfVS/7TyWQHOg7hcvPapiMlrwIaaPcHURo=")
            .expect("should decode");
        let options = CreateOptions {
            recovery_key: Some(PublicKey::decode(key::ED25519, &raw).expect("should decode")),
            update_key: None,
        };

        let resolution =
            node.create(Document::default(), options).await.expect("should create");
        assert_eq!(resolution.did_document.id, "did:sidetree:abc");

        let metadata = resolution.did_document_metadata.expect("should have metadata");
        assert_eq!(
            metadata.additional["method"]["recoveryKey"]["x"],
            "11qYAYKxCrfVS_7TyWQHOg7hcvPapiMlrwIaaPcHURo"
        );
    }

    #[tokio::test]
    async fn create_unauthorized() {
        let config = Config {
            write_token: None,
            ..config()
        };
        let node = SidetreeNode::new(&config, &spawn_node().await).expect("should build node");

        let err = node
            .create(Document::default(), CreateOptions::default())
            .await
            .expect_err("should fail");
        assert_eq!(err.to_string(), "sidetree node returned 401 Unauthorized: bad token");
    }

    #[tokio::test]
    async fn read() {
        let node = SidetreeNode::new(&config(), &spawn_node().await).expect("should build node");

        let resolution = node.read("did:sidetree:abc").await.expect("should read");
        assert_eq!(resolution.did_document.id, "did:sidetree:abc");

        let err = node.read(MISSING).await.expect_err("should fail");
        assert_eq!(err.to_string(), "sidetree node returned 404 Not Found: not found");
    }

    // The DID is sent as a single path segment, whatever characters it holds.
    #[tokio::test]
    async fn read_encodes_did() {
        let config = Config {
            enable_signatures: true,
            ..config()
        };
        let node = SidetreeNode::new(&config, &spawn_node().await).expect("should build node");

        let did = "did:sidetree:abc/path?versionId=1#key-1";
        let resolution = node.read(did).await.expect("should read");
        assert_eq!(resolution.did_document.id, did);
    }

    #[test]
    fn invalid_node_url() {
        let err = SidetreeNode::new(&config(), "sidetree.example.com").expect_err("should fail");
        assert_eq!(err.to_string(), "invalid sidetree node URL sidetree.example.com");

        let err = SidetreeNode::new(&config(), "mailto:node@example.com").expect_err("should fail");
        assert_eq!(err.to_string(), "invalid sidetree node URL mailto:node@example.com");
    }

    // Mismatched documents are only rejected when signatures are enabled.
    #[tokio::test]
    async fn read_mismatched_document() {
        let url = spawn_node().await;

        let node = SidetreeNode::new(&config(), &url).expect("should build node");
        node.read(FORGED).await.expect("should read");

        let config = Config {
            enable_signatures: true,
            ..config()
        };
        let node = SidetreeNode::new(&config, &url).expect("should build node");
        let err = node.read(FORGED).await.expect_err("should fail");
        assert_eq!(
            err.to_string(),
            "resolved document did:sidetree:other does not match did:sidetree:forged"
        );
    }

    #[test]
    fn invalid_genesis_file() {
        let config = Config {
            genesis_files: vec![GenesisFile {
                url: "https://testnet.example.com/genesis".to_string(),
                data: b"not json".to_vec(),
            }],
            ..config()
        };

        let err = SidetreeNode::new(&config, "http://localhost").expect_err("should fail");
        assert_eq!(
            err.to_string(),
            "invalid genesis file for https://testnet.example.com/genesis"
        );
    }

    #[test]
    fn invalid_ca_certificate() {
        let path = std::env::temp_dir().join("did-registrar-invalid-ca.pem");
        let mut file = std::fs::File::create(&path).expect("should create file");
        file.write_all(b"not a certificate").expect("should write");

        let mut config = config();
        config.tls.ca_certs = vec![path.clone()];
        let err = SidetreeNode::new(&config, "http://localhost").expect_err("should fail");
        assert!(err.to_string().starts_with("invalid CA certificate"));

        let _ = std::fs::remove_file(path);
    }
}
