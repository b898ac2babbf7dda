//! # Endpoints
//!
//! HTTP handlers for registration and resolution, and the routing of those
//! handlers according to the configured operating mode.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{MethodRouter, get, post};
use axum::{Json, Router};

use crate::config::Mode;
use crate::error::Result;
use crate::provider::DidMethod;
use crate::register::{RegisterRequest, register};
use crate::resolve::{DID_LD_JSON, resolve};

/// Path of the registration endpoint.
pub const REGISTER_PATH: &str = "/1.0/register";

/// Path of the resolution endpoint.
pub const RESOLVE_PATH: &str = "/resolveDID";

/// An endpoint: the path and HTTP method it is served on, and its handler.
pub struct Handler<M> {
    /// Request path.
    pub path: &'static str,

    /// HTTP method.
    pub method: Method,

    /// Handler for the endpoint.
    pub handler: MethodRouter<M>,
}

impl Mode {
    /// The endpoints exposed in this mode. In combined mode, registration
    /// comes first.
    #[must_use]
    pub fn handlers<M: DidMethod>(self) -> Vec<Handler<M>> {
        match self {
            Self::Registrar => vec![register_handler()],
            Self::Resolver => vec![resolve_handler()],
            Self::Combined => vec![register_handler(), resolve_handler()],
        }
    }
}

/// The endpoints exposed for the named operating mode.
///
/// # Errors
///
/// Returns an error if `mode` is not `registrar`, `resolver` or `combined`.
pub fn handlers<M: DidMethod>(mode: &str) -> Result<Vec<Handler<M>>> {
    Ok(mode.parse::<Mode>()?.handlers())
}

/// Build a router serving the endpoints for `mode` against `method`.
pub fn router<M: DidMethod>(mode: Mode, method: M) -> Router {
    mode.handlers()
        .into_iter()
        .fold(Router::new(), |router, h| router.route(h.path, h.handler))
        .with_state(method)
}

fn register_handler<M: DidMethod>() -> Handler<M> {
    Handler {
        path: REGISTER_PATH,
        method: Method::POST,
        handler: post(register_did::<M>),
    }
}

fn resolve_handler<M: DidMethod>() -> Handler<M> {
    Handler {
        path: RESOLVE_PATH,
        method: Method::GET,
        handler: get(resolve_did::<M>),
    }
}

// The body is decoded here rather than with the `Json` extractor so that
// malformed requests get a plain text reason.
async fn register_did<M: DidMethod>(State(method): State<M>, body: Bytes) -> Response {
    let request: RegisterRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("invalid registration request: {e}");
            return (StatusCode::BAD_REQUEST, format!("invalid request: {e}")).into_response();
        }
    };

    Json(register(&method, request).await).into_response()
}

// Only the first `did` parameter is used.
async fn resolve_did<M: DidMethod>(
    State(method): State<M>, Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let did = params.into_iter().find_map(|(k, v)| (k == "did").then_some(v));

    match resolve(&method, did.as_deref()).await {
        Ok(body) => ([(header::CONTENT_TYPE, DID_LD_JSON)], body).into_response(),
        Err(e) => {
            tracing::warn!("resolution failed: {e}");
            (e.status(), e.to_string()).into_response()
        }
    }
}
