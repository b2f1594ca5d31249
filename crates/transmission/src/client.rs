use parking_lot::RwLock;
use reqwest::{Client, Response, StatusCode};
use std::sync::Arc;
use std::time::Duration;

use crate::error::TransmissionError;
use crate::models::{RpcCall, RpcRequest, RpcResponse};

/// Header carrying the CSRF session token the daemon hands out on `409`
pub const SESSION_ID_HEADER: &str = "X-Transmission-Session-Id";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Optional HTTP basic-auth credentials for the RPC endpoint
#[derive(Debug, Clone)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

/// Transmission JSON-RPC client.
///
/// The daemon refuses the first request of a session with `409 Conflict` and
/// a fresh session token in [`SESSION_ID_HEADER`]. The client captures that
/// token, retries the request exactly once, and reuses the token for every
/// later call until the daemon rotates it.
pub struct TransmissionClient {
    client: Client,
    rpc_url: Arc<str>,
    auth: Option<BasicAuth>,
    session_id: RwLock<Option<String>>,
}

impl TransmissionClient {
    /// Create a client for the given RPC URL with the default 30s request timeout
    pub fn new(rpc_url: impl Into<String>) -> crate::Result<Self> {
        Self::with_timeout(rpc_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom per-request timeout
    pub fn with_timeout(rpc_url: impl Into<String>, timeout: Duration) -> crate::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransmissionError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, rpc_url))
    }

    /// Create a client with a shared reqwest client
    pub fn with_client(client: Client, rpc_url: impl Into<String>) -> Self {
        let rpc_url = rpc_url.into();
        let rpc_url = rpc_url.trim_end_matches('/');
        Self {
            client,
            rpc_url: Arc::from(rpc_url),
            auth: None,
            session_id: RwLock::new(None),
        }
    }

    /// Build the standard RPC URL for a daemon listening on `host:port`
    pub fn rpc_url_for(host: &str, port: u16) -> String {
        format!("http://{}:{}/transmission/rpc", host, port)
    }

    /// Attach basic-auth credentials (builder pattern)
    pub fn with_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some(BasicAuth {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// The session token currently held, if a handshake has happened
    pub fn session_id(&self) -> Option<String> {
        self.session_id.read().clone()
    }

    /// Perform one typed RPC call, running the session handshake if needed.
    pub(crate) async fn call<C: RpcCall>(&self, call: &C) -> crate::Result<C::Response> {
        let body = RpcRequest {
            method: C::METHOD,
            arguments: call,
        };

        let response = self.send(&body).await?;
        if response.status() != StatusCode::CONFLICT {
            return self.handle_response::<C>(response).await;
        }

        self.capture_session_id(&response)?;
        tracing::debug!("Transmission session token refreshed, retrying {}", C::METHOD);

        let retry = self.send(&body).await?;
        if retry.status() == StatusCode::CONFLICT {
            return Err(TransmissionError::Protocol(format!(
                "session handshake failed twice for {}",
                C::METHOD
            )));
        }
        self.handle_response::<C>(retry).await
    }

    async fn send<A: serde::Serialize>(&self, body: &RpcRequest<'_, A>) -> crate::Result<Response> {
        let mut request = self.client.post(self.rpc_url.as_ref()).json(body);

        if let Some(session_id) = self.session_id() {
            request = request.header(SESSION_ID_HEADER, session_id);
        }

        if let Some(auth) = &self.auth {
            request = request.basic_auth(&auth.username, Some(&auth.password));
        }

        Ok(request.send().await?)
    }

    fn capture_session_id(&self, response: &Response) -> crate::Result<()> {
        let session_id = response
            .headers()
            .get(SESSION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                TransmissionError::Protocol("409 response without a session id".into())
            })?;

        *self.session_id.write() = Some(session_id.to_string());
        Ok(())
    }

    async fn handle_response<C: RpcCall>(&self, response: Response) -> crate::Result<C::Response> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TransmissionError::Api {
                status_code: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        let envelope: RpcResponse<C::Response> = serde_json::from_slice(&bytes).map_err(|e| {
            TransmissionError::Protocol(format!("malformed {} response: {}", C::METHOD, e))
        })?;

        if envelope.result != "success" {
            return Err(TransmissionError::Rejected(envelope.result));
        }

        envelope.arguments.ok_or_else(|| {
            TransmissionError::Protocol(format!("{} response carried no arguments", C::METHOD))
        })
    }
}
