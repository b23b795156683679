use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use super::error::ApiError;
use super::transport::{HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport};
use crate::config::ClientConfig;

const CONTENT_TYPE: &str = "Content-Type";
const CACHE_CONTROL: &str = "Cache-Control";

/// Per-call options layered over the adapter's defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::Get,
            headers: Vec::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn delete() -> Self {
        Self {
            method: Method::Delete,
            ..Self::default()
        }
    }

    pub fn json<B: Serialize>(method: Method, body: &B) -> Result<Self, ApiError> {
        Ok(Self {
            method,
            headers: Vec::new(),
            body: Some(serde_json::to_string(body)?),
        })
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// Stateless JSON-over-HTTP adapter. Cloning shares the underlying transport.
#[derive(Clone)]
pub struct HttpClient {
    config: ClientConfig,
    transport: Arc<dyn HttpTransport>,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    pub fn new(config: &ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            config: config.clone(),
            transport,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::new(config, Arc::new(ReqwestTransport::new()?)))
    }

    /// Issues the request and decodes a JSON body into `T`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let response = self.execute(path, options).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Issues the request and ignores whatever body comes back.
    pub async fn request_empty(&self, path: &str, options: RequestOptions) -> Result<(), ApiError> {
        self.execute(path, options).await.map(|_| ())
    }

    async fn execute(&self, path: &str, options: RequestOptions) -> Result<HttpResponse, ApiError> {
        let request = HttpRequest {
            method: options.method,
            url: self.config.resolve(path),
            headers: merge_headers(options.headers),
            body: options.body,
        };
        debug!(method = %request.method, url = %request.url, "sending request");

        let method = request.method;
        let response = self.transport.send(request).await.map_err(|err| {
            debug!(%method, path, error = %err, "request failed");
            err
        })?;

        if !response.is_success() {
            warn!(%method, path, status = response.status, "non-success response");
            return Err(ApiError::Status {
                status: response.status,
                status_text: response.status_text,
            });
        }

        Ok(response)
    }
}

/// `Content-Type: application/json` first, caller headers on top (caller wins),
/// and the no-store directive last so nothing can re-enable caching.
fn merge_headers(caller: Vec<(String, String)>) -> Vec<(String, String)> {
    let mut headers = vec![(CONTENT_TYPE.to_string(), "application/json".to_string())];

    for (name, value) in caller {
        if name.eq_ignore_ascii_case(CACHE_CONTROL) {
            continue;
        }
        match headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(slot) => *slot = (name, value),
            None => headers.push((name, value)),
        }
    }

    headers.push((CACHE_CONTROL.to_string(), "no-store".to_string()));
    headers
}
