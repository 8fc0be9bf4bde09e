//! The Sage Pay API client and its generic JSON pipeline.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method, Request, RequestBuilder, Response};
use sagepay_types::{CredentialsProvider, ErrorResponse};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Address of the test (sandbox) API.
pub const TEST_HOST: &str = "https://pi-test.sagepay.com/api/v1";

/// Address of the live API.
pub const PRODUCTION_HOST: &str = "https://pi-live.sagepay.com/api/v1";

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("sagepay-rs/", env!("CARGO_PKG_VERSION"));

/// Line written to the debug sink ahead of each request body.
pub const DEBUG_SEPARATOR: &str = "--------- REQUEST --------";

/// Where outgoing request bodies are copied while in test mode.
pub type DebugSink = Arc<Mutex<dyn Write + Send>>;

/// How a request is authorised.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Auth<'a> {
    /// HTTP basic auth from the credentials provider
    Basic,
    /// A merchant session key
    Bearer(&'a str),
}

/// Sage Pay API client.
///
/// Safe to share between tasks behind an `Arc`. Switching test mode while
/// requests are being built on other tasks is not arbitrated; callers must
/// not race [`SagePayClient::set_test_mode`] against in-flight calls.
pub struct SagePayClient {
    http: Client,
    provider: Arc<dyn CredentialsProvider>,
    debug_sink: Option<DebugSink>,
    test_mode: AtomicBool,
    timeout: Option<Duration>,
    test_host: String,
    production_host: String,
}

impl SagePayClient {
    /// Creates a production-mode client with a default HTTP transport.
    pub fn new(provider: impl CredentialsProvider + 'static) -> Self {
        Self::builder(provider).build()
    }

    /// Starts a [`ClientBuilder`] around `provider`.
    pub fn builder(provider: impl CredentialsProvider + 'static) -> ClientBuilder {
        ClientBuilder::new(Arc::new(provider))
    }

    /// Chooses between the test and production hosts for subsequent requests.
    pub fn set_test_mode(&self, test_mode: bool) {
        self.test_mode.store(test_mode, Ordering::Relaxed);
    }

    /// True when requests go to the test host.
    pub fn is_test_mode(&self) -> bool {
        self.test_mode.load(Ordering::Relaxed)
    }

    /// The host requests are currently sent to.
    pub fn endpoint(&self) -> &str {
        if self.is_test_mode() {
            &self.test_host
        } else {
            &self.production_host
        }
    }

    /// Sends a caller-built request with the user agent and basic auth applied.
    ///
    /// Any user agent or authorization the caller set is replaced. The
    /// response is returned untouched, whatever its status.
    pub async fn execute(&self, mut request: Request) -> Result<Response, ClientError> {
        let headers = request.headers_mut();
        headers.remove(reqwest::header::USER_AGENT);
        headers.remove(AUTHORIZATION);
        let builder = RequestBuilder::from_parts(self.http.clone(), request);
        self.dispatch(builder, Auth::Basic).await
    }

    /// Sends `body` as JSON to `path` and decodes the JSON response.
    ///
    /// Status codes >= 400 are turned into [`ClientError::Vendor`] or
    /// [`ClientError::Unstructured`].
    pub async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json_with_auth(method, path, body, Auth::Basic)
            .await
    }

    pub(crate) async fn send_json_with_auth<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        auth: Auth<'_>,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let encoded = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(ClientError::Encoding)?;

        let url = format!("{}{}", self.endpoint(), path);
        debug!(%method, %url, "Dispatching request");

        let mut builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(encoded) = encoded {
            builder = builder.body(encoded);
        }

        let response = self.dispatch(builder, auth).await?;
        decode_response(response).await
    }

    async fn dispatch(
        &self,
        builder: RequestBuilder,
        auth: Auth<'_>,
    ) -> Result<Response, ClientError> {
        let mut builder = builder.header(reqwest::header::USER_AGENT, USER_AGENT);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder = match auth {
            Auth::Basic => {
                let credentials = self.provider.get_credentials().await?;
                builder.basic_auth(credentials.username, Some(credentials.password))
            }
            Auth::Bearer(token) => builder.bearer_auth(token),
        };

        let request = builder.build().map_err(ClientError::InvalidRequest)?;
        self.tee_request(&request);

        self.http
            .execute(request)
            .await
            .map_err(ClientError::Transport)
    }

    /// Copies the outgoing body to the debug sink. Never happens outside
    /// test mode: bodies carry card data.
    fn tee_request(&self, request: &Request) {
        if !self.is_test_mode() {
            return;
        }
        let (Some(sink), Some(body)) = (
            self.debug_sink.as_ref(),
            request.body().and_then(|b| b.as_bytes()),
        ) else {
            return;
        };

        let mut sink = sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let written = writeln!(sink, "{}", DEBUG_SEPARATOR)
            .and_then(|_| sink.write_all(body))
            .and_then(|_| sink.flush());
        if let Err(e) = written {
            warn!("Failed to write request to debug sink: {}", e);
        }
    }
}

async fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.bytes().await.map_err(ClientError::Transport)?;

    if status.as_u16() >= 400 {
        warn!(status = status.as_u16(), "Vendor returned an error");
        // A bare `null` document is valid JSON with no entries.
        let document: Option<ErrorResponse> =
            serde_json::from_slice(&body).map_err(ClientError::Decoding)?;
        let Some(document) = document.filter(|d| !d.is_empty()) else {
            return Err(ClientError::Unstructured {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        };
        return Err(ClientError::Vendor {
            status: status.as_u16(),
            errors: document,
        });
    }

    debug!(status = status.as_u16(), "Request succeeded");
    serde_json::from_slice(&body).map_err(ClientError::Decoding)
}

/// Builder for [`SagePayClient`].
pub struct ClientBuilder {
    provider: Arc<dyn CredentialsProvider>,
    http: Option<Client>,
    debug_sink: Option<DebugSink>,
    test_mode: bool,
    timeout: Option<Duration>,
    test_host: String,
    production_host: String,
}

impl ClientBuilder {
    pub fn new(provider: Arc<dyn CredentialsProvider>) -> Self {
        Self {
            provider,
            http: None,
            debug_sink: None,
            test_mode: false,
            timeout: None,
            test_host: TEST_HOST.to_string(),
            production_host: PRODUCTION_HOST.to_string(),
        }
    }

    pub fn test_mode(mut self, test_mode: bool) -> Self {
        self.test_mode = test_mode;
        self
    }

    /// Copies request bodies to `sink` while in test mode.
    pub fn debug_sink(mut self, sink: DebugSink) -> Self {
        self.debug_sink = Some(sink);
        self
    }

    /// Uses an existing HTTP transport instead of a fresh one.
    pub fn http_client(mut self, http: Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Abandons any request that takes longer than `timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Overrides the test and production hosts.
    pub fn hosts(mut self, test_host: impl Into<String>, production_host: impl Into<String>) -> Self {
        self.test_host = normalize_host(test_host.into());
        self.production_host = normalize_host(production_host.into());
        self
    }

    /// Applies settings loaded from the environment.
    ///
    /// Only values that were actually set override the builder.
    pub fn config(mut self, config: ClientConfig) -> Self {
        if let Some(test_mode) = config.test_mode {
            self.test_mode = test_mode;
        }
        if let Some(timeout) = config.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(host) = config.test_host {
            self.test_host = normalize_host(host);
        }
        if let Some(host) = config.production_host {
            self.production_host = normalize_host(host);
        }
        self
    }

    /// Finishes the client, falling back to a default HTTP transport.
    pub fn build(self) -> SagePayClient {
        SagePayClient {
            http: self.http.unwrap_or_default(),
            provider: self.provider,
            debug_sink: self.debug_sink,
            test_mode: AtomicBool::new(self.test_mode),
            timeout: self.timeout,
            test_host: self.test_host,
            production_host: self.production_host,
        }
    }
}

fn normalize_host(host: String) -> String {
    host.trim_end_matches('/').to_string()
}
