//! Main ContactClient

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use url::Url;

use crate::error::ApiError;
use crate::model::{ContactRequest, ContactResponse};
use crate::transport::ContactTransport;

/// Default path of the contact endpoint, relative to the site root.
pub const DEFAULT_ENDPOINT: &str = "/api/contact";

/// HTTP client for the contact endpoint.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks.
///
/// # Example
///
/// ```ignore
/// use contact_api::{ContactClient, ContactRequest};
///
/// let client = ContactClient::builder()
///     .base_url("https://www.example.com")
///     .build()?;
///
/// let response = client
///     .send(&ContactRequest::new().with("name", "Alice"))
///     .await?;
/// ```
#[derive(Clone)]
pub struct ContactClient {
    inner: Arc<ContactClientInner>,
}

struct ContactClientInner {
    endpoint: Url,
    http_client: Client,
    timeout: Option<Duration>,
}

impl ContactClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ContactClientBuilder<Missing> {
        ContactClientBuilder::new()
    }

    /// POSTs the payload as JSON and parses the endpoint's answer.
    ///
    /// The HTTP status is not inspected: the endpoint reports validation
    /// failures as `success: false` bodies. Any body that is not the
    /// expected JSON object is a [`ApiError::Parse`].
    pub async fn send(&self, request: &ContactRequest) -> Result<ContactResponse, ApiError> {
        debug!(
            "POST {} ({} fields)",
            self.inner.endpoint,
            request.len()
        );

        let mut builder = self
            .inner
            .http_client
            .post(self.inner.endpoint.clone())
            .json(request);

        if let Some(timeout) = self.inner.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| self.classify(e))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        debug!("contact endpoint answered HTTP {status} ({} bytes)", body.len());

        ContactResponse::from_body(&body)
            .map_err(|e| ApiError::parse_with_body(e.to_string(), body))
    }

    /// Returns the full endpoint URL.
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    fn classify(&self, error: reqwest::Error) -> ApiError {
        match self.inner.timeout {
            Some(timeout) if error.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(error),
        }
    }
}

impl std::fmt::Debug for ContactClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactClient")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

#[async_trait]
impl ContactTransport for ContactClient {
    async fn submit(&self, request: &ContactRequest) -> Result<ContactResponse, ApiError> {
        self.send(request).await
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`ContactClient`].
///
/// Uses the typestate pattern to ensure the base URL is set at compile time.
///
/// # Example
///
/// ```ignore
/// let client = ContactClient::builder()
///     .base_url("https://www.example.com")
///     .endpoint("/api/contact")
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub struct ContactClientBuilder<Base> {
    base_url: Base,
    endpoint: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl ContactClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: Missing,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the site root the endpoint path is resolved against.
    pub fn base_url(self, url: impl Into<String>) -> ContactClientBuilder<Set<String>> {
        ContactClientBuilder {
            base_url: Set(url.into()),
            endpoint: self.endpoint,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for ContactClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> ContactClientBuilder<B> {
    /// Sets the endpoint path.
    ///
    /// Defaults to `/api/contact`.
    pub fn endpoint(mut self, path: impl Into<String>) -> Self {
        self.endpoint = path.into();
        self
    }

    /// Sets the request timeout. No timeout by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl ContactClientBuilder<Set<String>> {
    /// Builds the [`ContactClient`].
    ///
    /// Fails if the base URL or endpoint path cannot be parsed, or if the
    /// default HTTP client cannot be constructed.
    pub fn build(self) -> Result<ContactClient, ApiError> {
        let base = Url::parse(&self.base_url.0)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", self.base_url.0)))?;
        let endpoint = base
            .join(&self.endpoint)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", self.endpoint)))?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(ContactClient {
            inner: Arc::new(ContactClientInner {
                endpoint,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}
