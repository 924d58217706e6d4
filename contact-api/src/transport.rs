//! ContactTransport trait

use async_trait::async_trait;

use crate::error::ApiError;
use crate::model::{ContactRequest, ContactResponse};

/// Something that can deliver a contact submission and report the answer.
///
/// [`ContactClient`](crate::ContactClient) is the HTTP implementation;
/// tests and offline hosts provide their own.
#[async_trait]
pub trait ContactTransport: Send + Sync {
    /// Submit one payload. Resolves once the endpoint has answered.
    async fn submit(&self, request: &ContactRequest) -> Result<ContactResponse, ApiError>;
}
