//! Contact endpoint client library
//!
//! Wire types and an async HTTP client for the site's `POST /api/contact`
//! endpoint, plus the [`ContactTransport`] seam the page runtime submits
//! through.

pub mod error;
pub mod model;

mod client;
mod transport;

pub use client::*;
pub use error::ApiError;
pub use model::{ContactRequest, ContactResponse};
pub use transport::ContactTransport;
