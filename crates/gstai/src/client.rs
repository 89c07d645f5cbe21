//! Top-level API client

use std::fmt;
use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::resources::{
    AiResource, GstResource, InvoicesResource, ReconciliationResource, ReportsResource,
    UploadsResource,
};
use crate::transport::Transport;

/// Client for the GSTAI API
///
/// Holds the API key and one HTTP connection pool, both fixed at
/// construction. Cloning is cheap (the transport is shared behind an `Arc`)
/// and one client may be used concurrently from any number of tasks or
/// threads; there is no mutable state behind it.
///
/// Remote operations live on the resource handles: [`ai`](Client::ai),
/// [`reconciliation`](Client::reconciliation), [`invoices`](Client::invoices),
/// [`gst`](Client::gst), [`reports`](Client::reports),
/// [`uploads`](Client::uploads).
#[derive(Clone)]
pub struct Client {
    transport: Arc<Transport>,
}

impl Client {
    /// Create a client with the default configuration and the given API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(Config::new(api_key))
    }

    /// Create a client from `GSTAI_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::with_config(Config::from_env()?)
    }

    /// Create a client from an explicit [`Config`]
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self {
            transport: Arc::new(Transport::new(config)?),
        })
    }

    /// Document analysis operations
    pub fn ai(&self) -> AiResource<'_> {
        AiResource {
            transport: &self.transport,
        }
    }

    /// Reconciliation uploads and reports
    pub fn reconciliation(&self) -> ReconciliationResource<'_> {
        ReconciliationResource {
            transport: &self.transport,
        }
    }

    /// Invoice creation and listing
    pub fn invoices(&self) -> InvoicesResource<'_> {
        InvoicesResource {
            transport: &self.transport,
        }
    }

    /// Return filing and registry lookups
    pub fn gst(&self) -> GstResource<'_> {
        GstResource {
            transport: &self.transport,
        }
    }

    /// Report generation and export
    pub fn reports(&self) -> ReportsResource<'_> {
        ReportsResource {
            transport: &self.transport,
        }
    }

    /// Document and bulk uploads
    pub fn uploads(&self) -> UploadsResource<'_> {
        UploadsResource {
            transport: &self.transport,
        }
    }

    /// Endpoint this client talks to
    pub fn base_url(&self) -> &str {
        &self.transport.config().base_url
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", self.transport.config())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GstaiError;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_client_is_send_sync() {
        assert_send_sync::<Client>();
    }

    #[test]
    fn test_empty_key_fails_construction() {
        assert!(matches!(
            Client::new(""),
            Err(GstaiError::Configuration(_))
        ));
    }

    #[test]
    fn test_valid_key_constructs() {
        let client = Client::new("sk_test_abc123").unwrap();
        assert_eq!(client.base_url(), "https://api.gstai.in/v1");
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = Client::new("sk_live_0123456789abcdef").unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("0123456789abcdef"));
    }
}
