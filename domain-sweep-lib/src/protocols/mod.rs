//! Lookup transports.
//!
//! The checker only needs one capability: given a domain, return the raw
//! registry text or fail. [`DomainLookup`] is that capability; the system
//! whois command and an HTTP lookup service implement it here, and tests
//! plug in their own.

/// System whois command transport
pub mod whois;

/// HTTP lookup service transport
pub mod http;

pub use http::HttpLookup;
pub use whois::{is_whois_available, WhoisClient};

use crate::error::DomainCheckError;
use crate::types::{CheckMethod, LookupConfig, LookupMethod};
use async_trait::async_trait;
use std::sync::Arc;

/// Something that can fetch raw registry data for a domain.
#[async_trait]
pub trait DomainLookup: Send + Sync {
    /// Fetch the raw text response for `domain`.
    async fn lookup(&self, domain: &str) -> Result<String, DomainCheckError>;

    /// Which transport this is, for reporting.
    fn method(&self) -> CheckMethod {
        CheckMethod::Custom
    }
}

#[async_trait]
impl<L: DomainLookup + ?Sized> DomainLookup for Arc<L> {
    async fn lookup(&self, domain: &str) -> Result<String, DomainCheckError> {
        (**self).lookup(domain).await
    }

    fn method(&self) -> CheckMethod {
        (**self).method()
    }
}

#[async_trait]
impl<L: DomainLookup + ?Sized> DomainLookup for Box<L> {
    async fn lookup(&self, domain: &str) -> Result<String, DomainCheckError> {
        (**self).lookup(domain).await
    }

    fn method(&self) -> CheckMethod {
        (**self).method()
    }
}

/// Build the transport named by `config`.
///
/// HTTP lookups need a URL template with a `{domain}` placeholder.
pub fn build_lookup(config: &LookupConfig) -> Result<Box<dyn DomainLookup>, DomainCheckError> {
    match config.method {
        LookupMethod::Whois => {
            let mut client = WhoisClient::with_command(&config.whois_command);
            if let Some(server) = &config.whois_server {
                client = client.with_server(server);
            }
            Ok(Box::new(client))
        }
        LookupMethod::Http => {
            let template = config.url_template.as_deref().ok_or_else(|| {
                DomainCheckError::config("HTTP lookup requires a URL template")
            })?;
            Ok(Box::new(HttpLookup::new(template)?))
        }
    }
}
