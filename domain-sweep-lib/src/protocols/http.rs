//! Lookups through an HTTP whois service.
//!
//! The service is addressed by a URL template such as
//! `https://whois.example.net/lookup/{domain}`. The response body is treated
//! exactly like whois output.

use super::DomainLookup;
use crate::error::DomainCheckError;
use crate::types::CheckMethod;
use async_trait::async_trait;

const DOMAIN_PLACEHOLDER: &str = "{domain}";

/// HTTP lookup client.
#[derive(Clone)]
pub struct HttpLookup {
    http_client: reqwest::Client,
    url_template: String,
}

impl HttpLookup {
    /// Create a client for `url_template`, which must contain `{domain}`.
    pub fn new<T: Into<String>>(url_template: T) -> Result<Self, DomainCheckError> {
        let url_template = url_template.into();
        if !url_template.contains(DOMAIN_PLACEHOLDER) {
            return Err(DomainCheckError::config(format!(
                "Lookup URL '{}' must contain a {} placeholder",
                url_template, DOMAIN_PLACEHOLDER
            )));
        }

        let http_client = reqwest::Client::builder()
            .user_agent(concat!("domain-sweep/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                DomainCheckError::network_with_source(
                    "Failed to create lookup HTTP client",
                    e.to_string(),
                )
            })?;

        Ok(Self {
            http_client,
            url_template,
        })
    }

    /// The request URL for `domain`.
    pub fn url_for(&self, domain: &str) -> String {
        self.url_template.replace(DOMAIN_PLACEHOLDER, domain)
    }

    pub fn url_template(&self) -> &str {
        &self.url_template
    }
}

#[async_trait]
impl DomainLookup for HttpLookup {
    /// Fetch the record body.
    ///
    /// Client errors such as 404 are answers, not failures: many services
    /// report unknown domains that way, and the body goes to the classifier.
    /// Server errors and transport errors are failures.
    async fn lookup(&self, domain: &str) -> Result<String, DomainCheckError> {
        let url = self.url_for(domain);
        let response = self.http_client.get(&url).send().await?;
        let status = response.status();

        if status.is_server_error() {
            return Err(DomainCheckError::http_status(
                domain,
                status.canonical_reason().unwrap_or("server error"),
                status.as_u16(),
            ));
        }

        let body = response.text().await?;
        tracing::debug!(domain, status = status.as_u16(), bytes = body.len(), "http lookup answered");
        Ok(body)
    }

    fn method(&self) -> CheckMethod {
        CheckMethod::Http
    }
}
