//! WHOIS lookups through the system's whois command.
//!
//! The client does no parsing of its own. It runs `whois [-h server] <domain>`
//! and hands the raw output back to the checker, which classifies it.

use super::DomainLookup;
use crate::error::DomainCheckError;
use crate::types::CheckMethod;
use async_trait::async_trait;
use tokio::process::Command;

/// Phrases some registries print when they throttle a client.
const RATE_LIMIT_PATTERNS: &[&str] = &[
    "rate limit exceeded",
    "too many requests",
    "try again later",
    "quota exceeded",
    "limit exceeded",
    "throttled",
    "rate-limited",
];

/// WHOIS client backed by an external whois program.
///
/// The program defaults to `whois` on the `PATH`; any executable that takes
/// the domain as its last argument and prints the record works.
#[derive(Debug, Clone)]
pub struct WhoisClient {
    command: String,
    server: Option<String>,
}

impl WhoisClient {
    /// Client running the system `whois` command.
    pub fn new() -> Self {
        Self::with_command("whois")
    }

    /// Client running a different whois program.
    pub fn with_command<C: Into<String>>(command: C) -> Self {
        Self {
            command: command.into(),
            server: None,
        }
    }

    /// Query a specific server with `-h <server>`.
    pub fn with_server<S: Into<String>>(mut self, server: S) -> Self {
        self.server = Some(server.into());
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn server(&self) -> Option<&str> {
        self.server.as_deref()
    }

    /// Run the whois program for `domain` and return its standard output.
    ///
    /// # Errors
    ///
    /// Returns [`DomainCheckError::WhoisError`] if the program cannot be
    /// started, or if it exits unsuccessfully without printing anything.
    pub async fn query(&self, domain: &str) -> Result<String, DomainCheckError> {
        let mut command = Command::new(&self.command);
        if let Some(server) = &self.server {
            command.arg("-h").arg(server);
        }
        command.arg(domain).kill_on_drop(true);

        let output = command.output().await.map_err(|e| {
            DomainCheckError::whois(
                domain,
                format!(
                    "Failed to execute '{}': {}. Make sure it is installed.",
                    self.command, e
                ),
            )
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

        if stdout.trim().is_empty() && !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DomainCheckError::whois(
                domain,
                format!("'{}' exited with {}: {}", self.command, output.status, stderr.trim()),
            ));
        }

        // Throttled responses are classified like any other; without an
        // availability phrase the domain ends up registered.
        if is_rate_limited(&stdout) {
            tracing::warn!(domain, "whois response looks rate limited");
        }

        Ok(stdout)
    }
}

impl Default for WhoisClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DomainLookup for WhoisClient {
    async fn lookup(&self, domain: &str) -> Result<String, DomainCheckError> {
        self.query(domain).await
    }

    fn method(&self) -> CheckMethod {
        CheckMethod::Whois
    }
}

/// Whether whois output indicates the client was throttled.
pub fn is_rate_limited(output: &str) -> bool {
    let output = output.to_lowercase();
    RATE_LIMIT_PATTERNS
        .iter()
        .any(|pattern| output.contains(pattern))
}

/// Check whether `command` can be started at all.
pub async fn is_whois_available(command: &str) -> bool {
    Command::new(command)
        .arg("--version")
        .output()
        .await
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_detection() {
        assert!(is_rate_limited("Rate limit exceeded. Try again later."));
        assert!(is_rate_limited("TOO MANY REQUESTS from your IP"));
        assert!(!is_rate_limited("Domain Name: EXAMPLE.COM"));
    }

    #[test]
    fn test_client_creation() {
        let client = WhoisClient::new();
        assert_eq!(client.command(), "whois");
        assert_eq!(client.server(), None);

        let custom = WhoisClient::with_command("/usr/local/bin/whois").with_server("whois.nic.io");
        assert_eq!(custom.command(), "/usr/local/bin/whois");
        assert_eq!(custom.server(), Some("whois.nic.io"));
        assert_eq!(custom.method(), CheckMethod::Whois);
    }

    #[tokio::test]
    async fn test_missing_program_is_whois_error() {
        let client = WhoisClient::with_command("domain-sweep-no-such-whois-binary");
        let err = client.query("example.com").await.unwrap_err();
        assert!(matches!(err, DomainCheckError::WhoisError { .. }));
        assert!(err.to_string().contains("domain-sweep-no-such-whois-binary"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_output_is_returned_verbatim() {
        let client = WhoisClient::with_command("echo");
        let output = client.lookup("example.com").await.unwrap();
        assert_eq!(output.trim(), "example.com");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_server_is_passed_with_h_flag() {
        let client = WhoisClient::with_command("echo").with_server("whois.verisign-grs.com");
        let output = client.lookup("example.com").await.unwrap();
        assert_eq!(output.trim(), "-h whois.verisign-grs.com example.com");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_silent_failure_is_error() {
        let client = WhoisClient::with_command("false");
        assert!(client.lookup("example.com").await.is_err());
    }
}
