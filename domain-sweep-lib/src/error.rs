//! Error handling for generation and availability checking.
//!
//! One error type covers every failure the library can report. Only a few of
//! them are fatal to a run: per-domain lookup errors are absorbed by the
//! checker and turned into a "registered" classification.

use std::fmt;
use std::time::Duration;

/// Main error type for domain-sweep operations.
#[derive(Debug, Clone)]
pub enum DomainCheckError {
    /// Invalid domain name or keyword
    InvalidDomain { domain: String, reason: String },

    /// Network-related errors (connection refused, DNS, etc.)
    NetworkError {
        message: String,
        source: Option<String>,
    },

    /// The whois program could not be run or produced nothing usable
    WhoisError { domain: String, message: String },

    /// An HTTP lookup service answered with a server error
    HttpError {
        domain: String,
        message: String,
        status_code: Option<u16>,
    },

    /// Configuration errors (invalid settings, bad TOML, etc.)
    ConfigError { message: String },

    /// File I/O errors when reading or writing domain lists
    FileError { path: String, message: String },

    /// A lookup did not settle in time
    Timeout {
        operation: String,
        duration: Duration,
    },
}

impl DomainCheckError {
    /// Create a new invalid domain error.
    pub fn invalid_domain<D: Into<String>, R: Into<String>>(domain: D, reason: R) -> Self {
        Self::InvalidDomain {
            domain: domain.into(),
            reason: reason.into(),
        }
    }

    /// Create a new network error.
    pub fn network<M: Into<String>>(message: M) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new network error with source information.
    pub fn network_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new WHOIS error.
    pub fn whois<D: Into<String>, M: Into<String>>(domain: D, message: M) -> Self {
        Self::WhoisError {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create a new HTTP lookup error with the response status.
    pub fn http_status<D: Into<String>, M: Into<String>>(
        domain: D,
        message: M,
        status_code: u16,
    ) -> Self {
        Self::HttpError {
            domain: domain.into(),
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for DomainCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDomain { domain, reason } => {
                write!(f, "Invalid domain '{}': {}", domain, reason)
            }
            Self::NetworkError { message, source } => {
                if let Some(source) = source {
                    write!(f, "Network error: {} (source: {})", message, source)
                } else {
                    write!(f, "Network error: {}", message)
                }
            }
            Self::WhoisError { domain, message } => {
                write!(f, "WHOIS error for '{}': {}", domain, message)
            }
            Self::HttpError {
                domain,
                message,
                status_code,
            } => {
                if let Some(code) = status_code {
                    write!(f, "HTTP lookup error for '{}' (HTTP {}): {}", domain, code, message)
                } else {
                    write!(f, "HTTP lookup error for '{}': {}", domain, message)
                }
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::FileError { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
            Self::Timeout {
                operation,
                duration,
            } => {
                write!(f, "Timeout after {:?} during: {}", duration, operation)
            }
        }
    }
}

impl std::error::Error for DomainCheckError {}

impl From<reqwest::Error> for DomainCheckError {
    fn from(err: reqwest::Error) -> Self {
        // The lookup deadline is enforced by the checker, so a client-side
        // timeout carries no duration of its own.
        if err.is_timeout() {
            Self::network_with_source("HTTP request timed out", err.to_string())
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err.to_string())
        } else {
            Self::network_with_source("HTTP request failed", err.to_string())
        }
    }
}
