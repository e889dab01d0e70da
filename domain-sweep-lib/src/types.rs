//! Core data types for generation and availability checking.
//!
//! This module defines the data structures shared by the generator, the
//! checker and the CLI: per-domain results, run summaries and the
//! configuration structs with their built-in defaults.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Prefixes placed in front of the keyword.
pub const DEFAULT_PREFIXES: &[&str] = &[
    "my", "the", "best", "top", "pro", "go", "get", "try", "easy", "smart", "digital", "online",
    "web", "app", "i", "e", "a", "super", "ultra", "mega", "cool", "awesome", "epic", "great",
    "prime", "elite", "premium", "royal", "global", "hyper", "cyber", "tech", "net",
];

/// Suffixes appended to the keyword.
pub const DEFAULT_SUFFIXES: &[&str] = &[
    "hub", "spot", "zone", "place", "center", "pro", "now", "app", "site", "web", "online",
    "tech", "space", "world", "net", "hq", "central", "club", "team", "network", "systems",
    "solutions", "services", "tools", "expert", "master", "guru",
];

/// Numbers appended to (and partly prepended to) the keyword.
pub const DEFAULT_NUMBERS: &[&str] = &[
    "1", "2", "3", "4", "5", "7", "8", "9", "10", "24", "365", "247",
];

/// TLDs used when the caller names no zones.
pub const DEFAULT_TLDS: &[&str] = &[".com", ".net", ".org", ".io", ".co", ".app"];

/// Response phrases that mark a domain as unregistered.
pub const DEFAULT_AVAILABILITY_PHRASES: &[&str] = &[
    "no match",
    "not found",
    "no data found",
    "no entries found",
    "domain not found",
    "domain available",
    "no object found",
    "not registered",
    "status: free",
    "status: available",
];

/// File the checker writes available domains to.
pub const AVAILABLE_FILE: &str = "available_domains.txt";

/// File the checker writes registered (or unresolved) domains to.
pub const REGISTERED_FILE: &str = "registered_domains.txt";

/// Result of a single availability check.
///
/// A result is always definitive: when the lookup fails the domain is
/// reported as registered and `error_message` says why.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DomainResult {
    /// The domain name that was checked (e.g., "example.com")
    pub domain: String,

    /// Whether the domain looks available for registration
    pub available: bool,

    /// The availability phrase found in the response, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_phrase: Option<String>,

    /// Why the lookup failed, when it did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// How long the lookup took to settle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_duration: Option<Duration>,

    /// Which transport answered
    pub method_used: CheckMethod,
}

impl DomainResult {
    /// True when the registered classification came from a failed lookup.
    pub fn is_failure(&self) -> bool {
        self.error_message.is_some()
    }
}

/// Transport used to look a domain up.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CheckMethod {
    /// System whois command
    #[serde(rename = "whois")]
    Whois,

    /// HTTP lookup service
    #[serde(rename = "http")]
    Http,

    /// Anything else (test doubles, embedders)
    #[serde(rename = "custom")]
    Custom,
}

impl std::fmt::Display for CheckMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckMethod::Whois => write!(f, "WHOIS"),
            CheckMethod::Http => write!(f, "HTTP"),
            CheckMethod::Custom => write!(f, "Custom"),
        }
    }
}

/// Configuration for the batched availability checker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Domains looked up concurrently per batch
    /// Default: 5, Range: 1-100
    pub batch_size: usize,

    /// Pause between two consecutive batches
    /// Default: 2 seconds
    #[serde(skip)]
    pub batch_delay: Duration,

    /// Upper bound for a single lookup; `None` waits forever
    /// Default: 10 seconds
    #[serde(skip)]
    pub lookup_timeout: Option<Duration>,

    /// Phrases that classify a response as available
    pub availability_phrases: Vec<String>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            batch_size: 5,
            batch_delay: Duration::from_millis(2000),
            lookup_timeout: Some(Duration::from_secs(10)),
            availability_phrases: DEFAULT_AVAILABILITY_PHRASES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl CheckConfig {
    /// Set the batch size, clamped to 1-100.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.clamp(1, 100);
        self
    }

    /// Set the pause between batches.
    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    /// Set the per-lookup timeout. A zero duration disables it.
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = if timeout.is_zero() {
            None
        } else {
            Some(timeout)
        };
        self
    }

    /// Append phrases to the availability list.
    pub fn with_extra_phrases(mut self, phrases: Vec<String>) -> Self {
        for phrase in phrases {
            let phrase = phrase.trim().to_lowercase();
            if !phrase.is_empty() && !self.availability_phrases.contains(&phrase) {
                self.availability_phrases.push(phrase);
            }
        }
        self
    }
}

/// Which lookup transport the checker should use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LookupMethod {
    #[default]
    Whois,
    Http,
}

impl std::str::FromStr for LookupMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "whois" => Ok(Self::Whois),
            "http" => Ok(Self::Http),
            other => Err(format!("unknown lookup method '{}', use whois or http", other)),
        }
    }
}

/// Settings for building the lookup transport.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LookupConfig {
    pub method: LookupMethod,

    /// Program run for whois lookups
    pub whois_command: String,

    /// Optional server passed as `-h <server>`
    pub whois_server: Option<String>,

    /// URL template for HTTP lookups, containing `{domain}`
    pub url_template: Option<String>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            method: LookupMethod::Whois,
            whois_command: "whois".to_string(),
            whois_server: None,
            url_template: None,
        }
    }
}

/// Vocabularies and knobs for candidate generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateConfig {
    pub prefixes: Vec<String>,
    pub suffixes: Vec<String>,
    pub numbers: Vec<String>,

    /// How many random prefix+keyword+suffix labels to draw
    pub random_combinations: usize,

    /// How many leading entries of `numbers` are also used as prefixes
    pub numeric_prefix_count: usize,

    /// TLDs used when no zones are supplied
    pub default_tlds: Vec<String>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        let owned = |list: &[&str]| list.iter().map(|s| s.to_string()).collect();
        Self {
            prefixes: owned(DEFAULT_PREFIXES),
            suffixes: owned(DEFAULT_SUFFIXES),
            numbers: owned(DEFAULT_NUMBERS),
            random_combinations: 20,
            numeric_prefix_count: 5,
            default_tlds: owned(DEFAULT_TLDS),
        }
    }
}

/// Output of the generator.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    /// Deduplicated labels, before TLDs are attached
    pub candidates: Vec<String>,

    /// Resolved TLDs, each with one leading dot
    pub tlds: Vec<String>,

    /// Candidates × TLDs
    pub domains: Vec<String>,
}

/// Outcome of a whole checker run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckSummary {
    pub available: Vec<String>,
    pub registered: Vec<String>,

    /// Every per-domain result, in input order
    pub results: Vec<DomainResult>,

    /// Number of batches executed
    pub batches: usize,

    /// Number of inter-batch pauses taken
    pub pauses: usize,

    /// Lookups that failed and were classified as registered
    pub failures: usize,

    #[serde(skip)]
    pub duration: Duration,
}

impl CheckSummary {
    /// Total number of domains classified.
    pub fn total(&self) -> usize {
        self.available.len() + self.registered.len()
    }

    /// Merge one settled batch into the run totals.
    pub(crate) fn absorb_batch(&mut self, batch: Vec<DomainResult>) {
        for result in batch {
            if result.available {
                self.available.push(result.domain.clone());
            } else {
                self.registered.push(result.domain.clone());
            }
            if result.is_failure() {
                self.failures += 1;
            }
            self.results.push(result);
        }
        self.batches += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_config_defaults() {
        let config = CheckConfig::default();
        assert_eq!(config.batch_size, 5);
        assert_eq!(config.batch_delay, Duration::from_millis(2000));
        assert_eq!(config.lookup_timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.availability_phrases.len(), 10);
    }

    #[test]
    fn test_check_config_builders() {
        let config = CheckConfig::default()
            .with_batch_size(0)
            .with_lookup_timeout(Duration::ZERO)
            .with_extra_phrases(vec!["  No Such Domain ".to_string(), "no match".to_string()]);
        assert_eq!(config.batch_size, 1);
        assert_eq!(config.lookup_timeout, None);
        assert_eq!(config.availability_phrases.len(), 11);
        assert!(config
            .availability_phrases
            .contains(&"no such domain".to_string()));
    }

    #[test]
    fn test_generate_config_defaults() {
        let config = GenerateConfig::default();
        assert_eq!(config.prefixes.len(), 33);
        assert_eq!(config.suffixes.len(), 27);
        assert_eq!(config.numbers.len(), 12);
        assert_eq!(config.random_combinations, 20);
        assert_eq!(config.numeric_prefix_count, 5);
        assert_eq!(config.default_tlds.len(), 6);
    }

    #[test]
    fn test_lookup_method_from_str() {
        assert_eq!("whois".parse::<LookupMethod>(), Ok(LookupMethod::Whois));
        assert_eq!(" HTTP ".parse::<LookupMethod>(), Ok(LookupMethod::Http));
        assert!("rdap".parse::<LookupMethod>().is_err());
    }

    #[test]
    fn test_summary_absorb_batch() {
        let mut summary = CheckSummary::default();
        summary.absorb_batch(vec![
            DomainResult {
                domain: "free.io".to_string(),
                available: true,
                matched_phrase: Some("no match".to_string()),
                error_message: None,
                check_duration: None,
                method_used: CheckMethod::Custom,
            },
            DomainResult {
                domain: "down.io".to_string(),
                available: false,
                matched_phrase: None,
                error_message: Some("timeout".to_string()),
                check_duration: None,
                method_used: CheckMethod::Custom,
            },
        ]);
        assert_eq!(summary.available, vec!["free.io"]);
        assert_eq!(summary.registered, vec!["down.io"]);
        assert_eq!(summary.failures, 1);
        assert_eq!(summary.batches, 1);
        assert_eq!(summary.total(), 2);
    }
}
