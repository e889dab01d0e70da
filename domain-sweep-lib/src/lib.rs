//! # Domain Sweep Library
//!
//! Generate candidate domain names from a keyword and sweep them for
//! availability through whois, in polite fixed-size batches.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use domain_sweep_lib::{generate_domains, CheckConfig, DomainChecker, GenerateConfig, WhoisClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let generated = generate_domains("coffee", None, &GenerateConfig::default(), &mut rand::thread_rng())?;
//!
//!     let checker = DomainChecker::with_config(WhoisClient::new(), CheckConfig::default());
//!     let summary = checker.check_domains(&generated.domains).await;
//!
//!     for domain in &summary.available {
//!         println!("{}", domain);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Generator**: prefixes, suffixes, numbers and random mixes over any TLD set
//! - **Batched checking**: concurrent within a batch, paused between batches
//! - **Fail-closed**: a lookup that fails never reports a domain as available
//! - **Pluggable transports**: system whois, an HTTP whois service, or your own [`DomainLookup`]

// Re-export main public API types and functions
pub use checker::{write_results, CheckEvent, DomainChecker};
pub use classify::AvailabilityClassifier;
pub use concurrent::BatchPlan;
pub use config::{
    load_env_config, merge_configs, parse_timeout_string, CheckerSection, ConfigManager,
    EnvConfig, FileConfig, GenerationSection, LookupSection,
};
pub use error::DomainCheckError;
pub use protocols::{build_lookup, is_whois_available, DomainLookup, HttpLookup, WhoisClient};
pub use types::{
    CheckConfig, CheckMethod, CheckSummary, DomainResult, LookupConfig, LookupMethod,
    AVAILABLE_FILE, REGISTERED_FILE,
};
pub use utils::{parse_domain_list, read_domain_file, write_domain_list};

// Public modules
pub mod generate;

pub use generate::{default_output_path, generate_domains, generate_to_file};
pub use types::{GenerateConfig, GenerationResult};

mod checker;
mod classify;
mod concurrent;
mod config;
mod error;
mod protocols;
mod types;
mod utils;

pub type Result<T> = std::result::Result<T, DomainCheckError>;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
