//! Configuration file parsing and management.
//!
//! Settings come from TOML files, `DS_*` environment variables and CLI flags.
//! This module loads the first two and merges them with proper precedence;
//! the CLI applies its flags on top of the result.

use crate::error::DomainCheckError;
use crate::types::{CheckConfig, GenerateConfig, LookupConfig, LookupMethod};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration loaded from TOML files.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FileConfig {
    /// Batching and timeouts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checker: Option<CheckerSection>,

    /// Lookup transport and availability phrases
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup: Option<LookupSection>,

    /// Candidate generation vocabularies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<GenerationSection>,
}

/// `[checker]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CheckerSection {
    /// Domains per batch, 1-100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<usize>,

    /// Pause between batches in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,

    /// Per-lookup timeout (as string, e.g., "10s", "1m"; "0" disables)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

/// `[lookup]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LookupSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<LookupMethod>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub whois_command: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub whois_server: Option<String>,

    /// URL template for HTTP lookups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Phrases added to the built-in availability list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_phrases: Option<Vec<String>>,

    /// Use `extra_phrases` instead of the built-in list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_phrases: Option<bool>,
}

/// `[generation]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GenerationSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefixes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffixes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub numbers: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_combinations: Option<usize>,

    /// TLDs used when `generate` gets no zones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_tlds: Option<Vec<String>>,
}

impl FileConfig {
    /// Checker settings with this configuration applied over the defaults.
    pub fn check_config(&self) -> Result<CheckConfig, DomainCheckError> {
        let mut config = CheckConfig::default();

        if let Some(checker) = &self.checker {
            if let Some(batch_size) = checker.batch_size {
                validate_batch_size(batch_size)?;
                config = config.with_batch_size(batch_size);
            }
            if let Some(delay_ms) = checker.delay_ms {
                config = config.with_batch_delay(Duration::from_millis(delay_ms));
            }
            if let Some(timeout) = &checker.timeout {
                let secs = parse_timeout_string(timeout).ok_or_else(|| invalid_timeout(timeout))?;
                config = config.with_lookup_timeout(Duration::from_secs(secs));
            }
        }

        if let Some(lookup) = &self.lookup {
            if lookup.replace_phrases == Some(true) {
                config.availability_phrases.clear();
            }
            if let Some(phrases) = &lookup.extra_phrases {
                config = config.with_extra_phrases(phrases.clone());
            }
        }

        if config.availability_phrases.is_empty() {
            return Err(DomainCheckError::config(
                "replace_phrases = true needs at least one entry in extra_phrases",
            ));
        }

        Ok(config)
    }

    /// Lookup transport settings with this configuration applied.
    pub fn lookup_config(&self) -> LookupConfig {
        let mut config = LookupConfig::default();
        if let Some(lookup) = &self.lookup {
            if let Some(method) = lookup.method {
                config.method = method;
            }
            if let Some(command) = &lookup.whois_command {
                config.whois_command = command.clone();
            }
            if lookup.whois_server.is_some() {
                config.whois_server = lookup.whois_server.clone();
            }
            if lookup.url.is_some() {
                config.url_template = lookup.url.clone();
            }
        }
        config
    }

    /// Generation vocabularies with this configuration applied.
    pub fn generate_config(&self) -> GenerateConfig {
        let mut config = GenerateConfig::default();
        if let Some(generation) = &self.generation {
            if let Some(prefixes) = &generation.prefixes {
                config.prefixes = prefixes.clone();
            }
            if let Some(suffixes) = &generation.suffixes {
                config.suffixes = suffixes.clone();
            }
            if let Some(numbers) = &generation.numbers {
                config.numbers = numbers.clone();
            }
            if let Some(count) = generation.random_combinations {
                config.random_combinations = count;
            }
            if let Some(tlds) = &generation.default_tlds {
                config.default_tlds = tlds.clone();
            }
        }
        config
    }
}

/// Configuration discovery and loading functionality.
pub struct ConfigManager {
    /// Whether to report which files were picked up
    pub verbose: bool,
}

impl ConfigManager {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// A missing or unreadable file is a `FileError`; malformed TOML or
    /// out-of-range values are a `ConfigError`. Only values set in this file
    /// are checked: a url for `method = "http"` may come from another layer
    /// and is required once the lookup is built.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, DomainCheckError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DomainCheckError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DomainCheckError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content).map_err(|e| {
            DomainCheckError::config(format!(
                "Failed to parse TOML configuration {}: {}",
                path.display(),
                e
            ))
        })?;

        self.validate_config(&config)?;

        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    ///
    /// XDG config is lowest, then the global file in `$HOME`, then a file in
    /// the current directory. A discovered file that fails to parse is an
    /// error rather than being skipped silently.
    pub fn discover_and_load(&self) -> Result<FileConfig, DomainCheckError> {
        let mut merged_config = FileConfig::default();
        let mut loaded_files = Vec::new();

        let candidates = [
            self.get_xdg_config_path(),
            self.get_global_config_path(),
            self.get_local_config_path(),
        ];

        for path in candidates.into_iter().flatten() {
            let config = self.load_file(&path)?;
            merged_config = merge_configs(merged_config, config);
            loaded_files.push(path);
        }

        for path in &loaded_files {
            tracing::info!(path = %path.display(), "loaded config file");
        }
        if self.verbose && loaded_files.len() > 1 {
            tracing::info!(
                count = loaded_files.len(),
                "multiple config files found, later files take precedence"
            );
        }

        Ok(merged_config)
    }

    /// Resolve file and environment configuration into one.
    ///
    /// An explicit file (`--config` or `DS_CONFIG`) replaces discovery.
    /// Environment values win over file values.
    pub fn resolve(
        &self,
        explicit: Option<&Path>,
        env_config: &EnvConfig,
    ) -> Result<FileConfig, DomainCheckError> {
        let explicit = explicit
            .map(Path::to_path_buf)
            .or_else(|| env_config.config.as_ref().map(PathBuf::from));

        let file_config = match explicit {
            Some(path) => self.load_file(path)?,
            None => self.discover_and_load()?,
        };

        let merged = merge_configs(file_config, env_config.to_file_config());
        self.validate_config(&merged)?;
        Ok(merged)
    }

    fn get_local_config_path(&self) -> Option<PathBuf> {
        ["./domain-sweep.toml", "./.domain-sweep.toml"]
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(Path::to_path_buf)
    }

    fn get_global_config_path(&self) -> Option<PathBuf> {
        let home = env::var_os("HOME")?;
        let path = Path::new(&home).join(".domain-sweep.toml");
        path.exists().then_some(path)
    }

    fn get_xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;

        let path = config_dir.join("domain-sweep").join("config.toml");
        path.exists().then_some(path)
    }

    /// Validate the values a single configuration layer sets.
    pub fn validate_config(&self, config: &FileConfig) -> Result<(), DomainCheckError> {
        if let Some(checker) = &config.checker {
            if let Some(batch_size) = checker.batch_size {
                validate_batch_size(batch_size)?;
            }
            if let Some(timeout) = &checker.timeout {
                if parse_timeout_string(timeout).is_none() {
                    return Err(invalid_timeout(timeout));
                }
            }
        }

        if let Some(lookup) = &config.lookup {
            if let Some(url) = &lookup.url {
                if !url.contains("{domain}") {
                    return Err(DomainCheckError::config(format!(
                        "Lookup URL '{}' must contain a {{domain}} placeholder",
                        url
                    )));
                }
            }
            if let Some(command) = &lookup.whois_command {
                if command.trim().is_empty() {
                    return Err(DomainCheckError::config("whois_command cannot be empty"));
                }
            }
        }

        Ok(())
    }
}

/// Merge two configurations, values from `higher` winning field by field.
pub fn merge_configs(lower: FileConfig, higher: FileConfig) -> FileConfig {
    FileConfig {
        checker: match (lower.checker, higher.checker) {
            (Some(lower), Some(higher)) => Some(CheckerSection {
                batch_size: higher.batch_size.or(lower.batch_size),
                delay_ms: higher.delay_ms.or(lower.delay_ms),
                timeout: higher.timeout.or(lower.timeout),
            }),
            (lower, higher) => higher.or(lower),
        },
        lookup: match (lower.lookup, higher.lookup) {
            (Some(lower), Some(higher)) => Some(LookupSection {
                method: higher.method.or(lower.method),
                whois_command: higher.whois_command.or(lower.whois_command),
                whois_server: higher.whois_server.or(lower.whois_server),
                url: higher.url.or(lower.url),
                extra_phrases: higher.extra_phrases.or(lower.extra_phrases),
                replace_phrases: higher.replace_phrases.or(lower.replace_phrases),
            }),
            (lower, higher) => higher.or(lower),
        },
        generation: match (lower.generation, higher.generation) {
            (Some(lower), Some(higher)) => Some(GenerationSection {
                prefixes: higher.prefixes.or(lower.prefixes),
                suffixes: higher.suffixes.or(lower.suffixes),
                numbers: higher.numbers.or(lower.numbers),
                random_combinations: higher.random_combinations.or(lower.random_combinations),
                default_tlds: higher.default_tlds.or(lower.default_tlds),
            }),
            (lower, higher) => higher.or(lower),
        },
    }
}

/// Environment variable configuration that mirrors CLI options.
///
/// This represents configuration values that can be set via DS_* environment variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvConfig {
    pub batch_size: Option<usize>,
    pub delay_ms: Option<u64>,
    pub timeout: Option<String>,
    pub lookup: Option<LookupMethod>,
    pub lookup_url: Option<String>,
    pub whois_command: Option<String>,
    pub whois_server: Option<String>,
    pub tlds: Option<Vec<String>>,
    pub prefixes: Option<Vec<String>>,
    pub suffixes: Option<Vec<String>>,
    pub config: Option<String>,
}

impl EnvConfig {
    /// Parse `DS_*` values supplied by `var`.
    ///
    /// Invalid values are reported as warnings and ignored.
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut env_config = EnvConfig::default();
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        if let Some(val) = non_empty("DS_BATCH_SIZE") {
            match val.trim().parse::<usize>() {
                Ok(size) if (1..=100).contains(&size) => env_config.batch_size = Some(size),
                _ => tracing::warn!(value = %val, "ignoring invalid DS_BATCH_SIZE, must be 1-100"),
            }
        }

        if let Some(val) = non_empty("DS_DELAY_MS") {
            match val.trim().parse::<u64>() {
                Ok(ms) => env_config.delay_ms = Some(ms),
                Err(_) => tracing::warn!(value = %val, "ignoring invalid DS_DELAY_MS"),
            }
        }

        if let Some(val) = non_empty("DS_TIMEOUT") {
            if parse_timeout_string(&val).is_some() {
                env_config.timeout = Some(val);
            } else {
                tracing::warn!(value = %val, "ignoring invalid DS_TIMEOUT, use '10s' or '2m'");
            }
        }

        if let Some(val) = non_empty("DS_LOOKUP") {
            match val.parse::<LookupMethod>() {
                Ok(method) => env_config.lookup = Some(method),
                Err(e) => tracing::warn!(value = %val, "ignoring DS_LOOKUP: {}", e),
            }
        }

        env_config.lookup_url = non_empty("DS_LOOKUP_URL");
        env_config.whois_command = non_empty("DS_WHOIS_COMMAND");
        env_config.whois_server = non_empty("DS_WHOIS_SERVER");
        env_config.config = non_empty("DS_CONFIG");
        env_config.tlds = non_empty("DS_TLD").map(|v| split_list(&v));
        env_config.prefixes = non_empty("DS_PREFIX").map(|v| split_list(&v));
        env_config.suffixes = non_empty("DS_SUFFIX").map(|v| split_list(&v));

        env_config
    }

    /// The environment values as a config layer for [`merge_configs`].
    pub fn to_file_config(&self) -> FileConfig {
        let checker = CheckerSection {
            batch_size: self.batch_size,
            delay_ms: self.delay_ms,
            timeout: self.timeout.clone(),
        };
        let lookup = LookupSection {
            method: self.lookup,
            whois_command: self.whois_command.clone(),
            whois_server: self.whois_server.clone(),
            url: self.lookup_url.clone(),
            ..Default::default()
        };
        let generation = GenerationSection {
            prefixes: self.prefixes.clone(),
            suffixes: self.suffixes.clone(),
            default_tlds: self.tlds.clone(),
            ..Default::default()
        };

        FileConfig {
            checker: (checker != CheckerSection::default()).then_some(checker),
            lookup: (lookup != LookupSection::default()).then_some(lookup),
            generation: (generation != GenerationSection::default()).then_some(generation),
        }
    }
}

/// Load configuration from the process environment.
///
/// With `verbose`, every variable that took effect is logged.
pub fn load_env_config(verbose: bool) -> EnvConfig {
    let env_config = EnvConfig::from_vars(|key| env::var(key).ok());
    if verbose && env_config != EnvConfig::default() {
        tracing::info!(?env_config, "using DS_* environment settings");
    }
    env_config
}

/// Parse a timeout string like "5s", "30s", "2m" into seconds.
///
/// A bare number is taken as seconds. Returns `None` if parsing fails.
pub fn parse_timeout_string(timeout_str: &str) -> Option<u64> {
    let timeout_str = timeout_str.trim().to_lowercase();

    if let Some(secs) = timeout_str.strip_suffix('s') {
        secs.parse::<u64>().ok()
    } else if let Some(mins) = timeout_str.strip_suffix('m') {
        mins.parse::<u64>().ok().and_then(|m| m.checked_mul(60))
    } else {
        timeout_str.parse::<u64>().ok()
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn validate_batch_size(batch_size: usize) -> Result<(), DomainCheckError> {
    if batch_size == 0 || batch_size > 100 {
        return Err(DomainCheckError::config(
            "Batch size must be between 1 and 100",
        ));
    }
    Ok(())
}

fn invalid_timeout(value: &str) -> DomainCheckError {
    DomainCheckError::config(format!(
        "Invalid timeout format '{}'. Use format like '5s', '30s', '2m'",
        value
    ))
}
