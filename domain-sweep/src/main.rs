//! Domain Sweep CLI Application
//!
//! Generate domain name ideas from a keyword, then sweep a list of domains
//! for availability through whois. A thin front end over domain-sweep-lib.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{CommandFactory, Parser, Subcommand};
use console::style;
use domain_sweep_lib::{
    generate_to_file, is_whois_available, load_env_config, parse_timeout_string,
    read_domain_file, write_results, CheckConfig, ConfigManager, DomainCheckError, DomainChecker,
    FileConfig, LookupConfig, LookupMethod,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for domain-sweep
#[derive(Parser, Debug)]
#[command(name = "domain-sweep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate domain name ideas and check which ones are still available")]
#[command(
    long_about = "Generate domain name ideas from a keyword, then check a list of domains for availability.\n\nLookups run in small concurrent batches with a pause between batches so registries are not hammered. A lookup that fails counts the domain as registered."
)]
#[command(styles = STYLES)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", global = true, help_heading = "Configuration")]
    pub config: Option<String>,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", global = true, help_heading = "Configuration")]
    pub verbose: bool,

    /// Show per-lookup timings and error messages
    #[arg(short = 'd', long = "debug", global = true, help_heading = "Configuration")]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate candidate domains from a keyword and save them to a file
    Generate(GenerateArgs),

    /// Check every domain in a file and split them into available and registered lists
    CheckAvailable(CheckArgs),
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Seed keyword (e.g. "coffee")
    #[arg(value_name = "KEYWORD")]
    pub keyword: String,

    /// Comma-separated zones, with or without the leading dot (e.g. "com,.io")
    #[arg(value_name = "ZONES")]
    pub zones: Option<String>,

    /// Output file (default: <KEYWORD>_domains.txt)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Seed for the random combinations, for reproducible output
    #[arg(long = "seed", value_name = "N")]
    pub seed: Option<u64>,
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// File with one domain per line
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Directory for available_domains.txt and registered_domains.txt
    #[arg(long = "out-dir", value_name = "DIR", help_heading = "Output")]
    pub out_dir: Option<PathBuf>,

    /// Print the run summary as JSON instead of progress lines
    #[arg(short = 'j', long = "json", help_heading = "Output")]
    pub json: bool,

    /// Domains looked up concurrently per batch (default: 5, max: 100)
    #[arg(short = 'b', long = "batch-size", value_name = "N", help_heading = "Pacing")]
    pub batch_size: Option<usize>,

    /// Pause between batches in milliseconds (default: 2000)
    #[arg(long = "delay-ms", value_name = "MS", help_heading = "Pacing")]
    pub delay_ms: Option<u64>,

    /// Per-lookup timeout, e.g. "10s" or "1m"; "0" disables (default: 10s)
    #[arg(long = "timeout", value_name = "DURATION", help_heading = "Pacing")]
    pub timeout: Option<String>,

    /// Lookup transport: whois or http
    #[arg(long = "lookup", value_name = "METHOD", help_heading = "Lookup")]
    pub lookup: Option<LookupMethod>,

    /// URL template for http lookups, containing {domain}
    #[arg(long = "lookup-url", value_name = "TEMPLATE", help_heading = "Lookup")]
    pub lookup_url: Option<String>,

    /// Whois program to run (default: whois)
    #[arg(long = "whois-command", value_name = "PROGRAM", help_heading = "Lookup")]
    pub whois_command: Option<String>,

    /// Whois server passed as -h <HOST>
    #[arg(long = "whois-server", value_name = "HOST", help_heading = "Lookup")]
    pub whois_server: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose, args.debug);

    let Some(command) = &args.command else {
        // Bare invocation shows usage rather than failing.
        let _ = Args::command().print_help();
        println!();
        return;
    };

    let result = match command {
        Commands::Generate(generate) => run_generate(&args, generate),
        Commands::CheckAvailable(check) => run_check(&args, check).await,
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        process::exit(1);
    }
}

/// Install the stderr log subscriber.
///
/// Defaults to warnings only; `--verbose` and `--debug` raise the level and
/// `RUST_LOG` overrides both.
fn init_tracing(verbose: bool, debug: bool) {
    let default_level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load file and environment configuration with proper precedence.
fn load_settings(args: &Args) -> Result<FileConfig, DomainCheckError> {
    let env_config = load_env_config(args.verbose);
    ConfigManager::new(args.verbose).resolve(args.config.as_deref().map(Path::new), &env_config)
}

fn run_generate(args: &Args, generate: &GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_settings(args)?;
    let config = settings.generate_config();
    let zones = generate.zones.as_deref().map(parse_zones);

    let mut rng = match generate.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let (result, path) = generate_to_file(
        &generate.keyword,
        zones.as_deref(),
        &config,
        generate.output.as_deref(),
        &mut rng,
    )?;

    ui::print_generation(&result, &path);
    Ok(())
}

async fn run_check(args: &Args, check: &CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_settings(args)?;
    let check_config = build_check_config(&settings, check)?;
    let lookup_config = build_lookup_config(&settings, check);

    let domains = read_domain_file(&check.file)?;
    let checker = DomainChecker::from_lookup_config(&lookup_config, check_config)?;

    if lookup_config.method == LookupMethod::Whois
        && !is_whois_available(&lookup_config.whois_command).await
    {
        tracing::warn!(
            command = %lookup_config.whois_command,
            "whois program could not be started; every lookup will fail and count as registered"
        );
    }

    let show_progress = !check.json;
    if show_progress {
        ui::print_check_header(
            domains.len(),
            checker.config(),
            &describe_lookup(&lookup_config),
        );
    }

    let debug = args.debug;
    let summary = checker
        .check_domains_with_progress(&domains, |event| {
            if show_progress {
                ui::print_event(event, debug);
            }
        })
        .await;

    let out_dir = check.out_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir).map_err(|e| {
        DomainCheckError::file_error(
            out_dir.to_string_lossy(),
            format!("Failed to create output directory: {}", e),
        )
    })?;
    let (available_path, registered_path) = write_results(&out_dir, &summary)?;

    if check.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        ui::print_summary(&summary, &available_path, &registered_path);
        ui::print_failure_summary(&summary);
    }

    Ok(())
}

/// Checker settings: config file and environment, then CLI flags on top.
fn build_check_config(
    settings: &FileConfig,
    check: &CheckArgs,
) -> Result<CheckConfig, DomainCheckError> {
    let mut config = settings.check_config()?;

    if let Some(batch_size) = check.batch_size {
        if batch_size == 0 || batch_size > 100 {
            return Err(DomainCheckError::config(
                "Batch size must be between 1 and 100",
            ));
        }
        config = config.with_batch_size(batch_size);
    }

    if let Some(delay_ms) = check.delay_ms {
        config = config.with_batch_delay(Duration::from_millis(delay_ms));
    }

    if let Some(timeout) = &check.timeout {
        let secs = parse_timeout_string(timeout).ok_or_else(|| {
            DomainCheckError::config(format!(
                "Invalid timeout format '{}'. Use format like '5s', '30s', '2m'",
                timeout
            ))
        })?;
        config = config.with_lookup_timeout(Duration::from_secs(secs));
    }

    Ok(config)
}

/// Lookup transport settings: config file and environment, then CLI flags.
fn build_lookup_config(settings: &FileConfig, check: &CheckArgs) -> LookupConfig {
    let mut config = settings.lookup_config();

    if let Some(method) = check.lookup {
        config.method = method;
    }
    if let Some(url) = &check.lookup_url {
        config.url_template = Some(url.clone());
    }
    if let Some(command) = &check.whois_command {
        config.whois_command = command.clone();
    }
    if let Some(server) = &check.whois_server {
        config.whois_server = Some(server.clone());
    }

    config
}

fn describe_lookup(config: &LookupConfig) -> String {
    match config.method {
        LookupMethod::Whois => match &config.whois_server {
            Some(server) => format!("{} -h {}", config.whois_command, server),
            None => config.whois_command.clone(),
        },
        LookupMethod::Http => config
            .url_template
            .clone()
            .unwrap_or_else(|| "http".to_string()),
    }
}

/// Split a comma-separated zone list.
fn parse_zones(zones: &str) -> Vec<String> {
    zones
        .split(',')
        .map(|z| z.trim().to_string())
        .filter(|z| !z.is_empty())
        .collect()
}
