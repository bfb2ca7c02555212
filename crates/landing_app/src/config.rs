//! Command line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use landing_engine::ServiceSettings;
use log::LevelFilter;
use url::Url;

use crate::logging::LogDestination;

pub const DEFAULT_GENERATE_URL: &str =
    "https://functions.poehali.dev/afb307cd-2053-48e4-9055-5ee5a148c327";
pub const DEFAULT_RETRIEVE_URL: &str =
    "https://functions.poehali.dev/24b78c6a-7175-4351-9647-3b3a3572a3b2";

#[derive(Debug, Parser, Clone)]
#[command(
    name = "landing",
    version,
    about = "Generate AI landing pages from a theme, a location and a domain"
)]
pub struct Cli {
    /// Generation endpoint (receives a JSON POST)
    #[arg(long, env = "LANDING_GENERATE_URL", default_value = DEFAULT_GENERATE_URL)]
    pub generate_url: String,

    /// Retrieval endpoint (GET with ?domain=)
    #[arg(long, env = "LANDING_RETRIEVE_URL", default_value = DEFAULT_RETRIEVE_URL)]
    pub retrieve_url: String,

    /// TCP connect timeout for both endpoints
    #[arg(long, default_value = "10s")]
    pub connect_timeout: humantime::Duration,

    /// Whole-request timeout for generation
    #[arg(long, env = "LANDING_GENERATE_TIMEOUT", default_value = "90s")]
    pub generate_timeout: humantime::Duration,

    /// Whole-request timeout for preview retrieval
    #[arg(long, default_value = "30s")]
    pub retrieve_timeout: humantime::Duration,

    /// Largest response body accepted from either endpoint
    #[arg(long, default_value_t = 8 * 1024 * 1024)]
    pub max_response_bytes: u64,

    /// Where isolated preview documents are written (default: system temp dir)
    #[arg(long, env = "LANDING_PREVIEW_DIR")]
    pub preview_dir: Option<PathBuf>,

    /// Write preview documents but do not launch a browser
    #[arg(long)]
    pub no_open: bool,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log_destination: LogDestination,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, env = "LANDING_LOG", default_value = "info")]
    pub log_level: String,

    /// Log file used by the file destination
    #[arg(long, default_value = "landing.log")]
    pub log_file: PathBuf,

    /// Business theme; with --geo and --domain runs one generation and exits
    #[arg(long, requires_all = ["geo", "domain"])]
    pub theme: Option<String>,

    /// Target geography for one-shot mode
    #[arg(long, requires_all = ["theme", "domain"])]
    pub geo: Option<String>,

    /// Target domain for one-shot mode
    #[arg(long, requires_all = ["theme", "geo"])]
    pub domain: Option<String>,

    /// In one-shot mode, open the preview after a successful generation
    #[arg(long, requires = "theme")]
    pub preview: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is not a valid url ({value}): {source}")]
    InvalidUrl {
        name: &'static str,
        value: String,
        source: url::ParseError,
    },
    #[error("{name} must use http or https, got {value}")]
    UnsupportedScheme { name: &'static str, value: String },
    #[error("unknown log level {0:?}")]
    UnknownLogLevel(String),
    #[error("max response size must be greater than zero")]
    ZeroResponseLimit,
}

/// Field values for a single non-interactive run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneShot {
    pub theme: String,
    pub geo: String,
    pub domain: String,
    pub preview: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub preview_dir: PathBuf,
    pub open_preview: bool,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    pub one_shot: Option<OneShot>,
}

impl AppConfig {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let generate_url = parse_endpoint("generate url", &cli.generate_url)?;
        let retrieve_url = parse_endpoint("retrieve url", &cli.retrieve_url)?;
        let log_level = engine_logging::level_from_name(&cli.log_level)
            .ok_or_else(|| ConfigError::UnknownLogLevel(cli.log_level.clone()))?;
        if cli.max_response_bytes == 0 {
            return Err(ConfigError::ZeroResponseLimit);
        }

        let service = ServiceSettings {
            connect_timeout: Duration::from(cli.connect_timeout),
            generate_timeout: Duration::from(cli.generate_timeout),
            retrieve_timeout: Duration::from(cli.retrieve_timeout),
            max_bytes: cli.max_response_bytes,
            ..ServiceSettings::new(generate_url, retrieve_url)
        };

        let one_shot = match (cli.theme, cli.geo, cli.domain) {
            (Some(theme), Some(geo), Some(domain)) => Some(OneShot {
                theme,
                geo,
                domain,
                preview: cli.preview,
            }),
            _ => None,
        };

        Ok(Self {
            service,
            preview_dir: cli
                .preview_dir
                .unwrap_or_else(|| std::env::temp_dir().join("landing-previews")),
            open_preview: !cli.no_open,
            log_destination: cli.log_destination,
            log_level,
            log_file: cli.log_file,
            one_shot,
        })
    }
}

fn parse_endpoint(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|source| ConfigError::InvalidUrl {
        name,
        value: value.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::UnsupportedScheme {
            name,
            value: value.to_string(),
        }),
    }
}
