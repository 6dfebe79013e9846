use alloy_primitives::{U256, utils::parse_units};
use ethctl_common::shell::Verbosity;
use ethctl_config::{Config, figment::Figment};
use eyre::Result;
use tracing_subscriber::{EnvFilter, prelude::*};

/// Crates whose logs `--verbose` turns on.
const WORKSPACE_CRATES: &[&str] =
    &["ethctl", "ethctl_cli", "ethctl_common", "ethctl_config", "ethctl_wallets"];

/// Loads a dotenv file from the cwd, ignoring potential failure.
pub fn load_dotenv() {
    if let Ok(cwd) = std::env::current_dir()
        && let Err(err) = dotenvy::from_path(cwd.join(".env"))
    {
        trace!(%err, "no .env loaded");
    }
}

/// Initializes a tracing subscriber writing to stderr.
pub fn subscriber(verbosity: Verbosity) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let _ = tracing_subscriber::registry()
        .with(env_filter(verbosity, rust_log.as_deref()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// The log filter for `verbosity`.
///
/// `RUST_LOG` takes precedence, except in quiet mode, which never logs.
fn env_filter(verbosity: Verbosity, rust_log: Option<&str>) -> EnvFilter {
    let default = match verbosity {
        Verbosity::Quiet => return EnvFilter::new("off"),
        Verbosity::Normal => "warn".to_string(),
        Verbosity::Verbose => std::iter::once("warn".to_string())
            .chain(WORKSPACE_CRATES.iter().map(|krate| format!("{krate}=debug")))
            .collect::<Vec<_>>()
            .join(","),
    };
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}

/// Parses an ether value, either in wei or with a unit: `1ether`, `10gwei`, `0x2a`.
pub fn parse_ether_value(value: &str) -> Result<U256> {
    let value = value.trim();
    if value.starts_with("0x") {
        return Ok(value.parse()?);
    }
    let split = value.find(|c: char| c.is_ascii_alphabetic()).unwrap_or(value.len());
    let (amount, unit) = value.split_at(split);
    if amount.trim().is_empty() {
        eyre::bail!("missing amount in `{value}`");
    }
    let unit = if unit.is_empty() { "wei" } else { unit.trim() };
    Ok(parse_units(amount.trim(), unit)?.get_absolute())
}

/// Loads [`Config`] with the command line layered on top.
pub trait LoadConfig {
    /// The figment to extract the config from.
    fn figment(&self) -> Figment;

    /// Extracts the config.
    fn load_config(&self) -> Result<Config> {
        Ok(Config::try_from(self.figment())?)
    }
}
