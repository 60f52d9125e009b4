//! Layered configuration: defaults, then a TOML file named by
//! `CINCUENTAZO_CONFIG`, then `CINCUENTAZO_*` environment variables, then
//! command-line flags. Each value remembers which layer set it.

use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

use cincuentazo_ai::create_ai;
use cincuentazo_engine::rules::{MAX_MACHINES, MIN_MACHINES};
use cincuentazo_session::SessionConfig;

pub const CONFIG_PATH_VAR: &str = "CINCUENTAZO_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub machines: usize,
    pub seed: Option<u64>,
    pub strategy: String,
    pub poll_interval_ms: u64,
    pub think_min_ms: u64,
    pub think_max_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Cli,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub machines: ValueSource,
    pub seed: ValueSource,
    pub strategy: ValueSource,
    pub poll_interval_ms: ValueSource,
    pub think_min_ms: ValueSource,
    pub think_max_ms: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            machines: ValueSource::Default,
            seed: ValueSource::Default,
            strategy: ValueSource::Default,
            poll_interval_ms: ValueSource::Default,
            think_min_ms: ValueSource::Default,
            think_max_ms: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            machines: 1,
            seed: None,
            strategy: "first-legal".into(),
            poll_interval_ms: 1000,
            think_min_ms: 2000,
            think_max_ms: 4000,
        }
    }
}

impl Config {
    pub fn to_session_config(&self) -> SessionConfig {
        SessionConfig {
            machines: self.machines,
            seed: self.seed,
            strategy: self.strategy.clone(),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            think_min: Duration::from_millis(self.think_min_ms),
            think_max: Duration::from_millis(self.think_max_ms),
        }
    }
}

/// Values given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub machines: Option<usize>,
    pub seed: Option<u64>,
    pub strategy: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub think_ms: Option<(u64, u64)>,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    resolve(&CliOverrides::default())
}

/// Resolves every layer, command-line flags last, and validates the result.
pub fn resolve(overrides: &CliOverrides) -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_PATH_VAR)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.machines {
            cfg.machines = v;
            sources.machines = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.strategy {
            cfg.strategy = v;
            sources.strategy = ValueSource::File;
        }
        if let Some(v) = f.poll_interval_ms {
            cfg.poll_interval_ms = v;
            sources.poll_interval_ms = ValueSource::File;
        }
        if let Some(v) = f.think_min_ms {
            cfg.think_min_ms = v;
            sources.think_min_ms = ValueSource::File;
        }
        if let Some(v) = f.think_max_ms {
            cfg.think_max_ms = v;
            sources.think_max_ms = ValueSource::File;
        }
    }

    if let Some(v) = env_number("CINCUENTAZO_MACHINES", "machines")? {
        cfg.machines = v;
        sources.machines = ValueSource::Env;
    }
    if let Some(v) = env_number("CINCUENTAZO_SEED", "seed")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }
    if let Ok(name) = std::env::var("CINCUENTAZO_STRATEGY")
        && !name.is_empty()
    {
        cfg.strategy = name;
        sources.strategy = ValueSource::Env;
    }
    if let Some(v) = env_number("CINCUENTAZO_POLL_MS", "poll interval")? {
        cfg.poll_interval_ms = v;
        sources.poll_interval_ms = ValueSource::Env;
    }
    if let Some(v) = env_number("CINCUENTAZO_THINK_MIN_MS", "think min")? {
        cfg.think_min_ms = v;
        sources.think_min_ms = ValueSource::Env;
    }
    if let Some(v) = env_number("CINCUENTAZO_THINK_MAX_MS", "think max")? {
        cfg.think_max_ms = v;
        sources.think_max_ms = ValueSource::Env;
    }

    if let Some(v) = overrides.machines {
        cfg.machines = v;
        sources.machines = ValueSource::Cli;
    }
    if let Some(v) = overrides.seed {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Cli;
    }
    if let Some(v) = &overrides.strategy {
        cfg.strategy = v.clone();
        sources.strategy = ValueSource::Cli;
    }
    if let Some(v) = overrides.poll_interval_ms {
        cfg.poll_interval_ms = v;
        sources.poll_interval_ms = ValueSource::Cli;
    }
    if let Some((min, max)) = overrides.think_ms {
        cfg.think_min_ms = min;
        cfg.think_max_ms = max;
        sources.think_min_ms = ValueSource::Cli;
        sources.think_max_ms = ValueSource::Cli;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    machines: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    strategy: Option<String>,
    #[serde(default)]
    poll_interval_ms: Option<u64>,
    #[serde(default)]
    think_min_ms: Option<u64>,
    #[serde(default)]
    think_max_ms: Option<u64>,
}

fn env_number<T: std::str::FromStr>(var: &str, what: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var) {
        Ok(raw) if !raw.is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {} in {}: '{}'", what, var, raw))),
        _ => Ok(None),
    }
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !(MIN_MACHINES..=MAX_MACHINES).contains(&cfg.machines) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: machines must be between {} and {}",
            MIN_MACHINES, MAX_MACHINES
        )));
    }
    if cfg.poll_interval_ms == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: poll_interval_ms must be >0".into(),
        ));
    }
    if cfg.think_min_ms > cfg.think_max_ms {
        return Err(ConfigError::Invalid(
            "Invalid configuration: think_min_ms must be <= think_max_ms".into(),
        ));
    }
    if create_ai(&cfg.strategy).is_none() {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: unknown strategy '{}' (available: {})",
            cfg.strategy,
            cincuentazo_ai::STRATEGY_NAMES.join(", ")
        )));
    }
    Ok(())
}
