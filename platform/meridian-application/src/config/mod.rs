use meridian_domain::repositories::price_data::{Delimiter, PriceSource};
use meridian_domain::value_objects::date_window::DateWindow;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    pub data: DataConfig,
    pub window: WindowConfig,
    pub server: ServerConfig,
    pub log: LogConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct DataConfig {
    pub path: String,
    /// auto | comma | tab | semicolon
    pub delimiter: String,
    pub drop_columns: Vec<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: "data/enph.us.txt".to_string(),
            delimiter: "auto".to_string(),
            drop_columns: vec!["OpenInt".to_string()],
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct WindowConfig {
    pub start: String,
    pub end: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            start: "2012-01-01".to_string(),
            end: "2017-12-31".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct LogConfig {
    /// `tracing` filter directive; `MERIDIAN_LOG` overrides it.
    pub level: String,
    /// text | json
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(deny_unknown_fields, default)]
pub struct MetricsConfig {
    /// Prometheus listener (host:port). `MERIDIAN_METRICS_ADDR` overrides it.
    pub listen: Option<String>,
}

impl Config {
    pub fn price_source(&self) -> Result<PriceSource, String> {
        Ok(PriceSource {
            path: PathBuf::from(&self.data.path),
            delimiter: Delimiter::parse(&self.data.delimiter)?,
            drop_columns: self.data.drop_columns.clone(),
        })
    }

    pub fn window(&self) -> Result<DateWindow, String> {
        DateWindow::parse(&self.window.start, &self.window.end)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.data.path.trim().is_empty() {
            return Err("data.path must not be empty".to_string());
        }
        self.price_source()?;
        self.window()?;
        if self.log.level.trim().is_empty() {
            return Err("log.level must not be empty".to_string());
        }
        match self.log.format.trim().to_lowercase().as_str() {
            "text" | "json" => Ok(()),
            other => Err(format!("unsupported log.format: {other}")),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config, String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read config {}: {}", path.display(), err))?;
    load_config_from_str(&contents)
        .map_err(|err| format!("invalid config {}: {}", path.display(), err))
}

pub fn load_config_from_str(contents: &str) -> Result<Config, String> {
    let config: Config =
        toml::from_str(contents).map_err(|err| format!("failed to parse TOML: {err}"))?;
    config.validate()?;
    Ok(config)
}

pub fn to_toml_pretty(config: &Config) -> Result<String, String> {
    toml::to_string_pretty(config)
        .map_err(|err| format!("failed to serialize config as TOML: {err}"))
}
