use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{AppError, AppResult};
use crate::services::DEFAULT_HISTORY_CAPACITY;

/// 历史记录容量上限 (配置校验使用)
pub const MAX_HISTORY_CAPACITY: usize = 10_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// 抽奖历史最多保留的条数 (1..=MAX_HISTORY_CAPACITY)
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// 奖品目录文件 (`[[items]]` 表)，未配置时使用内置数据
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// 读取 `CONFIG_PATH` (默认 `config.toml`)，再用环境变量覆盖。
    /// 配置文件不存在时使用默认值与环境变量。
    /// 返回值第二项为加载过程中的提示，日志初始化后再输出。
    pub fn from_toml() -> AppResult<(Self, Vec<String>)> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_with_env(&config_path, |name| env::var(name).ok())
    }

    /// 与 `from_toml` 相同，但环境变量通过 `get_env` 读取
    pub fn load_with_env(
        config_path: &str,
        get_env: impl Fn(&str) -> Option<String>,
    ) -> AppResult<(Self, Vec<String>)> {
        use std::io::ErrorKind;

        let mut warnings = Vec::new();

        let mut config = match std::fs::read_to_string(config_path) {
            // 有配置文件：先解析，校验放到环境变量覆盖之后
            Ok(config_str) => Self::parse_toml_str(&config_str).map_err(|e| {
                AppError::ConfigError(format!("failed to parse {config_path}: {e}"))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warnings.push(format!("No config file at {config_path}, using defaults"));
                Config::default()
            }
            Err(e) => {
                return Err(AppError::ConfigError(format!(
                    "unable to read config file {config_path}: {e}"
                )));
            }
        };

        warnings.extend(config.apply_env_overrides(get_env));
        config.validate()?;
        Ok((config, warnings))
    }

    /// 解析并校验配置字符串 (不读取环境变量)
    pub fn from_toml_str(config_str: &str) -> AppResult<Self> {
        let config = Self::parse_toml_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    fn parse_toml_str(config_str: &str) -> AppResult<Self> {
        Ok(toml::from_str(config_str)?)
    }

    // 环境变量覆盖（即便文件存在时也覆盖），返回无法解析的变量
    fn apply_env_overrides(&mut self, get_env: impl Fn(&str) -> Option<String>) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(v) = get_env("HISTORY_CAPACITY") {
            match v.trim().parse() {
                Ok(n) => self.history.capacity = n,
                Err(_) => warnings.push(format!("Ignoring unparsable HISTORY_CAPACITY: {v}")),
            }
        }
        if let Some(v) = get_env("CATALOG_PATH")
            && !v.trim().is_empty()
        {
            self.catalog.path = Some(v);
        }
        if let Some(v) = get_env("LOG_LEVEL") {
            self.log.level = v;
        }

        warnings
    }

    pub fn validate(&self) -> AppResult<()> {
        if !(1..=MAX_HISTORY_CAPACITY).contains(&self.history.capacity) {
            return Err(AppError::ConfigError(format!(
                "history.capacity must be between 1 and {MAX_HISTORY_CAPACITY}, got {}",
                self.history.capacity
            )));
        }
        Ok(())
    }
}
