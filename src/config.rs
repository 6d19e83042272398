//! Startup configuration.
//!
//! The ledger backend is a strategy chosen once from the environment and
//! injected at construction; nothing resolves storage at call time.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::model::ShortfallPolicy;

const BACKEND: &str = "WALLET_BACKEND";
const DATA_DIR: &str = "WALLET_DATA_DIR";
const ACCOUNTS: &str = "WALLET_ACCOUNTS";
const SEED: &str = "WALLET_SEED";
const SHORTFALL: &str = "WALLET_SHORTFALL";

/// Which ledger backend to run against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// Seeded in-memory fake data.
    Memory { accounts: usize, seed: u64 },
    /// A directory holding an exported document ledger.
    Json { dir: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend: Backend,
    pub policy: ShortfallPolicy,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("env.{0} is not set")]
    Missing(&'static str),

    #[error("env.{var} has unrecognized value '{value}'")]
    Invalid { var: &'static str, value: String },
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// `WALLET_BACKEND` is required (`memory` or `json`); `json` also needs
    /// `WALLET_DATA_DIR`. `WALLET_ACCOUNTS` and `WALLET_SEED` shape the
    /// memory backend, `WALLET_SHORTFALL` (`actual`/`added`) picks the
    /// shortfall attribution policy.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(get: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend = match get(BACKEND) {
            None => return Err(ConfigError::Missing(BACKEND)),
            Some(value) => match value.as_str() {
                "memory" => Backend::Memory {
                    accounts: parse_or(ACCOUNTS, get(ACCOUNTS), 10)?,
                    seed: parse_or(SEED, get(SEED), 42)?,
                },
                "json" => Backend::Json {
                    dir: PathBuf::from(get(DATA_DIR).ok_or(ConfigError::Missing(DATA_DIR))?),
                },
                _ => return Err(ConfigError::Invalid {
                    var: BACKEND,
                    value,
                }),
            },
        };

        let policy = match get(SHORTFALL).as_deref() {
            None => ShortfallPolicy::default(),
            Some("actual") => ShortfallPolicy::Actual,
            Some("added") => ShortfallPolicy::Added,
            Some(value) => {
                return Err(ConfigError::Invalid {
                    var: SHORTFALL,
                    value: value.to_string(),
                });
            }
        };

        Ok(Config { backend, policy })
    }
}

fn parse_or<T: FromStr>(
    var: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}
