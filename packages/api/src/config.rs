use std::env;
use std::fmt;
use std::net::SocketAddr;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    DynamoDb(TableNames),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    pub players: String,
    pub games: String,
    pub moves: String,
    pub counters: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_address: SocketAddr,
    pub backend: StoreBackend,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(name) => write!(f, "Missing environment variable {}", name),
            ConfigError::Invalid { name, value } => {
                write!(f, "Invalid value '{}' for {}", value, name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads settings through `lookup`, so tests need not touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let raw_address =
            lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address = raw_address.parse().map_err(|_| ConfigError::Invalid {
            name: "BIND_ADDRESS",
            value: raw_address.clone(),
        })?;

        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));
        let backend = match lookup("STORE_BACKEND").as_deref() {
            None | Some("memory") => StoreBackend::Memory,
            Some("dynamodb") => StoreBackend::DynamoDb(TableNames {
                players: required("PLAYERS_TABLE")?,
                games: required("GAMES_TABLE")?,
                moves: required("MOVES_TABLE")?,
                counters: required("COUNTERS_TABLE")?,
            }),
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "STORE_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        Ok(AppConfig {
            bind_address,
            backend,
        })
    }
}
