use crate::domain::model::*;
use crate::error::*;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

pub const BEARER_TOKEN_ENV: &str = "BEARER_TOKEN";

const SETTINGS_CANDIDATES: [&str; 3] = ["settings.json", "settings.toml", "settings.example.json"];
const CREDENTIALS_CANDIDATES: [&str; 2] = ["credentials.json", "credentials.template.json"];

#[derive(Debug)]
pub enum ConfigError {
    NotFound,
    ParseError,
    MissingCredential,
}

impl IServiceError for ConfigError {
    fn error_type(&self) -> String {
        use ConfigError::*;

        match self {
            NotFound => "config_not_found",
            ParseError => "config_parse_error",
            MissingCredential => "missing_credential",
        }
        .to_string()
    }

    fn exit_code(&self) -> u8 {
        2
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> ServiceError {
        ServiceError::new(ConfigError::ParseError, err)
    }
}

impl From<toml::de::Error> for ServiceError {
    fn from(err: toml::de::Error) -> ServiceError {
        ServiceError::new(ConfigError::ParseError, err)
    }
}

/// Reads `settings.*` and `credentials.*` from one directory, falling back
/// to the example/template files shipped with the repository.
#[derive(Clone, Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        ConfigLoader {
            config_dir: config_dir.into(),
        }
    }

    fn resolve(&self, candidates: &[&str]) -> Result<PathBuf> {
        let paths = candidates
            .iter()
            .map(|name| self.config_dir.join(name))
            .collect::<Vec<_>>();

        for (i, path) in paths.iter().enumerate() {
            if path.is_file() {
                if i > 0 {
                    tracing::warn!(
                        primary = %paths[0].display(),
                        fallback = %path.display(),
                        "primary config not found, falling back"
                    );
                }
                return Ok(path.clone());
            }
        }

        let tried = paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(ServiceError::new(
            ConfigError::NotFound,
            anyhow::anyhow!("none of {} could be found", tried),
        ))
    }

    fn parse<T: DeserializeOwned>(path: &Path) -> Result<T> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ServiceError::new(ConfigError::NotFound, e))?;

        let is_toml = path.extension().map_or(false, |ext| ext == "toml");
        let value = if is_toml {
            let table: toml::Value = toml::from_str(&raw)?;
            serde_json::to_value(table)?
        } else {
            serde_json::from_str::<serde_json::Value>(&raw)?
        };

        if !value.is_object() {
            return Err(ServiceError::new(
                ConfigError::ParseError,
                anyhow::anyhow!("{} must contain an object", path.display()),
            ));
        }

        serde_json::from_value(value).map_err(|e| {
            ServiceError::new(
                ConfigError::ParseError,
                anyhow::anyhow!("invalid configuration in {}: {}", path.display(), e),
            )
        })
    }

    pub fn load_settings(&self) -> Result<Settings> {
        let path = self.resolve(&SETTINGS_CANDIDATES)?;
        tracing::debug!(path = %path.display(), "loading settings");
        let settings: Settings = Self::parse(&path)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load_credentials(&self) -> Result<Credentials> {
        let path = self.resolve(&CREDENTIALS_CANDIDATES)?;
        tracing::debug!(path = %path.display(), "loading credentials");
        Self::parse(&path)
    }

    /// The bearer token from `env_token` if given, otherwise from the
    /// credentials file.
    pub fn bearer_token(&self, env_token: Option<String>) -> Result<String> {
        let credentials = match env_token.filter(|t| !t.trim().is_empty()) {
            Some(token) => Credentials::from_bearer_token(token),
            None => self.load_credentials()?,
        };

        credentials
            .bearer_token()
            .map(str::to_string)
            .ok_or_else(|| {
                ServiceError::new(
                    ConfigError::MissingCredential,
                    anyhow::anyhow!(
                        "missing twitter.bearerToken in credentials and {} is not set",
                        BEARER_TOKEN_ENV
                    ),
                )
            })
    }
}
