//! Studio configuration loaded from an optional TOML file and `STUDIO_*` environment.
//!
//! | Env | Default | Description |
//! |-----|---------|-------------|
//! | STUDIO_PUBLIC_URL | required | Base URL of the hosted store (REST + storage). |
//! | STUDIO_PUBLIC_KEY | required | Public (anon) key, safe to ship to browsers. |
//! | STUDIO_SERVICE_ROLE_KEY | unset | Server-only key for the privileged client. |
//! | STUDIO_BIND_ADDR | 127.0.0.1:8000 | Gateway listen address. |
//! | STUDIO_AVATAR_BUCKET | avatars | Storage bucket holding avatar and reference images. |
//! | STUDIO_CONFIG | config/studio.toml | Optional TOML file read before the environment. |

use std::path::Path;

use reqwest::Url;
use serde::Deserialize;

use crate::error::ConfigError;

fn default_bind_addr() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_avatar_bucket() -> String {
    "avatars".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct StudioConfig {
    #[serde(default)]
    pub public_url: String,
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub service_role_key: Option<String>,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_avatar_bucket")]
    pub avatar_bucket: String,
}

impl StudioConfig {
    /// Load config from file and environment. Precedence: env > `STUDIO_CONFIG` file > defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("STUDIO_CONFIG").unwrap_or_else(|_| "config/studio.toml".to_string());
        Self::load_from(
            Some(Path::new(&config_path)),
            config::Environment::with_prefix("STUDIO")
                .prefix_separator("_")
                .separator("__"),
        )
    }

    /// Load from an explicit file and environment source. A file that does not exist is skipped.
    pub fn load_from(
        file: Option<&Path>,
        env: config::Environment,
    ) -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            .set_default("bind_addr", default_bind_addr())?
            .set_default("avatar_bucket", default_avatar_bucket())?;

        let builder = match file {
            Some(path) if path.exists() => builder.add_source(config::File::from(path)),
            _ => builder,
        };

        let built = builder.add_source(env).build()?;
        let cfg: StudioConfig = built.try_deserialize()?;
        cfg.validate()
    }

    fn validate(mut self) -> Result<Self, ConfigError> {
        self.public_url = self.public_url.trim().to_string();
        self.public_key = self.public_key.trim().to_string();
        if self.public_url.is_empty() {
            return Err(ConfigError::Missing("STUDIO_PUBLIC_URL"));
        }
        if self.public_key.is_empty() {
            return Err(ConfigError::Missing("STUDIO_PUBLIC_KEY"));
        }
        self.service_role_key = self
            .service_role_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        self.public_url()?;
        Ok(self)
    }

    /// Parsed store base URL. Only http(s) URLs are accepted.
    pub fn public_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.public_url).map_err(|e| ConfigError::InvalidUrl {
            url: self.public_url.clone(),
            message: e.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::InvalidUrl {
                url: self.public_url.clone(),
                message: format!("unsupported scheme `{}`", other),
            }),
        }
    }

    pub fn service_role_key(&self) -> Result<&str, ConfigError> {
        self.service_role_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingServiceRoleKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix("STUDIO")
            .prefix_separator("_")
            .separator("__")
            .source(Some(map))
    }

    #[test]
    fn loads_required_values_and_defaults() {
        let cfg = StudioConfig::load_from(
            None,
            env(&[
                ("STUDIO_PUBLIC_URL", "https://demo.example.co"),
                ("STUDIO_PUBLIC_KEY", "anon"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.public_key, "anon");
        assert_eq!(cfg.bind_addr, "127.0.0.1:8000");
        assert_eq!(cfg.avatar_bucket, "avatars");
        assert!(cfg.service_role_key.is_none());
    }

    #[test]
    fn missing_public_key_is_rejected() {
        let err = StudioConfig::load_from(
            None,
            env(&[("STUDIO_PUBLIC_URL", "https://demo.example.co")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("STUDIO_PUBLIC_KEY")));
    }

    #[test]
    fn non_http_url_is_rejected() {
        let err = StudioConfig::load_from(
            None,
            env(&[
                ("STUDIO_PUBLIC_URL", "ftp://demo.example.co"),
                ("STUDIO_PUBLIC_KEY", "anon"),
            ]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn blank_service_role_key_counts_as_missing() {
        let cfg = StudioConfig::load_from(
            None,
            env(&[
                ("STUDIO_PUBLIC_URL", "https://demo.example.co"),
                ("STUDIO_PUBLIC_KEY", "anon"),
                ("STUDIO_SERVICE_ROLE_KEY", "  "),
            ]),
        )
        .unwrap();
        assert!(matches!(
            cfg.service_role_key(),
            Err(ConfigError::MissingServiceRoleKey)
        ));
    }
}
