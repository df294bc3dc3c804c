//! Layered application configuration.
//!
//! Sources are merged in order, later ones winning:
//! 1) built-in defaults -> 2) YAML file (if provided) -> 3) env (`APP__*`)
//! -> 4) CLI overrides.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use contacts::ContactsConfig;
use contacts::infra::storage::DbConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

use crate::logging::LoggingConfig;

/// Environment variables with this prefix override config keys.
/// `APP__SERVER__BIND_ADDR` maps to `server.bind_addr`.
pub const ENV_PREFIX: &str = "APP__";

const MOCK_DSN: &str = "sqlite::memory:";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DbConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub contacts: ContactsConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Prefix the contacts routes are mounted under. Empty mounts them at the root.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            api_prefix: default_api_prefix(),
            request_timeout_secs: default_request_timeout_secs(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:8000".to_owned()
}

fn default_api_prefix() -> String {
    "/api".to_owned()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_body_limit_bytes() -> usize {
    1024 * 1024
}

/// Command-line values that take precedence over every other source.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub port: Option<u16>,
    pub verbose: u8,
    pub mock: bool,
}

impl AppConfig {
    /// Defaults, then the YAML file, then `APP__*` environment variables.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load the layered configuration.
    ///
    /// # Errors
    /// Returns an error if a source cannot be parsed or holds unknown keys.
    pub fn load_layered(path: Option<&Path>) -> Result<Self> {
        Self::figment(path)
            .extract()
            .context("failed to load configuration")
    }

    /// Apply CLI overrides on top of the loaded configuration.
    ///
    /// # Errors
    /// Returns an error if `--port` is given but `server.bind_addr` is not a socket address.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) -> Result<()> {
        if let Some(port) = args.port {
            let mut addr = self.bind_addr()?;
            addr.set_port(port);
            self.server.bind_addr = addr.to_string();
        }
        if args.mock {
            self.database = DbConfig {
                dsn: MOCK_DSN.to_owned(),
                max_conns: Some(1),
                acquire_timeout_secs: self.database.acquire_timeout_secs,
            };
        }
        if args.verbose > 0 {
            self.logging.level = crate::logging::level_for_verbosity(args.verbose).to_owned();
        }
        Ok(())
    }

    /// Reject configurations the server cannot start with.
    ///
    /// # Errors
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        self.bind_addr()?;
        let prefix = &self.server.api_prefix;
        if !prefix.is_empty() && !prefix.starts_with('/') {
            anyhow::bail!("server.api_prefix must be empty or start with '/', got '{prefix}'");
        }
        if self.server.request_timeout_secs == 0 {
            anyhow::bail!("server.request_timeout_secs must be greater than zero");
        }
        if self.database.dsn.trim().is_empty() {
            anyhow::bail!("database.dsn must not be empty");
        }
        self.contacts.validate()
    }

    /// Parsed `server.bind_addr`.
    ///
    /// # Errors
    /// Returns an error if the value is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind_addr
            .parse()
            .with_context(|| format!("invalid server.bind_addr '{}'", self.server.bind_addr))
    }

    /// Effective configuration as pretty JSON, with database credentials masked.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let mut printable = self.clone();
        printable.database.dsn =
            contacts::infra::storage::db::redact_credentials_in_dsn(&self.database.dsn);
        serde_json::to_string_pretty(&printable).context("failed to serialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogFormat;
    use figment::Jail;

    fn jailed<F>(f: F)
    where
        F: FnOnce(&mut Jail) -> figment::error::Result<()>,
    {
        Jail::expect_with(f);
    }

    #[test]
    fn defaults_without_any_source() {
        jailed(|_| {
            let cfg = AppConfig::load_layered(None).map_err(|e| e.to_string())?;
            assert_eq!(cfg.server.bind_addr, "127.0.0.1:8000");
            assert_eq!(cfg.server.api_prefix, "/api");
            assert_eq!(cfg.database.dsn, "sqlite://contacts.db?mode=rwc");
            assert_eq!(cfg.logging.level, "info");
            assert_eq!(cfg.logging.format, LogFormat::Pretty);
            assert_eq!(cfg.contacts.default_page_size, 10);
            cfg.validate().map_err(|e| e.to_string())?;
            Ok(())
        });
    }

    #[test]
    fn yaml_overrides_defaults_and_env_overrides_yaml() {
        jailed(|jail| {
            jail.create_file(
                "config.yaml",
                r#"
server:
  bind_addr: "0.0.0.0:9000"
  api_prefix: "/v1"
database:
  dsn: "postgres://contacts:secret@db/contacts"
  max_conns: 8
logging:
  format: json
contacts:
  max_page_size: 100
"#,
            )?;
            jail.set_env("APP__SERVER__API_PREFIX", "/v2");
            jail.set_env("APP__CONTACTS__DEFAULT_PAGE_SIZE", "25");

            let cfg = AppConfig::load_layered(Some(Path::new("config.yaml")))
                .map_err(|e| e.to_string())?;

            assert_eq!(cfg.server.bind_addr, "0.0.0.0:9000");
            assert_eq!(cfg.server.api_prefix, "/v2");
            assert_eq!(cfg.database.max_conns, Some(8));
            assert_eq!(cfg.logging.format, LogFormat::Json);
            assert_eq!(cfg.logging.level, "info");
            assert_eq!(cfg.contacts.max_page_size, 100);
            assert_eq!(cfg.contacts.default_page_size, 25);
            Ok(())
        });
    }

    #[test]
    fn unknown_keys_are_rejected() {
        jailed(|jail| {
            jail.create_file("config.yaml", "server:\n  bind_address: \"0.0.0.0:1\"\n")?;
            let res = AppConfig::load_layered(Some(Path::new("config.yaml")));
            assert!(res.is_err());
            Ok(())
        });
    }

    #[test]
    fn cli_overrides_win() {
        let mut cfg = AppConfig::default();
        let args = CliArgs {
            port: Some(8081),
            verbose: 2,
            mock: true,
        };

        cfg.apply_cli_overrides(&args).unwrap();

        assert_eq!(cfg.server.bind_addr, "127.0.0.1:8081");
        assert_eq!(cfg.database.dsn, MOCK_DSN);
        assert_eq!(cfg.database.max_conns, Some(1));
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn no_cli_flags_keep_loaded_values() {
        let mut cfg = AppConfig::default();
        cfg.logging.level = "warn".to_owned();

        cfg.apply_cli_overrides(&CliArgs::default()).unwrap();

        assert_eq!(cfg.server.bind_addr, "127.0.0.1:8000");
        assert_eq!(cfg.logging.level, "warn");
    }

    #[test]
    fn port_override_needs_a_socket_address() {
        let mut cfg = AppConfig::default();
        cfg.server.bind_addr = "localhost".to_owned();
        let args = CliArgs {
            port: Some(1),
            ..CliArgs::default()
        };

        assert!(cfg.apply_cli_overrides(&args).is_err());
    }

    #[test]
    fn validate_rejects_relative_prefix() {
        let mut cfg = AppConfig::default();
        cfg.server.api_prefix = "api".to_owned();
        assert!(cfg.validate().is_err());

        cfg.server.api_prefix = String::new();
        cfg.validate().unwrap();
    }

    #[test]
    fn validate_checks_module_settings() {
        let mut cfg = AppConfig::default();
        cfg.contacts.default_page_size = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn printed_config_masks_password() {
        let mut cfg = AppConfig::default();
        cfg.database.dsn = "postgres://contacts:secret@db/contacts".to_owned();

        let json = cfg.to_json().unwrap();

        assert!(!json.contains("secret"));
        assert!(json.contains("\"api_prefix\": \"/api\""));
    }
}
