//! Application configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `THINGS_REPOSITORY_*` environment variables
//! and `.things_repository.toml`, in that order of precedence. [`AppConfig`]
//! is the raw layer; [`AppConfig::settings`] checks it and produces the
//! [`Settings`] the server starts from.

use std::net::{Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;
use zeroize::Zeroizing;

/// Raw configuration as read from all sources.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "THINGS_REPOSITORY")]
pub struct AppConfig {
    /// HS256 signing secret for bearer tokens.
    pub token_secret: Option<String>,
    /// Salt mixed into every password digest.
    pub hash_salt: Option<String>,
    /// Port the HTTP server listens on.
    #[ortho_config(default = 8080)]
    pub http_port: u16,
    pub postgres_host: Option<String>,
    #[ortho_config(default = 5432)]
    pub postgres_port: u16,
    pub postgres_db_name: Option<String>,
    pub postgres_user: Option<String>,
    pub postgres_password: Option<String>,
}

/// Reasons configuration is unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required secret is unset or blank.
    #[error("{field} must be set")]
    MissingSecret { field: &'static str },
    /// Some but not all PostgreSQL settings were provided.
    #[error("incomplete PostgreSQL settings; missing: {}", missing.join(", "))]
    IncompleteDatabase { missing: Vec<&'static str> },
    /// The PostgreSQL settings do not form a valid connection URL.
    #[error("invalid PostgreSQL {field}")]
    InvalidDatabaseUrl { field: &'static str },
}

/// Connection settings for PostgreSQL.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub db_name: String,
    pub user: String,
    url: Zeroizing<String>,
}

impl DatabaseSettings {
    /// Check the parts and assemble the connection URL. User, password and
    /// database name are percent-encoded.
    pub fn new(
        host: &str,
        port: u16,
        db_name: &str,
        user: &str,
        password: &str,
    ) -> Result<Self, ConfigError> {
        let invalid = |field| ConfigError::InvalidDatabaseUrl { field };
        let mut url = Url::parse("postgres://localhost").map_err(|_| invalid("url"))?;
        url.set_host(Some(host)).map_err(|_| invalid("host"))?;
        url.set_port(Some(port)).map_err(|()| invalid("port"))?;
        url.set_username(user).map_err(|()| invalid("user"))?;
        url.set_password(Some(password))
            .map_err(|()| invalid("password"))?;
        url.path_segments_mut()
            .map_err(|()| invalid("db_name"))?
            .clear()
            .push(db_name);
        Ok(Self {
            host: host.to_owned(),
            port,
            db_name: db_name.to_owned(),
            user: user.to_owned(),
            url: Zeroizing::new(url.into()),
        })
    }

    /// Connection URL, including the password.
    pub fn url(&self) -> &str {
        self.url.as_str()
    }
}

impl std::fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("db_name", &self.db_name)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

/// Checked configuration.
#[derive(Debug)]
pub struct Settings {
    pub token_secret: Zeroizing<String>,
    pub hash_salt: Zeroizing<String>,
    pub bind_addr: SocketAddr,
    /// `None` selects the in-memory store.
    pub database: Option<DatabaseSettings>,
}

fn required_secret(field: &'static str, value: Option<&String>) -> Result<Zeroizing<String>, ConfigError> {
    value
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| Zeroizing::new(raw.clone()))
        .ok_or(ConfigError::MissingSecret { field })
}

impl AppConfig {
    /// Validate secrets and resolve the storage backend.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let token_secret = required_secret("token_secret", self.token_secret.as_ref())?;
        let hash_salt = required_secret("hash_salt", self.hash_salt.as_ref())?;
        Ok(Settings {
            token_secret,
            hash_salt,
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.http_port)),
            database: self.database()?,
        })
    }

    fn database(&self) -> Result<Option<DatabaseSettings>, ConfigError> {
        let fields = [
            ("postgres_host", &self.postgres_host),
            ("postgres_db_name", &self.postgres_db_name),
            ("postgres_user", &self.postgres_user),
            ("postgres_password", &self.postgres_password),
        ];
        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect();

        match (
            &self.postgres_host,
            &self.postgres_db_name,
            &self.postgres_user,
            &self.postgres_password,
        ) {
            (Some(host), Some(db_name), Some(user), Some(password)) => DatabaseSettings::new(
                host,
                self.postgres_port,
                db_name,
                user,
                password,
            )
            .map(Some),
            _ if missing.len() == fields.len() => Ok(None),
            _ => Err(ConfigError::IncompleteDatabase { missing }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 8] = [
        "THINGS_REPOSITORY_TOKEN_SECRET",
        "THINGS_REPOSITORY_HASH_SALT",
        "THINGS_REPOSITORY_HTTP_PORT",
        "THINGS_REPOSITORY_POSTGRES_HOST",
        "THINGS_REPOSITORY_POSTGRES_PORT",
        "THINGS_REPOSITORY_POSTGRES_DB_NAME",
        "THINGS_REPOSITORY_POSTGRES_USER",
        "THINGS_REPOSITORY_POSTGRES_PASSWORD",
    ];

    fn env_with(overrides: &[(&'static str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    fn load() -> AppConfig {
        AppConfig::load_from_iter([OsString::from("thing-repository")])
            .expect("config should load")
    }

    const SECRETS: [(&str, &str); 2] = [
        ("THINGS_REPOSITORY_TOKEN_SECRET", "sign"),
        ("THINGS_REPOSITORY_HASH_SALT", "salt"),
    ];

    #[rstest]
    fn defaults_select_memory_store() {
        let _guard = lock_env(env_with(&SECRETS));
        let settings = load().settings().expect("valid settings");
        assert_eq!(settings.bind_addr.port(), 8080);
        assert!(settings.database.is_none());
        assert_eq!(settings.token_secret.as_str(), "sign");
    }

    #[rstest]
    #[case("THINGS_REPOSITORY_TOKEN_SECRET", "token_secret")]
    #[case("THINGS_REPOSITORY_HASH_SALT", "hash_salt")]
    fn missing_secret_is_rejected(#[case] unset: &str, #[case] field: &str) {
        let present: Vec<(&'static str, &str)> = SECRETS
            .into_iter()
            .filter(|(name, _)| *name != unset)
            .collect();
        let _guard = lock_env(env_with(&present));
        let err = load().settings().expect_err("secret missing");
        assert_eq!(err.to_string(), format!("{field} must be set"));
    }

    #[rstest]
    fn full_database_settings_build_url() {
        let mut vars = SECRETS.to_vec();
        vars.extend([
            ("THINGS_REPOSITORY_POSTGRES_HOST", "db"),
            ("THINGS_REPOSITORY_POSTGRES_PORT", "6543"),
            ("THINGS_REPOSITORY_POSTGRES_DB_NAME", "things"),
            ("THINGS_REPOSITORY_POSTGRES_USER", "app"),
            ("THINGS_REPOSITORY_POSTGRES_PASSWORD", "pw"),
            ("THINGS_REPOSITORY_HTTP_PORT", "9000"),
        ]);
        let _guard = lock_env(env_with(&vars));
        let settings = load().settings().expect("valid settings");
        let database = settings.database.expect("database configured");
        assert_eq!(database.url(), "postgres://app:pw@db:6543/things");
        assert_eq!(settings.bind_addr.port(), 9000);
        assert!(!format!("{database:?}").contains("pw"));
    }

    #[rstest]
    #[case("app", "p@ss:w/rd", "postgres://app:p%40ss%3Aw%2Frd@db:5432/things")]
    #[case("app user", "pw#1?", "postgres://app%20user:pw%231%3F@db:5432/things")]
    fn credentials_are_percent_encoded(
        #[case] user: &str,
        #[case] password: &str,
        #[case] expected: &str,
    ) {
        let database =
            DatabaseSettings::new("db", 5432, "things", user, password).expect("valid settings");
        assert_eq!(database.url(), expected);
        let parsed = Url::parse(database.url()).expect("url parses back");
        assert_eq!(parsed.host_str(), Some("db"));
        assert_eq!(parsed.path(), "/things");
    }

    #[rstest]
    fn unusable_host_is_rejected() {
        let err = DatabaseSettings::new("db host", 5432, "things", "app", "pw")
            .expect_err("space in host");
        assert_eq!(err, ConfigError::InvalidDatabaseUrl { field: "host" });
    }

    #[rstest]
    fn partial_database_settings_are_rejected() {
        let mut vars = SECRETS.to_vec();
        vars.push(("THINGS_REPOSITORY_POSTGRES_HOST", "db"));
        let _guard = lock_env(env_with(&vars));
        let err = load().settings().expect_err("incomplete");
        assert_eq!(
            err,
            ConfigError::IncompleteDatabase {
                missing: vec!["postgres_db_name", "postgres_user", "postgres_password"],
            }
        );
    }
}
