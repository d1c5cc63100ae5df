//! Configuration module for Mentor Gate.
//!
//! Loads configuration from YAML files and environment variables.

use std::fmt;

use config::{Config as ConfigLoader, ConfigBuilder, Environment, File};
use serde::Deserialize;

use crate::error::{GateError, GateResult};

/// Secrets shorter than this trigger a startup warning.
const MIN_RECOMMENDED_SECRET_LEN: usize = 32;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// How the request authenticator is exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// Standalone `/api/auth/verify` endpoint answering `{valid, user}`.
    #[default]
    Endpoint,
    /// Pre-handler in front of protected routes.
    Middleware,
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMode::Endpoint => write!(f, "endpoint"),
            AuthMode::Middleware => write!(f, "middleware"),
        }
    }
}

/// Shared signing secret. Never printed.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    #[cfg(test)]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

/// Bearer-token verification settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret shared with the token issuer.
    #[serde(default)]
    pub jwt_secret: Option<Secret>,
    #[serde(default)]
    pub mode: AuthMode,
    /// Expected `iss` claim, if the issuer sets one.
    #[serde(default)]
    pub issuer: Option<String>,
    /// Expected `aud` claim, if the issuer sets one.
    #[serde(default)]
    pub audience: Option<String>,
    /// Clock skew tolerance for `exp`/`nbf`, in seconds.
    #[serde(default)]
    pub leeway_secs: u64,
    /// Reject tokens that carry no `exp` claim.
    #[serde(default)]
    pub require_exp: bool,
}

impl AuthConfig {
    /// The configured secret, or a configuration error if it is absent or blank.
    pub fn secret(&self) -> GateResult<&Secret> {
        match &self.jwt_secret {
            Some(secret) if !secret.expose().trim().is_empty() => Ok(secret),
            Some(_) => Err(GateError::Config("auth.jwt_secret is empty".to_string())),
            None => Err(GateError::Config(
                "auth.jwt_secret is not set (MENTOR__AUTH__JWT_SECRET or JWT_SECRET)".to_string(),
            )),
        }
    }
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MENTOR__*)
    /// 2. config/local.yaml (if exists)
    /// 3. config/default.yaml (if exists)
    /// 4. `JWT_SECRET` for the signing secret
    /// 5. Built-in defaults
    pub fn load() -> GateResult<Self> {
        Self::load_from("config")
    }

    /// Same as [`Config::load`], reading `default`/`local` files from `dir`.
    ///
    /// Environment values stay strings; numeric fields are converted during
    /// deserialization so a secret like `0123` is kept verbatim.
    fn load_from(dir: &str) -> GateResult<Self> {
        let mut builder = Self::defaults()?;

        if let Ok(secret) = std::env::var("JWT_SECRET") {
            builder = builder.set_default("auth.jwt_secret", secret)?;
        }

        let loader = builder
            .add_source(File::with_name(&format!("{dir}/default")).required(false))
            .add_source(File::with_name(&format!("{dir}/local")).required(false))
            .add_source(Environment::with_prefix("MENTOR").separator("__"))
            .build()?;

        Self::from_loader(loader)
    }

    fn defaults() -> GateResult<ConfigBuilder<config::builder::DefaultState>> {
        Ok(ConfigLoader::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000_i64)?
            .set_default("auth.mode", "endpoint")?)
    }

    /// Deserialize and validate an already-built loader.
    ///
    /// A missing secret is fatal here so the process never starts serving
    /// protected routes without one.
    fn from_loader(loader: ConfigLoader) -> GateResult<Self> {
        let config: Self = loader.try_deserialize()?;

        let secret = config.auth.secret()?;
        if secret.expose().len() < MIN_RECOMMENDED_SECRET_LEN {
            tracing::warn!(
                min_len = MIN_RECOMMENDED_SECRET_LEN,
                "auth.jwt_secret is shorter than recommended"
            );
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    /// Serializes tests that mutate process environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ENV_KEYS: &[&str] = &[
        "JWT_SECRET",
        "MENTOR__AUTH__JWT_SECRET",
        "MENTOR__AUTH__MODE",
        "MENTOR__AUTH__LEEWAY_SECS",
        "MENTOR__AUTH__REQUIRE_EXP",
        "MENTOR__SERVER__PORT",
    ];

    /// Run `f` with exactly `vars` set among the keys this module reads.
    fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
        for (key, value) in vars {
            std::env::set_var(key, value);
        }
        let result = f();
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
        result
    }

    /// Fresh config directory holding the given `(file stem, yaml)` pairs.
    fn config_dir(name: &str, files: &[(&str, &str)]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "mentor-gate-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        for (stem, contents) in files {
            std::fs::write(dir.join(format!("{stem}.yaml")), contents).unwrap();
        }
        dir
    }

    fn load_dir(dir: &Path) -> GateResult<Config> {
        Config::load_from(dir.to_str().unwrap())
    }

    fn load_with(overrides: &[(&str, &str)]) -> GateResult<Config> {
        let mut builder = Config::defaults().unwrap();
        for (key, value) in overrides {
            builder = builder.set_override(*key, *value).unwrap();
        }
        Config::from_loader(builder.build().unwrap())
    }

    #[test]
    fn test_defaults_with_secret() {
        let config = load_with(&[("auth.jwt_secret", "a-very-long-test-secret-value-1234")]).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.auth.mode, AuthMode::Endpoint);
        assert_eq!(config.auth.leeway_secs, 0);
        assert!(!config.auth.require_exp);
        assert!(config.auth.issuer.is_none());
    }

    #[test]
    fn test_middleware_mode() {
        let config = load_with(&[
            ("auth.jwt_secret", "secret"),
            ("auth.mode", "middleware"),
            ("auth.issuer", "mentor-auth"),
        ])
        .unwrap();
        assert_eq!(config.auth.mode, AuthMode::Middleware);
        assert_eq!(config.auth.issuer.as_deref(), Some("mentor-auth"));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let result = load_with(&[("auth.jwt_secret", "secret"), ("auth.mode", "proxy")]);
        assert!(matches!(result, Err(GateError::Load(_))));
    }

    #[test]
    fn test_missing_secret_is_config_error() {
        let result = load_with(&[]);
        assert!(matches!(result, Err(GateError::Config(_))));
    }

    #[test]
    fn test_blank_secret_is_config_error() {
        let result = load_with(&[("auth.jwt_secret", "   ")]);
        assert!(matches!(result, Err(GateError::Config(_))));
    }

    #[test]
    fn test_secret_redacted_in_debug() {
        let config = load_with(&[("auth.jwt_secret", "super-secret-value")]).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret-value"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_jwt_secret_env_is_lowest_priority_source() {
        let dir = config_dir("legacy-secret", &[]);
        let config = with_env(&[("JWT_SECRET", "legacy-secret")], || load_dir(&dir)).unwrap();
        assert_eq!(config.auth.secret().unwrap().expose(), "legacy-secret");
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_files_override_jwt_secret_and_local_overrides_default() {
        let dir = config_dir(
            "file-layers",
            &[
                ("default", "auth:\n  jwt_secret: from-default\n  mode: middleware\n"),
                ("local", "auth:\n  jwt_secret: from-local\n"),
            ],
        );
        let config = with_env(&[("JWT_SECRET", "legacy-secret")], || load_dir(&dir)).unwrap();
        assert_eq!(config.auth.secret().unwrap().expose(), "from-local");
        assert_eq!(config.auth.mode, AuthMode::Middleware);
    }

    #[test]
    fn test_prefixed_env_overrides_files() {
        let dir = config_dir(
            "env-wins",
            &[("default", "server:\n  port: 7000\nauth:\n  jwt_secret: from-file\n")],
        );
        let config = with_env(
            &[
                ("JWT_SECRET", "legacy-secret"),
                ("MENTOR__AUTH__JWT_SECRET", "from-env"),
                ("MENTOR__SERVER__PORT", "8080"),
                ("MENTOR__AUTH__LEEWAY_SECS", "30"),
                ("MENTOR__AUTH__REQUIRE_EXP", "true"),
            ],
            || load_dir(&dir),
        )
        .unwrap();
        assert_eq!(config.auth.secret().unwrap().expose(), "from-env");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.leeway_secs, 30);
        assert!(config.auth.require_exp);
    }

    #[test]
    fn test_numeric_looking_env_secret_kept_verbatim() {
        let dir = config_dir("numeric-secret", &[]);
        for secret in ["0123", "TRUE", "0071234567890123456789012345678901234567890", "1e3"] {
            let config = with_env(&[("MENTOR__AUTH__JWT_SECRET", secret)], || load_dir(&dir)).unwrap();
            assert_eq!(config.auth.secret().unwrap().expose(), secret);
        }
    }

    #[test]
    fn test_env_without_secret_fails_at_load() {
        let dir = config_dir("no-secret", &[]);
        let result = with_env(&[], || load_dir(&dir));
        assert!(matches!(result, Err(GateError::Config(_))));
    }
}
