//! Configuration loading and validation for folio.
//!
//! Every recognized option comes from the process environment and is read
//! exactly once at startup into [`AppConfig`], which is then passed to the
//! components that need it. Nothing else reads the environment.

use std::time::Duration;

/// Environment variable names, in one place.
pub mod vars {
    pub const ALLOWED_ORIGINS: &str = "ALLOWED_ORIGINS";
    pub const SMTP_HOST: &str = "SMTP_HOST";
    pub const SMTP_PORT: &str = "SMTP_PORT";
    pub const SMTP_USER: &str = "SMTP_USER";
    pub const SMTP_PASS: &str = "SMTP_PASS";
    pub const RECIPIENT_EMAIL: &str = "RECIPIENT_EMAIL";
    pub const OPENROUTER_API_KEY: &str = "OPENROUTER_API_KEY";
    pub const GITHUB_USERNAME: &str = "GITHUB_USERNAME";
    pub const GITHUB_PAT: &str = "GITHUB_PAT";
    pub const HAIKU_CACHE_TTL: &str = "HAIKU_CACHE_TTL";
}

/// The root configuration structure.
#[derive(Clone)]
pub struct AppConfig {
    /// OpenRouter API key; absent means AI features degrade
    pub openrouter_api_key: Option<String>,

    /// Haiku cache time-to-live in seconds
    pub haiku_cache_ttl_secs: u64,

    /// CORS configuration
    pub cors: CorsConfig,

    /// Outbound mail configuration
    pub smtp: SmtpConfig,

    /// Code-hosting identity for live activity context
    pub github: GithubConfig,
}

fn default_ttl_secs() -> u64 {
    86_400
}
fn default_github_username() -> String {
    "p-kowadkar".into()
}
fn default_smtp_host() -> String {
    "smtp.gmail.com".into()
}
fn default_smtp_port() -> u16 {
    587
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("openrouter_api_key", &redact(&self.openrouter_api_key))
            .field("haiku_cache_ttl_secs", &self.haiku_cache_ttl_secs)
            .field("cors", &self.cors)
            .field("smtp", &self.smtp)
            .field("github", &self.github)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Allowed origins; `["*"]` means any origin
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn allows_any(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".into()],
        }
    }
}

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    /// Where contact messages go; falls back to `user`
    pub recipient: Option<String>,
}

impl SmtpConfig {
    /// Both halves of the credential are present.
    pub fn is_configured(&self) -> bool {
        self.user.is_some() && self.password.is_some()
    }

    /// The address contact messages are delivered to.
    pub fn recipient(&self) -> Option<&str> {
        self.recipient.as_deref().or(self.user.as_deref())
    }
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &redact(&self.password))
            .field("recipient", &self.recipient)
            .finish()
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            user: None,
            password: None,
            recipient: None,
        }
    }
}

#[derive(Clone, Default)]
pub struct GithubConfig {
    pub username: Option<String>,
    /// Optional token, only raises rate limits
    pub token: Option<String>,
}

impl std::fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubConfig")
            .field("username", &self.username)
            .field("token", &redact(&self.token))
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// Empty and whitespace-only values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let allowed_origins = get(vars::ALLOWED_ORIGINS)
            .map(|raw| {
                raw.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty())
            .unwrap_or_else(|| CorsConfig::default().allowed_origins);

        let config = Self {
            openrouter_api_key: get(vars::OPENROUTER_API_KEY),
            haiku_cache_ttl_secs: parse_var(vars::HAIKU_CACHE_TTL, get(vars::HAIKU_CACHE_TTL))?
                .unwrap_or_else(default_ttl_secs),
            cors: CorsConfig { allowed_origins },
            smtp: SmtpConfig {
                host: get(vars::SMTP_HOST).unwrap_or_else(default_smtp_host),
                port: parse_var(vars::SMTP_PORT, get(vars::SMTP_PORT))?
                    .unwrap_or_else(default_smtp_port),
                user: get(vars::SMTP_USER),
                password: get(vars::SMTP_PASS),
                recipient: get(vars::RECIPIENT_EMAIL),
            },
            github: GithubConfig {
                username: Some(get(vars::GITHUB_USERNAME).unwrap_or_else(default_github_username)),
                token: get(vars::GITHUB_PAT),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.smtp.port == 0 {
            return Err(ConfigError::Invalid {
                var: vars::SMTP_PORT,
                reason: "port must be non-zero".into(),
            });
        }

        for origin in &self.cors.allowed_origins {
            if origin != "*" && !(origin.starts_with("http://") || origin.starts_with("https://")) {
                return Err(ConfigError::Invalid {
                    var: vars::ALLOWED_ORIGINS,
                    reason: format!("'{origin}' is not an http(s) origin"),
                });
            }
        }

        if self.smtp.user.is_some() != self.smtp.password.is_some() {
            tracing::warn!("Only one of SMTP_USER / SMTP_PASS is set; contact mail stays log-only");
        }

        Ok(())
    }

    /// Check if a gateway credential is available.
    pub fn has_api_key(&self) -> bool {
        self.openrouter_api_key.is_some()
    }

    pub fn haiku_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.haiku_cache_ttl_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openrouter_api_key: None,
            haiku_cache_ttl_secs: default_ttl_secs(),
            cors: CorsConfig::default(),
            smtp: SmtpConfig::default(),
            github: GithubConfig::default(),
        }
    }
}

fn parse_var<T>(var: &'static str, raw: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.map(|value| {
        value.parse::<T>().map_err(|e| ConfigError::Invalid {
            var,
            reason: format!("'{value}': {e}"),
        })
    })
    .transpose()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| env.get(name).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = load(&[]).unwrap();
        assert!(!config.has_api_key());
        assert_eq!(config.haiku_cache_ttl_secs, 86_400);
        assert_eq!(config.smtp.host, "smtp.gmail.com");
        assert_eq!(config.smtp.port, 587);
        assert!(!config.smtp.is_configured());
        assert!(config.cors.allows_any());
        assert_eq!(config.github.username.as_deref(), Some("p-kowadkar"));
    }

    #[test]
    fn origins_are_split_and_trimmed() {
        let config = load(&[(
            vars::ALLOWED_ORIGINS,
            "https://www.pkowadkar.com, http://localhost:5173,",
        )])
        .unwrap();
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://www.pkowadkar.com", "http://localhost:5173"]
        );
        assert!(!config.cors.allows_any());
    }

    #[test]
    fn non_http_origin_rejected() {
        assert!(load(&[(vars::ALLOWED_ORIGINS, "example.com")]).is_err());
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = load(&[(vars::OPENROUTER_API_KEY, "  "), (vars::SMTP_USER, "")]).unwrap();
        assert!(!config.has_api_key());
        assert!(config.smtp.user.is_none());
    }

    #[test]
    fn bad_number_rejected() {
        let err = load(&[(vars::HAIKU_CACHE_TTL, "a day")]).unwrap_err();
        assert!(err.to_string().contains(vars::HAIKU_CACHE_TTL));

        assert!(load(&[(vars::SMTP_PORT, "0")]).is_err());
        assert!(load(&[(vars::SMTP_PORT, "70000")]).is_err());
    }

    #[test]
    fn ttl_override() {
        let config = load(&[(vars::HAIKU_CACHE_TTL, "60")]).unwrap();
        assert_eq!(config.haiku_cache_ttl(), Duration::from_secs(60));
    }

    #[test]
    fn recipient_falls_back_to_sender() {
        let config = load(&[(vars::SMTP_USER, "me@example.com"), (vars::SMTP_PASS, "pw")]).unwrap();
        assert!(config.smtp.is_configured());
        assert_eq!(config.smtp.recipient(), Some("me@example.com"));

        let config = load(&[
            (vars::SMTP_USER, "me@example.com"),
            (vars::SMTP_PASS, "pw"),
            (vars::RECIPIENT_EMAIL, "inbox@example.com"),
        ])
        .unwrap();
        assert_eq!(config.smtp.recipient(), Some("inbox@example.com"));
    }

    #[test]
    fn debug_redacts_secrets() {
        let config = load(&[
            (vars::OPENROUTER_API_KEY, "sk-or-secret"),
            (vars::SMTP_PASS, "hunter2"),
            (vars::GITHUB_PAT, "ghp_secret"),
        ])
        .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-or-secret"));
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("ghp_secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
