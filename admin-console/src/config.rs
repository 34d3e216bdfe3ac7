//! Configuration management via environment variables
//!
//! Settings use `ADMIN_CONSOLE_*` names. Where a legacy name exists it is
//! still honoured with a deprecation warning.

use crate::common::error::{ConsoleError, ConsoleResult};

/// Default listen address
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default listen port
pub const DEFAULT_PORT: u16 = 8080;

/// Get an environment variable with fallback to a deprecated name
///
/// Returns the new variable if set; otherwise the old one (logging a
/// deprecation warning); otherwise `None`.
///
/// # Example
/// ```
/// use admin_console::config::get_env_with_fallback;
///
/// let url = get_env_with_fallback("ADMIN_CONSOLE_DATABASE_URL", "DATABASE_URL");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if new_name == old_name {
        return None;
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Falls back to `default` when unset or unparsable.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// デフォルトのデータベースURL（`~/.admin-console/admin-console.db`）
pub fn default_database_url() -> String {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    format!("sqlite:{}/.admin-console/admin-console.db", home)
}

/// 管理コンソールの実行時設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Bind address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// SQLite database URL
    pub database_url: String,
    /// 転送先テナントサービスのベースURL
    pub tenant_service_url: String,
    /// JWT検証用の共有シークレット
    pub jwt_secret: String,
}

impl ConsoleConfig {
    /// Load configuration from environment variables.
    ///
    /// `ADMIN_CONSOLE_TENANT_SERVICE_URL` and `ADMIN_CONSOLE_JWT_SECRET` are
    /// required; everything else has a default.
    pub fn from_env() -> ConsoleResult<Self> {
        let host =
            get_env_with_fallback_or("ADMIN_CONSOLE_HOST", "ADMIN_CONSOLE_HOST", DEFAULT_HOST);
        let port =
            get_env_with_fallback_parse("ADMIN_CONSOLE_PORT", "ADMIN_CONSOLE_PORT", DEFAULT_PORT);
        let database_url = get_env_with_fallback("ADMIN_CONSOLE_DATABASE_URL", "DATABASE_URL")
            .unwrap_or_else(default_database_url);

        let tenant_service_url =
            get_env_with_fallback("ADMIN_CONSOLE_TENANT_SERVICE_URL", "TENANT_SERVICE_URL")
                .ok_or_else(|| {
                    ConsoleError::Config(
                        "ADMIN_CONSOLE_TENANT_SERVICE_URL must be set".to_string(),
                    )
                })?;
        let jwt_secret = get_env_with_fallback("ADMIN_CONSOLE_JWT_SECRET", "JWT_SECRET")
            .ok_or_else(|| {
                ConsoleError::Config("ADMIN_CONSOLE_JWT_SECRET must be set".to_string())
            })?;

        let config = Self {
            host,
            port,
            database_url,
            tenant_service_url,
            jwt_secret,
        };
        config.validate()?;
        Ok(config)
    }

    /// CLI引数でホスト・ポートを上書き
    pub fn with_bind(mut self, host: String, port: u16) -> Self {
        self.host = host;
        self.port = port;
        self
    }

    /// `host:port`形式のバインドアドレス
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn validate(&self) -> ConsoleResult<()> {
        let url = self.tenant_service_url.trim();
        let scheme_ok = url.starts_with("http://") || url.starts_with("https://");
        let has_host = url
            .split_once("://")
            .map(|(_, rest)| !rest.trim_start_matches('/').is_empty())
            .unwrap_or(false);
        if !scheme_ok || !has_host {
            return Err(ConsoleError::Config(format!(
                "Tenant service URL must be an absolute http(s) URL: '{}'",
                self.tenant_service_url
            )));
        }
        if self.jwt_secret.is_empty() {
            return Err(ConsoleError::Config("JWT secret must not be empty".to_string()));
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn for_tests(tenant_service_url: &str) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            database_url: "sqlite::memory:".to_string(),
            tenant_service_url: tenant_service_url.to_string(),
            jwt_secret: "test-secret".to_string(),
        }
    }
}
