use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub users: UsersConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

/// Rules applied to user records on create/update.
#[derive(Debug, Clone, Deserialize)]
pub struct UsersConfig {
    /// Pattern a valid email must match in full.
    #[serde(default = "default_email_regex")]
    pub email_regex: String,
    /// Minimum age in whole years.
    #[serde(default = "default_min_age")]
    pub min_age: u32,
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self { email_regex: default_email_regex(), min_age: default_min_age() }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_email_regex() -> String { r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$".to_string() }
fn default_min_age() -> u32 { 18 }

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file if present, otherwise defaults filled from the environment.
    pub fn load() -> Result<Self> {
        let path = config_path();
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            Self::from_env()
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.users.normalize_from_env()?;
        self.users.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl UsersConfig {
    /// `USER_EMAIL_REGEX` and `USER_MIN_AGE` override file values.
    pub fn normalize_from_env(&mut self) -> Result<()> {
        if let Ok(regex) = std::env::var("USER_EMAIL_REGEX") {
            self.email_regex = regex;
        }
        if let Ok(raw) = std::env::var("USER_MIN_AGE") {
            self.min_age = raw
                .trim()
                .parse()
                .map_err(|e| anyhow!("USER_MIN_AGE must be a non-negative integer: {e}"))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.email_regex.trim().is_empty() {
            return Err(anyhow!("users.email_regex is empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_file() {
        let cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [database]
            url = "postgres://u:p@localhost/users"
            max_connections = 5

            [users]
            email_regex = "^.+@.+$"
            min_age = 21
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.database.max_connections, 5);
        assert_eq!(cfg.database.min_connections, 2);
        assert_eq!(cfg.users.email_regex, "^.+@.+$");
        assert_eq!(cfg.users.min_age, 21);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.database.acquire_timeout_secs, 30);
        assert_eq!(cfg.users.min_age, 18);
        assert!(cfg.users.email_regex.starts_with('^'));
    }

    #[test]
    fn database_validation_rules() {
        let mut db = DatabaseConfig { url: "mysql://localhost/x".into(), ..DatabaseConfig::default() };
        assert!(db.validate().is_err());

        db.url = "sqlite::memory:".into();
        assert!(db.validate().is_ok());

        db.min_connections = 0;
        assert!(db.validate().is_err());

        db.min_connections = 4;
        db.max_connections = 2;
        assert!(db.validate().is_err());
    }

    #[test]
    fn server_normalize_fills_blank_host_and_threads() {
        let mut s = ServerConfig { host: "  ".into(), port: 8081, worker_threads: Some(0) };
        s.normalize().unwrap();
        assert_eq!(s.host, "127.0.0.1");
        assert_eq!(s.worker_threads, Some(4));

        s.port = 0;
        assert!(s.normalize().is_err());
    }

    // Only test touching USER_* variables; keep it that way, env is process-wide.
    #[test]
    fn users_env_overrides_file_values() {
        std::env::set_var("USER_EMAIL_REGEX", "^[a-z]+@corp\\.example$");
        std::env::set_var("USER_MIN_AGE", " 21 ");
        let mut users = UsersConfig::default();
        users.normalize_from_env().unwrap();
        assert_eq!(users.email_regex, "^[a-z]+@corp\\.example$");
        assert_eq!(users.min_age, 21);

        std::env::set_var("USER_MIN_AGE", "twenty");
        let mut users = UsersConfig::default();
        let err = users.normalize_from_env().unwrap_err();
        assert!(err.to_string().contains("USER_MIN_AGE"));

        std::env::set_var("USER_MIN_AGE", "-1");
        assert!(UsersConfig::default().normalize_from_env().is_err());

        std::env::remove_var("USER_EMAIL_REGEX");
        std::env::remove_var("USER_MIN_AGE");
        let mut users = UsersConfig::default();
        users.normalize_from_env().unwrap();
        assert_eq!(users.min_age, 18);
    }

    #[test]
    fn blank_email_regex_rejected() {
        let users = UsersConfig { email_regex: " ".into(), min_age: 18 };
        assert!(users.validate().is_err());
    }
}
