use std::env;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "NOTES_SERVICE_PORT";
    /// Generic fallback used by most hosting platforms
    pub const FALLBACK_PORT: &str = "PORT";
    pub const HOST: &str = "NOTES_SERVICE_HOST";
    /// Path to the SQLite file, or ":memory:"
    pub const DATABASE_URL: &str = "NOTES_DATABASE_URL";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 5000;
    pub const HOST: &str = "127.0.0.1";
    pub const DATABASE_URL: &str = "./.db/notes.db";
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup(env_vars::PORT)
            .or_else(|| lookup(env_vars::FALLBACK_PORT))
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults::PORT);

        let host = lookup(env_vars::HOST)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| defaults::HOST.to_string());

        let database_url = lookup(env_vars::DATABASE_URL)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| defaults::DATABASE_URL.to_string());

        Self {
            host,
            port,
            database_url,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
