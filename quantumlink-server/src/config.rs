//! Server configuration module
//!
//! Handles loading configuration from environment variables with sensible defaults.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port (default: 5000)
    pub port: u16,
    /// Server host (default: 127.0.0.1)
    pub host: IpAddr,
    /// Allowed CORS origins, comma-separated (default: allow all in dev)
    pub allowed_origins: Option<Vec<String>>,
    /// Request body limit in KB (default: 64)
    pub body_limit_kb: usize,
    /// HS256 secret for bearer JWTs (unset: development `valid_<id>` tokens)
    pub jwt_secret: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            allowed_origins: None, // None = allow all (dev mode)
            body_limit_kb: 64,
            jwt_secret: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let host = match lookup("HOST") {
            Some(h) => h.parse().unwrap_or_else(|_| {
                tracing::warn!(host = %h, "HOST is not an IP address, using default");
                defaults.host
            }),
            None => defaults.host,
        };

        let allowed_origins = lookup("ALLOWED_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        let body_limit_kb = lookup("BODY_LIMIT_KB")
            .and_then(|v| v.parse().ok())
            .filter(|kb: &usize| *kb > 0)
            .unwrap_or(defaults.body_limit_kb);

        let jwt_secret = lookup("JWT_SECRET").filter(|s| !s.trim().is_empty());

        Self {
            port,
            host,
            allowed_origins,
            body_limit_kb,
            jwt_secret,
        }
    }

    /// Request body limit in bytes
    pub fn body_limit_bytes(&self) -> usize {
        self.body_limit_kb * 1024
    }

    /// Get socket address from config
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
