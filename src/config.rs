use std::net::SocketAddr;

use anyhow::Context;
use cookie::Key;

/// Minimum length of `SECRET_KEY`; the cookie signing key is derived from it.
pub const MIN_SECRET_KEY_LEN: usize = 32;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub secret_key: String,
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub tmdb_image_base_url: String,
    pub upstream_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = var("PORT").unwrap_or_else(|| "3000".to_string()).parse().context("PORT")?;

        let database_url =
            var("DATABASE_URL").unwrap_or_else(|| "sqlite://movies.db?mode=rwc".to_string());

        let secret_key = var("SECRET_KEY").context("SECRET_KEY must be set")?;
        signing_key(&secret_key).context("SECRET_KEY")?;

        let tmdb_api_key = var("TMDB_API_KEY").context("TMDB_API_KEY must be set")?;
        if tmdb_api_key.trim().is_empty() {
            anyhow::bail!("TMDB_API_KEY must not be empty");
        }

        let tmdb_base_url =
            var("TMDB_BASE_URL").unwrap_or_else(|| "https://api.themoviedb.org/3".to_string());
        let tmdb_image_base_url = var("TMDB_IMAGE_BASE_URL")
            .unwrap_or_else(|| "https://image.tmdb.org/t/p/w500".to_string());

        let upstream_timeout_secs: u64 = match var("UPSTREAM_TIMEOUT_SECS") {
            Some(s) => s.parse().context("UPSTREAM_TIMEOUT_SECS")?,
            None => 30,
        };
        if upstream_timeout_secs == 0 {
            anyhow::bail!("UPSTREAM_TIMEOUT_SECS must be at least 1");
        }

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            secret_key,
            tmdb_api_key,
            tmdb_base_url,
            tmdb_image_base_url,
            upstream_timeout_secs,
        })
    }
}

/// Derives the cookie signing key, refusing secrets too short to derive from.
pub fn signing_key(secret: &str) -> anyhow::Result<Key> {
    if secret.len() < MIN_SECRET_KEY_LEN {
        anyhow::bail!("secret key must be at least {MIN_SECRET_KEY_LEN} bytes");
    }
    Ok(Key::derive_from(secret.as_bytes()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_vars(|name| vars.get(name).cloned())
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![("SECRET_KEY", "0123456789abcdef0123456789abcdef"), ("TMDB_API_KEY", "key")]
    }

    fn with(extra: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
        let mut vars = required();
        vars.retain(|(k, _)| !extra.iter().any(|(e, _)| e == k));
        vars.extend_from_slice(extra);
        vars
    }

    #[test]
    fn test_defaults() {
        let config = load(&required()).unwrap();
        assert_eq!(config.addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.database_url, "sqlite://movies.db?mode=rwc");
        assert_eq!(config.tmdb_base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.tmdb_image_base_url, "https://image.tmdb.org/t/p/w500");
        assert_eq!(config.upstream_timeout_secs, 30);
    }

    #[test]
    fn test_overrides() {
        let config = load(&with(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("UPSTREAM_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.upstream_timeout_secs, 5);
    }

    #[test]
    fn test_secret_key_required_and_long_enough() {
        assert!(load(&[("TMDB_API_KEY", "key")]).is_err());
        assert!(load(&with(&[("SECRET_KEY", "too-short")])).is_err());
        assert!(signing_key(&"s".repeat(MIN_SECRET_KEY_LEN - 1)).is_err());
        assert!(signing_key(&"s".repeat(MIN_SECRET_KEY_LEN)).is_ok());
    }

    #[test]
    fn test_api_key_required_and_not_blank() {
        assert!(load(&[("SECRET_KEY", "0123456789abcdef0123456789abcdef")]).is_err());
        assert!(load(&with(&[("TMDB_API_KEY", "   ")])).is_err());
    }

    #[test]
    fn test_unparsable_numbers() {
        assert!(load(&with(&[("PORT", "http")])).is_err());
        assert!(load(&with(&[("PORT", "70000")])).is_err());
        assert!(load(&with(&[("UPSTREAM_TIMEOUT_SECS", "soon")])).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = load(&with(&[("UPSTREAM_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(err.to_string().contains("UPSTREAM_TIMEOUT_SECS"));
    }
}
