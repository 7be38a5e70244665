use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

/// Process configuration, read once at startup.
#[derive(Clone)]
pub struct Config {
    /// Source of the field encryption key. Required.
    pub secret_passphrase: String,
    /// Shared secret for `/admin/*`. `None` when unset or empty.
    pub admin_token: Option<String>,
    pub secure_headers: bool,
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_passphrase = lookup("SECRET_PASSPHRASE").unwrap_or_default();
        if secret_passphrase.is_empty() {
            bail!("SECRET_PASSPHRASE not set. Put it in your .env");
        }

        let admin_token = lookup("ADMIN_TOKEN").filter(|t| !t.is_empty());
        let secure_headers = lookup("ENABLE_SECURE_HEADERS")
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

        let host = lookup("REGISTRY_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("REGISTRY_PORT")
            .unwrap_or_else(|| "8000".into())
            .parse()
            .context("REGISTRY_PORT must be a port number")?;
        let data_dir: PathBuf = lookup("REGISTRY_DATA_DIR")
            .unwrap_or_else(|| "data".into())
            .into();
        let static_dir: PathBuf = lookup("REGISTRY_STATIC_DIR")
            .unwrap_or_else(|| "static".into())
            .into();

        Ok(Self {
            secret_passphrase,
            admin_token,
            secure_headers,
            host,
            port,
            data_dir,
            static_dir,
        })
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .with_context(|| format!("invalid listen address {addr}"))
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("admin_token", &self.admin_token.as_ref().map(|_| "<set>"))
            .field("secure_headers", &self.secure_headers)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("data_dir", &self.data_dir)
            .field("static_dir", &self.static_dir)
            .finish_non_exhaustive()
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn passphrase_required() {
        assert!(config(&[]).is_err());
        assert!(config(&[("SECRET_PASSPHRASE", "")]).is_err());
    }

    #[test]
    fn defaults() {
        let cfg = config(&[("SECRET_PASSPHRASE", "pw")]).unwrap();
        assert_eq!(cfg.secret_passphrase, "pw");
        assert_eq!(cfg.admin_token, None);
        assert!(!cfg.secure_headers);
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.data_dir, PathBuf::from("data"));
        assert_eq!(cfg.listen_addr().unwrap().to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn empty_admin_token_is_unset() {
        let cfg = config(&[("SECRET_PASSPHRASE", "pw"), ("ADMIN_TOKEN", "")]).unwrap();
        assert_eq!(cfg.admin_token, None);

        let cfg = config(&[("SECRET_PASSPHRASE", "pw"), ("ADMIN_TOKEN", "tok")]).unwrap();
        assert_eq!(cfg.admin_token.as_deref(), Some("tok"));
    }

    #[test]
    fn secure_headers_flag() {
        for (value, expected) in [
            ("1", true),
            ("true", true),
            ("YES", true),
            ("True", true),
            ("0", false),
            ("no", false),
            ("", false),
            ("on", false),
        ] {
            let cfg = config(&[("SECRET_PASSPHRASE", "pw"), ("ENABLE_SECURE_HEADERS", value)])
                .unwrap();
            assert_eq!(cfg.secure_headers, expected, "value {value:?}");
        }
    }

    #[test]
    fn bad_port_rejected() {
        assert!(config(&[("SECRET_PASSPHRASE", "pw"), ("REGISTRY_PORT", "http")]).is_err());
    }

    #[test]
    fn debug_hides_secrets() {
        let cfg = config(&[("SECRET_PASSPHRASE", "hunter2"), ("ADMIN_TOKEN", "tok")]).unwrap();
        let printed = format!("{cfg:?}");
        assert!(!printed.contains("hunter2"));
        assert!(!printed.contains("\"tok\""));
    }
}
