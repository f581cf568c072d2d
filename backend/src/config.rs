use anyhow::{anyhow, Context};
use std::env;
use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_FROM_ADDRESS: &str = "noreply@restock.local";

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("from_address", &self.from_address)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// `None` when `SMTP_HOST` is unset; codes are then only logged.
    pub smtp: Option<SmtpConfig>,
    pub smtp_skip_send: bool,
    /// Empty means any origin.
    pub cors_allow_origins: Vec<String>,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bind_addr_raw = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr_raw
            .parse()
            .map_err(|_| anyhow!("Invalid BIND_ADDR value: {}", bind_addr_raw))?;

        let smtp = match var("SMTP_HOST") {
            Some(host) => {
                let port = match var("SMTP_PORT") {
                    Some(raw) => raw
                        .parse::<u16>()
                        .with_context(|| format!("Invalid SMTP_PORT value: {}", raw))?,
                    None => DEFAULT_SMTP_PORT,
                };
                Some(SmtpConfig {
                    host,
                    port,
                    username: var("SMTP_USERNAME").unwrap_or_default(),
                    password: var("SMTP_PASSWORD").unwrap_or_default(),
                    from_address: var("SMTP_FROM_ADDRESS")
                        .unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
                })
            }
            None => None,
        };

        let smtp_skip_send = var("SMTP_SKIP_SEND")
            .map(|value| value.eq_ignore_ascii_case("true") || value == "1")
            .unwrap_or(false);

        let cors_allow_origins = var("CORS_ALLOW_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty() && origin != "*")
                    .collect()
            })
            .unwrap_or_default();

        Ok(Config {
            bind_addr,
            smtp,
            smtp_skip_send,
            cors_allow_origins,
        })
    }
}
