use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::reset::{policy::DEFAULT_PASSWORD_MIN_LENGTH, ResetMode};

const DEFAULT_API_BASE_URL: &str = "http://localhost:54321";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RuntimeConfig {
    pub api_base_url: String,
    pub anon_key: Option<String>,
    pub reset_mode: ResetMode,
    pub password_min_length: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            anon_key: None,
            reset_mode: ResetMode::default(),
            password_min_length: DEFAULT_PASSWORD_MIN_LENGTH,
        }
    }
}

/// Partial config as found in `window.__RESTOCK_ENV`, `window.__RESTOCK_CONFIG`
/// or `./config.json`; missing keys fall back to the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
struct RawConfig {
    #[serde(default, alias = "API_BASE_URL")]
    api_base_url: Option<String>,
    #[serde(default, alias = "ANON_KEY")]
    anon_key: Option<String>,
    #[serde(default, alias = "RESET_MODE")]
    reset_mode: Option<ResetMode>,
    #[serde(default, alias = "PASSWORD_MIN_LENGTH")]
    password_min_length: Option<usize>,
}

impl RawConfig {
    fn is_empty(&self) -> bool {
        self.api_base_url.is_none()
            && self.anon_key.is_none()
            && self.reset_mode.is_none()
            && self.password_min_length.is_none()
    }

    fn into_config(self) -> RuntimeConfig {
        let defaults = RuntimeConfig::default();
        RuntimeConfig {
            api_base_url: self
                .api_base_url
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.api_base_url),
            anon_key: self.anon_key.filter(|key| !key.trim().is_empty()),
            reset_mode: self.reset_mode.unwrap_or(defaults.reset_mode),
            password_min_length: self
                .password_min_length
                .filter(|len| *len > 0)
                .unwrap_or(defaults.password_min_length),
        }
    }
}

static RUNTIME_CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

fn cache_config(cfg: RuntimeConfig) -> RuntimeConfig {
    let _ = RUNTIME_CONFIG.set(cfg);
    RUNTIME_CONFIG.get().cloned().unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{RawConfig, RuntimeConfig};

    fn read_global(name: &str) -> Option<RawConfig> {
        let window = web_sys::window()?;
        let any = js_sys::Reflect::get(&window, &name.into()).ok()?;
        if any.is_undefined() || any.is_null() {
            return None;
        }
        let json = js_sys::JSON::stringify(&any).ok()?.as_string()?;
        serde_json::from_str::<RawConfig>(&json)
            .ok()
            .filter(|raw| !raw.is_empty())
    }

    /// Expects an optional `window.__RESTOCK_ENV = { API_BASE_URL: "..." }`
    /// (env.js), then `window.__RESTOCK_CONFIG`.
    pub(super) fn snapshot_from_globals() -> Option<RawConfig> {
        read_global("__RESTOCK_ENV").or_else(|| read_global("__RESTOCK_CONFIG"))
    }

    pub(super) fn write_window_config(cfg: &RuntimeConfig) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(json) = serde_json::to_string(cfg) else {
            return;
        };
        if let Ok(value) = js_sys::JSON::parse(&json) {
            let _ = js_sys::Reflect::set(&window, &"__RESTOCK_CONFIG".into(), &value);
        }
    }

    pub(super) async fn fetch_runtime_config() -> Option<RawConfig> {
        let base = web_sys::window()?.location().href().ok()?;
        let url = url::Url::parse(&base).ok()?.join("./config.json").ok()?;
        let resp = reqwest::get(url).await.ok()?;
        if !resp.status().is_success() {
            return None;
        }
        resp.json::<RawConfig>().await.ok()
    }
}

#[cfg(target_arch = "wasm32")]
async fn resolve_config() -> RuntimeConfig {
    if let Some(raw) = browser::snapshot_from_globals() {
        return raw.into_config();
    }
    if let Some(raw) = browser::fetch_runtime_config().await {
        let cfg = raw.into_config();
        browser::write_window_config(&cfg);
        return cfg;
    }
    log::debug!("no runtime config found, using defaults");
    RuntimeConfig::default()
}

#[cfg(not(target_arch = "wasm32"))]
async fn resolve_config() -> RuntimeConfig {
    RuntimeConfig::default()
}

pub async fn await_config() -> RuntimeConfig {
    if let Some(cached) = RUNTIME_CONFIG.get() {
        return cached.clone();
    }
    cache_config(resolve_config().await)
}

/// Cached config, or defaults when `init` has not finished yet.
pub fn current_config() -> RuntimeConfig {
    RUNTIME_CONFIG.get().cloned().unwrap_or_default()
}

pub async fn init() {
    let cfg = await_config().await;
    log::info!(
        "runtime config: api_base_url={} reset_mode={:?}",
        cfg.api_base_url,
        cfg.reset_mode
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_config_accepts_upper_and_lower_case_keys() {
        let raw: RawConfig = serde_json::from_str(
            r#"{"API_BASE_URL":"https://x.example","anon_key":"k","reset_mode":"code_table"}"#,
        )
        .unwrap();
        let cfg = raw.into_config();
        assert_eq!(cfg.api_base_url, "https://x.example");
        assert_eq!(cfg.anon_key.as_deref(), Some("k"));
        assert_eq!(cfg.reset_mode, ResetMode::CodeTable);
        assert_eq!(cfg.password_min_length, DEFAULT_PASSWORD_MIN_LENGTH);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let raw: RawConfig =
            serde_json::from_str(r#"{"api_base_url":"  ","anon_key":"","password_min_length":0}"#)
                .unwrap();
        assert_eq!(raw.into_config(), RuntimeConfig::default());
    }

    #[test]
    fn empty_raw_config_is_detected() {
        assert!(RawConfig::default().is_empty());
        let raw: RawConfig = serde_json::from_str(r#"{"RESET_MODE":"otp"}"#).unwrap();
        assert!(!raw.is_empty());
    }
}
