use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

pub const DEFAULT_WHOP_API_BASE: &str = "https://api.whop.com/api/v1";
pub const DEFAULT_GROQ_ENDPOINT: &str = "https://api.groq.com/openai/v1/responses";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub whop: WhopConfig,
    #[serde(default)]
    pub groq: GroqConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// Expose the `/dev/tools` harness catalog
    #[serde(default)]
    pub dev_tools: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4), dev_tools: false }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WhopConfig {
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_whop_api_base")]
    pub api_base: String,
    /// Read once at load time; create/update/delete are refused when false
    #[serde(default)]
    pub allow_writes: bool,
}

impl Default for WhopConfig {
    fn default() -> Self {
        Self { app_id: None, api_key: None, api_base: default_whop_api_base(), allow_writes: false }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroqConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_groq_endpoint")]
    pub endpoint: String,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self { api_key: None, endpoint: default_groq_endpoint() }
    }
}

fn default_whop_api_base() -> String {
    DEFAULT_WHOP_API_BASE.to_string()
}
fn default_groq_endpoint() -> String {
    DEFAULT_GROQ_ENDPOINT.to_string()
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// config.toml（可缺省）→ 环境变量覆盖 → 归一化校验
    pub fn load_and_validate() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            AppConfig::default()
        };
        cfg.apply_env();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Override fields from an environment lookup. Empty values count as unset.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("SERVER_HOST") {
            self.server.host = v;
        }
        if let Some(p) = get("SERVER_PORT").and_then(|v| v.parse::<u16>().ok()) {
            self.server.port = p;
        }
        if let Some(w) = get("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok()) {
            self.server.worker_threads = Some(w);
        }
        if let Some(v) = get("DEV_TOOLS") {
            self.server.dev_tools = v == "true";
        }

        if let Some(v) = get("WHOP_APP_ID") {
            self.whop.app_id = Some(v);
        }
        if let Some(v) = get("WHOP_API_KEY") {
            self.whop.api_key = Some(v);
        }
        if let Some(v) = get("WHOP_API_BASE") {
            self.whop.api_base = v;
        }
        // 仅当值严格等于 "true" 时开启写操作
        if let Some(v) = lookup("ALLOW_WRITES") {
            self.whop.allow_writes = v == "true";
        }

        if let Some(v) = get("GROQ_API_KEY") {
            self.groq.api_key = Some(v);
        }
        if let Some(v) = get("GROQ_ENDPOINT") {
            self.groq.endpoint = v;
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.whop.validate()?;
        self.groq.validate()?;
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
        if let Some(w) = self.worker_threads {
            if w == 0 {
                self.worker_threads = Some(4);
            }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl WhopConfig {
    // 凭据缺失不在此处报错：首次调用上游时才失败
    pub fn validate(&self) -> Result<()> {
        let lower = self.api_base.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("whop.api_base must start with http(s)"));
        }
        Ok(())
    }
}

impl GroqConfig {
    pub fn validate(&self) -> Result<()> {
        let lower = self.endpoint.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("groq.endpoint must start with http(s)"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_are_sane() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.whop.api_base, DEFAULT_WHOP_API_BASE);
        assert_eq!(cfg.groq.endpoint, DEFAULT_GROQ_ENDPOINT);
        assert!(!cfg.whop.allow_writes);
        assert!(!cfg.server.dev_tools);
    }

    #[test]
    fn env_overrides_credentials() {
        let mut cfg = AppConfig::default();
        cfg.apply_env_with(env(&[
            ("WHOP_APP_ID", "app_1"),
            ("WHOP_API_KEY", "key_1"),
            ("GROQ_API_KEY", "gsk_1"),
            ("SERVER_PORT", "9090"),
            ("WHOP_API_BASE", ""),
        ]));
        assert_eq!(cfg.whop.app_id.as_deref(), Some("app_1"));
        assert_eq!(cfg.whop.api_key.as_deref(), Some("key_1"));
        assert_eq!(cfg.groq.api_key.as_deref(), Some("gsk_1"));
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.whop.api_base, DEFAULT_WHOP_API_BASE);
    }

    #[test]
    fn allow_writes_requires_exact_true() {
        for (raw, expected) in [("true", true), ("TRUE", false), ("1", false), ("yes", false), ("", false)] {
            let mut cfg = AppConfig::default();
            cfg.apply_env_with(env(&[("ALLOW_WRITES", raw)]));
            assert_eq!(cfg.whop.allow_writes, expected, "ALLOW_WRITES={raw}");
        }
    }

    #[test]
    fn toml_then_env() {
        let mut cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 3000
            dev_tools = true

            [whop]
            allow_writes = true
            "#,
        )
        .unwrap();
        cfg.apply_env_with(env(&[("ALLOW_WRITES", "false")]));
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert!(cfg.server.dev_tools);
        assert!(!cfg.whop.allow_writes);
    }

    #[test]
    fn rejects_port_zero_and_bad_base() {
        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.whop.api_base = "ftp://whop".into();
        assert!(cfg.normalize_and_validate().is_err());
    }
}
