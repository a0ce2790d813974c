use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use url::Url;

pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Process-wide configuration: defaults, then `config.toml`, then `OUTREACH_*` env vars.
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::figment()
        .extract()
        .unwrap_or_else(|e| panic!("invalid configuration: {e}"))
});

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub basic: BasicConfig,
    pub workflow: WorkflowConfig,
    pub sheets: SheetsConfig,
    pub settings: SettingsConfig,
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("OUTREACH_").split("__"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicConfig {
    pub listen_addr: String,
    pub api_key: String,
    pub loglevel: String,
    pub database_url: String,
    /// Upper bound for inbound JSON bodies, in bytes.
    pub body_limit: usize,
}

pub const DEFAULT_API_KEY: &str = "changeme";

impl BasicConfig {
    /// True while the service key is still the shipped placeholder.
    pub fn uses_default_key(&self) -> bool {
        self.api_key == DEFAULT_API_KEY
    }
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:4000".to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            loglevel: "info".to_string(),
            database_url: "sqlite:outreach.sqlite".to_string(),
            body_limit: 2 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_emails_url: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_emails_url: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_connections_url: Option<Url>,
    pub connect_timeout_secs: u64,
    /// Generation runs an LLM pipeline upstream, so this is generous.
    pub timeout_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<Url>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            generate_emails_url: None,
            send_emails_url: None,
            generate_connections_url: None,
            connect_timeout_secs: 5,
            timeout_secs: 120,
            proxy: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spreadsheet_id: Option<String>,
    pub range: String,
    pub api_base: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub token_uri: String,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: None,
            range: "sheet1!A1".to_string(),
            api_base: SHEETS_API_BASE.to_string(),
            access_token: None,
            client_id: None,
            client_secret: None,
            refresh_token: None,
            token_uri: GOOGLE_TOKEN_URI.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// Probe the stored resume URL on load and drop it when the object is gone.
    pub verify_resume_on_load: bool,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            verify_resume_on_load: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_nested_sections() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("OUTREACH_BASIC__API_KEY", "secret");
            jail.set_env("OUTREACH_SHEETS__SPREADSHEET_ID", "sheet-123");
            let cfg: Config = Config::figment().extract()?;
            assert_eq!(cfg.basic.api_key, "secret");
            assert_eq!(cfg.sheets.spreadsheet_id.as_deref(), Some("sheet-123"));
            assert_eq!(cfg.sheets.range, "sheet1!A1");
            assert!(cfg.settings.verify_resume_on_load);
            Ok(())
        });
    }

    #[test]
    fn placeholder_key_is_detected() {
        let mut basic = BasicConfig::default();
        assert!(basic.uses_default_key());
        basic.api_key = "rotated".to_string();
        assert!(!basic.uses_default_key());
    }

    #[test]
    fn toml_file_is_merged_over_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [workflow]
                generate_emails_url = "http://127.0.0.1:5678/webhook/generate-emails"
                timeout_secs = 30
                "#,
            )?;
            let cfg: Config = Config::figment().extract()?;
            assert_eq!(
                cfg.workflow.generate_emails_url.as_ref().map(Url::as_str),
                Some("http://127.0.0.1:5678/webhook/generate-emails")
            );
            assert_eq!(cfg.workflow.timeout_secs, 30);
            assert_eq!(cfg.basic.listen_addr, "0.0.0.0:4000");
            Ok(())
        });
    }
}
