//! Конфигурация приложения
//!
//! Загружается один раз при старте из блока
//! `<script type="application/toml" id="app-config">` в `index.html`,
//! иначе используется встроенная конфигурация по умолчанию.

use leptos::prelude::use_context;
use serde::Deserialize;
use thiserror::Error;

pub const STORAGE_USER_ACCESS: &str = "userAccess";
pub const STORAGE_IS_ADMIN: &str = "isAdmin";
pub const STORAGE_AUTH_TOKEN: &str = "liveauthToken";

const CONFIG_ELEMENT_ID: &str = "app-config";

const FALLBACK_ROWS_PER_PAGE: [usize; 3] = [5, 10, 25];
const FALLBACK_TOAST_TIMEOUT_MS: u32 = 4000;

/// Конфигурация по умолчанию, встроенная в сборку
const DEFAULT_CONFIG: &str = r#"
[api]
port = 3000

[table]
rows_per_page_options = [5, 10, 25]
default_rows_per_page = 10

[toast]
timeout_ms = 4000
"#;

#[derive(Debug, Error)]
#[error("invalid app config: {0}")]
pub struct ConfigError(#[from] toml::de::Error);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub toast: ToastConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiConfig {
    /// Явный базовый URL, например `https://api.example.com`. Если не задан,
    /// используется хост текущего окна и `port`.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TableConfig {
    #[serde(default)]
    pub rows_per_page_options: Vec<usize>,
    #[serde(default)]
    pub default_rows_per_page: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToastConfig {
    #[serde(default)]
    pub timeout_ms: u32,
}

fn default_port() -> u16 {
    3000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            port: default_port(),
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            rows_per_page_options: FALLBACK_ROWS_PER_PAGE.to_vec(),
            default_rows_per_page: 10,
        }
    }
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            timeout_ms: FALLBACK_TOAST_TIMEOUT_MS,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            table: TableConfig::default(),
            toast: ToastConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(source)?;
        Ok(config.validated())
    }

    /// Исправляет значения, с которыми не могут работать таблицы и уведомления
    pub fn validated(mut self) -> Self {
        self.table.rows_per_page_options.retain(|&n| n > 0);
        if self.table.rows_per_page_options.is_empty() {
            self.table.rows_per_page_options = FALLBACK_ROWS_PER_PAGE.to_vec();
        }
        if !self
            .table
            .rows_per_page_options
            .contains(&self.table.default_rows_per_page)
        {
            self.table.default_rows_per_page = self.table.rows_per_page_options[0];
        }
        if self.toast.timeout_ms == 0 {
            self.toast.timeout_ms = FALLBACK_TOAST_TIMEOUT_MS;
        }
        self
    }
}

/// Загрузить конфигурацию
///
/// Порядок поиска:
/// 1. `<script id="app-config">` на странице
/// 2. Встроенная конфигурация по умолчанию
pub fn load_config() -> AppConfig {
    if let Some(source) = read_config_element() {
        match AppConfig::from_toml(&source) {
            Ok(config) => {
                log::info!("Loaded config from #{}", CONFIG_ELEMENT_ID);
                return config;
            }
            Err(e) => log::error!("{}", e),
        }
    } else {
        log::warn!("#{} not found, using embedded config", CONFIG_ELEMENT_ID);
    }

    AppConfig::from_toml(DEFAULT_CONFIG).unwrap_or_default()
}

pub fn use_app_config() -> AppConfig {
    use_context::<AppConfig>().expect("AppConfig not provided in context")
}

fn read_config_element() -> Option<String> {
    web_sys::window()?
        .document()?
        .get_element_by_id(CONFIG_ELEMENT_ID)?
        .text_content()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = AppConfig::from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.api.port, 3000);
        assert_eq!(config.api.base_url, None);
        assert_eq!(config.table.rows_per_page_options, vec![5, 10, 25]);
        assert_eq!(config.table.default_rows_per_page, 10);
        assert_eq!(config.toast.timeout_ms, 4000);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = AppConfig::from_toml("[api]\nbase_url = \"https://api.example.com\"").unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(config.api.port, 3000);
        assert_eq!(config.table, TableConfig::default());
    }

    #[test]
    fn test_invalid_table_values_are_repaired() {
        let config = AppConfig::from_toml(
            "[table]\nrows_per_page_options = [0]\ndefault_rows_per_page = 7\n[toast]\ntimeout_ms = 0",
        )
        .unwrap();
        assert_eq!(config.table.rows_per_page_options, vec![5, 10, 25]);
        assert_eq!(config.table.default_rows_per_page, 5);
        assert_eq!(config.toast.timeout_ms, 4000);
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(AppConfig::from_toml("[table\nrows").is_err());
    }
}
