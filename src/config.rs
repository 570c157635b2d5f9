//! Configuração do serviço carregada a partir de `review-sentiment.toml`.
//!
//! A struct [`ServiceConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! A variável de ambiente `GEMINI_API_KEY` tem precedência sobre o arquivo.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::gemini::client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Nome do arquivo de configuração procurado no diretório atual.
pub const CONFIG_FILE: &str = "review-sentiment.toml";

/// Variável de ambiente com a chave da API Gemini.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Configuração de nível superior, construída uma vez na inicialização.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Chave da API Gemini. Vazia significa "não configurada".
    #[serde(default)]
    pub api_key: String,

    /// URL base da API (sem o sufixo `/models/...`).
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Modelo usado na classificação.
    #[serde(default = "default_model")]
    pub model: String,

    /// Tempo limite, em segundos, de cada chamada à API.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Endereço em que o servidor HTTP escuta.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Máximo de chamadas simultâneas à API durante uma análise em lote.
    /// `1` processa as avaliações estritamente em sequência.
    #[serde(default = "default_bulk_concurrency")]
    pub bulk_concurrency: usize,
}

// Valor padrão para a URL base: endpoint público `v1beta` do Gemini.
fn default_api_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

// Valor padrão para o modelo: "gemini-2.0-flash".
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

// Valor padrão para o timeout: 30s.
fn default_timeout_secs() -> u64 {
    30
}

// Valor padrão para o endereço de escuta: todas as interfaces, porta 5000.
fn default_bind_addr() -> String {
    "0.0.0.0:5000".to_string()
}

// Valor padrão para a concorrência do lote: 1 (sequencial).
fn default_bulk_concurrency() -> usize {
    1
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: default_api_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            bind_addr: default_bind_addr(),
            bulk_concurrency: default_bulk_concurrency(),
        }
    }
}

impl ServiceConfig {
    /// Carrega a configuração de `review-sentiment.toml` no diretório atual,
    /// ou de `path` quando informado. Usa valores padrão se o arquivo padrão não existir.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        Ok(config.with_env_key(std::env::var(API_KEY_ENV).ok()))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = toml::from_str::<ServiceConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Variável de ambiente tem precedência sobre o arquivo para a chave da API.
    pub fn with_env_key(mut self, env_key: Option<String>) -> Self {
        if let Some(key) = env_key.filter(|k| !k.trim().is_empty()) {
            self.api_key = key;
        }
        self
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Chave da API, ou `None` quando não configurada.
    pub fn api_key(&self) -> Option<String> {
        self.has_api_key().then(|| self.api_key.trim().to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Concorrência efetiva do lote; nunca menor que 1.
    pub fn bulk_concurrency(&self) -> usize {
        self.bulk_concurrency.max(1)
    }
}
