//! Tipos de erro para o cliente da API Gemini.
//!
//! Define [`GeminiError`] com variantes para credencial ausente, falhas de rede,
//! erros HTTP da API e respostas inválidas. [`FailureKind`] agrupa as variantes
//! nas categorias expostas aos chamadores.

use std::fmt;

use thiserror::Error;

/// Erros que podem ocorrer ao classificar um texto via Gemini.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Nenhuma chave de API configurada. Nenhuma chamada de rede é feita.
    #[error("Gemini API key is missing. Please set the GEMINI_API_KEY environment variable.")]
    MissingApiKey,

    /// Falha de rede subjacente (DNS, conexão recusada, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A API retornou um status não-2xx. `snippet` é o início do corpo da resposta.
    #[error("API error (status {status}): {snippet}")]
    Api { status: u16, snippet: String },

    /// O corpo da resposta não é JSON.
    #[error("response is not valid JSON: {0}")]
    Decode(String),

    /// JSON válido, mas sem `candidates`/`content`/`parts`/`text`.
    #[error("unexpected response structure: {0}")]
    Parse(String),
}

/// Categoria de falha, usada para escolher a mensagem devolvida ao cliente HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Credencial ausente.
    Configuration,
    /// Rede, timeout ou status HTTP de erro.
    Transport,
    /// Estrutura da resposta inesperada.
    Parse,
    /// Corpo da resposta não decodificável.
    Decode,
}

impl GeminiError {
    pub fn kind(&self) -> FailureKind {
        match self {
            GeminiError::MissingApiKey => FailureKind::Configuration,
            GeminiError::Network(_) | GeminiError::Api { .. } => FailureKind::Transport,
            GeminiError::Parse(_) => FailureKind::Parse,
            GeminiError::Decode(_) => FailureKind::Decode,
        }
    }

    /// `true` quando a falha ocorreu por estouro do tempo limite da requisição.
    pub fn is_timeout(&self) -> bool {
        matches!(self, GeminiError::Network(e) if e.is_timeout())
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Configuration => write!(f, "Configuration"),
            FailureKind::Transport => write!(f, "Transport"),
            FailureKind::Parse => write!(f, "Parse"),
            FailureKind::Decode => write!(f, "Decode"),
        }
    }
}
