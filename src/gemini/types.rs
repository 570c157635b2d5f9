//! Tipos de dados para requisições e respostas do endpoint `generateContent` do Gemini.
//!
//! Apenas os campos usados na classificação são modelados. Campos extras
//! enviados pela API (ex.: `usageMetadata`, `safetyRatings`) são ignorados pelo `serde`.

use serde::{Deserialize, Serialize};

/// Corpo da requisição para `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    /// Histórico da conversa; para classificação contém uma única mensagem do usuário.
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Cria uma requisição com uma única mensagem de usuário contendo `prompt`.
    pub fn user_prompt(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: Some(prompt) }],
            }],
        }
    }
}

/// Um turno da conversa: papel do remetente e suas partes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    /// Papel do remetente ("user" ou "model"). Pode faltar nas respostas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Fragmentos do conteúdo; apenas texto é usado aqui.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Fragmento de conteúdo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Resposta do endpoint `generateContent`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    /// Candidatos gerados pelo modelo. Ausente quando o prompt é bloqueado.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// Um candidato de resposta.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Primeiro fragmento de texto do primeiro candidato, se a estrutura o contiver.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_prompt_serializes_to_api_format() {
        let req = GenerateContentRequest::user_prompt("Classify this".into());
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "Classify this"}]}]
            })
        );
    }

    #[test]
    fn response_deserialize_from_api_format() {
        let api_json = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Positive\n"}]},
                "finishReason": "STOP",
                "safetyRatings": []
            }],
            "usageMetadata": {"promptTokenCount": 30, "candidatesTokenCount": 1}
        }"#;
        let resp: GenerateContentResponse = serde_json::from_str(api_json).unwrap();
        assert_eq!(resp.first_text(), Some("Positive\n"));
    }

    #[test]
    fn first_text_missing_candidates() {
        let resp: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();
        assert!(resp.candidates.is_empty());
        assert_eq!(resp.first_text(), None);
    }

    #[test]
    fn first_text_missing_parts() {
        let resp: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {"role": "model"}}]}"#).unwrap();
        assert_eq!(resp.first_text(), None);
    }

    #[test]
    fn first_text_missing_content() {
        let resp: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert_eq!(resp.first_text(), None);
    }

    #[test]
    fn wrong_shape_fails_to_deserialize() {
        let result = serde_json::from_str::<GenerateContentResponse>(r#"{"candidates": "nope"}"#);
        assert!(result.is_err());
    }
}
