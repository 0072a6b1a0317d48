//! Wire types for the generative-language API and the normalized result.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Request body for the `generateContent` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
    pub tools: Vec<Tool>,
}

/// One content block: an optional role plus text parts.
#[derive(Debug, Clone, Serialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

impl Content {
    /// A `"user"`-role content block with a single text part.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part { text: text.into() }],
        }
    }

    /// A role-less content block, as used for `systemInstruction`.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfig {
    pub temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    pub max_output_tokens: u32,
}

/// Tool declaration. Only Google-Search grounding is used.
#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    pub google_search: serde_json::Value,
}

impl Tool {
    pub fn google_search() -> Self {
        Self {
            google_search: serde_json::json!({}),
        }
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// Response body from the `generateContent` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    #[serde(rename = "groundingMetadata")]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

/// Citation metadata attached when the model used search grounding.
#[derive(Debug, Clone, Deserialize)]
pub struct GroundingMetadata {
    #[serde(rename = "groundingAttributions", default)]
    pub grounding_attributions: Vec<GroundingAttribution>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroundingAttribution {
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebSource {
    pub uri: Option<String>,
    pub title: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, joining multiple parts with newlines.
    ///
    /// Returns `None` when there is no candidate or no part carries text,
    /// which callers treat as a malformed success body.
    pub fn first_candidate_text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let texts: Vec<&str> = parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .filter(|t| !t.is_empty())
            .collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.join("\n"))
        }
    }

    /// Grounding citations of the first candidate, in upstream order.
    ///
    /// Attributions missing either the uri or the title are dropped.
    pub fn sources(&self) -> Vec<Source> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|m| {
                m.grounding_attributions
                    .iter()
                    .filter_map(|a| {
                        let web = a.web.as_ref()?;
                        Some(Source {
                            uri: web.uri.clone()?,
                            title: web.title.clone()?,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Normalized result
// ---------------------------------------------------------------------------

/// One grounding citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub uri: String,
    pub title: String,
}

/// The normalized pipeline output: model text plus ordered citations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdviceResult {
    pub text: String,
    pub sources: Vec<Source>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(body).expect("fixture should deserialize")
    }

    #[test]
    fn extracts_first_candidate_text() {
        let response = parse(serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "Transfer out A for B."}]}
            }]
        }));
        assert_eq!(
            response.first_candidate_text().as_deref(),
            Some("Transfer out A for B.")
        );
    }

    #[test]
    fn joins_multiple_parts_with_newlines() {
        let response = parse(serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "Line one."}, {"text": "Line two."}]}
            }]
        }));
        assert_eq!(
            response.first_candidate_text().as_deref(),
            Some("Line one.\nLine two.")
        );
    }

    #[test]
    fn empty_or_missing_candidates_yield_no_text() {
        assert_eq!(parse(serde_json::json!({})).first_candidate_text(), None);
        assert_eq!(
            parse(serde_json::json!({"candidates": []})).first_candidate_text(),
            None
        );
        assert_eq!(
            parse(serde_json::json!({"candidates": [{"content": {"parts": []}}]}))
                .first_candidate_text(),
            None
        );
        assert_eq!(
            parse(serde_json::json!({"candidates": [{"content": {"parts": [{"text": ""}]}}]}))
                .first_candidate_text(),
            None
        );
    }

    #[test]
    fn maps_grounding_attributions_dropping_incomplete_entries() {
        let response = parse(serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "Advice."}]},
                "groundingMetadata": {
                    "groundingAttributions": [
                        {"web": {"uri": "https://a.example", "title": "A"}},
                        {"web": {"uri": "https://no-title.example"}},
                        {"web": {"title": "No uri"}},
                        {},
                        {"web": {"uri": "https://b.example", "title": "B"}}
                    ]
                }
            }]
        }));

        let sources = response.sources();
        assert_eq!(
            sources,
            vec![
                Source {
                    uri: "https://a.example".into(),
                    title: "A".into()
                },
                Source {
                    uri: "https://b.example".into(),
                    title: "B".into()
                },
            ]
        );
    }

    #[test]
    fn no_grounding_metadata_yields_empty_sources() {
        let response = parse(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "Advice."}]}}]
        }));
        assert!(response.sources().is_empty());
    }

    #[test]
    fn request_serializes_camel_case_fields() {
        let request = GenerateContentRequest {
            system_instruction: Some(Content::system("role text")),
            contents: vec![Content::user("question")],
            generation_config: Some(GenerationConfig {
                temperature: 0.3,
                max_output_tokens: 512,
            }),
            tools: vec![Tool::google_search()],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value["systemInstruction"]["parts"][0]["text"].is_string());
        assert!(value["systemInstruction"].get("role").is_none());
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 512);
        assert_eq!(value["tools"][0]["google_search"], serde_json::json!({}));
    }
}
