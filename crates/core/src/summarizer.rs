use crate::error::SummarizerError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Text-to-text summarization backend. Called once per chunk, in order.
#[async_trait]
pub trait Summarizer {
    async fn summarize(
        &self,
        chunk: &str,
        min_length: u32,
        max_length: u32,
    ) -> Result<String, SummarizerError>;
}

#[derive(Debug, Clone)]
pub struct HttpSummarizerConfig {
    pub endpoint: String,
    pub api_token: Option<String>,
    pub timeout: Duration,
}

impl HttpSummarizerConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Reads `SUMMARIZER_ENDPOINT` and `SUMMARIZER_API_TOKEN`. Blank values
    /// count as unset.
    pub fn from_env() -> Option<Self> {
        let endpoint = non_blank(std::env::var("SUMMARIZER_ENDPOINT").ok())?;
        let api_token = non_blank(std::env::var("SUMMARIZER_API_TOKEN").ok());

        Some(Self {
            api_token,
            ..Self::new(endpoint)
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim().to_string();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    })
}

#[derive(Debug, Serialize)]
struct SummarizeRequest<'a> {
    inputs: &'a str,
    parameters: SummarizeParameters,
}

#[derive(Debug, Serialize)]
struct SummarizeParameters {
    min_length: u32,
    max_length: u32,
    do_sample: bool,
}

/// Summarizer backed by a hosted inference endpoint speaking the
/// Hugging Face summarization payload format.
pub struct HttpSummarizer {
    endpoint: Url,
    api_token: Option<String>,
    client: Client,
}

impl HttpSummarizer {
    pub fn new(config: HttpSummarizerConfig) -> Result<Self, SummarizerError> {
        let endpoint = Url::parse(config.endpoint.trim())?;
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            endpoint,
            api_token: config.api_token,
            client,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Summarizer for HttpSummarizer {
    async fn summarize(
        &self,
        chunk: &str,
        min_length: u32,
        max_length: u32,
    ) -> Result<String, SummarizerError> {
        let payload = SummarizeRequest {
            inputs: chunk,
            parameters: SummarizeParameters {
                min_length,
                max_length,
                do_sample: false,
            },
        };

        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header("content-type", "application/json")
            .json(&payload);

        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let raw = response.text().await?;

        if !status.is_success() {
            let details = serde_json::from_str::<Value>(&raw)
                .ok()
                .and_then(|body| error_message(&body))
                .unwrap_or(raw);
            return Err(SummarizerError::BackendResponse {
                backend: self.endpoint.to_string(),
                details: format!("{status}: {details}"),
            });
        }

        let body: Value = serde_json::from_str(&raw)?;
        parse_summary_payload(&body)
    }
}

fn error_message(body: &Value) -> Option<String> {
    body.get("error").map(|error| match error {
        Value::String(message) => message.clone(),
        other => other.to_string(),
    })
}

/// Accepts `[{"summary_text": ..}]` or `{"summary_text": ..}`.
pub(crate) fn parse_summary_payload(body: &Value) -> Result<String, SummarizerError> {
    if let Some(message) = error_message(body) {
        return Err(SummarizerError::Request(message));
    }

    let record = match body {
        Value::Array(items) => items.first(),
        Value::Object(_) => Some(body),
        _ => None,
    };

    record
        .and_then(|item| item.get("summary_text"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| SummarizerError::BackendResponse {
            backend: "summarizer".to_string(),
            details: format!("response has no summary_text: {body}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_payload_yields_first_summary() {
        let body = json!([{ "summary_text": "Short version." }]);
        assert_eq!(parse_summary_payload(&body).unwrap(), "Short version.");
    }

    #[test]
    fn object_payload_is_accepted() {
        let body = json!({ "summary_text": "Also short." });
        assert_eq!(parse_summary_payload(&body).unwrap(), "Also short.");
    }

    #[test]
    fn error_payload_is_a_failure() {
        let body = json!({ "error": "Model facebook/bart-large-cnn is currently loading" });
        let error = parse_summary_payload(&body).unwrap_err();
        assert!(matches!(error, SummarizerError::Request(message) if message.contains("loading")));
    }

    #[test]
    fn payload_without_summary_is_rejected() {
        assert!(parse_summary_payload(&json!([])).is_err());
        assert!(parse_summary_payload(&json!([{ "generated_text": "x" }])).is_err());
    }

    #[test]
    fn request_body_matches_inference_format() {
        let payload = SummarizeRequest {
            inputs: "some chunk",
            parameters: SummarizeParameters {
                min_length: 20,
                max_length: 80,
                do_sample: false,
            },
        };
        let encoded = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            encoded,
            json!({
                "inputs": "some chunk",
                "parameters": { "min_length": 20, "max_length": 80, "do_sample": false }
            })
        );
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let result = HttpSummarizer::new(HttpSummarizerConfig::new("not a url"));
        assert!(matches!(result, Err(SummarizerError::Url(_))));
    }

    #[test]
    fn blank_env_values_count_as_unset() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(
            non_blank(Some(" https://host ".to_string())),
            Some("https://host".to_string())
        );
    }
}
