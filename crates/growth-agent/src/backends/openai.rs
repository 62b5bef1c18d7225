use crate::config::{GeneratorConfig, Provider};
use crate::generator::{Generation, GenerationRequest, Generator};
use crate::schema;
use async_trait::async_trait;
use growth_core::{GrowthError, GrowthResult};
use std::time::Duration;
use tracing::debug;

/// OpenAI-compatible structured-output backend.
///
/// Works with OpenAI, OpenRouter, Groq, and any other provider that implements
/// the chat completions API with `response_format: json_schema`.
pub struct OpenAiGenerator {
    config: GeneratorConfig,
    http: reqwest::Client,
}

impl OpenAiGenerator {
    /// Build the HTTP client for `config`.
    pub fn new(config: GeneratorConfig) -> GrowthResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| GrowthError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    fn build_body(&self, request: &GenerationRequest<'_>) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": request.parameters.model,
            "messages": [{"role": "user", "content": request.prompt}],
            "temperature": request.parameters.temperature,
            "max_completion_tokens": request.max_output_tokens,
            "response_format": {
                "type": "json_schema",
                "json_schema": request.schema,
            },
        });

        if let Some(effort) = request.parameters.reasoning_effort {
            body["reasoning_effort"] = serde_json::json!(effort);
        }
        if let Some(verbosity) = request.parameters.verbosity {
            body["verbosity"] = serde_json::json!(verbosity);
        }

        body
    }

    fn add_provider_headers(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json");

        // OpenRouter requires extra headers
        if matches!(self.config.provider, Provider::OpenRouter) {
            request.header("X-Title", "growth-plan")
        } else {
            request
        }
    }
}

#[async_trait]
impl Generator for OpenAiGenerator {
    async fn generate(&self, request: GenerationRequest<'_>) -> GrowthResult<Generation> {
        let url = format!("{}/v1/chat/completions", self.config.base_url());
        let body = self.build_body(&request);

        debug!(task = %request.task, model = %request.parameters.model, "Sending generation request");

        let resp = self
            .add_provider_headers(self.http.post(&url))
            .timeout(request.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GrowthError::Timeout
                } else {
                    GrowthError::transport(e.to_string())
                }
            })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| {
            if e.is_timeout() {
                GrowthError::Timeout
            } else {
                GrowthError::http_status(status.as_u16(), e.to_string())
            }
        })?;

        if !status.is_success() {
            return Err(GrowthError::http_status(
                status.as_u16(),
                format!("OpenAI API error {status}: {text}"),
            ));
        }

        let resp_body: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
            GrowthError::Generation(format!("Response body is not a chat completion: {e}"))
        })?;

        let generation = parse_structured_response(&resp_body)?;
        schema::validate(&request.schema.schema, &generation.payload)?;
        Ok(generation)
    }
}

/// Extract the structured payload and token usage from a chat completion body.
pub fn parse_structured_response(body: &serde_json::Value) -> GrowthResult<Generation> {
    let choice = &body["choices"][0];
    let message = &choice["message"];

    if let Some(refusal) = message["refusal"].as_str() {
        return Err(GrowthError::Generation(format!("Model refused: {refusal}")));
    }
    if choice["finish_reason"].as_str() == Some("length") {
        return Err(GrowthError::Generation(
            "Output truncated at max_output_tokens".to_string(),
        ));
    }

    let content = message["content"].as_str().unwrap_or_default();
    if content.trim().is_empty() {
        return Err(GrowthError::Generation(
            "No content returned from generator".to_string(),
        ));
    }

    let payload: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| GrowthError::Generation(format!("Generated content is not JSON: {e}")))?;

    Ok(Generation {
        payload,
        input_tokens: body["usage"]["prompt_tokens"].as_u64().unwrap_or(0),
        output_tokens: body["usage"]["completion_tokens"].as_u64().unwrap_or(0),
    })
}
