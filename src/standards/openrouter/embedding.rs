//! `/embeddings` request construction and response mapping.

use super::errors::api_error_from_body;
use super::settings::OpenRouterEmbeddingSettings;
use super::types::OpenRouterEmbeddingResponse;
use super::usage::OpenRouterUsageAccounting;
use crate::error::LlmError;
use crate::types::{EmbedOptions, EmbedResult, EmbeddingUsage, openrouter_entry, openrouter_metadata};
use crate::utils::{merge_object, strip_nulls};
use serde_json::{Map, Value, json};
use std::collections::HashMap;

/// Build the embeddings body: `{model, input, user?, provider?}` followed by
/// settings `extra_body`, config extra body and call-level
/// `providerOptions.openrouter`, in rising precedence.
pub fn build_embedding_request(
    model_id: &str,
    settings: &OpenRouterEmbeddingSettings,
    options: &EmbedOptions,
    config_extra_body: Option<&Map<String, Value>>,
) -> Result<Map<String, Value>, LlmError> {
    if options.values.is_empty() {
        return Err(LlmError::InvalidInput(
            "At least one value is required for embedding".to_string(),
        ));
    }

    let mut body = Map::new();
    body.insert("model".into(), json!(model_id));
    body.insert("input".into(), json!(options.values));
    body.insert("user".into(), json!(settings.user));
    body.insert("provider".into(), json!(settings.provider));
    strip_nulls(&mut body);

    if let Some(extra) = &settings.extra_body {
        merge_object(&mut body, extra);
    }
    if let Some(extra) = config_extra_body {
        merge_object(&mut body, extra);
    }
    if let Some(call_options) = openrouter_entry(options.provider_options.as_ref()) {
        merge_object(&mut body, call_options);
    }

    Ok(body)
}

/// Map an embeddings response. Vectors are returned in `index` order; rows
/// without an index keep their position.
pub fn map_embedding_response(
    provider: &str,
    body: Value,
    headers: HashMap<String, String>,
) -> Result<EmbedResult, LlmError> {
    if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
        tracing::warn!(provider, "in-band error in embedding response");
        return Err(api_error_from_body(provider, error));
    }

    let response: OpenRouterEmbeddingResponse = serde_json::from_value(body.clone())
        .map_err(|e| LlmError::ParseError(format!("Invalid embedding response: {e}")))?;

    let mut rows: Vec<(usize, Vec<f32>)> = response
        .data
        .into_iter()
        .enumerate()
        .map(|(position, row)| (row.index.unwrap_or(position), row.embedding))
        .collect();
    rows.sort_by_key(|(index, _)| *index);

    let usage = response.usage.as_ref().map(|u| EmbeddingUsage {
        tokens: u.prompt_tokens.or(u.total_tokens).unwrap_or(0),
    });

    let provider_metadata = response.usage.as_ref().map(|u| {
        let mut entry = Map::new();
        entry.insert(
            "usage".into(),
            OpenRouterUsageAccounting::from_usage(u).to_json(),
        );
        if let Some(provider) = &response.provider {
            entry.insert("provider".into(), json!(provider));
        }
        openrouter_metadata(Value::Object(entry))
    });

    Ok(EmbedResult {
        embeddings: rows.into_iter().map(|(_, embedding)| embedding).collect(),
        usage,
        provider_metadata,
        headers,
        body: Some(body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_merges_call_options_last() {
        let settings = OpenRouterEmbeddingSettings {
            user: Some("u-1".into()),
            provider: None,
            extra_body: Some(
                json!({"encoding_format": "float", "user": "from-settings"})
                    .as_object()
                    .cloned()
                    .unwrap(),
            ),
        };
        let mut options = EmbedOptions::new(vec!["a".into(), "b".into()]);
        options.provider_options = Some(openrouter_metadata(json!({"user": "from-call"})));

        let body = build_embedding_request("openai/text-embedding-3-small", &settings, &options, None)
            .unwrap();
        assert_eq!(body["model"], "openai/text-embedding-3-small");
        assert_eq!(body["input"], json!(["a", "b"]));
        assert_eq!(body["encoding_format"], "float");
        assert_eq!(body["user"], "from-call");
        assert!(!body.contains_key("provider"));
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = build_embedding_request(
            "m",
            &OpenRouterEmbeddingSettings::default(),
            &EmbedOptions::new(vec![]),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, LlmError::InvalidInput(_)));
    }

    #[test]
    fn response_is_ordered_by_index_with_cost_metadata() {
        let body = json!({
            "id": "emb-1",
            "model": "openai/text-embedding-3-small",
            "provider": "OpenAI",
            "data": [
                {"object": "embedding", "embedding": [0.3, 0.4], "index": 1},
                {"object": "embedding", "embedding": [0.1, 0.2], "index": 0}
            ],
            "usage": {"prompt_tokens": 8, "total_tokens": 8, "cost": 0.0001}
        });
        let result = map_embedding_response("openrouter.embedding", body, HashMap::new()).unwrap();
        assert_eq!(result.embeddings, vec![vec![0.1, 0.2], vec![0.3, 0.4]]);
        assert_eq!(result.usage, Some(EmbeddingUsage { tokens: 8 }));

        let meta = &result.provider_metadata.unwrap()["openrouter"];
        assert_eq!(meta["usage"]["cost"], 0.0001);
        assert_eq!(meta["provider"], "OpenAI");
    }

    #[test]
    fn in_band_error_becomes_api_error() {
        let body = json!({"error": {"message": "model not found", "code": 404}});
        match map_embedding_response("openrouter.embedding", body, HashMap::new()) {
            Err(LlmError::ApiError { code, message, .. }) => {
                assert_eq!(code, 404);
                assert!(message.contains("model not found"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
