//! Complete (non-streaming) chat response mapping.

use crate::error::LlmError;
use crate::standards::openrouter::errors::api_error_from_body;
use crate::standards::openrouter::finish_reason::{
    apply_encrypted_reasoning_override, map_finish_reason,
};
use crate::standards::openrouter::metadata::{
    file_annotation_source, image_file_part, non_empty_reasoning_metadata,
    reasoning_details_metadata, response_metadata, url_citation_source,
};
use crate::standards::openrouter::types::{Annotation, OpenRouterChatResponse};
use crate::standards::openrouter::usage::{OpenRouterUsageAccounting, normalize_usage};
use crate::types::{
    Content, GenerateResult, RequestInfo, ResponseInfo, ResponseMetadata, ToolCallPart, Warning,
};
use crate::utils::IdGenerator;
use serde_json::Value;
use std::collections::HashMap;

/// Everything the mapper needs besides the body itself.
pub struct ResponseContext<'a> {
    pub provider: &'a str,
    pub id_generator: &'a IdGenerator,
    pub request_body: Value,
    pub headers: HashMap<String, String>,
    pub warnings: Vec<Warning>,
}

/// Map one complete vendor response into a [`GenerateResult`].
///
/// Content order is fixed: reasoning, text, tool calls, images, sources.
pub fn map_chat_response(body: Value, ctx: ResponseContext<'_>) -> Result<GenerateResult, LlmError> {
    if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
        tracing::warn!(provider = ctx.provider, "in-band error in chat response");
        return Err(api_error_from_body(ctx.provider, error));
    }

    let response: OpenRouterChatResponse = serde_json::from_value(body.clone())
        .map_err(|e| LlmError::ParseError(format!("Invalid chat completion response: {e}")))?;

    let Some(choice) = response.choices.first() else {
        return Err(LlmError::NoContentGenerated(
            "No choice in response".to_string(),
        ));
    };
    let message = &choice.message;

    let details = message.reasoning_details.as_deref().unwrap_or_default();
    let mut content = Vec::new();

    if !details.is_empty() {
        for detail in details {
            let text = detail.display_text();
            if text.is_empty() {
                continue;
            }
            content.push(Content::Reasoning {
                text: text.to_string(),
                provider_metadata: Some(reasoning_details_metadata(std::slice::from_ref(detail))),
            });
        }
    } else if let Some(reasoning) = message.reasoning.as_deref().filter(|r| !r.is_empty()) {
        content.push(Content::Reasoning {
            text: reasoning.to_string(),
            provider_metadata: None,
        });
    }

    if let Some(text) = message.content.as_deref().filter(|t| !t.is_empty()) {
        content.push(Content::text(text));
    }

    let tool_calls = message.tool_calls.as_deref().unwrap_or_default();
    for (i, call) in tool_calls.iter().enumerate() {
        content.push(Content::ToolCall(ToolCallPart {
            tool_call_id: call
                .id
                .clone()
                .unwrap_or_else(|| (ctx.id_generator)()),
            tool_name: call.function.name.clone(),
            input: call
                .function
                .arguments
                .clone()
                .unwrap_or_else(|| "{}".to_string()),
            provider_metadata: if i == 0 {
                non_empty_reasoning_metadata(details)
            } else {
                None
            },
        }));
    }

    for image in message.images.as_deref().unwrap_or_default() {
        content.push(Content::File(image_file_part(image)));
    }

    let mut file_annotations = Vec::new();
    for annotation in message.annotations.as_deref().unwrap_or_default() {
        match annotation {
            Annotation::UrlCitation { url_citation } => content.push(Content::Source(
                url_citation_source((ctx.id_generator)(), url_citation),
            )),
            Annotation::File { file } => {
                content.push(Content::Source(file_annotation_source(
                    (ctx.id_generator)(),
                    file,
                )));
                file_annotations.push(file.clone());
            }
            Annotation::Unknown => {
                tracing::debug!("skipping unknown annotation type");
            }
        }
    }

    let finish_reason = apply_encrypted_reasoning_override(
        map_finish_reason(choice.finish_reason.as_deref()),
        !tool_calls.is_empty(),
        details,
    );

    let accounting = response
        .usage
        .as_ref()
        .map(OpenRouterUsageAccounting::from_usage);

    Ok(GenerateResult {
        content,
        finish_reason,
        usage: normalize_usage(response.usage.as_ref()),
        warnings: ctx.warnings,
        provider_metadata: Some(response_metadata(
            accounting.as_ref(),
            response.provider.as_deref(),
            details,
            &file_annotations,
        )),
        request: RequestInfo {
            body: ctx.request_body,
        },
        response: ResponseInfo {
            metadata: ResponseMetadata {
                id: response.id.clone(),
                model_id: response.model.clone(),
                timestamp: response
                    .created
                    .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0)),
            },
            headers: ctx.headers,
            body: Some(body),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FinishReason, Source};
    use crate::utils::sequential_generator;
    use serde_json::json;

    fn map(body: Value) -> Result<GenerateResult, LlmError> {
        let ids = sequential_generator("id");
        map_chat_response(
            body,
            ResponseContext {
                provider: "openrouter.chat",
                id_generator: &ids,
                request_body: json!({}),
                headers: HashMap::new(),
                warnings: vec![],
            },
        )
    }

    #[test]
    fn content_order_is_reasoning_text_tools_images_sources() {
        let result = map(json!({
            "id": "gen-1",
            "model": "openai/gpt-4o",
            "created": 1_700_000_000,
            "provider": "OpenAI",
            "choices": [{
                "finish_reason": "tool_calls",
                "message": {
                    "content": "Here you go",
                    "reasoning": "ignored because details exist",
                    "reasoning_details": [
                        {"type": "reasoning.text", "text": "Think", "signature": "sig"},
                        {"type": "reasoning.encrypted", "data": "opaque"}
                    ],
                    "tool_calls": [
                        {"id": "call_1", "type": "function", "function": {"name": "a", "arguments": "{}"}},
                        {"id": "call_2", "type": "function", "function": {"name": "b", "arguments": "{\"x\":1}"}}
                    ],
                    "images": [{"type": "image_url", "image_url": {"url": "data:image/png;base64,AAAA"}}],
                    "annotations": [
                        {"type": "url_citation", "url_citation": {"url": "https://a.example", "title": "A"}}
                    ]
                }
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 20, "total_tokens": 30}
        }))
        .unwrap();

        let kinds: Vec<&str> = result
            .content
            .iter()
            .map(|c| match c {
                Content::Reasoning { .. } => "reasoning",
                Content::Text { .. } => "text",
                Content::ToolCall(_) => "tool-call",
                Content::File(_) => "file",
                Content::Source(_) => "source",
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["reasoning", "reasoning", "text", "tool-call", "tool-call", "file", "source"]
        );

        match &result.content[1] {
            Content::Reasoning { text, .. } => assert_eq!(text, "[REDACTED]"),
            other => panic!("unexpected content: {other:?}"),
        }

        let first = result.content[3].as_tool_call().unwrap();
        let second = result.content[4].as_tool_call().unwrap();
        let attached = &first.provider_metadata.as_ref().unwrap()["openrouter"]["reasoning_details"];
        assert_eq!(attached.as_array().unwrap().len(), 2);
        assert!(second.provider_metadata.is_none());

        assert_eq!(result.finish_reason.unified, FinishReason::ToolCalls);
        assert_eq!(result.response.metadata.id.as_deref(), Some("gen-1"));
        assert_eq!(
            result.response.metadata.timestamp.unwrap().timestamp(),
            1_700_000_000
        );
        let meta = &result.provider_metadata.unwrap()["openrouter"];
        assert_eq!(meta["provider"], "OpenAI");
        assert_eq!(meta["usage"]["totalTokens"], 30);
    }

    #[test]
    fn encrypted_reasoning_with_tool_call_overrides_stop() {
        let result = map(json!({
            "choices": [{
                "finish_reason": "stop",
                "message": {
                    "reasoning_details": [{"type": "reasoning.encrypted", "data": "blob"}],
                    "tool_calls": [{"id": "c", "type": "function", "function": {"name": "f", "arguments": "{}"}}]
                }
            }]
        }))
        .unwrap();
        assert_eq!(result.finish_reason.unified, FinishReason::ToolCalls);
        assert_eq!(result.finish_reason.raw.as_deref(), Some("stop"));
    }

    #[test]
    fn legacy_reasoning_string_is_used_without_details() {
        let result = map(json!({
            "choices": [{"finish_reason": "stop", "message": {"reasoning": "hmm", "content": "ok"}}]
        }))
        .unwrap();
        assert_eq!(
            result.content[0],
            Content::Reasoning {
                text: "hmm".into(),
                provider_metadata: None
            }
        );
        assert_eq!(result.text(), "ok");
        assert_eq!(result.usage, crate::types::NormalizedUsage::empty());
    }

    #[test]
    fn in_band_error_rejects() {
        let err = map(json!({"error": {"message": "Upstream exploded", "code": 502}})).unwrap_err();
        match err {
            LlmError::ApiError { code, message, .. } => {
                assert_eq!(code, 502);
                assert!(message.contains("Upstream exploded"));
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn zero_choices_is_no_content() {
        let err = map(json!({"id": "gen", "choices": []})).unwrap_err();
        assert!(matches!(err, LlmError::NoContentGenerated(_)));
    }

    #[test]
    fn file_annotations_become_document_sources_and_metadata() {
        let result = map(json!({
            "choices": [{
                "finish_reason": "stop",
                "message": {
                    "content": "summary",
                    "annotations": [{"type": "file", "file": {"hash": "h1", "name": "doc.pdf"}}]
                }
            }]
        }))
        .unwrap();
        assert!(matches!(
            result.content.last(),
            Some(Content::Source(Source::Document { .. }))
        ));
        let meta = &result.provider_metadata.unwrap()["openrouter"];
        assert_eq!(meta["annotations"][0]["file"]["hash"], "h1");
    }

    #[test]
    fn missing_tool_call_id_is_generated() {
        let result = map(json!({
            "choices": [{
                "finish_reason": "tool_calls",
                "message": {"tool_calls": [{"type": "function", "function": {"name": "f"}}]}
            }]
        }))
        .unwrap();
        let call = result.content[0].as_tool_call().unwrap();
        assert_eq!(call.tool_call_id, "id-0");
        assert_eq!(call.input, "{}");
    }
}
