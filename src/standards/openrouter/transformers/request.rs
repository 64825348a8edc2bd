//! Chat request body construction.

use crate::error::LlmError;
use crate::standards::openrouter::settings::{Compatibility, LogprobsSetting, OpenRouterChatSettings};
use crate::types::{
    AssistantContentPart, CallOptions, FileData, Message, ResponseFormat, Tool, ToolChoice,
    UserContentPart, Warning, openrouter_entry,
};
use crate::utils::{encode_base64, guess_mime, is_image_media_type, merge_object, strip_nulls, to_data_url};
use serde_json::{Map, Value, json};

/// Request body plus the warnings collected while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequestArgs {
    pub body: Map<String, Value>,
    pub warnings: Vec<Warning>,
}

/// Build the `/chat/completions` body for a non-streaming call.
///
/// Precedence, lowest first: computed fields, `settings.extra_body`,
/// `config_extra_body`, call-level `providerOptions.openrouter`.
pub fn build_chat_request(
    model_id: &str,
    settings: &OpenRouterChatSettings,
    options: &CallOptions,
    config_extra_body: Option<&Map<String, Value>>,
) -> Result<ChatRequestArgs, LlmError> {
    options.validate_params()?;

    let mut warnings = Vec::new();
    let mut body = Map::new();

    body.insert("model".into(), json!(model_id));
    body.insert("models".into(), json!(settings.models));
    body.insert("logit_bias".into(), json!(settings.logit_bias));
    match settings.logprobs {
        Some(LogprobsSetting::TopN(n)) => {
            body.insert("logprobs".into(), json!(true));
            body.insert("top_logprobs".into(), json!(n));
        }
        Some(LogprobsSetting::Enabled(true)) => {
            body.insert("logprobs".into(), json!(true));
            body.insert("top_logprobs".into(), json!(0));
        }
        Some(LogprobsSetting::Enabled(false)) | None => {}
    }
    body.insert("user".into(), json!(settings.user));
    body.insert(
        "parallel_tool_calls".into(),
        json!(settings.parallel_tool_calls),
    );

    body.insert("max_tokens".into(), json!(options.max_output_tokens));
    body.insert("temperature".into(), json!(options.temperature));
    body.insert("top_p".into(), json!(options.top_p));
    body.insert("frequency_penalty".into(), json!(options.frequency_penalty));
    body.insert("presence_penalty".into(), json!(options.presence_penalty));
    body.insert("seed".into(), json!(options.seed));
    body.insert("stop".into(), json!(options.stop_sequences));
    body.insert("top_k".into(), json!(options.top_k));

    if let Some(format) = &options.response_format {
        body.insert("response_format".into(), response_format_json(format));
    }

    body.insert(
        "messages".into(),
        Value::Array(convert_to_openrouter_messages(&options.prompt)?),
    );

    body.insert("include_reasoning".into(), json!(settings.include_reasoning));
    body.insert("reasoning".into(), json!(settings.reasoning));
    body.insert("usage".into(), json!(settings.usage));
    body.insert("plugins".into(), json!(settings.plugins));
    body.insert(
        "web_search_options".into(),
        json!(settings.web_search_options),
    );
    body.insert("provider".into(), json!(settings.provider));

    let (tools, tool_choice, tool_warnings) = prepare_tools(&options.tools, options.tool_choice.as_ref());
    warnings.extend(tool_warnings);
    if let Some(tools) = tools {
        body.insert("tools".into(), tools);
        body.insert("tool_choice".into(), json!(tool_choice));
    }

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

    Ok(ChatRequestArgs { body, warnings })
}

/// Turn a request body into its streaming variant.
pub fn into_stream_request(
    mut body: Map<String, Value>,
    compatibility: Compatibility,
) -> Map<String, Value> {
    body.insert("stream".into(), json!(true));
    if compatibility == Compatibility::Strict {
        body.insert("stream_options".into(), json!({ "include_usage": true }));
    }
    body
}

fn response_format_json(format: &ResponseFormat) -> Value {
    match format {
        ResponseFormat::Text => json!({ "type": "text" }),
        ResponseFormat::Json {
            schema: Some(schema),
            name,
            description,
        } => {
            let mut json_schema = Map::new();
            json_schema.insert("schema".into(), schema.clone());
            json_schema.insert("strict".into(), json!(true));
            json_schema.insert(
                "name".into(),
                json!(name.as_deref().unwrap_or("response")),
            );
            if let Some(description) = description {
                json_schema.insert("description".into(), json!(description));
            }
            json!({ "type": "json_schema", "json_schema": json_schema })
        }
        ResponseFormat::Json { schema: None, .. } => json!({ "type": "json_object" }),
    }
}

fn prepare_tools(
    tools: &[Tool],
    tool_choice: Option<&ToolChoice>,
) -> (Option<Value>, Option<Value>, Vec<Warning>) {
    let mut warnings = Vec::new();
    let mut out = Vec::new();

    for tool in tools {
        match tool {
            Tool::Function {
                name,
                description,
                input_schema,
                strict,
            } => {
                let mut function = Map::new();
                function.insert("name".into(), json!(name));
                if let Some(description) = description {
                    function.insert("description".into(), json!(description));
                }
                function.insert("parameters".into(), input_schema.clone());
                if let Some(strict) = strict {
                    function.insert("strict".into(), json!(strict));
                }
                out.push(json!({ "type": "function", "function": function }));
            }
            Tool::ProviderDefined { name, .. } => {
                warnings.push(Warning::unsupported_tool(
                    name.clone(),
                    Some("provider-defined tools are not supported"),
                ));
            }
        }
    }

    if out.is_empty() {
        return (None, None, warnings);
    }

    let choice = tool_choice.map(|choice| match choice {
        ToolChoice::Auto => json!("auto"),
        ToolChoice::None => json!("none"),
        ToolChoice::Required => json!("required"),
        ToolChoice::Tool { tool_name } => {
            json!({ "type": "function", "function": { "name": tool_name } })
        }
    });

    (Some(Value::Array(out)), choice, warnings)
}

/// Convert the prompt into OpenRouter chat messages.
pub fn convert_to_openrouter_messages(prompt: &[Message]) -> Result<Vec<Value>, LlmError> {
    let mut messages = Vec::with_capacity(prompt.len());

    for message in prompt {
        match message {
            Message::System { content } => {
                messages.push(json!({ "role": "system", "content": content }));
            }
            Message::User { content } => {
                messages.push(json!({ "role": "user", "content": user_content(content)? }));
            }
            Message::Assistant { content } => messages.push(assistant_message(content)),
            Message::Tool { content } => {
                for result in content {
                    messages.push(json!({
                        "role": "tool",
                        "tool_call_id": result.tool_call_id,
                        "content": result.output.to_content_string(),
                    }));
                }
            }
        }
    }

    Ok(messages)
}

fn user_content(parts: &[UserContentPart]) -> Result<Value, LlmError> {
    if let [UserContentPart::Text { text }] = parts {
        return Ok(json!(text));
    }

    let mut out = Vec::with_capacity(parts.len());
    for part in parts {
        match part {
            UserContentPart::Text { text } => out.push(json!({ "type": "text", "text": text })),
            UserContentPart::File {
                data,
                media_type,
                filename,
            } => {
                let (media_type, url) = file_url(data, media_type, filename.as_deref())?;
                if is_image_media_type(&media_type) {
                    out.push(json!({ "type": "image_url", "image_url": { "url": url } }));
                } else {
                    out.push(json!({
                        "type": "file",
                        "file": {
                            "filename": filename.as_deref().unwrap_or("file"),
                            "file_data": url,
                        }
                    }));
                }
            }
        }
    }
    Ok(Value::Array(out))
}

/// Resolve a file part into its concrete media type and a URL (remote or
/// `data:`).
fn file_url(
    data: &FileData,
    media_type: &str,
    filename: Option<&str>,
) -> Result<(String, String), LlmError> {
    let wildcard = media_type.is_empty() || media_type.ends_with("/*");
    match data {
        FileData::Url(url) => {
            let resolved = if wildcard {
                guess_mime(None, Some(url), "application/octet-stream")
            } else {
                media_type.to_string()
            };
            Ok((resolved, url.clone()))
        }
        FileData::Base64(b64) => {
            if media_type.is_empty() && filename.is_none() {
                return Err(LlmError::InvalidInput(
                    "file part without media type or filename".to_string(),
                ));
            }
            let resolved = if wildcard {
                guess_mime(None, filename, "application/octet-stream")
            } else {
                media_type.to_string()
            };
            let url = to_data_url(&resolved, b64);
            Ok((resolved, url))
        }
        FileData::Bytes(bytes) => {
            let resolved = if wildcard {
                guess_mime(Some(bytes), filename, "application/octet-stream")
            } else {
                media_type.to_string()
            };
            let url = to_data_url(&resolved, &encode_base64(bytes));
            Ok((resolved, url))
        }
    }
}

fn assistant_message(parts: &[AssistantContentPart]) -> Value {
    let mut text = String::new();
    let mut reasoning = String::new();
    let mut reasoning_details: Vec<Value> = Vec::new();
    let mut tool_calls = Vec::new();

    for part in parts {
        match part {
            AssistantContentPart::Text { text: t } => text.push_str(t),
            AssistantContentPart::Reasoning {
                text: t,
                provider_options,
            } => {
                reasoning.push_str(t);
                collect_reasoning_details(provider_options.as_ref(), &mut reasoning_details);
            }
            AssistantContentPart::ToolCall {
                tool_call_id,
                tool_name,
                input,
                provider_options,
            } => {
                // Parallel calls all carry the same details; keep one copy.
                if reasoning_details.is_empty() {
                    collect_reasoning_details(provider_options.as_ref(), &mut reasoning_details);
                }
                tool_calls.push(json!({
                    "id": tool_call_id,
                    "type": "function",
                    "function": { "name": tool_name, "arguments": input.to_string() },
                }));
            }
        }
    }

    let mut message = Map::new();
    message.insert("role".into(), json!("assistant"));
    message.insert("content".into(), json!(text));
    if !reasoning.is_empty() {
        message.insert("reasoning".into(), json!(reasoning));
    }
    if !reasoning_details.is_empty() {
        message.insert("reasoning_details".into(), Value::Array(reasoning_details));
    }
    if !tool_calls.is_empty() {
        message.insert("tool_calls".into(), Value::Array(tool_calls));
    }
    Value::Object(message)
}

fn collect_reasoning_details(
    options: Option<&crate::types::ProviderOptions>,
    out: &mut Vec<Value>,
) {
    if let Some(details) = openrouter_entry(options)
        .and_then(|entry| entry.get("reasoning_details"))
        .and_then(Value::as_array)
    {
        out.extend(details.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standards::openrouter::settings::ReasoningSettings;
    use crate::types::{ToolResultOutput, ToolResultPart, openrouter_metadata};

    fn options(prompt: Vec<Message>) -> CallOptions {
        CallOptions::new(prompt)
    }

    #[test]
    fn maps_sampling_parameters_and_drops_unset_fields() {
        let opts = CallOptions {
            temperature: Some(0.5),
            max_output_tokens: Some(64),
            stop_sequences: Some(vec!["END".into()]),
            ..options(vec![Message::user("hi")])
        };
        let args = build_chat_request(
            "anthropic/claude-sonnet-4",
            &OpenRouterChatSettings::default(),
            &opts,
            None,
        )
        .unwrap();

        assert_eq!(
            Value::Object(args.body),
            json!({
                "model": "anthropic/claude-sonnet-4",
                "max_tokens": 64,
                "temperature": 0.5,
                "stop": ["END"],
                "messages": [{"role": "user", "content": "hi"}]
            })
        );
        assert!(args.warnings.is_empty());
    }

    #[test]
    fn call_provider_options_win_over_extra_body() {
        let settings = OpenRouterChatSettings {
            extra_body: Some(json!({"transforms": ["a"], "route": "x"}).as_object().cloned().unwrap()),
            reasoning: Some(ReasoningSettings {
                effort: Some("high".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let config_extra = json!({"route": "fallback"}).as_object().cloned().unwrap();
        let opts = CallOptions {
            provider_options: Some(openrouter_metadata(json!({"transforms": ["middle-out"]}))),
            ..options(vec![Message::user("hi")])
        };

        let args = build_chat_request("m", &settings, &opts, Some(&config_extra)).unwrap();
        assert_eq!(args.body["transforms"], json!(["middle-out"]));
        assert_eq!(args.body["route"], "fallback");
        assert_eq!(args.body["reasoning"], json!({"effort": "high"}));
    }

    #[test]
    fn provider_defined_tools_warn_and_are_skipped() {
        let opts = CallOptions {
            tools: vec![
                Tool::function("get_weather", None, json!({"type": "object"})),
                Tool::ProviderDefined {
                    id: "openai.web_search".into(),
                    name: "web_search".into(),
                    args: json!({}),
                },
            ],
            tool_choice: Some(ToolChoice::Tool {
                tool_name: "get_weather".into(),
            }),
            ..options(vec![Message::user("weather?")])
        };
        let args =
            build_chat_request("m", &OpenRouterChatSettings::default(), &opts, None).unwrap();
        assert_eq!(args.body["tools"].as_array().unwrap().len(), 1);
        assert_eq!(args.body["tools"][0]["function"]["name"], "get_weather");
        assert_eq!(args.body["tool_choice"]["function"]["name"], "get_weather");
        assert!(matches!(
            args.warnings.as_slice(),
            [Warning::UnsupportedTool { tool_name, .. }] if tool_name == "web_search"
        ));
    }

    #[test]
    fn json_schema_response_format() {
        let opts = CallOptions {
            response_format: Some(ResponseFormat::Json {
                schema: Some(json!({"type": "object"})),
                name: None,
                description: None,
            }),
            ..options(vec![Message::user("x")])
        };
        let args =
            build_chat_request("m", &OpenRouterChatSettings::default(), &opts, None).unwrap();
        assert_eq!(args.body["response_format"]["type"], "json_schema");
        assert_eq!(args.body["response_format"]["json_schema"]["name"], "response");
    }

    #[test]
    fn stream_request_in_strict_mode_asks_for_usage() {
        let body = Map::new();
        let strict = into_stream_request(body.clone(), Compatibility::Strict);
        assert_eq!(strict["stream"], true);
        assert_eq!(strict["stream_options"]["include_usage"], true);

        let compatible = into_stream_request(body, Compatibility::Compatible);
        assert!(compatible.get("stream_options").is_none());
    }

    #[test]
    fn invalid_sampling_parameters_are_rejected() {
        let opts = CallOptions {
            top_p: Some(1.5),
            ..options(vec![Message::user("x")])
        };
        let err =
            build_chat_request("m", &OpenRouterChatSettings::default(), &opts, None).unwrap_err();
        assert!(matches!(err, LlmError::InvalidParameter(_)));
    }

    #[test]
    fn converts_multimodal_user_and_tool_turns() {
        let prompt = vec![
            Message::system("be brief"),
            Message::User {
                content: vec![
                    UserContentPart::Text {
                        text: "what is this?".into(),
                    },
                    UserContentPart::File {
                        data: FileData::Base64("AAAA".into()),
                        media_type: "image/png".into(),
                        filename: None,
                    },
                    UserContentPart::File {
                        data: FileData::Url("https://example.com/report.pdf".into()),
                        media_type: "application/pdf".into(),
                        filename: Some("report.pdf".into()),
                    },
                ],
            },
            Message::Assistant {
                content: vec![
                    AssistantContentPart::Reasoning {
                        text: "thinking".into(),
                        provider_options: Some(openrouter_metadata(json!({
                            "reasoning_details": [{"type": "reasoning.text", "text": "thinking", "signature": "sig"}]
                        }))),
                    },
                    AssistantContentPart::ToolCall {
                        tool_call_id: "call_1".into(),
                        tool_name: "lookup".into(),
                        input: json!({"q": "x"}),
                        provider_options: None,
                    },
                ],
            },
            Message::Tool {
                content: vec![ToolResultPart {
                    tool_call_id: "call_1".into(),
                    tool_name: "lookup".into(),
                    output: ToolResultOutput::Json(json!({"answer": 42})),
                }],
            },
        ];

        let messages = convert_to_openrouter_messages(&prompt).unwrap();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[1]["content"][1]["type"], "image_url");
        assert_eq!(
            messages[1]["content"][1]["image_url"]["url"],
            "data:image/png;base64,AAAA"
        );
        assert_eq!(messages[1]["content"][2]["type"], "file");
        assert_eq!(
            messages[1]["content"][2]["file"]["file_data"],
            "https://example.com/report.pdf"
        );
        assert_eq!(messages[2]["reasoning"], "thinking");
        assert_eq!(messages[2]["reasoning_details"][0]["signature"], "sig");
        assert_eq!(
            messages[2]["tool_calls"][0]["function"]["arguments"],
            "{\"q\":\"x\"}"
        );
        assert_eq!(messages[3]["role"], "tool");
        assert_eq!(messages[3]["content"], "{\"answer\":42}");
    }
}
