//! `providerMetadata.openrouter` builders shared by the complete-response
//! mapper and the stream transformer.

use super::types::{FileAnnotation, ImageOutput, UrlCitation};
use super::usage::OpenRouterUsageAccounting;
use crate::types::{FilePart, ProviderMetadata, ReasoningDetail, Source, openrouter_metadata};
use crate::utils::{base64_from_data_url, guess_mime_from_path_or_url, parse_data_url};
use serde_json::{Map, Value, json};

const DEFAULT_IMAGE_MEDIA_TYPE: &str = "image/png";
const DEFAULT_DOCUMENT_MEDIA_TYPE: &str = "application/octet-stream";

/// `{"openrouter": {"reasoning_details": [...]}}`
pub fn reasoning_details_metadata(details: &[ReasoningDetail]) -> ProviderMetadata {
    let details = serde_json::to_value(details).unwrap_or_else(|_| Value::Array(vec![]));
    openrouter_metadata(json!({ "reasoning_details": details }))
}

/// Same as [`reasoning_details_metadata`], but `None` for an empty sequence.
pub fn non_empty_reasoning_metadata(details: &[ReasoningDetail]) -> Option<ProviderMetadata> {
    (!details.is_empty()).then(|| reasoning_details_metadata(details))
}

/// Turn-level metadata attached to a result or the `finish` part.
pub fn response_metadata(
    usage: Option<&OpenRouterUsageAccounting>,
    provider: Option<&str>,
    details: &[ReasoningDetail],
    file_annotations: &[FileAnnotation],
) -> ProviderMetadata {
    let mut entry = Map::new();
    if let Some(usage) = usage {
        entry.insert("usage".to_string(), usage.to_json());
    }
    if let Some(provider) = provider {
        entry.insert("provider".to_string(), Value::String(provider.to_string()));
    }
    if !details.is_empty()
        && let Ok(details) = serde_json::to_value(details)
    {
        entry.insert("reasoning_details".to_string(), details);
    }
    if !file_annotations.is_empty() {
        let annotations: Vec<Value> = file_annotations
            .iter()
            .map(|file| json!({ "type": "file", "file": file }))
            .collect();
        entry.insert("annotations".to_string(), Value::Array(annotations));
    }
    openrouter_metadata(Value::Object(entry))
}

/// Source part for a `url_citation` annotation.
pub fn url_citation_source(id: String, citation: &UrlCitation) -> Source {
    let mut extra = Map::new();
    if let Some(content) = &citation.content {
        extra.insert("content".to_string(), Value::String(content.clone()));
    }
    if let Some(start) = citation.start_index {
        extra.insert("startIndex".to_string(), json!(start));
    }
    if let Some(end) = citation.end_index {
        extra.insert("endIndex".to_string(), json!(end));
    }
    Source::Url {
        id,
        url: citation.url.clone(),
        title: citation.title.clone(),
        provider_metadata: (!extra.is_empty()).then(|| openrouter_metadata(Value::Object(extra))),
    }
}

/// Document source part for a `file` annotation.
pub fn file_annotation_source(id: String, file: &FileAnnotation) -> Source {
    let media_type = file
        .name
        .as_deref()
        .and_then(guess_mime_from_path_or_url)
        .unwrap_or_else(|| DEFAULT_DOCUMENT_MEDIA_TYPE.to_string());
    Source::Document {
        id,
        media_type,
        title: file.name.clone().unwrap_or_else(|| file.hash.clone()),
        filename: file.name.clone(),
        provider_metadata: Some(openrouter_metadata(json!({ "fileHash": file.hash }))),
    }
}

/// File part for an inline image.
///
/// `data:` URLs are split into media type and base64 payload; remote URLs
/// are passed through with a media type guessed from the path.
pub fn image_file_part(image: &ImageOutput) -> FilePart {
    let url = &image.image_url.url;
    let media_type = match parse_data_url(url) {
        Some(parsed) => parsed.media_type,
        None => guess_mime_from_path_or_url(url),
    }
    .unwrap_or_else(|| DEFAULT_IMAGE_MEDIA_TYPE.to_string());
    FilePart {
        media_type,
        data: base64_from_data_url(url),
    }
}
