use super::*;
use crate::standards::openrouter::metadata::{
    image_file_part, reasoning_details_metadata, url_citation_source,
};
use crate::standards::openrouter::types::{Annotation, ImageOutput};
use crate::types::ReasoningDetail;

impl OpenRouterStreamTransformer {
    /// Structured `reasoning_details` take precedence over the legacy
    /// `reasoning` string.
    pub(super) fn process_reasoning(
        &mut self,
        details: Option<Vec<ReasoningDetail>>,
        legacy: Option<String>,
        out: &mut Vec<StreamPart>,
    ) {
        match details.filter(|d| !d.is_empty()) {
            Some(details) => {
                let start_metadata = reasoning_details_metadata(&details);
                let mut start_metadata = Some(start_metadata);
                for detail in details {
                    let delta = detail.display_text().to_string();
                    self.state.reasoning_details.push(detail);
                    if !delta.is_empty() {
                        self.emit_reasoning_delta(delta, start_metadata.take(), out);
                    }
                }
            }
            None => {
                if let Some(text) = legacy.filter(|t| !t.is_empty()) {
                    self.emit_reasoning_delta(text, None, out);
                }
            }
        }
    }

    /// Reasoning may only open while text has not started.
    fn emit_reasoning_delta(
        &mut self,
        delta: String,
        start_metadata: Option<crate::types::ProviderMetadata>,
        out: &mut Vec<StreamPart>,
    ) {
        if self.state.reasoning.is_not_started() {
            if !self.state.text.is_not_started() {
                tracing::debug!("reasoning after text started; kept in details only");
                return;
            }
            let id = self.next_id();
            self.state.reasoning.open(id.clone());
            out.push(StreamPart::ReasoningStart {
                id,
                provider_metadata: start_metadata,
            });
        }

        let Some(id) = self.state.reasoning.open_id() else {
            tracing::debug!("reasoning block already closed; kept in details only");
            return;
        };
        out.push(StreamPart::ReasoningDelta {
            id: id.to_string(),
            delta,
        });
    }

    /// Text opens at the first non-empty delta, closing reasoning first.
    pub(super) fn process_text(&mut self, text: String, out: &mut Vec<StreamPart>) {
        if self.state.text.is_not_started() {
            if let Some(id) = self.state.reasoning.close() {
                out.push(StreamPart::ReasoningEnd {
                    id,
                    provider_metadata: non_empty_reasoning_metadata(
                        self.state.reasoning_details.as_slice(),
                    ),
                });
            }
            let id = self.next_id();
            self.state.text.open(id.clone());
            out.push(StreamPart::TextStart { id });
        }

        let Some(id) = self.state.text.open_id() else {
            tracing::debug!("text after text block closed; dropped");
            return;
        };
        out.push(StreamPart::TextDelta {
            id: id.to_string(),
            delta: text,
        });
    }

    /// URL citations stream out as sources; file annotations are kept for
    /// the finish metadata.
    pub(super) fn process_annotations(
        &mut self,
        annotations: Vec<Annotation>,
        out: &mut Vec<StreamPart>,
    ) {
        for annotation in annotations {
            match annotation {
                Annotation::UrlCitation { url_citation } => {
                    let id = self.next_id();
                    out.push(StreamPart::Source(url_citation_source(id, &url_citation)));
                }
                Annotation::File { file } => self.state.file_annotations.push(file),
                Annotation::Unknown => tracing::debug!("skipping unknown annotation type"),
            }
        }
    }

    pub(super) fn process_images(&mut self, images: &[ImageOutput], out: &mut Vec<StreamPart>) {
        for image in images {
            out.push(StreamPart::File(image_file_part(image)));
        }
    }
}
