//! Usage normalization and the OpenRouter usage accounting block.

use super::types::OpenRouterUsage;
use crate::types::{InputTokens, NormalizedUsage, OutputTokens};
use serde::Serialize;

/// Convert vendor usage counters into [`NormalizedUsage`].
///
/// A missing usage object yields [`NormalizedUsage::empty`]. Otherwise the
/// totals default to 0, `cacheRead`/`reasoning` default to 0, and the derived
/// `noCache`/`text` counters are plain differences (they go negative when the
/// vendor over-reports cached or reasoning tokens). `cacheWrite` is only set
/// when the vendor sent a number.
pub fn normalize_usage(usage: Option<&OpenRouterUsage>) -> NormalizedUsage {
    let Some(usage) = usage else {
        return NormalizedUsage::empty();
    };

    let prompt = usage.prompt_tokens.unwrap_or(0);
    let prompt_details = usage.prompt_tokens_details.as_ref();
    let cache_read = prompt_details.and_then(|d| d.cached_tokens).unwrap_or(0);
    let cache_write = prompt_details.and_then(|d| d.cache_write_tokens);

    let completion = usage.completion_tokens.unwrap_or(0);
    let reasoning = usage
        .completion_tokens_details
        .as_ref()
        .and_then(|d| d.reasoning_tokens)
        .unwrap_or(0);

    NormalizedUsage {
        input_tokens: InputTokens {
            total: prompt,
            no_cache: Some(prompt as i64 - cache_read as i64),
            cache_read: Some(cache_read),
            cache_write,
        },
        output_tokens: OutputTokens {
            total: completion,
            text: Some(completion as i64 - reasoning as i64),
            reasoning: Some(reasoning),
        },
        raw: serde_json::to_value(usage).ok(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptTokensAccounting {
    pub cached_tokens: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionTokensAccounting {
    pub reasoning_tokens: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostAccounting {
    pub upstream_inference_cost: f64,
}

/// Provider-specific usage breakdown surfaced as
/// `providerMetadata.openrouter.usage`.
///
/// Sub-objects the wire data never populated are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenRouterUsageAccounting {
    pub prompt_tokens: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_tokens_details: Option<PromptTokensAccounting>,
    pub completion_tokens: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_tokens_details: Option<CompletionTokensAccounting>,
    pub total_tokens: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_details: Option<CostAccounting>,
}

impl OpenRouterUsageAccounting {
    pub fn from_usage(usage: &OpenRouterUsage) -> Self {
        let mut out = Self::default();
        out.update(usage);
        out
    }

    /// Fold a (possibly partial) usage chunk in; only known values overwrite.
    pub fn update(&mut self, usage: &OpenRouterUsage) {
        if let Some(prompt) = usage.prompt_tokens {
            self.prompt_tokens = prompt;
        }
        if let Some(completion) = usage.completion_tokens {
            self.completion_tokens = completion;
        }
        match usage.total_tokens {
            Some(total) => self.total_tokens = total,
            None if usage.prompt_tokens.is_some() || usage.completion_tokens.is_some() => {
                self.total_tokens = self.prompt_tokens + self.completion_tokens;
            }
            None => {}
        }

        if let Some(cached) = usage
            .prompt_tokens_details
            .as_ref()
            .and_then(|d| d.cached_tokens)
        {
            self.prompt_tokens_details = Some(PromptTokensAccounting {
                cached_tokens: cached,
            });
        }
        if let Some(reasoning) = usage
            .completion_tokens_details
            .as_ref()
            .and_then(|d| d.reasoning_tokens)
        {
            self.completion_tokens_details = Some(CompletionTokensAccounting {
                reasoning_tokens: reasoning,
            });
        }
        if usage.cost.is_some() {
            self.cost = usage.cost;
        }
        if let Some(upstream) = usage
            .cost_details
            .as_ref()
            .and_then(|d| d.upstream_inference_cost)
        {
            self.cost_details = Some(CostAccounting {
                upstream_inference_cost: upstream,
            });
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn usage(value: serde_json::Value) -> OpenRouterUsage {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn derives_no_cache_and_text() {
        let u = usage(json!({
            "prompt_tokens": 100,
            "completion_tokens": 40,
            "prompt_tokens_details": {"cached_tokens": 30},
            "completion_tokens_details": {"reasoning_tokens": 15}
        }));
        let n = normalize_usage(Some(&u));
        assert_eq!(n.input_tokens.total, 100);
        assert_eq!(n.input_tokens.no_cache, Some(70));
        assert_eq!(n.input_tokens.cache_read, Some(30));
        assert_eq!(n.input_tokens.cache_write, None);
        assert_eq!(n.output_tokens.text, Some(25));
        assert_eq!(n.output_tokens.reasoning, Some(15));
        assert_eq!(n.raw.unwrap()["prompt_tokens"], 100);
    }

    #[test]
    fn cache_read_above_total_goes_negative() {
        let u = usage(json!({
            "prompt_tokens": 10,
            "prompt_tokens_details": {"cached_tokens": 25}
        }));
        assert_eq!(normalize_usage(Some(&u)).input_tokens.no_cache, Some(-15));
    }

    #[test]
    fn explicit_null_cache_write_stays_unknown() {
        let u = usage(json!({
            "prompt_tokens": 10,
            "prompt_tokens_details": {"cached_tokens": null, "cache_write_tokens": null}
        }));
        let n = normalize_usage(Some(&u));
        assert_eq!(n.input_tokens.cache_write, None);
        assert_eq!(n.input_tokens.cache_read, Some(0));
        assert_eq!(n.input_tokens.no_cache, Some(10));
    }

    #[test]
    fn missing_usage_is_empty() {
        let n = normalize_usage(None);
        assert_eq!(n, NormalizedUsage::empty());
        assert!(n.raw.is_none());
        assert_eq!(n.input_tokens.no_cache, None);
    }

    #[test]
    fn accounting_omits_unpopulated_details() {
        let u = usage(json!({"prompt_tokens": 3, "completion_tokens": 4}));
        let json = OpenRouterUsageAccounting::from_usage(&u).to_json();
        assert_eq!(
            json,
            json!({"promptTokens": 3, "completionTokens": 4, "totalTokens": 7})
        );
    }

    #[test]
    fn accounting_includes_cost_details() {
        let u = usage(json!({
            "prompt_tokens": 3,
            "completion_tokens": 4,
            "total_tokens": 7,
            "cost": 0.0012,
            "cost_details": {"upstream_inference_cost": 0.001},
            "prompt_tokens_details": {"cached_tokens": 1},
            "completion_tokens_details": {"reasoning_tokens": 2}
        }));
        let json = OpenRouterUsageAccounting::from_usage(&u).to_json();
        assert_eq!(json["promptTokensDetails"]["cachedTokens"], 1);
        assert_eq!(json["completionTokensDetails"]["reasoningTokens"], 2);
        assert_eq!(json["cost"], 0.0012);
        assert_eq!(json["costDetails"]["upstreamInferenceCost"], 0.001);
    }

    #[test]
    fn accounting_update_ignores_counts_a_chunk_omits() {
        let mut accounting = OpenRouterUsageAccounting::from_usage(&usage(json!({
            "prompt_tokens": 10,
            "completion_tokens": 5,
            "prompt_tokens_details": {"cached_tokens": 4}
        })));
        accounting.update(&usage(json!({"cost": 0.1})));

        let json = accounting.to_json();
        assert_eq!(json["promptTokens"], 10);
        assert_eq!(json["completionTokens"], 5);
        assert_eq!(json["totalTokens"], 15);
        assert_eq!(json["promptTokensDetails"]["cachedTokens"], 4);
        assert_eq!(json["cost"], 0.1);
    }
    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Derived counters are plain differences, negative values included.
            #[test]
            fn derived_counters_are_differences(
                prompt in 0u64..1_000_000,
                cached in 0u64..1_000_000,
                completion in 0u64..1_000_000,
                reasoning in 0u64..1_000_000,
            ) {
                let u = usage(json!({
                    "prompt_tokens": prompt,
                    "completion_tokens": completion,
                    "prompt_tokens_details": {"cached_tokens": cached},
                    "completion_tokens_details": {"reasoning_tokens": reasoning}
                }));
                let n = normalize_usage(Some(&u));
                prop_assert_eq!(n.input_tokens.no_cache, Some(prompt as i64 - cached as i64));
                prop_assert_eq!(n.output_tokens.text, Some(completion as i64 - reasoning as i64));
                prop_assert_eq!(n.input_tokens.cache_read, Some(cached));
                prop_assert_eq!(n.output_tokens.reasoning, Some(reasoning));
            }

            #[test]
            fn cache_write_passes_through(write in proptest::option::of(0u64..100_000)) {
                let u = usage(json!({
                    "prompt_tokens": 10,
                    "prompt_tokens_details": {"cache_write_tokens": write}
                }));
                prop_assert_eq!(normalize_usage(Some(&u)).input_tokens.cache_write, write);
            }

            #[test]
            fn normalization_is_deterministic(prompt in 0u64..10_000, completion in 0u64..10_000) {
                let u = usage(json!({"prompt_tokens": prompt, "completion_tokens": completion}));
                prop_assert_eq!(normalize_usage(Some(&u)), normalize_usage(Some(&u)));
            }
        }
    }
}
