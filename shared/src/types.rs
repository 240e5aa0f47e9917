//! Common types used across the service

use serde::{Deserialize, Serialize};

/// Farmer-facing guidance together with the strategy that produced it
///
/// The source tag exists for logs and tests; it is never rendered to the
/// farmer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationText {
    pub text: String,
    pub source: RecommendationSource,
}

impl RecommendationText {
    pub fn completion(text: String) -> Self {
        Self {
            text,
            source: RecommendationSource::Completion,
        }
    }

    pub fn rule_based(text: String) -> Self {
        Self {
            text,
            source: RecommendationSource::RuleBased,
        }
    }
}

/// Which strategy produced a recommendation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    /// Remote completion API
    Completion,
    /// Local deterministic rules
    RuleBased,
}

impl RecommendationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationSource::Completion => "completion",
            RecommendationSource::RuleBased => "rule_based",
        }
    }
}
