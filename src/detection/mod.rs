pub mod email;
pub mod file;
pub mod url;

use serde::{Deserialize, Serialize};

/// Verdict for a single scanned item. Wire field names keep the historical
/// shape (`isPhishing` camel-cased, the rest snake).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    #[serde(rename = "isPhishing")]
    pub is_phishing: bool,
    pub risk_score: u32,
    pub indicators: Vec<String>,
    pub recommendation: String,
    pub details: String,
}

/// Fixed report wording for one modality.
pub struct VerdictText {
    pub subject: &'static str,
    pub recommend_high: &'static str,
    pub recommend_low: &'static str,
    pub details_high: &'static str,
    pub details_low: &'static str,
}

/// Accumulates triggered rule weights and their indicator strings.
///
/// Indicator order is rule evaluation order. The score is clamped to 100 and
/// never goes negative; classification compares the clamped score against the
/// modality threshold.
#[derive(Debug, Default)]
pub struct RiskTally {
    score: u32,
    indicators: Vec<String>,
}

impl RiskTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, weight: u32, indicator: impl Into<String>) {
        self.score += weight;
        self.indicators.push(indicator.into());
    }

    pub fn score(&self) -> u32 {
        self.score.min(100)
    }

    pub fn into_result(self, text: &VerdictText, threshold: u32) -> DetectionResult {
        let risk_score = self.score.min(100);
        let is_phishing = risk_score >= threshold;

        let recommendation = if is_phishing {
            text.recommend_high
        } else {
            text.recommend_low
        };
        let details = format!(
            "{} scored {}/100 risk level. {}",
            text.subject,
            risk_score,
            if is_phishing {
                text.details_high
            } else {
                text.details_low
            }
        );

        DetectionResult {
            is_phishing,
            risk_score,
            indicators: self.indicators,
            recommendation: recommendation.to_string(),
            details,
        }
    }
}

pub(crate) fn contains_any(text: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| text.contains(pattern.as_str()))
}
