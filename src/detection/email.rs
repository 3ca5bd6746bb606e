use regex::Regex;

use crate::config::EmailRules;
use crate::detection::{contains_any, DetectionResult, RiskTally, VerdictText};

const EMAIL_VERDICT: VerdictText = VerdictText {
    subject: "This email",
    recommend_high: "⚠️ HIGH RISK: This email shows multiple phishing characteristics. Do not click links or provide personal information.",
    recommend_low: "✅ LOW RISK: This email appears legitimate, but always verify sender addresses.",
    details_high: "Multiple phishing indicators found.",
    details_low: "No major indicators detected.",
};

/// Scores raw email text (headers and body concatenated, or body only).
/// No structural parsing; every check is a substring scan.
pub struct EmailDetector {
    rules: EmailRules,
    grammar_pattern: Regex,
}

impl Default for EmailDetector {
    fn default() -> Self {
        Self::new(EmailRules::default())
    }
}

impl EmailDetector {
    pub fn new(rules: EmailRules) -> Self {
        Self {
            rules,
            // Double spaces or an acronym run followed by a lowercase word,
            // counted together as one sloppy-writing signal
            grammar_pattern: Regex::new(r"\s{2,}|[A-Z]{2,}\s[a-z]").unwrap(),
        }
    }

    pub fn check_email(&self, content: &str) -> DetectionResult {
        let mut tally = RiskTally::new();
        let scoring = &self.rules.scoring;
        let lowered = content.to_lowercase();

        for keyword in &self.rules.urgency_keywords {
            if lowered.contains(keyword.as_str()) {
                tally.record(
                    scoring.urgency_keyword,
                    format!("Urgency language detected: \"{keyword}\""),
                );
            }
        }

        for term in &self.rules.credential_terms {
            if lowered.contains(term.as_str()) {
                tally.record(
                    scoring.credential_term,
                    format!("Credential request detected: \"{term}\""),
                );
            }
        }

        if contains_any(&lowered, &self.rules.generic_greetings) {
            tally.record(
                scoring.generic_greeting,
                "Generic greeting (impersonal addressing)",
            );
        }

        // Grammar scan runs over the original text; lower-casing would hide
        // the capitalized runs it looks for
        let grammar_errors = self.grammar_pattern.find_iter(content).count();
        if grammar_errors > self.rules.max_grammar_errors {
            tally.record(
                scoring.grammar_errors,
                "Multiple spelling or grammar errors detected",
            );
        }

        if contains_any(&lowered, &self.rules.call_to_action) {
            tally.record(scoring.call_to_action, "Suspicious call-to-action detected");
        }

        if contains_any(&lowered, &self.rules.financial_threats) {
            tally.record(scoring.financial_threat, "Financial threat mentioned");
        }

        if contains_any(&lowered, &self.rules.time_pressure) {
            tally.record(scoring.time_pressure, "Time pressure detected");
        }

        tally.into_result(&EMAIL_VERDICT, scoring.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> EmailDetector {
        EmailDetector::default()
    }

    #[test]
    fn test_empty_email_scores_zero() {
        let result = detector().check_email("");
        assert_eq!(result.risk_score, 0);
        assert!(result.indicators.is_empty());
        assert!(!result.is_phishing);
    }

    #[test]
    fn test_ordinary_email_scores_zero() {
        let result = detector().check_email("Hi Sam, lunch tomorrow at noon?");
        assert_eq!(result.risk_score, 0);
        assert!(!result.is_phishing);
    }

    #[test]
    fn test_distinct_urgency_keywords_stack() {
        // "urgent" and "suspend", 10 each
        let result = detector().check_email("urgent: your mailbox will suspend soon");
        assert_eq!(result.risk_score, 20);
        assert_eq!(result.indicators.len(), 2);
        assert!(!result.is_phishing);
    }

    #[test]
    fn test_repeated_keyword_counts_once() {
        let result = detector().check_email("urgent urgent urgent");
        assert_eq!(result.risk_score, 10);
        assert_eq!(
            result.indicators,
            vec!["Urgency language detected: \"urgent\""]
        );
    }

    #[test]
    fn test_credential_terms_weigh_heavier() {
        let result = detector().check_email("send us your password and account number");
        assert_eq!(result.risk_score, 40);
        assert_eq!(result.indicators.len(), 2);
    }

    #[test]
    fn test_generic_greeting_triggers_once() {
        let result = detector().check_email("dear customer, dear user,");
        assert_eq!(result.risk_score, 15);
        assert_eq!(
            result.indicators,
            vec!["Generic greeting (impersonal addressing)"]
        );
    }

    #[test]
    fn test_grammar_heuristic_needs_more_than_three_hits() {
        let three = "a  b  c  d";
        let result = detector().check_email(three);
        assert_eq!(result.risk_score, 0);

        let four = "a  b  c  d  e";
        let result = detector().check_email(four);
        assert_eq!(result.risk_score, 15);
        assert_eq!(
            result.indicators,
            vec!["Multiple spelling or grammar errors detected"]
        );
    }

    #[test]
    fn test_grammar_heuristic_counts_acronym_runs() {
        let text = "URGENT notice PLEASE read NOW before YOUR account";
        let result = detector().check_email(text);
        assert!(result
            .indicators
            .iter()
            .any(|i| i.contains("grammar errors")));
    }

    #[test]
    fn test_classic_phishing_body_crosses_threshold() {
        let body = "URGENT: verify your account now! Click here to confirm \
                    your password before it expires.";
        let result = detector().check_email(body);
        // urgency: verify, confirm, urgent, expire (4 x 10) + password (20)
        // + click here (20) + expires (15)
        assert_eq!(result.risk_score, 95);
        assert!(result.is_phishing);
    }

    #[test]
    fn test_financial_threat_phrase() {
        let result = detector().check_email("your payment failed, update payment today");
        assert_eq!(result.risk_score, 25);
        assert_eq!(result.indicators, vec!["Financial threat mentioned"]);
    }

    #[test]
    fn test_below_threshold_is_not_phishing() {
        // password (20) + click here (20) = 40 < 45
        let result = detector().check_email("click here to reset your password");
        assert_eq!(result.risk_score, 40);
        assert!(!result.is_phishing);
    }

    #[test]
    fn test_score_clamped_at_100() {
        let body = "URGENT action required: verify and confirm your username, \
                    password, ssn, credit card and account number. Click here \
                    within 24 hour or your account will be blocked. Payment \
                    failed, update payment now. Act now, this expires!";
        let result = detector().check_email(body);
        assert_eq!(result.risk_score, 100);
        assert!(result.is_phishing);
    }

    #[test]
    fn test_deterministic() {
        let d = detector();
        let body = "dear customer, click here to verify";
        assert_eq!(d.check_email(body), d.check_email(body));
    }

    #[test]
    fn test_monotonic_under_added_triggers() {
        let d = detector();
        let base = d.check_email("please review the attached report");
        let more = d.check_email("please review the attached report and act now");
        assert!(more.risk_score >= base.risk_score);
    }
}
