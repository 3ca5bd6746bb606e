use regex::Regex;
use url::Url;

use crate::config::UrlRules;
use crate::detection::{DetectionResult, RiskTally, VerdictText};

const URL_VERDICT: VerdictText = VerdictText {
    subject: "This URL",
    recommend_high: "⚠️ HIGH RISK: Do not click this link. This URL shows characteristics of phishing attacks.",
    recommend_low: "✅ LOW RISK: This URL appears safe, but always verify the sender.",
    details_high: "Multiple phishing indicators detected.",
    details_low: "No major indicators detected.",
};

/// Scores a single URL against the configured rule set.
///
/// A string that does not parse as a URL is itself a signal (fixed weight),
/// never an error; the remaining checks are skipped for it.
pub struct UrlDetector {
    rules: UrlRules,
    ip_host: Regex,
}

impl Default for UrlDetector {
    fn default() -> Self {
        Self::new(UrlRules::default())
    }
}

impl UrlDetector {
    pub fn new(rules: UrlRules) -> Self {
        Self {
            rules,
            ip_host: Regex::new(r"^\d+\.\d+\.\d+\.\d+").unwrap(),
        }
    }

    pub fn check_url(&self, raw: &str) -> DetectionResult {
        let mut tally = RiskTally::new();

        match Url::parse(raw) {
            Ok(parsed) => self.scan_parsed(raw, &parsed, &mut tally),
            Err(_) => tally.record(self.rules.scoring.invalid_url, "Invalid URL format"),
        }

        tally.into_result(&URL_VERDICT, self.rules.scoring.threshold)
    }

    fn scan_parsed(&self, raw: &str, parsed: &Url, tally: &mut RiskTally) {
        let scoring = &self.rules.scoring;
        let host = parsed.host_str().unwrap_or("").to_lowercase();

        for domain in &self.rules.suspicious_domains {
            if host.contains(domain.as_str()) {
                tally.record(
                    scoring.suspicious_domain,
                    format!("Suspicious domain detected: {domain}"),
                );
            }
        }

        if self.rules.disallowed_schemes.iter().any(|s| s == parsed.scheme()) {
            tally.record(
                scoring.disallowed_scheme,
                format!("Non-standard protocol detected: {}:", parsed.scheme()),
            );
        }

        if self.ip_host.is_match(&host) {
            tally.record(
                scoring.ip_address_host,
                "URL uses IP address instead of domain name",
            );
        }

        // Single trigger no matter how many credential parameters are present
        let has_credential_param = parsed.query_pairs().any(|(key, _)| {
            self.rules
                .credential_params
                .iter()
                .any(|param| param.as_str() == key.as_ref())
        });
        if has_credential_param {
            tally.record(
                scoring.credential_params,
                "URL contains credential-harvesting parameters",
            );
        }

        if raw.len() > self.rules.max_length {
            tally.record(
                scoring.excessive_length,
                "Unusually long URL (potential obfuscation)",
            );
        }

        // The url crate IDNA-maps non-ASCII hosts to punycode before we see
        // them, so an xn-- label is the same homograph signal
        if !host.is_ascii() || host.split('.').any(|label| label.starts_with("xn--")) {
            tally.record(
                scoring.non_ascii_host,
                "URL contains non-ASCII characters (homograph attack)",
            );
        }

        if self
            .rules
            .low_trust_tlds
            .iter()
            .any(|tld| host.ends_with(tld.as_str()))
        {
            tally.record(scoring.low_trust_tld, "Suspicious top-level domain detected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> UrlDetector {
        UrlDetector::default()
    }

    #[test]
    fn test_invalid_url_is_a_signal_not_an_error() {
        let result = detector().check_url("not a url");
        assert_eq!(result.indicators, vec!["Invalid URL format"]);
        assert_eq!(result.risk_score, 10);
        assert!(!result.is_phishing);
    }

    #[test]
    fn test_clean_https_url_scores_zero() {
        let result = detector().check_url("https://example.com");
        assert!(result.indicators.is_empty());
        assert_eq!(result.risk_score, 0);
        assert!(!result.is_phishing);
        assert!(result.details.contains("0/100"));
    }

    #[test]
    fn test_ip_literal_with_credential_params() {
        // http scheme (20) + IP host (30) + login param (25)
        let result = detector().check_url("http://192.168.1.1/verify?login=1");
        assert_eq!(result.risk_score, 75);
        assert!(result.is_phishing);
        assert_eq!(
            result.indicators,
            vec![
                "Non-standard protocol detected: http:",
                "URL uses IP address instead of domain name",
                "URL contains credential-harvesting parameters",
            ]
        );
    }

    #[test]
    fn test_shortener_domain_stacks_with_scheme() {
        // bit.ly substring (25) + http scheme (20)
        let result = detector().check_url("http://bit.ly/abc123");
        assert_eq!(result.risk_score, 45);
        assert!(result.is_phishing);
        assert_eq!(result.indicators[0], "Suspicious domain detected: bit.ly");
    }

    #[test]
    fn test_multiple_suspicious_domains_stack() {
        let result = detector().check_url("https://paypa1.verify-account.example.com/");
        assert_eq!(result.risk_score, 50);
        assert!(result.is_phishing);
        assert_eq!(result.indicators.len(), 2);
    }

    #[test]
    fn test_credential_params_trigger_once() {
        let result = detector().check_url("https://example.com/?login=1&verify=1&confirm=1");
        assert_eq!(result.risk_score, 25);
        assert_eq!(result.indicators.len(), 1);
    }

    #[test]
    fn test_low_trust_tld() {
        let result = detector().check_url("https://free-prizes.tk/");
        assert_eq!(result.risk_score, 20);
        assert_eq!(result.indicators, vec!["Suspicious top-level domain detected"]);
    }

    #[test]
    fn test_excessive_length() {
        let long = format!("https://example.com/{}", "a".repeat(150));
        let result = detector().check_url(&long);
        assert_eq!(result.risk_score, 15);
        assert_eq!(
            result.indicators,
            vec!["Unusually long URL (potential obfuscation)"]
        );
    }

    #[test]
    fn test_homograph_host_flags_punycode() {
        // Cyrillic "а" in the host; the url crate normalizes it to xn--
        let result = detector().check_url("https://pаypal.com/");
        assert!(result
            .indicators
            .iter()
            .any(|i| i.contains("non-ASCII characters")));
    }

    #[test]
    fn test_score_clamped_at_100() {
        // bit.ly + tinyurl + paypa1 (3 x 25) + http (20) + .tk (20) = 115
        let result = detector().check_url("http://bit.ly.tinyurl.paypa1.tk/");
        assert_eq!(result.risk_score, 100);
        assert!(result.is_phishing);
    }

    #[test]
    fn test_deterministic() {
        let d = detector();
        let a = d.check_url("http://bit.ly/abc");
        let b = d.check_url("http://bit.ly/abc");
        assert_eq!(a, b);
    }

    #[test]
    fn test_monotonic_under_added_triggers() {
        let d = detector();
        let base = d.check_url("https://example.com/page");
        let more = d.check_url("https://example.com/page?login=1");
        assert!(more.risk_score >= base.risk_score);
    }

    #[test]
    fn test_ftp_scheme_is_disallowed() {
        let result = detector().check_url("ftp://example.com/file");
        assert_eq!(result.indicators, vec!["Non-standard protocol detected: ftp:"]);
        assert_eq!(result.risk_score, 20);
    }
}
