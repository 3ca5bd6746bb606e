use regex::Regex;

use crate::config::FileRules;
use crate::detection::{contains_any, DetectionResult, RiskTally, VerdictText};

const FILE_VERDICT: VerdictText = VerdictText {
    subject: "This file",
    recommend_high: "⚠️ HIGH RISK: This file is likely malicious. Do not open or execute it.",
    recommend_low: "✅ LOW RISK: This file appears safe, but always scan files before opening.",
    details_high: "Malicious characteristics detected.",
    details_low: "No major red flags detected.",
};

/// Scores a file name plus its content, treated as text.
pub struct FileDetector {
    rules: FileRules,
    double_extension: Regex,
    obfuscation: Regex,
}

impl Default for FileDetector {
    fn default() -> Self {
        Self::new(FileRules::default())
    }
}

impl FileDetector {
    pub fn new(rules: FileRules) -> Self {
        Self {
            rules,
            // Also matches compound names like archive.tar.gz
            double_extension: Regex::new(r"\.\w+\.\w+$").unwrap(),
            obfuscation: Regex::new(r"[%#&]{3,}").unwrap(),
        }
    }

    pub fn check_file(&self, file_name: &str, file_content: &str) -> DetectionResult {
        let mut tally = RiskTally::new();
        let scoring = &self.rules.scoring;
        let name_lower = file_name.to_lowercase();

        for ext in &self.rules.dangerous_extensions {
            if name_lower.ends_with(ext.as_str()) {
                tally.record(
                    scoring.dangerous_extension,
                    format!("Malicious file type detected: {ext}"),
                );
            }
        }

        if self.double_extension.is_match(file_name) {
            tally.record(
                scoring.double_extension,
                "Suspicious double file extension detected",
            );
        }

        let content_lower = file_content.to_lowercase();
        if contains_any(&content_lower, &self.rules.executable_keywords) {
            tally.record(
                scoring.executable_keyword,
                "Potential script/malware code detected",
            );
        }

        if contains_any(&content_lower, &self.rules.script_markers) {
            tally.record(scoring.script_marker, "Malicious JavaScript detected");
        }

        if self.obfuscation.is_match(file_content) {
            tally.record(scoring.obfuscation, "Potential code obfuscation detected");
        }

        tally.into_result(&FILE_VERDICT, scoring.threshold)
    }
}
