use serde::Deserialize;

use crate::config::Config;
use crate::detection::email::EmailDetector;
use crate::detection::file::FileDetector;
use crate::detection::url::UrlDetector;
use crate::detection::DetectionResult;

/// One scan request as submitted on the wire:
/// `{ "type": "url" | "email" | "file", "input": ... }`.
///
/// An unknown `type` fails deserialization at the edge; the detectors
/// themselves accept any string input.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "input", rename_all = "lowercase")]
pub enum ScanRequest {
    Url(String),
    Email(String),
    File {
        #[serde(rename = "fileName")]
        file_name: String,
        #[serde(rename = "fileContent")]
        file_content: String,
    },
}

/// Owns one detector per modality and dispatches requests to them.
///
/// Stateless between calls; a single engine can be shared across threads.
pub struct ScanEngine {
    url: UrlDetector,
    email: EmailDetector,
    file: FileDetector,
}

impl Default for ScanEngine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl ScanEngine {
    pub fn new(config: Config) -> Self {
        Self {
            url: UrlDetector::new(config.url),
            email: EmailDetector::new(config.email),
            file: FileDetector::new(config.file),
        }
    }

    pub fn scan(&self, request: &ScanRequest) -> DetectionResult {
        let (kind, result) = match request {
            ScanRequest::Url(url) => ("url", self.url.check_url(url)),
            ScanRequest::Email(content) => ("email", self.email.check_email(content)),
            ScanRequest::File {
                file_name,
                file_content,
            } => ("file", self.file.check_file(file_name, file_content)),
        };

        log::debug!(
            "{} scan: score {}/100, {} indicator(s), phishing={}",
            kind,
            result.risk_score,
            result.indicators.len(),
            result.is_phishing
        );

        result
    }
}
