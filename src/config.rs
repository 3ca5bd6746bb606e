use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

/// Top-level scanner configuration: one rule set per input modality.
///
/// The built-in defaults carry the full pattern lists; a YAML file with the
/// same shape can override any section wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub url: UrlRules,
    #[serde(default)]
    pub email: EmailRules,
    #[serde(default)]
    pub file: FileRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: UrlRules::default(),
            email: EmailRules::default(),
            file: FileRules::default(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration file: {path}"))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse configuration file: {path}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)
            .with_context(|| format!("failed to write configuration file: {path}"))?;
        Ok(())
    }

    /// Reject configurations that would silently disable scoring.
    pub fn validate(&self) -> Result<()> {
        if self.url.suspicious_domains.is_empty() {
            bail!("url.suspicious_domains must not be empty");
        }
        if self.url.disallowed_schemes.is_empty() {
            bail!("url.disallowed_schemes must not be empty");
        }
        if self.url.credential_params.is_empty() {
            bail!("url.credential_params must not be empty");
        }
        if self.url.low_trust_tlds.is_empty() {
            bail!("url.low_trust_tlds must not be empty");
        }
        if self.email.urgency_keywords.is_empty() {
            bail!("email.urgency_keywords must not be empty");
        }
        if self.email.credential_terms.is_empty() {
            bail!("email.credential_terms must not be empty");
        }
        if self.file.dangerous_extensions.is_empty() {
            bail!("file.dangerous_extensions must not be empty");
        }
        if self.url.scoring.threshold == 0
            || self.email.scoring.threshold == 0
            || self.file.scoring.threshold == 0
        {
            bail!("classification thresholds must be greater than zero");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlRules {
    pub suspicious_domains: Vec<String>,
    pub disallowed_schemes: Vec<String>,
    pub credential_params: Vec<String>,
    pub low_trust_tlds: Vec<String>,
    pub max_length: usize,
    #[serde(default)]
    pub scoring: UrlScoring,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlScoring {
    pub invalid_url: u32,
    pub suspicious_domain: u32,
    pub disallowed_scheme: u32,
    pub ip_address_host: u32,
    pub credential_params: u32,
    pub excessive_length: u32,
    pub non_ascii_host: u32,
    pub low_trust_tld: u32,
    pub threshold: u32,
}

impl Default for UrlRules {
    fn default() -> Self {
        Self {
            suspicious_domains: strings(&[
                "bit.ly",
                "tinyurl",
                "short.url",
                "goo.gl",
                "paypa1",
                "amaz0n",
                "micr0soft",
                "apple-id",
                "verify-account",
            ]),
            disallowed_schemes: strings(&["http", "ftp", "file"]),
            credential_params: strings(&["login", "verify", "confirm"]),
            low_trust_tlds: strings(&[".tk", ".ml", ".ga", ".cf"]),
            max_length: 150,
            scoring: UrlScoring::default(),
        }
    }
}

impl Default for UrlScoring {
    fn default() -> Self {
        Self {
            invalid_url: 10,
            suspicious_domain: 25,
            disallowed_scheme: 20,
            ip_address_host: 30,
            credential_params: 25,
            excessive_length: 15,
            non_ascii_host: 35,
            low_trust_tld: 20,
            threshold: 40,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRules {
    pub urgency_keywords: Vec<String>,
    pub credential_terms: Vec<String>,
    pub generic_greetings: Vec<String>,
    pub call_to_action: Vec<String>,
    pub financial_threats: Vec<String>,
    pub time_pressure: Vec<String>,
    pub max_grammar_errors: usize,
    #[serde(default)]
    pub scoring: EmailScoring,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailScoring {
    pub urgency_keyword: u32,
    pub credential_term: u32,
    pub generic_greeting: u32,
    pub grammar_errors: u32,
    pub call_to_action: u32,
    pub financial_threat: u32,
    pub time_pressure: u32,
    pub threshold: u32,
}

impl Default for EmailRules {
    fn default() -> Self {
        Self {
            urgency_keywords: strings(&[
                "verify",
                "confirm",
                "urgent",
                "immediate",
                "action required",
                "expire",
                "suspend",
                "lock",
                "blocked",
                "unusual activity",
            ]),
            credential_terms: strings(&[
                "username",
                "password",
                "ssn",
                "credit card",
                "account number",
                "verify identity",
                "confirm account",
            ]),
            generic_greetings: strings(&["dear customer", "dear user", "dear friend"]),
            call_to_action: strings(&["click here", "verify account", "confirm identity"]),
            financial_threats: strings(&["payment failed", "billing problem", "update payment"]),
            time_pressure: strings(&["24 hour", "48 hour", "expires", "act now"]),
            max_grammar_errors: 3,
            scoring: EmailScoring::default(),
        }
    }
}

impl Default for EmailScoring {
    fn default() -> Self {
        Self {
            urgency_keyword: 10,
            credential_term: 20,
            generic_greeting: 15,
            grammar_errors: 15,
            call_to_action: 20,
            financial_threat: 25,
            time_pressure: 15,
            threshold: 45,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRules {
    pub dangerous_extensions: Vec<String>,
    pub executable_keywords: Vec<String>,
    pub script_markers: Vec<String>,
    #[serde(default)]
    pub scoring: FileScoring,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileScoring {
    pub dangerous_extension: u32,
    pub double_extension: u32,
    pub executable_keyword: u32,
    pub script_marker: u32,
    pub obfuscation: u32,
    pub threshold: u32,
}

impl Default for FileRules {
    fn default() -> Self {
        Self {
            dangerous_extensions: strings(&[
                ".exe", ".zip", ".scr", ".bat", ".cmd", ".com", ".pif", ".vbs",
            ]),
            executable_keywords: strings(&["powershell", "cmd.exe", "registry"]),
            script_markers: strings(&["<script>", "onclick", "eval("]),
            scoring: FileScoring::default(),
        }
    }
}

impl Default for FileScoring {
    fn default() -> Self {
        Self {
            dangerous_extension: 40,
            double_extension: 35,
            executable_keyword: 40,
            script_marker: 35,
            obfuscation: 25,
            threshold: 40,
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
