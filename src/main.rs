use anyhow::Context;
use clap::{Arg, Command};
use log::LevelFilter;
use phishguard::{Config, DetectionResult, ScanEngine, ScanRequest};
use std::fs;
use std::path::Path;
use std::process;

fn main() {
    let matches = Command::new("phishguard")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Heuristic phishing scanner for URLs, raw emails, and files")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("/etc/phishguard.yaml"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Test configuration validity")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("url")
                .long("url")
                .value_name("URL")
                .help("Scan a URL string")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("email")
                .long("email")
                .value_name("FILE")
                .help("Scan the raw text of an email file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("scan-file")
                .long("scan-file")
                .value_name("FILE")
                .help("Scan a file's name and contents")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("request")
                .long("request")
                .value_name("FILE")
                .help("Scan a JSON request payload ({\"type\": ..., \"input\": ...})")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the raw detection result as JSON")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let config_path = matches.get_one::<String>("config").unwrap();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e:#}");
            process::exit(1);
        }
    };

    if matches.get_flag("test-config") {
        println!("🔍 Testing configuration...");
        println!();
        println!("URL rules:");
        println!("  Suspicious domains: {}", config.url.suspicious_domains.len());
        println!("  Disallowed schemes: {}", config.url.disallowed_schemes.len());
        println!("  Low-trust TLDs: {}", config.url.low_trust_tlds.len());
        println!("Email rules:");
        println!("  Urgency keywords: {}", config.email.urgency_keywords.len());
        println!("  Credential terms: {}", config.email.credential_terms.len());
        println!("File rules:");
        println!(
            "  Dangerous extensions: {}",
            config.file.dangerous_extensions.len()
        );
        println!();
        println!("✅ Configuration validated");
        return;
    }

    let request = match build_request(&matches) {
        Ok(Some(request)) => request,
        Ok(None) => {
            eprintln!("No input given. Use --url, --email, --scan-file, or --request.");
            process::exit(2);
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    };

    let engine = ScanEngine::new(config);
    let result = engine.scan(&request);

    if matches.get_flag("json") {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing result: {e}");
                process::exit(1);
            }
        }
    } else {
        print_report(&result);
    }
}

fn load_config(path: &str) -> anyhow::Result<Config> {
    if Path::new(path).exists() {
        Config::from_file(path)
    } else {
        log::warn!("Configuration file '{path}' not found, using default configuration");
        Ok(Config::default())
    }
}

fn generate_default_config(path: &str) {
    let config = Config::default();
    match config.to_file(path) {
        Ok(()) => {
            println!("Default configuration written to: {path}");
            println!("Please edit the configuration file to suit your needs.");
        }
        Err(e) => {
            eprintln!("Error writing configuration file: {e:#}");
            process::exit(1);
        }
    }
}

fn build_request(matches: &clap::ArgMatches) -> anyhow::Result<Option<ScanRequest>> {
    if let Some(url) = matches.get_one::<String>("url") {
        return Ok(Some(ScanRequest::Url(url.clone())));
    }

    if let Some(path) = matches.get_one::<String>("email") {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read email file: {path}"))?;
        return Ok(Some(ScanRequest::Email(content)));
    }

    if let Some(path) = matches.get_one::<String>("scan-file") {
        let file_content = fs::read_to_string(path)
            .with_context(|| format!("failed to read file: {path}"))?;
        let file_name = Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.clone());
        return Ok(Some(ScanRequest::File {
            file_name,
            file_content,
        }));
    }

    if let Some(path) = matches.get_one::<String>("request") {
        let payload = fs::read_to_string(path)
            .with_context(|| format!("failed to read request file: {path}"))?;
        let request: ScanRequest = serde_json::from_str(&payload)
            .with_context(|| format!("invalid scan request payload: {path}"))?;
        return Ok(Some(request));
    }

    Ok(None)
}

fn print_report(result: &DetectionResult) {
    println!("🔍 Scan Report");
    println!("═══════════════════════════════════════");
    if result.is_phishing {
        println!("🚨 Verdict: PHISHING (risk score {}/100)", result.risk_score);
    } else {
        println!("✅ Verdict: CLEAN (risk score {}/100)", result.risk_score);
    }
    println!();
    if result.indicators.is_empty() {
        println!("No indicators triggered");
    } else {
        println!("Indicators:");
        for indicator in &result.indicators {
            println!("  • {indicator}");
        }
    }
    println!();
    println!("{}", result.recommendation);
    println!("{}", result.details);
}
