pub mod config;
pub mod detection;
pub mod engine;

pub use config::Config;
pub use detection::email::EmailDetector;
pub use detection::file::FileDetector;
pub use detection::url::UrlDetector;
pub use detection::DetectionResult;
pub use engine::{ScanEngine, ScanRequest};
