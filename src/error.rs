use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Malformed caption block at line {line}: {reason}")]
    MalformedBlock { line: usize, reason: String },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Quality check failed: {0}")]
    Quality(String),

    #[error("Invalid track filter: {0}")]
    Filter(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Caption source error: {0}")]
    Source(String),

    #[error("All caption sources failed: {}", .0.join("; "))]
    AllSourcesFailed(Vec<String>),
}

pub type Result<T> = std::result::Result<T, CaptionError>;
