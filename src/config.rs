use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::error::{CaptionError, Result};
use crate::format::CaptionFormat;
use crate::subtitle::ParseMode;

// Sections and the fields inside them may be omitted; missing values take their defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub parse: ParseConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub quality: QualityConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ParseConfig {
    /// Lenient drops malformed blocks, strict fails on them
    pub mode: ParseMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Minimum silence (seconds) reported as a gap
    pub gap_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Cues shorter than this (seconds) cost half an issue unit
    pub min_cue_duration: f64,
    /// Cues longer than this (seconds) cost half an issue unit
    pub max_cue_duration: f64,
    /// Cue text longer than this many characters costs half a unit
    pub max_text_length: usize,
    /// Cue text shorter than this many characters costs half a unit
    pub min_text_length: usize,
    /// More embedded line breaks than this costs 0.3 of a unit
    pub max_line_breaks: usize,
    /// Silence (seconds) counted against completeness
    pub completeness_gap: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// SRT cues longer than this (seconds) raise a warning
    pub long_cue_warning: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Target format when none is given on the command line
    pub default_format: CaptionFormat,
    /// Pretty-print JSON reports
    pub pretty_json: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { gap_threshold: 0.5 }
    }
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            min_cue_duration: 0.5,
            max_cue_duration: 10.0,
            max_text_length: 200,
            min_text_length: 2,
            max_line_breaks: 3,
            completeness_gap: 1.0,
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            long_cue_warning: 10.0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: CaptionFormat::Vtt,
            pretty_json: true,
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CaptionError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| CaptionError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CaptionError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| CaptionError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}
