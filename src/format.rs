use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{CaptionError, Result};

/// Caption document formats known to the toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionFormat {
    /// SubRip subtitle
    Srt,
    /// Web Video Text Tracks
    Vtt,
    /// Plain text, timing stripped
    Txt,
    /// SubViewer subtitle
    Sbv,
    /// Timed Text Markup Language
    Ttml,
    /// Scenarist Closed Caption (recognized, not writable)
    Scc,
}

impl CaptionFormat {
    pub const ALL: [CaptionFormat; 6] = [
        CaptionFormat::Srt,
        CaptionFormat::Vtt,
        CaptionFormat::Txt,
        CaptionFormat::Sbv,
        CaptionFormat::Ttml,
        CaptionFormat::Scc,
    ];

    /// Canonical file extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            CaptionFormat::Srt => "srt",
            CaptionFormat::Vtt => "vtt",
            CaptionFormat::Txt => "txt",
            CaptionFormat::Sbv => "sbv",
            CaptionFormat::Ttml => "ttml",
            CaptionFormat::Scc => "scc",
        }
    }

    /// Guess the format from a file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                CaptionError::UnsupportedFormat(format!("no extension on {}", path.display()))
            })?;
        ext.parse()
    }
}

impl FromStr for CaptionFormat {
    type Err = CaptionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "srt" => Ok(CaptionFormat::Srt),
            "vtt" | "webvtt" => Ok(CaptionFormat::Vtt),
            "txt" | "text" => Ok(CaptionFormat::Txt),
            "sbv" => Ok(CaptionFormat::Sbv),
            "ttml" | "xml" | "dfxp" => Ok(CaptionFormat::Ttml),
            "scc" => Ok(CaptionFormat::Scc),
            _ => Err(CaptionError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for CaptionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
