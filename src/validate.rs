use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ValidationConfig;
use crate::error::{CaptionError, Result};
use crate::format::CaptionFormat;
use crate::subtitle::parse_srt;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationStats {
    pub cue_count: usize,
    pub total_duration: f64,
    pub average_cue_duration: f64,
}

/// Outcome of a structural check. Errors make the document invalid, warnings never do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub format: CaptionFormat,
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: ValidationStats,
}

impl ValidationReport {
    fn new(format: CaptionFormat) -> Self {
        Self {
            format,
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            stats: ValidationStats::default(),
        }
    }

    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.is_valid = false;
    }

    fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

pub struct FormatValidator {
    config: ValidationConfig,
}

impl Default for FormatValidator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

impl FormatValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Check a caption document of the given format.
    ///
    /// Only SRT, WebVTT and TTML can be checked; other formats are a caller error.
    pub fn validate(&self, content: &str, format: CaptionFormat) -> Result<ValidationReport> {
        let mut report = ValidationReport::new(format);

        match format {
            CaptionFormat::Srt => self.validate_srt(content, &mut report),
            CaptionFormat::Vtt => self.validate_vtt(content, &mut report),
            CaptionFormat::Ttml => self.validate_ttml(content, &mut report),
            CaptionFormat::Txt | CaptionFormat::Sbv | CaptionFormat::Scc => {
                return Err(CaptionError::UnsupportedFormat(format!(
                    "cannot validate {}",
                    format
                )));
            }
        }

        debug!(
            "Validated {} document: valid={}, {} errors, {} warnings",
            format,
            report.is_valid,
            report.errors.len(),
            report.warnings.len()
        );
        Ok(report)
    }

    fn validate_srt(&self, content: &str, report: &mut ValidationReport) {
        let cues = parse_srt(content);

        report.stats = ValidationStats {
            cue_count: cues.len(),
            total_duration: cues.iter().map(|c| c.end_time).fold(0.0, f64::max),
            average_cue_duration: if cues.is_empty() {
                0.0
            } else {
                cues.iter().map(|c| c.duration()).sum::<f64>() / cues.len() as f64
            },
        };

        if cues.is_empty() {
            report.error("No valid cues found");
        }

        for (i, cue) in cues.iter().enumerate() {
            if cue.start_time >= cue.end_time {
                report.error(format!("Cue {}: start time >= end time", i + 1));
            }

            if cue.duration() > self.config.long_cue_warning {
                report.warning(format!(
                    "Cue {}: very long duration ({:.1}s)",
                    i + 1,
                    cue.duration()
                ));
            }
        }
    }

    fn validate_vtt(&self, content: &str, report: &mut ValidationReport) {
        if !content.trim_start_matches('\u{feff}').starts_with("WEBVTT") {
            report.error("Missing WEBVTT header");
        }
        report.stats.cue_count = content.lines().filter(|l| l.contains("-->")).count();
    }

    fn validate_ttml(&self, content: &str, report: &mut ValidationReport) {
        if !content.contains("<?xml") {
            report.error("Invalid TTML: missing XML declaration");
        }
        if !content.contains("<tt") {
            report.error("Invalid TTML: missing <tt> root element");
        }
        report.stats.cue_count = content.matches("<p ").count() + content.matches("<p>").count();
    }
}

/// Validate with default thresholds
pub fn validate(content: &str, format: CaptionFormat) -> Result<ValidationReport> {
    FormatValidator::default().validate(content, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::convert;

    #[test]
    fn test_valid_srt() {
        let report = validate(
            "1\n00:00:00,000 --> 00:00:02,000\nHello\n\n2\n00:00:02,000 --> 00:00:05,000\nWorld\n",
            CaptionFormat::Srt,
        )
        .unwrap();
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
        assert_eq!(report.stats.cue_count, 2);
        assert_eq!(report.stats.total_duration, 5.0);
        assert_eq!(report.stats.average_cue_duration, 2.5);
    }

    #[test]
    fn test_empty_srt_is_invalid() {
        let report = validate("garbage", CaptionFormat::Srt).unwrap();
        assert!(!report.is_valid);
        assert_eq!(report.errors, vec!["No valid cues found".to_string()]);
    }

    #[test]
    fn test_inverted_cue_is_error_and_long_cue_is_warning() {
        let text = "1\n00:00:05,000 --> 00:00:04,000\nBackwards\n\n2\n00:00:10,000 --> 00:00:25,000\nLong\n";
        let report = validate(text, CaptionFormat::Srt).unwrap();
        assert!(!report.is_valid);
        assert_eq!(report.errors, vec!["Cue 1: start time >= end time".to_string()]);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("Cue 2"));
    }

    #[test]
    fn test_warnings_do_not_invalidate() {
        let text = "1\n00:00:00,000 --> 00:00:30,000\nLong but fine\n";
        let report = validate(text, CaptionFormat::Srt).unwrap();
        assert!(report.is_valid);
        assert_eq!(report.warnings.len(), 1);

        let relaxed = FormatValidator::new(ValidationConfig { long_cue_warning: 60.0 });
        assert!(relaxed.validate(text, CaptionFormat::Srt).unwrap().warnings.is_empty());
    }

    #[test]
    fn test_vtt_header() {
        let headless = validate("00:00:00.000 --> 00:00:01.000\nhi\n", CaptionFormat::Vtt).unwrap();
        assert!(!headless.is_valid);
        let vtt = convert("1\n00:00:00,000 --> 00:00:01,000\nhi\n", CaptionFormat::Vtt).unwrap();
        let report = validate(&vtt, CaptionFormat::Vtt).unwrap();
        assert!(report.is_valid);
        assert_eq!(report.stats.cue_count, 1);
    }

    #[test]
    fn test_ttml_markers() {
        let ttml = convert("1\n00:00:00,000 --> 00:00:01,000\nhi\n", CaptionFormat::Ttml).unwrap();
        let report = validate(&ttml, CaptionFormat::Ttml).unwrap();
        assert!(report.is_valid);
        assert_eq!(report.stats.cue_count, 1);

        let report = validate("<tt><body/></tt>", CaptionFormat::Ttml).unwrap();
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn test_unsupported_format() {
        assert!(matches!(
            validate("hello", CaptionFormat::Txt),
            Err(CaptionError::UnsupportedFormat(_))
        ));
    }
}
