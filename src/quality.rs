use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::analysis::find_gaps;
use crate::config::QualityConfig;
use crate::error::{CaptionError, Result};
use crate::subtitle::Cue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl OverallQuality {
    /// Bucket a mean score using the 0.9 / 0.7 / 0.5 thresholds
    pub fn from_score(score: f64) -> Self {
        if score >= 0.9 {
            OverallQuality::Excellent
        } else if score >= 0.7 {
            OverallQuality::Good
        } else if score >= 0.5 {
            OverallQuality::Fair
        } else {
            OverallQuality::Poor
        }
    }

    fn rank(&self) -> u8 {
        match self {
            OverallQuality::Poor => 0,
            OverallQuality::Fair => 1,
            OverallQuality::Good => 2,
            OverallQuality::Excellent => 3,
        }
    }

    pub fn meets(&self, minimum: OverallQuality) -> bool {
        self.rank() >= minimum.rank()
    }
}

impl fmt::Display for OverallQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OverallQuality::Excellent => "excellent",
            OverallQuality::Good => "good",
            OverallQuality::Fair => "fair",
            OverallQuality::Poor => "poor",
        };
        f.write_str(name)
    }
}

impl FromStr for OverallQuality {
    type Err = CaptionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "excellent" => Ok(OverallQuality::Excellent),
            "good" => Ok(OverallQuality::Good),
            "fair" => Ok(OverallQuality::Fair),
            "poor" => Ok(OverallQuality::Poor),
            _ => Err(CaptionError::Config(format!(
                "Invalid quality level '{}'. Valid levels: excellent, good, fair, poor",
                s
            ))),
        }
    }
}

/// Caption quality along four axes, each in [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub overall_quality: OverallQuality,
    pub timing_accuracy: f64,
    pub text_quality: f64,
    pub completeness: f64,
    pub consistency: f64,
    pub issues: Vec<String>,
}

impl QualityMetrics {
    fn empty() -> Self {
        Self {
            overall_quality: OverallQuality::Poor,
            timing_accuracy: 0.0,
            text_quality: 0.0,
            completeness: 0.0,
            consistency: 0.0,
            issues: Vec::new(),
        }
    }

    pub fn average_score(&self) -> f64 {
        (self.timing_accuracy + self.text_quality + self.completeness + self.consistency) / 4.0
    }
}

/// Scores a cue sequence. Each problem costs "issue units"; an axis scores
/// `1 - units / cue_count`, floored at zero.
pub struct QualityAssessor {
    config: QualityConfig,
}

impl Default for QualityAssessor {
    fn default() -> Self {
        Self::new(QualityConfig::default())
    }
}

impl QualityAssessor {
    pub fn new(config: QualityConfig) -> Self {
        Self { config }
    }

    pub fn assess(&self, cues: &[Cue], raw_text: &str) -> QualityMetrics {
        let mut metrics = QualityMetrics::empty();

        if cues.is_empty() {
            metrics.issues.push("No caption cues found".to_string());
            if !raw_text.trim().is_empty() {
                metrics
                    .issues
                    .push("Content is present but no cue could be parsed".to_string());
            }
            return metrics;
        }

        metrics.timing_accuracy = self.assess_timing_accuracy(cues, &mut metrics.issues);
        metrics.text_quality = self.assess_text_quality(cues, &mut metrics.issues);
        metrics.completeness = self.assess_completeness(cues, &mut metrics.issues);
        metrics.consistency = self.assess_consistency(cues);
        metrics.overall_quality = OverallQuality::from_score(metrics.average_score());

        debug!(
            "Quality: timing={:.3} text={:.3} completeness={:.3} consistency={:.3} -> {}",
            metrics.timing_accuracy,
            metrics.text_quality,
            metrics.completeness,
            metrics.consistency,
            metrics.overall_quality
        );

        metrics
    }

    /// Fail when the assessed quality ranks below `minimum`
    pub fn check(&self, metrics: &QualityMetrics, minimum: OverallQuality) -> Result<()> {
        if metrics.overall_quality.meets(minimum) {
            return Ok(());
        }

        Err(CaptionError::Quality(format!(
            "Caption quality {} (score {:.2}) is below required {}",
            metrics.overall_quality,
            metrics.average_score(),
            minimum
        )))
    }

    fn assess_timing_accuracy(&self, cues: &[Cue], issues: &mut Vec<String>) -> f64 {
        let mut units = 0.0;

        for (i, cue) in cues.iter().enumerate() {
            if cue.start_time >= cue.end_time {
                units += 1.0;
                issues.push(format!("Cue {}: start time >= end time", i + 1));
                continue;
            }

            if cue.duration() < self.config.min_cue_duration {
                units += 0.5;
                issues.push(format!("Cue {}: very short duration ({:.2}s)", i + 1, cue.duration()));
            }

            if cue.duration() > self.config.max_cue_duration {
                units += 0.5;
                issues.push(format!("Cue {}: very long duration ({:.1}s)", i + 1, cue.duration()));
            }
        }

        unit_score(units, cues.len())
    }

    fn assess_text_quality(&self, cues: &[Cue], issues: &mut Vec<String>) -> f64 {
        let mut units = 0.0;

        for (i, cue) in cues.iter().enumerate() {
            let text = cue.text.trim();

            if text.is_empty() {
                units += 1.0;
                issues.push(format!("Cue {}: empty text", i + 1));
                continue;
            }

            let length = text.chars().count();
            if length < self.config.min_text_length {
                units += 0.5;
                issues.push(format!("Cue {}: very short text", i + 1));
            }

            if length > self.config.max_text_length {
                units += 0.5;
                issues.push(format!("Cue {}: text too long ({} chars)", i + 1, length));
            }

            if text.matches('\n').count() > self.config.max_line_breaks {
                units += 0.3;
                issues.push(format!("Cue {}: too many line breaks", i + 1));
            }

            if text.matches('[').count() != text.matches(']').count() {
                units += 0.2;
                issues.push(format!("Cue {}: unmatched brackets", i + 1));
            }
        }

        unit_score(units, cues.len())
    }

    fn assess_completeness(&self, cues: &[Cue], issues: &mut Vec<String>) -> f64 {
        let gaps = find_gaps(cues, self.config.completeness_gap);
        if gaps.is_empty() {
            return 1.0;
        }

        let total_gap: f64 = gaps.iter().map(|g| g.duration).sum();
        let total_duration = cues.iter().map(|c| c.end_time).fold(0.0, f64::max);
        issues.push(format!("{} gaps totalling {:.1}s of silence", gaps.len(), total_gap));

        let gap_ratio = if total_duration > 0.0 {
            total_gap / total_duration
        } else {
            0.0
        };
        (1.0 - gap_ratio).clamp(0.0, 1.0)
    }

    fn assess_consistency(&self, cues: &[Cue]) -> f64 {
        let durations: Vec<f64> = cues.iter().map(Cue::duration).collect();
        let mean = durations.iter().sum::<f64>() / durations.len() as f64;
        if mean <= 0.0 {
            return 0.0;
        }

        let variance =
            durations.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / durations.len() as f64;
        (1.0 - variance.sqrt() / mean).clamp(0.0, 1.0)
    }
}

fn unit_score(units: f64, cue_count: usize) -> f64 {
    (1.0 - units / cue_count as f64).clamp(0.0, 1.0)
}

/// Assess with default thresholds
pub fn assess_quality(cues: &[Cue], raw_text: &str) -> QualityMetrics {
    QualityAssessor::default().assess(cues, raw_text)
}
