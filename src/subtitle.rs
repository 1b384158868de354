use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CaptionError, Result};
use crate::format::CaptionFormat;

/// One timed caption entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    /// Start time in seconds
    pub start_time: f64,
    /// End time in seconds
    pub end_time: f64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
}

impl Cue {
    pub fn new(start_time: f64, end_time: f64, text: impl Into<String>) -> Self {
        Self {
            start_time,
            end_time,
            text: text.into(),
            speaker: None,
        }
    }

    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.speaker = Some(speaker.into());
        self
    }

    /// Duration in seconds. Negative for inverted cues; the validator reports those.
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Start time as `HH:MM:SS,mmm`
    pub fn formatted_start(&self) -> String {
        format_srt_time(self.start_time)
    }

    /// End time as `HH:MM:SS,mmm`
    pub fn formatted_end(&self) -> String {
        format_srt_time(self.end_time)
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// How the SRT parser treats blocks it cannot use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Drop malformed blocks and keep going
    #[default]
    Lenient,
    /// Fail on the first malformed block or inverted cue
    Strict,
}

/// A parsed SRT block with its text lines kept apart.
///
/// Converters work on blocks rather than cues so that line breaks inside a
/// cue and the source time line survive re-serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct SrtBlock {
    pub start: f64,
    pub end: f64,
    /// Time range line as it appeared in the source
    pub time_line: String,
    pub lines: Vec<String>,
}

impl SrtBlock {
    /// Cue text: the block's lines joined by single spaces
    pub fn text(&self) -> String {
        self.lines.join(" ")
    }

    pub fn to_cue(&self) -> Cue {
        Cue::new(self.start, self.end, self.text())
    }
}

impl From<&Cue> for SrtBlock {
    fn from(cue: &Cue) -> Self {
        Self {
            start: cue.start_time,
            end: cue.end_time,
            time_line: format!("{} --> {}", cue.formatted_start(), cue.formatted_end()),
            // A blank line would end the cue early once written out
            lines: cue
                .text
                .lines()
                .filter(|l| !l.trim().is_empty())
                .map(|l| l.to_string())
                .collect(),
        }
    }
}

/// Format seconds as a caption timestamp `HH:MM:SS<sep>mmm`.
///
/// Rounds to the nearest millisecond; negative and non-finite values clamp to zero.
pub fn format_timestamp(seconds: f64, separator: char) -> String {
    let total_milliseconds = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    };
    let hours = total_milliseconds / 3_600_000;
    let minutes = (total_milliseconds % 3_600_000) / 60_000;
    let secs = (total_milliseconds % 60_000) / 1_000;
    let millis = total_milliseconds % 1_000;

    format!("{:02}:{:02}:{:02}{}{:03}", hours, minutes, secs, separator, millis)
}

/// Format time in seconds to SRT time format (HH:MM:SS,mmm)
pub fn format_srt_time(seconds: f64) -> String {
    format_timestamp(seconds, ',')
}

/// Parse `HH:MM:SS,mmm` (or `.mmm`) into seconds
pub fn parse_timestamp(value: &str) -> Option<f64> {
    let normalized = value.trim().replace(',', ".");
    let mut parts = normalized.split(':');
    let hours: u64 = parts.next()?.parse().ok()?;
    let minutes: u64 = parts.next()?.parse().ok()?;
    let seconds_part = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let (secs, millis) = match seconds_part.split_once('.') {
        Some((secs, millis)) => (secs.parse::<u64>().ok()?, millis.parse::<u64>().ok()?),
        None => (seconds_part.parse::<u64>().ok()?, 0),
    };

    Some(hours as f64 * 3600.0 + minutes as f64 * 60.0 + secs as f64 + millis as f64 / 1000.0)
}

/// Parse a `start --> end` line. Trailing cue settings after the end time are ignored.
pub fn parse_time_range(line: &str) -> Option<(f64, f64)> {
    let (start, end) = line.split_once("-->")?;
    let end = end.split_whitespace().next()?;
    Some((parse_timestamp(start)?, parse_timestamp(end)?))
}

fn is_sequence_number(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c.is_ascii_digit())
}

fn reject(mode: ParseMode, line: usize, reason: String) -> Result<()> {
    match mode {
        ParseMode::Strict => Err(CaptionError::MalformedBlock { line, reason }),
        ParseMode::Lenient => {
            warn!("Skipping caption block at line {}: {}", line, reason);
            Ok(())
        }
    }
}

/// Scan SRT text into blocks, keeping document order
pub fn scan_srt_blocks(text: &str, mode: ParseMode) -> Result<Vec<SrtBlock>> {
    let lines: Vec<&str> = text.trim_start_matches('\u{feff}').lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if !is_sequence_number(lines[i].trim()) {
            i += 1;
            continue;
        }

        let block_line = i + 1;
        i += 1;

        let Some(time_line) = lines.get(i) else {
            reject(mode, block_line, "missing time line".to_string())?;
            break;
        };

        // Leave the cursor on the line after the number so a valid block there is still seen
        let Some((start, end)) = parse_time_range(time_line) else {
            reject(mode, block_line, format!("invalid time line '{}'", time_line.trim()))?;
            continue;
        };
        i += 1;

        let mut text_lines = Vec::new();
        while i < lines.len() && !lines[i].trim().is_empty() {
            text_lines.push(lines[i].trim_end().to_string());
            i += 1;
        }

        if text_lines.is_empty() {
            reject(mode, block_line, "block has no text".to_string())?;
            continue;
        }

        if mode == ParseMode::Strict && start >= end {
            return Err(CaptionError::MalformedBlock {
                line: block_line,
                reason: "start time >= end time".to_string(),
            });
        }

        debug!("Parsed block at line {} ({:.3}s -> {:.3}s)", block_line, start, end);
        blocks.push(SrtBlock {
            start,
            end,
            time_line: time_line.trim().to_string(),
            lines: text_lines,
        });
    }

    Ok(blocks)
}

/// Parse SRT text into cues, silently dropping malformed blocks
pub fn parse_srt(text: &str) -> Vec<Cue> {
    // Lenient scanning never returns an error
    parse_srt_with(text, ParseMode::Lenient).unwrap_or_default()
}

/// Parse SRT text into cues with an explicit parse mode
pub fn parse_srt_with(text: &str, mode: ParseMode) -> Result<Vec<Cue>> {
    Ok(scan_srt_blocks(text, mode)?
        .iter()
        .map(SrtBlock::to_cue)
        .collect())
}

/// An ordered cue sequence with its declared format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionDocument {
    pub format: CaptionFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    pub cues: Vec<Cue>,
    #[serde(skip)]
    pub raw: Option<String>,
}

impl CaptionDocument {
    pub fn new(format: CaptionFormat, cues: Vec<Cue>) -> Self {
        Self {
            format,
            language_code: None,
            cues,
            raw: None,
        }
    }

    /// Build a document from SRT text, keeping the raw source
    pub fn from_srt(text: &str) -> Self {
        Self {
            format: CaptionFormat::Srt,
            language_code: None,
            cues: parse_srt(text),
            raw: Some(text.to_string()),
        }
    }

    pub fn with_language(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = Some(language_code.into());
        self
    }

    /// Latest cue end time
    pub fn total_duration(&self) -> f64 {
        self.cues.iter().map(|c| c.end_time).fold(0.0, f64::max)
    }

    pub fn word_count(&self) -> usize {
        self.cues.iter().map(Cue::word_count).sum()
    }

    pub fn cue_count(&self) -> usize {
        self.cues.len()
    }

    pub fn average_cue_duration(&self) -> f64 {
        if self.cues.is_empty() {
            return 0.0;
        }
        self.cues.iter().map(Cue::duration).sum::<f64>() / self.cues.len() as f64
    }

    /// Cues lying entirely within `[start, end]`
    pub fn cues_in_timeframe(&self, start: f64, end: f64) -> Vec<&Cue> {
        self.cues
            .iter()
            .filter(|c| c.start_time >= start && c.end_time <= end)
            .collect()
    }

    pub fn search_text(&self, term: &str, case_sensitive: bool) -> Vec<&Cue> {
        if case_sensitive {
            self.cues.iter().filter(|c| c.text.contains(term)).collect()
        } else {
            let term = term.to_lowercase();
            self.cues
                .iter()
                .filter(|c| c.text.to_lowercase().contains(&term))
                .collect()
        }
    }

    /// Whether start times are non-decreasing. Reported, never enforced.
    pub fn is_chronological(&self) -> bool {
        self.cues.windows(2).all(|w| w[0].start_time <= w[1].start_time)
    }
}
