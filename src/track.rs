use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{CaptionError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    /// Uploaded or hand-made captions
    Standard,
    /// Automatic speech recognition
    Asr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackStatus {
    Serving,
    Syncing,
    Failed,
}

/// Metadata for one caption track of a video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionTrack {
    pub caption_id: String,
    pub language: String,
    pub language_code: String,
    #[serde(default)]
    pub name: String,
    pub kind: TrackKind,
    pub status: TrackStatus,
    pub is_auto_generated: bool,
    #[serde(default)]
    pub is_cc: bool,
    #[serde(default)]
    pub is_draft: bool,
    #[serde(default)]
    pub is_easy_reader: bool,
    #[serde(default)]
    pub is_large: bool,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl CaptionTrack {
    pub fn is_manual(&self) -> bool {
        !self.is_auto_generated
    }

    pub fn is_accessible(&self) -> bool {
        self.status == TrackStatus::Serving
    }

    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            self.language.clone()
        } else {
            format!("{} ({})", self.name, self.language)
        }
    }
}

/// Track selection criteria. `None` means "don't care".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackFilter {
    pub language_codes: Option<Vec<String>>,
    pub kinds: Option<Vec<TrackKind>>,
    pub statuses: Option<Vec<TrackStatus>>,
    pub auto_generated_only: bool,
    pub manual_only: bool,
    pub accessible_only: bool,
    pub cc_only: bool,
    pub draft_only: bool,
    pub easy_reader_only: bool,
    pub large_only: bool,
}

impl Default for TrackFilter {
    fn default() -> Self {
        Self {
            language_codes: None,
            kinds: None,
            statuses: None,
            auto_generated_only: false,
            manual_only: false,
            accessible_only: true,
            cc_only: false,
            draft_only: false,
            easy_reader_only: false,
            large_only: false,
        }
    }
}

impl TrackFilter {
    /// Contradictory combinations, one message each
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.auto_generated_only && self.manual_only {
            errors.push("Cannot filter for both auto-generated and manual captions".to_string());
        }

        if self.draft_only && self.accessible_only {
            errors.push("Draft captions are not accessible".to_string());
        }

        errors
    }

    pub fn matches(&self, track: &CaptionTrack) -> bool {
        if let Some(codes) = &self.language_codes {
            if !codes.iter().any(|c| c.eq_ignore_ascii_case(&track.language_code)) {
                return false;
            }
        }
        if let Some(kinds) = &self.kinds {
            if !kinds.contains(&track.kind) {
                return false;
            }
        }
        if let Some(statuses) = &self.statuses {
            if !statuses.contains(&track.status) {
                return false;
            }
        }

        !(self.auto_generated_only && !track.is_auto_generated
            || self.manual_only && !track.is_manual()
            || self.accessible_only && !track.is_accessible()
            || self.cc_only && !track.is_cc
            || self.draft_only && !track.is_draft
            || self.easy_reader_only && !track.is_easy_reader
            || self.large_only && !track.is_large)
    }

    /// Tracks passing the filter, in input order
    pub fn apply<'a>(&self, tracks: &'a [CaptionTrack]) -> Result<Vec<&'a CaptionTrack>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(CaptionError::Filter(errors.join("; ")));
        }

        Ok(tracks.iter().filter(|t| self.matches(t)).collect())
    }
}

/// Pick the most useful accessible track: manual in the preferred language,
/// then any manual track, then any track in the preferred language, then
/// whatever is first.
pub fn select_best_track<'a>(
    tracks: &'a [CaptionTrack],
    preferred_language: &str,
) -> Option<&'a CaptionTrack> {
    let available: Vec<&CaptionTrack> = tracks.iter().filter(|t| t.is_accessible()).collect();
    let is_preferred = |t: &CaptionTrack| t.language_code.eq_ignore_ascii_case(preferred_language);

    available
        .iter()
        .copied()
        .find(|t| t.is_manual() && is_preferred(*t))
        .or_else(|| available.iter().copied().find(|t| t.is_manual()))
        .or_else(|| available.iter().copied().find(|t| is_preferred(*t)))
        .or_else(|| available.first().copied())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackAnalytics {
    pub total_tracks: usize,
    pub available_tracks: usize,
    pub auto_generated_tracks: usize,
    pub manual_tracks: usize,
    pub languages: Vec<String>,
    pub language_distribution: BTreeMap<String, usize>,
}

impl TrackAnalytics {
    pub fn from_tracks(tracks: &[CaptionTrack]) -> Self {
        let mut analytics = TrackAnalytics {
            total_tracks: tracks.len(),
            ..Default::default()
        };

        for track in tracks {
            if track.is_accessible() {
                analytics.available_tracks += 1;
            }
            if track.is_auto_generated {
                analytics.auto_generated_tracks += 1;
            } else {
                analytics.manual_tracks += 1;
            }
            if !analytics.languages.contains(&track.language_code) {
                analytics.languages.push(track.language_code.clone());
            }
            *analytics
                .language_distribution
                .entry(track.language_code.clone())
                .or_insert(0) += 1;
        }

        analytics
    }

    /// Language with the most tracks; ties go to the first one listed
    pub fn most_common_language(&self) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;
        for language in &self.languages {
            let count = self.language_distribution.get(language).copied().unwrap_or(0);
            if best.is_none_or(|(_, c)| count > c) {
                best = Some((language.as_str(), count));
            }
        }
        best.map(|(language, _)| language)
    }
}

pub fn words_per_minute(total_words: usize, total_duration: f64) -> f64 {
    if total_duration <= 0.0 {
        return 0.0;
    }
    total_words as f64 / total_duration * 60.0
}
