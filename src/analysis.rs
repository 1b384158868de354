//! Descriptive statistics over cue sequences: reading speed, silent gaps and
//! a word-list language guess.
//!
//! The language guess is a bag-of-words heuristic. Each language owns ten
//! common words and scores the number of times those words occur as
//! substrings of the lowercased text. It is kept this crude so its numbers
//! stay comparable with caption reports produced by earlier tooling.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::subtitle::Cue;

/// Default minimum silence between cues reported as a gap (seconds)
pub const DEFAULT_MIN_GAP: f64 = 0.5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadingSpeed {
    pub average_wpm: f64,
    pub average_cue_duration: f64,
    pub total_words: usize,
    pub total_duration: f64,
}

/// Silence between two consecutive cues
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    pub start: f64,
    pub end: f64,
    pub duration: f64,
}

pub fn analyze_reading_speed(cues: &[Cue]) -> ReadingSpeed {
    if cues.is_empty() {
        return ReadingSpeed::default();
    }

    let total_words: usize = cues.iter().map(Cue::word_count).sum();
    let total_duration: f64 = cues.iter().map(Cue::duration).sum();

    let average_wpm = if total_duration > 0.0 {
        total_words as f64 / total_duration * 60.0
    } else {
        0.0
    };

    ReadingSpeed {
        average_wpm,
        average_cue_duration: total_duration / cues.len() as f64,
        total_words,
        total_duration,
    }
}

/// Gaps between consecutive cues in list order. Sort the cues first if order matters.
pub fn find_gaps(cues: &[Cue], min_gap: f64) -> Vec<Gap> {
    cues.windows(2)
        .filter_map(|pair| {
            let (current, next) = (&pair[0], &pair[1]);
            let duration = next.start_time - current.end_time;
            (duration >= min_gap).then_some(Gap {
                start: current.end_time,
                end: next.start_time,
                duration,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
    Fr,
    De,
    It,
    Pt,
    Ru,
    Ja,
    Ko,
    Zh,
}

impl Language {
    /// Candidates in tie-break order
    pub const ALL: [Language; 10] = [
        Language::En,
        Language::Es,
        Language::Fr,
        Language::De,
        Language::It,
        Language::Pt,
        Language::Ru,
        Language::Ja,
        Language::Ko,
        Language::Zh,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::It => "it",
            Language::Pt => "pt",
            Language::Ru => "ru",
            Language::Ja => "ja",
            Language::Ko => "ko",
            Language::Zh => "zh",
        }
    }

    /// Indicator words. The French list repeats "et"; it is counted twice.
    pub fn indicators(&self) -> &'static [&'static str] {
        match self {
            Language::En => &["the", "and", "is", "in", "to", "of", "a", "that", "it", "with"],
            Language::Es => &["el", "la", "de", "que", "y", "a", "en", "un", "es", "se"],
            Language::Fr => &["le", "de", "et", "à", "un", "il", "être", "et", "en", "avoir"],
            Language::De => &["der", "die", "und", "in", "den", "von", "zu", "das", "mit", "sich"],
            Language::It => &["il", "di", "e", "a", "in", "un", "per", "è", "con", "da"],
            Language::Pt => &["o", "de", "e", "do", "da", "em", "um", "para", "com", "não"],
            Language::Ru => &["и", "в", "не", "на", "я", "быть", "с", "он", "а", "как"],
            Language::Ja => &["の", "に", "は", "を", "が", "で", "と", "も", "から", "まで"],
            Language::Ko => &["이", "그", "저", "의", "에", "를", "을", "가", "는", "은"],
            Language::Zh => &["的", "了", "在", "是", "我", "有", "和", "就", "不", "人"],
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageGuess {
    pub language: Language,
    /// Winning count over whitespace word count; not bounded by 1
    pub confidence: f64,
    pub counts: BTreeMap<Language, usize>,
}

pub fn detect_language(text: &str) -> LanguageGuess {
    let lowered = text.to_lowercase();

    let counts: BTreeMap<Language, usize> = Language::ALL
        .iter()
        .map(|lang| {
            let count = lang
                .indicators()
                .iter()
                .map(|word| lowered.matches(word).count())
                .sum();
            (*lang, count)
        })
        .collect();

    // First language with the highest count wins ties
    let mut language = Language::En;
    let mut best = 0;
    for lang in Language::ALL {
        if counts[&lang] > best {
            best = counts[&lang];
            language = lang;
        }
    }

    let word_count = text.split_whitespace().count();
    let confidence = if word_count > 0 {
        best as f64 / word_count as f64
    } else {
        0.0
    };

    LanguageGuess {
        language,
        confidence,
        counts,
    }
}
