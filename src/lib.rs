//! Captionkit - caption parsing, conversion and quality analysis
//!
//! Parses SubRip documents into cues, re-serializes them as WebVTT, SubViewer,
//! TTML or plain text, validates caption documents and scores their quality.
//! Every pipeline function is a pure transformation; file access lives in
//! [`workflow`] and [`source`].

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod subtitle;
pub mod convert;
pub mod validate;
pub mod analysis;
pub mod quality;
pub mod track;
pub mod source;
pub mod workflow;

pub use analysis::{analyze_reading_speed, detect_language, find_gaps};
pub use convert::convert;
pub use error::{CaptionError, Result};
pub use format::CaptionFormat;
pub use quality::assess_quality;
pub use subtitle::{Cue, parse_srt as parse};
pub use validate::validate;
