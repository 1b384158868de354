// Caption format conversion
//
// Every target format has a writer behind one trait, picked by a factory:
// - text: SRT, WebVTT, SubViewer and plain-text writers
// - ttml: Timed Text Markup Language writer

pub mod text;
pub mod ttml;

pub use text::*;
pub use ttml::*;

use tracing::debug;

use crate::error::{CaptionError, Result};
use crate::format::CaptionFormat;
use crate::subtitle::{Cue, ParseMode, SrtBlock, scan_srt_blocks};

/// Main trait for caption serialization
pub trait CaptionWriter: Send + Sync {
    /// Format produced by this writer
    fn format(&self) -> CaptionFormat;

    /// Serialize blocks into a complete document
    fn write(&self, blocks: &[SrtBlock]) -> String;
}

/// Factory for creating caption writers
pub struct WriterFactory;

impl WriterFactory {
    /// Create the writer for a target format
    pub fn create_writer(format: CaptionFormat) -> Result<Box<dyn CaptionWriter>> {
        match format {
            CaptionFormat::Srt => Ok(Box::new(SrtWriter)),
            CaptionFormat::Vtt => Ok(Box::new(VttWriter)),
            CaptionFormat::Txt => Ok(Box::new(TxtWriter)),
            CaptionFormat::Sbv => Ok(Box::new(SbvWriter)),
            CaptionFormat::Ttml => Ok(Box::new(TtmlWriter)),
            CaptionFormat::Scc => Err(CaptionError::UnsupportedFormat(format!(
                "no writer for {}",
                format
            ))),
        }
    }
}

/// Conversion source: raw SRT text or an already parsed cue sequence
#[derive(Debug, Clone, Copy)]
pub enum CaptionInput<'a> {
    Srt(&'a str),
    Cues(&'a [Cue]),
}

impl<'a> From<&'a str> for CaptionInput<'a> {
    fn from(text: &'a str) -> Self {
        CaptionInput::Srt(text)
    }
}

impl<'a> From<&'a String> for CaptionInput<'a> {
    fn from(text: &'a String) -> Self {
        CaptionInput::Srt(text.as_str())
    }
}

impl<'a> From<&'a [Cue]> for CaptionInput<'a> {
    fn from(cues: &'a [Cue]) -> Self {
        CaptionInput::Cues(cues)
    }
}

impl<'a> From<&'a Vec<Cue>> for CaptionInput<'a> {
    fn from(cues: &'a Vec<Cue>) -> Self {
        CaptionInput::Cues(cues.as_slice())
    }
}

impl CaptionInput<'_> {
    fn blocks(&self, mode: ParseMode) -> Result<Vec<SrtBlock>> {
        match self {
            CaptionInput::Srt(text) => scan_srt_blocks(text, mode),
            CaptionInput::Cues(cues) => Ok(cues.iter().map(SrtBlock::from).collect()),
        }
    }
}

/// Convert SRT text or cues into the target format
pub fn convert<'a>(input: impl Into<CaptionInput<'a>>, target: CaptionFormat) -> Result<String> {
    convert_with(input, target, ParseMode::Lenient)
}

/// Convert with an explicit parse mode for SRT input
pub fn convert_with<'a>(
    input: impl Into<CaptionInput<'a>>,
    target: CaptionFormat,
    mode: ParseMode,
) -> Result<String> {
    let writer = WriterFactory::create_writer(target)?;
    let input: CaptionInput<'a> = input.into();
    let blocks = input.blocks(mode)?;
    debug!("Writing {} blocks as {}", blocks.len(), writer.format());
    Ok(writer.write(&blocks))
}
