use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::analysis::{
    Gap, LanguageGuess, ReadingSpeed, analyze_reading_speed, detect_language, find_gaps,
};
use crate::config::Config;
use crate::convert::convert_with;
use crate::error::{CaptionError, Result};
use crate::format::CaptionFormat;
use crate::quality::{QualityAssessor, QualityMetrics};
use crate::source::{CaptionRequest, CaptionSource, RawCaption, SourceFactory};
use crate::subtitle::{CaptionDocument, parse_srt_with};
use crate::validate::{FormatValidator, ValidationReport};

/// Everything the toolkit can say about one caption file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub source: PathBuf,
    pub cue_count: usize,
    pub word_count: usize,
    pub total_duration: f64,
    pub chronological: bool,
    pub reading_speed: ReadingSpeed,
    pub gaps: Vec<Gap>,
    pub language: LanguageGuess,
    pub quality: QualityMetrics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub converted: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

pub struct Workflow {
    config: Config,
    source: Box<dyn CaptionSource>,
    validator: FormatValidator,
    assessor: QualityAssessor,
}

impl Workflow {
    pub fn new(config: Config) -> Self {
        Self::with_source(config, SourceFactory::create_default())
    }

    pub fn with_source(config: Config, source: Box<dyn CaptionSource>) -> Self {
        let validator = FormatValidator::new(config.validation.clone());
        let assessor = QualityAssessor::new(config.quality.clone());

        Self {
            config,
            source,
            validator,
            assessor,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn assessor(&self) -> &QualityAssessor {
        &self.assessor
    }

    async fn load_srt(&self, path: &Path, language: Option<&str>) -> Result<RawCaption> {
        let mut request = CaptionRequest::new(path);
        if let Some(language) = language {
            request = request.with_language(language);
        }

        let raw = self.source.fetch(&request).await?;
        if raw.format != CaptionFormat::Srt {
            return Err(CaptionError::UnsupportedFormat(format!(
                "{} input is not parseable, only SRT is ({})",
                raw.format,
                raw.origin.display()
            )));
        }
        Ok(raw)
    }

    /// Load and parse an SRT document
    pub async fn load_document(
        &self,
        path: &Path,
        language: Option<&str>,
    ) -> Result<CaptionDocument> {
        let raw = self.load_srt(path, language).await?;
        let cues = parse_srt_with(&raw.content, self.config.parse.mode)?;
        info!("Parsed {} cues from {}", cues.len(), raw.origin.display());

        let mut document = CaptionDocument::new(CaptionFormat::Srt, cues);
        document.language_code = language.map(str::to_string);
        document.raw = Some(raw.content);
        Ok(document)
    }

    /// Convert one SRT file into the target format
    pub async fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
        target: CaptionFormat,
    ) -> Result<()> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();
        info!("Converting {} to {} -> {}", input_path.display(), target, output_path.display());

        let raw = self.load_srt(input_path, None).await?;
        let converted = convert_with(&raw.content, target, self.config.parse.mode)?;

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        fs::write(output_path, converted).await?;

        info!("Conversion completed");
        Ok(())
    }

    /// Convert every SRT file under a directory, mirroring its layout
    pub async fn convert_directory<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_dir: P,
        target: CaptionFormat,
        output_dir: Option<Q>,
    ) -> Result<BatchSummary> {
        let input_dir = input_dir.as_ref();
        info!("Converting directory: {}", input_dir.display());

        if !input_dir.is_dir() {
            return Err(CaptionError::Config(format!(
                "Input path is not a directory: {}",
                input_dir.display()
            )));
        }

        let output_dir = match output_dir {
            Some(dir) => dir.as_ref().to_path_buf(),
            None => input_dir.to_path_buf(),
        };

        let mut srt_files: Vec<PathBuf> = WalkDir::new(input_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| matches!(CaptionFormat::from_path(p), Ok(CaptionFormat::Srt)))
            .collect();
        srt_files.sort();

        info!("Found {} SRT files to convert", srt_files.len());

        let pb = ProgressBar::new(srt_files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut summary = BatchSummary::default();
        for srt_path in srt_files {
            let relative = pathdiff::diff_paths(&srt_path, input_dir)
                .unwrap_or_else(|| PathBuf::from(srt_path.file_name().unwrap_or_default()));
            let output_path = output_dir.join(relative).with_extension(target.extension());
            pb.set_message(srt_path.display().to_string());

            let result = if output_path == srt_path {
                Err(CaptionError::Config("output would overwrite its input".to_string()))
            } else {
                self.convert_file(&srt_path, &output_path, target).await
            };

            match result {
                Ok(()) => summary.converted.push(output_path),
                Err(e) => {
                    warn!("Failed to convert {}: {}", srt_path.display(), e);
                    summary.failed.push((srt_path, e.to_string()));
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        info!(
            "Batch finished: {} converted, {} failed",
            summary.converted.len(),
            summary.failed.len()
        );
        Ok(summary)
    }

    /// Validate a caption file; the format defaults to the one implied by its extension
    pub async fn validate_file<P: AsRef<Path>>(
        &self,
        path: P,
        format: Option<CaptionFormat>,
    ) -> Result<ValidationReport> {
        let path = path.as_ref();
        let raw = self.source.fetch(&CaptionRequest::new(path)).await?;
        let format = format.unwrap_or(raw.format);
        info!("Validating {} as {}", raw.origin.display(), format);

        self.validator.validate(&raw.content, format)
    }

    /// Parse an SRT file and run every analysis over it
    pub async fn analyze_file<P: AsRef<Path>>(&self, path: P) -> Result<AnalysisReport> {
        let path = path.as_ref();
        let document = self.load_document(path, None).await?;
        let raw = document.raw.as_deref().unwrap_or_default();

        let full_text = document
            .cues
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let report = AnalysisReport {
            source: path.to_path_buf(),
            cue_count: document.cue_count(),
            word_count: document.word_count(),
            total_duration: document.total_duration(),
            chronological: document.is_chronological(),
            reading_speed: analyze_reading_speed(&document.cues),
            gaps: find_gaps(&document.cues, self.config.analysis.gap_threshold),
            language: detect_language(&full_text),
            quality: self.assessor.assess(&document.cues, raw),
        };

        if !report.chronological {
            warn!("Cues in {} are not in chronological order", path.display());
        }
        info!(
            "Analysis of {}: {} cues, {:.1} wpm, quality {}",
            path.display(),
            report.cue_count,
            report.reading_speed.average_wpm,
            report.quality.overall_quality
        );

        Ok(report)
    }
}
