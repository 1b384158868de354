use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::error::{CaptionError, Result};
use crate::format::CaptionFormat;
use super::{CaptionRequest, CaptionSource, RawCaption};

async fn read_caption(path: &Path) -> Result<RawCaption> {
    let format = CaptionFormat::from_path(path)?;
    let content = fs::read_to_string(path).await?;
    Ok(RawCaption {
        origin: path.to_path_buf(),
        format,
        content,
    })
}

/// Reads exactly the requested path
pub struct FileSource;

#[async_trait]
impl CaptionSource for FileSource {
    fn name(&self) -> String {
        "file".to_string()
    }

    async fn fetch(&self, request: &CaptionRequest) -> Result<RawCaption> {
        if !request.path.is_file() {
            return Err(CaptionError::FileNotFound(request.path.display().to_string()));
        }
        read_caption(&request.path).await
    }
}

/// Looks for caption files next to a media file: `<stem>.<lang>.<ext>`, then `<stem>.<ext>`.
///
/// A request that already names a caption file is never redirected to a sibling.
pub struct SidecarSource {
    extensions: Vec<CaptionFormat>,
}

impl Default for SidecarSource {
    fn default() -> Self {
        Self {
            extensions: vec![
                CaptionFormat::Srt,
                CaptionFormat::Vtt,
                CaptionFormat::Sbv,
                CaptionFormat::Ttml,
            ],
        }
    }
}

impl SidecarSource {
    pub fn new(extensions: Vec<CaptionFormat>) -> Self {
        Self { extensions }
    }

    /// Candidate paths in lookup order; empty when the request is itself a caption file
    pub fn candidates(&self, request: &CaptionRequest) -> Vec<PathBuf> {
        if CaptionFormat::from_path(&request.path).is_ok() {
            return Vec::new();
        }
        let Some(stem) = request.path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
            return Vec::new();
        };
        let dir = request.path.parent().unwrap_or_else(|| Path::new(""));

        let mut names = Vec::new();
        if let Some(lang) = &request.language {
            names.extend(
                self.extensions
                    .iter()
                    .map(|f| format!("{}.{}.{}", stem, lang, f.extension())),
            );
        }
        names.extend(self.extensions.iter().map(|f| format!("{}.{}", stem, f.extension())));

        names.into_iter().map(|name| dir.join(name)).collect()
    }
}

#[async_trait]
impl CaptionSource for SidecarSource {
    fn name(&self) -> String {
        "sidecar".to_string()
    }

    async fn fetch(&self, request: &CaptionRequest) -> Result<RawCaption> {
        if CaptionFormat::from_path(&request.path).is_ok() {
            return Err(CaptionError::Source(format!(
                "{} is a caption file, not a media file",
                request.path.display()
            )));
        }

        for candidate in self.candidates(request) {
            debug!("Checking sidecar caption {}", candidate.display());
            if candidate.is_file() {
                return read_caption(&candidate).await;
            }
        }

        Err(CaptionError::Source(format!(
            "no sidecar captions next to {}",
            request.path.display()
        )))
    }
}
