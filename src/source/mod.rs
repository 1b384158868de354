// Caption sources
//
// Raw caption text reaches the pipeline through one trait. Sources are
// tried in order by a chain; the first success wins:
// - file: the exact path that was asked for
// - sidecar: caption files sitting next to a media file

pub mod file;

pub use file::*;

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::error::{CaptionError, Result};
use crate::format::CaptionFormat;

/// What the caller is looking for
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionRequest {
    /// Caption file, or a media file whose captions are wanted
    pub path: PathBuf,
    /// Preferred language code, used by sources that can choose
    pub language: Option<String>,
}

impl CaptionRequest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            language: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Caption text as loaded, before parsing
#[derive(Debug, Clone, PartialEq)]
pub struct RawCaption {
    pub origin: PathBuf,
    pub format: CaptionFormat,
    pub content: String,
}

/// Main trait for caption loading
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaptionSource: Send + Sync {
    /// Short name used in logs and error reports
    fn name(&self) -> String;

    /// Load caption text for the request
    async fn fetch(&self, request: &CaptionRequest) -> Result<RawCaption>;
}

/// Ordered fallback over several sources. No retries: each source gets one attempt.
#[derive(Default)]
pub struct SourceChain {
    sources: Vec<Box<dyn CaptionSource>>,
}

impl SourceChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: Box<dyn CaptionSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[async_trait]
impl CaptionSource for SourceChain {
    fn name(&self) -> String {
        let names: Vec<String> = self.sources.iter().map(|s| s.name()).collect();
        format!("chain[{}]", names.join(", "))
    }

    async fn fetch(&self, request: &CaptionRequest) -> Result<RawCaption> {
        let mut failures = Vec::new();

        for source in &self.sources {
            match source.fetch(request).await {
                Ok(raw) => {
                    info!(
                        "Loaded {} captions from {} via {}",
                        raw.format,
                        raw.origin.display(),
                        source.name()
                    );
                    return Ok(raw);
                }
                Err(e) => {
                    warn!(
                        "Caption source {} failed for {}: {}",
                        source.name(),
                        request.path.display(),
                        e
                    );
                    failures.push(format!("{}: {}", source.name(), e));
                }
            }
        }

        Err(CaptionError::AllSourcesFailed(failures))
    }
}

/// Factory for creating caption sources
pub struct SourceFactory;

impl SourceFactory {
    /// Exact file first, then sidecar lookup
    pub fn create_default() -> Box<dyn CaptionSource> {
        Box::new(
            SourceChain::new()
                .with_source(Box::new(FileSource))
                .with_source(Box::new(SidecarSource::default())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(content: &str) -> RawCaption {
        RawCaption {
            origin: PathBuf::from("mock.srt"),
            format: CaptionFormat::Srt,
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn test_chain_falls_back_in_order() {
        let mut failing = MockCaptionSource::new();
        failing.expect_name().return_const("failing".to_string());
        failing
            .expect_fetch()
            .times(1)
            .returning(|_| Err(CaptionError::Source("offline".to_string())));

        let mut working = MockCaptionSource::new();
        working.expect_name().return_const("working".to_string());
        working.expect_fetch().times(1).returning(|_| Ok(raw("1")));

        let mut unused = MockCaptionSource::new();
        unused.expect_name().return_const("unused".to_string());
        unused.expect_fetch().never();

        let chain = SourceChain::new()
            .with_source(Box::new(failing))
            .with_source(Box::new(working))
            .with_source(Box::new(unused));

        let result = chain.fetch(&CaptionRequest::new("video.mp4")).await.unwrap();
        assert_eq!(result.content, "1");
    }

    #[tokio::test]
    async fn test_chain_reports_every_failure() {
        let mut first = MockCaptionSource::new();
        first.expect_name().return_const("first".to_string());
        first
            .expect_fetch()
            .returning(|_| Err(CaptionError::FileNotFound("a.srt".to_string())));

        let mut second = MockCaptionSource::new();
        second.expect_name().return_const("second".to_string());
        second
            .expect_fetch()
            .withf(|request| request.language.as_deref() == Some("en"))
            .returning(|_| Err(CaptionError::Source("nothing".to_string())));

        let chain = SourceChain::new()
            .with_source(Box::new(first))
            .with_source(Box::new(second));

        let request = CaptionRequest::new("a.srt").with_language("en");
        match chain.fetch(&request).await {
            Err(CaptionError::AllSourcesFailed(reasons)) => {
                assert_eq!(reasons.len(), 2);
                assert!(reasons[0].starts_with("first:"));
                assert!(reasons[1].contains("nothing"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_empty_chain_fails() {
        let chain = SourceChain::new();
        assert!(chain.is_empty());
        let result = tokio_test::block_on(chain.fetch(&CaptionRequest::new("x.srt")));
        assert!(matches!(result, Err(CaptionError::AllSourcesFailed(ref r)) if r.is_empty()));
    }
}
