use assert_fs::prelude::*;
use captionkit::config::Config;
use captionkit::error::CaptionError;
use captionkit::format::CaptionFormat;
use captionkit::workflow::Workflow;

const SAMPLE: &str = "1\n00:00:00,000 --> 00:00:02,000\nHello world\n\n2\n00:00:05,000 --> 00:00:07,000\nTest subtitle\n";

#[tokio::test]
async fn converts_a_single_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("talk.srt");
    input.write_str(SAMPLE).unwrap();
    let output = temp.child("out/talk.vtt");

    let workflow = Workflow::new(Config::default());
    workflow
        .convert_file(input.path(), output.path(), CaptionFormat::Vtt)
        .await
        .unwrap();

    let vtt = std::fs::read_to_string(output.path()).unwrap();
    assert!(vtt.starts_with("WEBVTT\n\n00:00:00.000 --> 00:00:02.000\nHello world\n"));
}

#[tokio::test]
async fn batch_mirrors_directory_layout() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("a.srt").write_str(SAMPLE).unwrap();
    temp.child("season1").create_dir_all().unwrap();
    temp.child("season1/b.srt").write_str(SAMPLE).unwrap();
    temp.child("notes.md").write_str("not captions").unwrap();
    let out = temp.child("converted");

    let workflow = Workflow::new(Config::default());
    let summary = workflow
        .convert_directory(temp.path(), CaptionFormat::Ttml, Some(out.path()))
        .await
        .unwrap();

    assert_eq!(summary.converted.len(), 2);
    assert!(summary.failed.is_empty());
    assert!(out.child("a.ttml").path().is_file());
    assert!(out.child("season1/b.ttml").path().is_file());
}

#[tokio::test]
async fn batch_refuses_to_overwrite_sources() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("a.srt").write_str(SAMPLE).unwrap();

    let workflow = Workflow::new(Config::default());
    let summary = workflow
        .convert_directory(temp.path(), CaptionFormat::Srt, None::<&std::path::Path>)
        .await
        .unwrap();

    assert!(summary.converted.is_empty());
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(std::fs::read_to_string(temp.child("a.srt").path()).unwrap(), SAMPLE);
}

#[tokio::test]
async fn analyzes_sidecar_captions_for_media_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("movie.en.srt").write_str(SAMPLE).unwrap();

    let workflow = Workflow::new(Config::default());
    let document = workflow
        .load_document(temp.child("movie.mp4").path(), Some("en"))
        .await
        .unwrap();
    assert_eq!(document.cue_count(), 2);
    assert_eq!(document.language_code.as_deref(), Some("en"));

    let report = workflow.analyze_file(temp.child("movie.en.srt").path()).await.unwrap();
    assert_eq!(report.gaps.len(), 1);
    assert_eq!(report.gaps[0].duration, 3.0);
    assert!(report.quality.completeness < 1.0);
}

#[tokio::test]
async fn missing_input_reports_every_source() {
    let temp = assert_fs::TempDir::new().unwrap();
    let workflow = Workflow::new(Config::default());

    let err = workflow
        .validate_file(temp.child("absent.srt").path(), None)
        .await
        .unwrap_err();
    match err {
        CaptionError::AllSourcesFailed(reasons) => assert_eq!(reasons.len(), 2),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn missing_caption_file_does_not_fall_back_to_sibling() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("talk.srt").write_str(SAMPLE).unwrap();
    let workflow = Workflow::new(Config::default());

    let err = workflow
        .validate_file(temp.child("talk.vtt").path(), Some(CaptionFormat::Vtt))
        .await
        .unwrap_err();
    match err {
        CaptionError::AllSourcesFailed(reasons) => {
            assert_eq!(reasons.len(), 2);
            assert!(reasons[0].starts_with("file:"));
        }
        other => panic!("unexpected error: {other}"),
    }

    let output = temp.child("talk.ttml");
    let result = workflow
        .convert_file(temp.child("missing.srt").path(), output.path(), CaptionFormat::Ttml)
        .await;
    assert!(result.is_err());
    assert!(!output.path().exists());
}
