use captionkit::analysis::{Gap, analyze_reading_speed, find_gaps};
use captionkit::convert::{CaptionInput, convert};
use captionkit::format::CaptionFormat;
use captionkit::quality::{OverallQuality, assess_quality};
use captionkit::subtitle::{Cue, parse_srt};
use captionkit::validate::validate;

const SAMPLE: &str = "1\n00:00:00,000 --> 00:00:02,000\nHello world\n\n2\n00:00:02,000 --> 00:00:04,000\nTest subtitle\n";

fn numbered_srt(count: usize) -> String {
    (0..count)
        .map(|i| {
            let start = i as f64 * 3.0;
            format!(
                "{}\n{} --> {}\nLine number {}\n\n",
                i + 1,
                captionkit::subtitle::format_srt_time(start),
                captionkit::subtitle::format_srt_time(start + 2.5),
                i + 1
            )
        })
        .collect()
}

#[test]
fn parses_the_two_cue_sample() {
    let cues = captionkit::parse(SAMPLE);
    assert_eq!(cues, vec![Cue::new(0.0, 2.0, "Hello world"), Cue::new(2.0, 4.0, "Test subtitle")]);
}

#[test]
fn well_formed_documents_keep_every_cue() {
    for count in [1, 7, 40] {
        let cues = parse_srt(&numbered_srt(count));
        assert_eq!(cues.len(), count);
        assert!(cues.iter().all(|c| (c.duration() - 2.5).abs() < 1e-9));
    }
}

#[test]
fn vtt_output_uses_dot_fractions() {
    let vtt = convert(SAMPLE, CaptionFormat::Vtt).unwrap();
    assert!(vtt.starts_with("WEBVTT"));
    assert!(vtt.contains("Hello world"));
    assert!(vtt.lines().filter(|l| l.contains("-->")).all(|l| !l.contains(',')));

    let from_cues =
        convert(CaptionInput::Cues(&[Cue::new(1.0, 2.0, "x")]), CaptionFormat::Vtt).unwrap();
    assert!(from_cues.starts_with("WEBVTT"));
}

#[test]
fn txt_output_is_exact_and_repeatable() {
    let first = convert(SAMPLE, CaptionFormat::Txt).unwrap();
    assert_eq!(first, "Hello world\nTest subtitle");
    assert_eq!(first, convert(SAMPLE, CaptionFormat::Txt).unwrap());
}

#[test]
fn empty_input_still_yields_documents() {
    assert_eq!(convert("", CaptionFormat::Vtt).unwrap(), "WEBVTT\n");
    assert_eq!(convert("", CaptionFormat::Txt).unwrap(), "");
    assert_eq!(convert("", CaptionFormat::Sbv).unwrap(), "");
    assert!(convert("", CaptionFormat::Ttml).unwrap().contains("<tt"));
}

#[test]
fn converted_documents_validate() {
    let vtt = convert(SAMPLE, CaptionFormat::Vtt).unwrap();
    assert!(validate(&vtt, CaptionFormat::Vtt).unwrap().is_valid);

    let ttml = convert(SAMPLE, CaptionFormat::Ttml).unwrap();
    assert!(validate(&ttml, CaptionFormat::Ttml).unwrap().is_valid);

    let srt = convert(SAMPLE, CaptionFormat::Srt).unwrap();
    assert_eq!(validate(&srt, CaptionFormat::Srt).unwrap().stats.cue_count, 2);
}

#[test]
fn gap_between_distant_cues() {
    let cues = vec![Cue::new(0.0, 5.0, "First"), Cue::new(10.0, 15.0, "Second")];
    assert_eq!(find_gaps(&cues, 1.0), vec![Gap { start: 5.0, end: 10.0, duration: 5.0 }]);
}

#[test]
fn reading_speed_over_two_cues() {
    let cues = vec![
        Cue::new(0.0, 10.0, "a b c d e f g h i j"),
        Cue::new(10.0, 20.0, "k l m n o"),
    ];
    assert!((analyze_reading_speed(&cues).average_wpm - 45.0).abs() < 1e-9);
}

#[test]
fn zero_duration_cue_drags_quality_down() {
    let metrics = assess_quality(&[Cue::new(5.0, 5.0, "Frozen")], "");
    assert_eq!(metrics.timing_accuracy, 0.0);
    assert!(matches!(metrics.overall_quality, OverallQuality::Fair | OverallQuality::Poor));
}
