use crate::format::CaptionFormat;
use crate::subtitle::{SrtBlock, format_srt_time, format_timestamp};
use super::CaptionWriter;

/// Renumbered SubRip output
pub struct SrtWriter;

impl CaptionWriter for SrtWriter {
    fn format(&self) -> CaptionFormat {
        CaptionFormat::Srt
    }

    fn write(&self, blocks: &[SrtBlock]) -> String {
        let mut srt_content = String::new();

        for (index, block) in blocks.iter().enumerate() {
            srt_content.push_str(&format!(
                "{}\n{} --> {}\n",
                index + 1,
                format_srt_time(block.start),
                format_srt_time(block.end),
            ));
            for line in &block.lines {
                srt_content.push_str(line);
                srt_content.push('\n');
            }
            srt_content.push('\n');
        }

        srt_content
    }
}

/// WebVTT output: header, time lines with `.` fractions, no cue numbers
pub struct VttWriter;

impl CaptionWriter for VttWriter {
    fn format(&self) -> CaptionFormat {
        CaptionFormat::Vtt
    }

    fn write(&self, blocks: &[SrtBlock]) -> String {
        let mut vtt_lines = vec!["WEBVTT".to_string(), String::new()];

        for block in blocks {
            vtt_lines.push(block.time_line.replace(',', "."));
            vtt_lines.extend(block.lines.iter().cloned());
            vtt_lines.push(String::new());
        }

        vtt_lines.join("\n")
    }
}

/// Plain text: every text line in order, nothing else
pub struct TxtWriter;

impl CaptionWriter for TxtWriter {
    fn format(&self) -> CaptionFormat {
        CaptionFormat::Txt
    }

    fn write(&self, blocks: &[SrtBlock]) -> String {
        blocks
            .iter()
            .flat_map(|b| b.lines.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// SubViewer output: `start,end` then text, blank line between entries
pub struct SbvWriter;

impl CaptionWriter for SbvWriter {
    fn format(&self) -> CaptionFormat {
        CaptionFormat::Sbv
    }

    fn write(&self, blocks: &[SrtBlock]) -> String {
        let mut sbv_lines = Vec::new();

        for block in blocks {
            sbv_lines.push(format!(
                "{},{}",
                format_timestamp(block.start, '.'),
                format_timestamp(block.end, '.')
            ));
            sbv_lines.push(block.lines.join("\n"));
            sbv_lines.push(String::new());
        }

        sbv_lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subtitle::{Cue, ParseMode, scan_srt_blocks};

    fn blocks(text: &str) -> Vec<SrtBlock> {
        scan_srt_blocks(text, ParseMode::Lenient).unwrap()
    }

    #[test]
    fn test_vtt_keeps_line_breaks_and_drops_numbers() {
        let vtt = VttWriter.write(&blocks(
            "7\n00:00:01,500 --> 00:00:03,000\nline one\nline two\n",
        ));
        assert_eq!(vtt, "WEBVTT\n\n00:00:01.500 --> 00:00:03.000\nline one\nline two\n");
    }

    #[test]
    fn test_txt_has_no_separators() {
        let txt = TxtWriter.write(&blocks(
            "1\n00:00:01,000 --> 00:00:02,000\na\nb\n\n2\n00:00:03,000 --> 00:00:04,000\nc\n",
        ));
        assert_eq!(txt, "a\nb\nc");
        assert_eq!(TxtWriter.write(&[]), "");
    }

    #[test]
    fn test_sbv_layout() {
        let cues = vec![Cue::new(1.5, 3.0, "First"), Cue::new(61.0, 62.25, "Second")];
        let blocks: Vec<SrtBlock> = cues.iter().map(SrtBlock::from).collect();
        assert_eq!(
            SbvWriter.write(&blocks),
            "00:00:01.500,00:00:03.000\nFirst\n\n00:01:01.000,00:01:02.250\nSecond\n"
        );
        assert_eq!(SbvWriter.write(&[]), "");
    }

    #[test]
    fn test_srt_renumbers() {
        let srt = SrtWriter.write(&blocks("5\n00:00:01,000 --> 00:00:02,000\nOnly\n"));
        assert_eq!(srt, "1\n00:00:01,000 --> 00:00:02,000\nOnly\n\n");
    }
}
