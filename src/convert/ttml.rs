use crate::format::CaptionFormat;
use crate::subtitle::{SrtBlock, format_timestamp};
use super::CaptionWriter;

const TTML_HEADER: [&str; 9] = [
    r#"<?xml version="1.0" encoding="UTF-8"?>"#,
    r#"<tt xmlns="http://www.w3.org/ns/ttml" xmlns:tts="http://www.w3.org/ns/ttml#styling">"#,
    "  <head>",
    "    <styling>",
    r#"      <style id="default" tts:fontSize="16px" tts:color="white"/>"#,
    "    </styling>",
    "  </head>",
    "  <body>",
    "    <div>",
];

const TTML_FOOTER: [&str; 3] = ["    </div>", "  </body>", "</tt>"];

/// Minimal TTML document, one `<p>` per cue
pub struct TtmlWriter;

impl CaptionWriter for TtmlWriter {
    fn format(&self) -> CaptionFormat {
        CaptionFormat::Ttml
    }

    fn write(&self, blocks: &[SrtBlock]) -> String {
        let mut ttml_lines: Vec<String> = TTML_HEADER.iter().map(|l| l.to_string()).collect();

        for block in blocks {
            ttml_lines.push(format!(
                r#"      <p begin="{}" end="{}">{}</p>"#,
                format_timestamp(block.start, '.'),
                format_timestamp(block.end, '.'),
                escape_xml(&block.text())
            ));
        }

        ttml_lines.extend(TTML_FOOTER.iter().map(|l| l.to_string()));
        ttml_lines.join("\n")
    }
}

/// Escape `&`, `<` and `>`; ampersands first so entities are not doubled
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subtitle::Cue;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Tom & <Jerry>"), "Tom &amp; &lt;Jerry&gt;");
    }

    #[test]
    fn test_ttml_paragraphs() {
        let cue = Cue::new(1.0, 2.5, "Fish & chips");
        let ttml = TtmlWriter.write(&[SrtBlock::from(&cue)]);
        assert!(ttml.starts_with("<?xml"));
        assert!(ttml.contains(
            r#"<p begin="00:00:01.000" end="00:00:02.500">Fish &amp; chips</p>"#
        ));
        assert!(ttml.ends_with("</tt>"));
    }

    #[test]
    fn test_empty_ttml_is_still_a_document() {
        let ttml = TtmlWriter.write(&[]);
        assert!(ttml.contains("<tt"));
        assert!(ttml.contains("<div>\n    </div>"));
        assert!(!ttml.contains("<p "));
    }
}
