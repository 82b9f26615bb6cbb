use std::io::{Cursor, Read};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use zip::ZipArchive;

const WORD_DOCUMENT_PART: &str = "word/document.xml";

static WORD_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</w:p>|<w:br\s*/>|<w:cr\s*/>").expect("valid regex"));
static WORD_TAB: Lazy<Regex> = Lazy::new(|| Regex::new(r"<w:tab\s*/>").expect("valid regex"));
static XML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));
static SLIDE_PART: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ppt/slides/slide(\d+)\.xml$").expect("valid regex"));
static SLIDE_TEXT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<a:t(?:\s[^>]*)?>([^<]*)</a:t>").expect("valid regex"));
static XML_ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#x[0-9a-fA-F]+|#[0-9]+|amp|lt|gt|quot|apos);").expect("valid regex")
});

#[derive(Debug, thiserror::Error)]
pub enum OfficeError {
    #[error("not a zip archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("failed to read {part}: {source}")]
    Part {
        part: String,
        source: std::io::Error,
    },
    #[error("no slides found")]
    NoSlides,
}

/// Text of a `.docx` body, one line per paragraph.
pub fn word_text(bytes: &[u8]) -> Result<String, OfficeError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let xml = read_part(&mut archive, WORD_DOCUMENT_PART)?;

    let xml = WORD_BREAK.replace_all(&xml, "\n");
    let xml = WORD_TAB.replace_all(&xml, " ");
    let text = XML_TAG.replace_all(&xml, "");
    Ok(decode_entities(&text))
}

/// Text runs of every slide in a `.pptx`, in slide order.
pub fn slides_text(bytes: &[u8]) -> Result<String, OfficeError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let mut slides: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| {
            let number = SLIDE_PART.captures(name)?.get(1)?.as_str().parse().ok()?;
            Some((number, name.to_owned()))
        })
        .collect();
    if slides.is_empty() {
        return Err(OfficeError::NoSlides);
    }
    // slide10 must follow slide9, not slide1
    slides.sort_by_key(|(number, _)| *number);

    let mut pages = Vec::with_capacity(slides.len());
    for (_, name) in &slides {
        let xml = read_part(&mut archive, name)?;
        let runs: Vec<String> = SLIDE_TEXT_RUN
            .captures_iter(&xml)
            .filter_map(|c| c.get(1))
            .map(|m| decode_entities(m.as_str()))
            .collect();
        pages.push(runs.join(" "));
    }
    Ok(pages.join("\n"))
}

fn read_part(archive: &mut ZipArchive<Cursor<&[u8]>>, part: &str) -> Result<String, OfficeError> {
    let mut entry = archive.by_name(part)?;
    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|source| OfficeError::Part {
            part: part.to_owned(),
            source,
        })?;
    Ok(xml)
}

pub fn decode_entities(text: &str) -> String {
    XML_ENTITY
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => entity
                    .strip_prefix("#x")
                    .map(|hex| u32::from_str_radix(hex, 16))
                    .unwrap_or_else(|| entity[1..].parse())
                    .ok()
                    .and_then(char::from_u32),
            };
            decoded.map_or_else(|| caps[0].to_owned(), String::from)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::{FileOptions, ZipWriter};

    fn zip_of(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in parts {
            writer.start_file(*name, FileOptions::default()).unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn word_paragraphs_become_lines() {
        let xml = r#"<w:document><w:body>
            <w:p><w:r><w:t>Meeting</w:t></w:r><w:r><w:t xml:space="preserve"> notes</w:t></w:r></w:p>
            <w:p><w:r><w:t>Ship</w:t><w:tab/><w:t>Q&amp;A</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let bytes = zip_of(&[("word/document.xml", xml)]);

        let text = word_text(&bytes).unwrap();
        let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        assert_eq!(lines, vec!["Meeting notes", "Ship Q&A"]);
    }

    #[test]
    fn word_without_document_part_fails() {
        let bytes = zip_of(&[("other.xml", "<x/>")]);
        assert!(matches!(word_text(&bytes), Err(OfficeError::Archive(_))));
    }

    #[test]
    fn slides_are_read_in_numeric_order() {
        let slide = |text: &str| format!(r#"<p:sld><p:txBody><a:p><a:r><a:t>{text}</a:t></a:r></a:p></p:txBody></p:sld>"#);
        let s1 = slide("first");
        let s2 = slide("second");
        let s10 = slide("tenth");
        let bytes = zip_of(&[
            ("ppt/slides/slide10.xml", s10.as_str()),
            ("ppt/slides/slide2.xml", s2.as_str()),
            ("ppt/slides/slide1.xml", s1.as_str()),
            ("ppt/slides/_rels/slide1.xml.rels", "<Relationships/>"),
        ]);

        assert_eq!(slides_text(&bytes).unwrap(), "first\nsecond\ntenth");
    }

    #[test]
    fn slide_runs_with_attributes() {
        let xml = r#"<a:r><a:t lang="en">Hello</a:t></a:r><a:r><a:t>&lt;world&gt;</a:t></a:r>"#;
        let bytes = zip_of(&[("ppt/slides/slide1.xml", xml)]);
        assert_eq!(slides_text(&bytes).unwrap(), "Hello <world>");
    }

    #[test]
    fn deck_without_slides_fails() {
        let bytes = zip_of(&[("ppt/presentation.xml", "<p:presentation/>")]);
        assert!(matches!(slides_text(&bytes), Err(OfficeError::NoSlides)));
    }

    #[test]
    fn decodes_numeric_and_named_entities() {
        assert_eq!(decode_entities("a &amp; b &#233; &#x41; &quot;q&quot;"), "a & b é A \"q\"");
        assert_eq!(decode_entities("&#xZZ; &bogus;"), "&#xZZ; &bogus;");
    }
}
