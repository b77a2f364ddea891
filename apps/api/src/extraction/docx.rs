//! DOCX text extraction.
//!
//! A DOCX file is a zip package of WordprocessingML parts. Text is read from the
//! header parts, the main body, then the footer parts; contact details often live
//! in a header, so skipping them would make the email/phone checks misfire.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;
use zip::ZipArchive;

use super::ExtractError;

const BODY_PART: &str = "word/document.xml";

/// Upper bound on the decompressed size of a single part.
pub const MAX_PART_BYTES: u64 = 16 * 1024 * 1024;

/// Extracts the text of a DOCX package, trimmed of leading/trailing whitespace.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let names: Vec<String> = archive.file_names().map(String::from).collect();
    if !names.iter().any(|n| n == BODY_PART) {
        return Err(ExtractError::MissingBody);
    }

    let mut headers: Vec<&str> = names
        .iter()
        .map(String::as_str)
        .filter(|n| is_story_part(n, "header"))
        .collect();
    let mut footers: Vec<&str> = names
        .iter()
        .map(String::as_str)
        .filter(|n| is_story_part(n, "footer"))
        .collect();
    headers.sort_unstable();
    footers.sort_unstable();

    let parts: Vec<&str> = headers
        .into_iter()
        .chain(std::iter::once(BODY_PART))
        .chain(footers)
        .collect();

    let mut text = String::new();
    for part in &parts {
        let xml = read_part(&mut archive, part, MAX_PART_BYTES)?;
        text.push_str(&wordprocessing_text(&xml)?);
    }

    debug!(parts = parts.len(), "DOCX parts processed");
    Ok(text.trim().to_string())
}

/// `word/header1.xml`, `word/footer2.xml`, ... but not their `_rels` siblings.
fn is_story_part(name: &str, kind: &str) -> bool {
    name.strip_prefix("word/")
        .and_then(|rest| rest.strip_prefix(kind))
        .is_some_and(|rest| rest.ends_with(".xml") && !rest.contains('/'))
}

/// Reads one part, refusing anything larger than `limit` bytes once decompressed.
/// The declared size is untrusted: the read is capped as well.
fn read_part<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
    limit: u64,
) -> Result<Vec<u8>, ExtractError> {
    let file = archive.by_name(name)?;
    let too_large = || ExtractError::PartTooLarge {
        part: name.to_string(),
        limit,
    };
    if file.size() > limit {
        return Err(too_large());
    }

    let mut xml = Vec::new();
    file.take(limit + 1).read_to_end(&mut xml)?;
    if xml.len() as u64 > limit {
        return Err(too_large());
    }
    Ok(xml)
}

/// Flattens one WordprocessingML part into plain text.
///
/// `w:t` runs are copied verbatim, `w:tab` inside a run becomes `\t`, `w:br` and
/// `w:cr` become `\n`, and each paragraph ends with `\n`. Table cells hold ordinary
/// paragraphs, so their text falls out of the same rules.
fn wordprocessing_text(xml: &[u8]) -> Result<String, ExtractError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut text = String::new();
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"r" => in_run = true,
                b"t" => in_text = true,
                _ => {}
            },
            Event::End(ref e) => match e.local_name().as_ref() {
                b"r" => in_run = false,
                b"t" => in_text = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            // Paragraph properties also carry <w:tabs><w:tab/></w:tabs>; only run tabs are text.
            Event::Empty(ref e) => match e.local_name().as_ref() {
                b"tab" if in_run => text.push('\t'),
                b"br" | b"cr" if in_run => text.push('\n'),
                b"p" => text.push('\n'),
                _ => {}
            },
            Event::Text(ref e) if in_text => text.push_str(&e.unescape()?),
            Event::CData(ref e) if in_text => text.push_str(&String::from_utf8_lossy(e.as_ref())),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}
