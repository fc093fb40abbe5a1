//! Plain-text extraction from PDF and DOCX documents

use crate::error::{CompareError, Result};
use lopdf::Document;
use quick_xml::events::Event;
use quick_xml::Reader as XmlReader;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// Document kinds, decided once from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Pdf,
    Docx,
    Unsupported,
}

impl InputKind {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("pdf") => Self::Pdf,
            Some("docx") => Self::Docx,
            _ => Self::Unsupported,
        }
    }
}

/// Turns a document into plain text.
///
/// `Ok(None)` means the input kind is not supported and the caller should
/// skip it; errors are reserved for supported files that cannot be read.
pub trait TextExtractor {
    fn extract(&self, path: &Path) -> Result<Option<String>>;
}

/// Extractor for PDF (via lopdf) and DOCX (via the document XML part)
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentExtractor;

impl TextExtractor for DocumentExtractor {
    fn extract(&self, path: &Path) -> Result<Option<String>> {
        match InputKind::from_path(path) {
            InputKind::Pdf => extract_pdf(path).map(Some),
            InputKind::Docx => extract_docx(path).map(Some),
            InputKind::Unsupported => {
                log::debug!("No extractor for {}", path.display());
                Ok(None)
            }
        }
    }
}

/// Concatenate the text of every page in page order
pub fn extract_pdf(path: &Path) -> Result<String> {
    let document = Document::load(path).map_err(|e| CompareError::unreadable(path, e))?;

    let mut text = String::new();
    for page_number in document.get_pages().keys() {
        let page_text = document
            .extract_text(&[*page_number])
            .map_err(|e| CompareError::unreadable(path, e))?;
        text.push_str(&page_text);
    }

    log::debug!("Extracted {} chars from {}", text.len(), path.display());
    Ok(text)
}

pub fn extract_docx(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| CompareError::unreadable(path, e))?;
    let mut archive = ZipArchive::new(file).map_err(|e| CompareError::unreadable(path, e))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| CompareError::unreadable(path, e))?
        .read_to_string(&mut xml)
        .map_err(|e| CompareError::unreadable(path, e))?;

    let text = document_xml_text(&xml).map_err(|e| CompareError::unreadable(path, e))?;
    log::debug!("Extracted {} chars from {}", text.len(), path.display());
    Ok(text)
}

/// Text of a WordprocessingML body: one line per paragraph, with tabs and
/// explicit breaks preserved.
pub fn document_xml_text(xml: &str) -> std::result::Result<String, quick_xml::Error> {
    let mut reader = XmlReader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut text = String::new();
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:r" => in_run = true,
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:r" => in_run = false,
                b"w:t" => in_text = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            // Tab stops in paragraph properties are also `w:tab`; only runs count.
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" if in_run => text.push('\t'),
                b"w:br" | b"w:cr" if in_run => text.push('\n'),
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text => {
                let raw = String::from_utf8_lossy(&t);
                match quick_xml::escape::unescape(&raw) {
                    Ok(unescaped) => text.push_str(&unescaped),
                    Err(_) => text.push_str(&raw),
                }
            }
            Event::GeneralRef(r) if in_text => {
                if let Some(c) = resolve_entity(&String::from_utf8_lossy(&r)) {
                    text.push(c);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}

fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}
