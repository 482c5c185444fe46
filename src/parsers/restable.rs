//! Flat resource-table (`.resx`-shaped) parser.
//!
//! Documents carry repeated `<data name="..."><value>...</value></data>`
//! records and no embedded culture identity. The culture is derived from
//! the file name instead: the last dot-delimited segment of the stem, when
//! it contains a hyphen, is taken as the culture tag (taken unconditionally
//! even for multi-hyphen stems like `Resources.extra-info.en-US.resx`);
//! otherwise a fixed fallback culture is assumed.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::language::LocalizationLanguage;

use super::{FALLBACK_TABLE_CULTURE, ParseSkip, ResourceParser, Source};

#[derive(Debug, Default, Clone, Copy)]
pub struct ResTableParser;

impl ResourceParser for ResTableParser {
    fn parse(&self, source: &Source) -> Result<LocalizationLanguage, ParseSkip> {
        let culture_id = source
            .name
            .as_deref()
            .map(culture_from_filename)
            .unwrap_or_else(|| FALLBACK_TABLE_CULTURE.to_string());

        // No embedded identity metadata; the culture tag doubles as the
        // display name.
        let mut parsed =
            LocalizationLanguage::new(culture_id.clone(), culture_id.clone(), culture_id);

        let mut reader = Reader::from_str(&source.content);
        let mut in_record = false;
        let mut record_name: Option<String> = None;
        let mut record_value: Option<String> = None;
        let mut in_value = false;
        // Element depth below the open <data> record.
        let mut depth = 0usize;

        loop {
            match reader.read_event().map_err(malformed)? {
                Event::Start(element) => {
                    let name = element.local_name();
                    if !in_record && name.as_ref() == b"data" {
                        in_record = true;
                        record_name = data_name(&element)?;
                        record_value = None;
                        in_value = false;
                        depth = 0;
                    } else if in_record {
                        // Only a direct <value> child of <data> counts, and
                        // only the first one.
                        if depth == 0 && name.as_ref() == b"value" && record_value.is_none() {
                            in_value = true;
                        }
                        depth += 1;
                    }
                }
                Event::Text(text) => {
                    if in_value {
                        let chunk = text.unescape().map_err(malformed)?;
                        record_value.get_or_insert_with(String::new).push_str(&chunk);
                    }
                }
                Event::CData(data) => {
                    if in_value {
                        record_value
                            .get_or_insert_with(String::new)
                            .push_str(&String::from_utf8_lossy(data.as_ref()));
                    }
                }
                Event::Empty(element) => {
                    if in_record
                        && depth == 0
                        && element.local_name().as_ref() == b"value"
                        && record_value.is_none()
                    {
                        record_value = Some(String::new());
                    }
                }
                Event::End(_) => {
                    if in_record {
                        if depth == 0 {
                            // Closing the <data> record itself.
                            if let (Some(name), Some(value)) =
                                (record_name.take(), record_value.take())
                            {
                                parsed.entries.insert(name, value);
                            }
                            in_record = false;
                            record_name = None;
                            record_value = None;
                        } else {
                            depth -= 1;
                            if depth == 0 && in_value {
                                record_value.get_or_insert_with(String::new);
                                in_value = false;
                            }
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(parsed)
    }
}

fn malformed(error: impl std::fmt::Display) -> ParseSkip {
    ParseSkip::Malformed(error.to_string())
}

fn data_name(element: &quick_xml::events::BytesStart<'_>) -> Result<Option<String>, ParseSkip> {
    for attribute in element.attributes() {
        let attribute = attribute.map_err(malformed)?;
        if attribute.key.local_name().as_ref() == b"name" {
            let value = attribute.unescape_value().map_err(malformed)?.into_owned();
            return Ok(if value.is_empty() { None } else { Some(value) });
        }
    }
    Ok(None)
}

/// Culture-tag heuristic over the file name.
///
/// `Resources.zh-CN.resx` -> `zh-CN`; `Resources.resx` -> fallback. The
/// last stem segment is used as-is whenever it contains a hyphen, so
/// `Resources.extra-info.en-US.resx` yields `en-US`.
fn culture_from_filename(name: &str) -> String {
    let stem = Path::new(name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("");
    let segments: Vec<&str> = stem.split('.').collect();
    if segments.len() > 1 {
        let last = segments[segments.len() - 1];
        if last.contains('-') && last.len() >= 2 {
            return last.to_string();
        }
    }
    FALLBACK_TABLE_CULTURE.to_string()
}
