//! XML language file parser.
//!
//! Identity fields are attributes on the document's root element. Entries
//! come from leaf elements (elements with no element children) anywhere in
//! the document: the value is the leaf's text content and the key is the
//! dot-joined chain of element local names from the root down to the leaf,
//! root element name included.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::language::LocalizationLanguage;

use super::{
    CULTURE_NAME_KEY, DESCRIPTION_KEY, LANGUAGE_KEY, ParseSkip, ResourceParser, Source,
    identity_value,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct XmlParser;

/// One open element while walking the event stream.
struct Frame {
    name: String,
    text: String,
    has_element_children: bool,
}

impl ResourceParser for XmlParser {
    fn parse(&self, source: &Source) -> Result<LocalizationLanguage, ParseSkip> {
        let mut reader = Reader::from_str(&source.content);
        let mut stack: Vec<Frame> = Vec::new();
        let mut parsed: Option<LocalizationLanguage> = None;

        loop {
            match reader.read_event().map_err(malformed)? {
                Event::Start(element) => {
                    if stack.is_empty() && parsed.is_none() {
                        parsed = Some(root_identity(&element)?);
                    }
                    if let Some(parent) = stack.last_mut() {
                        parent.has_element_children = true;
                    }
                    stack.push(Frame {
                        name: local_name(&element),
                        text: String::new(),
                        has_element_children: false,
                    });
                }
                Event::Empty(element) => {
                    if stack.is_empty() && parsed.is_none() {
                        parsed = Some(root_identity(&element)?);
                    }
                    if let Some(parent) = stack.last_mut() {
                        parent.has_element_children = true;
                    }
                    let key = leaf_key(&stack, &local_name(&element));
                    if let Some(language) = parsed.as_mut() {
                        language.entries.insert(key, String::new());
                    }
                }
                Event::Text(text) => {
                    if let Some(frame) = stack.last_mut() {
                        frame.text.push_str(&text.unescape().map_err(malformed)?);
                    }
                }
                Event::CData(data) => {
                    if let Some(frame) = stack.last_mut() {
                        frame
                            .text
                            .push_str(&String::from_utf8_lossy(data.as_ref()));
                    }
                }
                Event::End(_) => {
                    let frame = stack.pop().ok_or_else(|| {
                        ParseSkip::Malformed("unbalanced closing tag".to_string())
                    })?;
                    if !frame.has_element_children {
                        let key = leaf_key(&stack, &frame.name);
                        if let Some(language) = parsed.as_mut() {
                            language.entries.insert(key, frame.text);
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        parsed.ok_or(ParseSkip::MissingIdentity)
    }
}

fn malformed(error: impl std::fmt::Display) -> ParseSkip {
    ParseSkip::Malformed(error.to_string())
}

fn local_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.local_name().as_ref()).into_owned()
}

/// Dot-joined chain of open element names, terminated by the leaf's name.
fn leaf_key(stack: &[Frame], leaf: &str) -> String {
    let mut key = String::new();
    for frame in stack {
        key.push_str(&frame.name);
        key.push('.');
    }
    key.push_str(leaf);
    key
}

/// Read the three identity attributes off the root element.
fn root_identity(root: &BytesStart<'_>) -> Result<LocalizationLanguage, ParseSkip> {
    let mut language = None;
    let mut description = None;
    let mut culture_id = None;

    for attribute in root.attributes() {
        let attribute = attribute.map_err(malformed)?;
        let name = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
        let value = attribute.unescape_value().map_err(malformed)?.into_owned();
        match name.as_str() {
            LANGUAGE_KEY => language = identity_value(Some(&value)),
            DESCRIPTION_KEY => description = identity_value(Some(&value)),
            CULTURE_NAME_KEY => culture_id = identity_value(Some(&value)),
            _ => {}
        }
    }

    match (language, description, culture_id) {
        (Some(language), Some(description), Some(culture_id)) => {
            Ok(LocalizationLanguage::new(language, description, culture_id))
        }
        _ => Err(ParseSkip::MissingIdentity),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::parsers::FormatKind;

    fn parse(content: &str) -> Result<LocalizationLanguage, ParseSkip> {
        XmlParser.parse(&Source::new(FormatKind::Xml, content))
    }

    #[test]
    fn test_keys_chain_from_root_to_leaf() {
        let parsed = parse(
            r#"<lang language="English" description="US English" cultureName="en-US">
                <menu>
                    <file>
                        <open>Open</open>
                        <close>Close</close>
                    </file>
                </menu>
                <title>App</title>
            </lang>"#,
        )
        .unwrap();

        assert_eq!(parsed.culture_id, "en-US");
        assert_eq!(parsed.get("lang.menu.file.open"), Some("Open"));
        assert_eq!(parsed.get("lang.menu.file.close"), Some("Close"));
        assert_eq!(parsed.get("lang.title"), Some("App"));
        // Non-leaf elements contribute no entries of their own.
        assert!(parsed.get("lang.menu").is_none());
        assert!(parsed.get("lang.menu.file").is_none());
    }

    #[test]
    fn test_self_closing_leaf_is_empty_string() {
        let parsed = parse(
            r#"<lang language="L" description="D" cultureName="en-US"><empty/></lang>"#,
        )
        .unwrap();
        assert_eq!(parsed.get("lang.empty"), Some(""));
    }

    #[test]
    fn test_escaped_text_and_cdata() {
        let parsed = parse(
            r#"<lang language="L" description="D" cultureName="en-US">
                <amp>Fish &amp; Chips</amp>
                <raw><![CDATA[a < b]]></raw>
            </lang>"#,
        )
        .unwrap();
        assert_eq!(parsed.get("lang.amp"), Some("Fish & Chips"));
        assert_eq!(parsed.get("lang.raw"), Some("a < b"));
    }

    #[test]
    fn test_missing_root_attribute_is_a_skip() {
        let skip = parse(r#"<lang language="L" description="D"><k>v</k></lang>"#).unwrap_err();
        assert!(matches!(skip, ParseSkip::MissingIdentity));
    }

    #[test]
    fn test_blank_root_attribute_is_a_skip() {
        let skip = parse(
            r#"<lang language=" " description="D" cultureName="en-US"><k>v</k></lang>"#,
        )
        .unwrap_err();
        assert!(matches!(skip, ParseSkip::MissingIdentity));
    }

    #[test]
    fn test_malformed_xml_is_a_skip() {
        let skip = parse(
            r#"<lang language="L" description="D" cultureName="en-US"><k>v</lang>"#,
        )
        .unwrap_err();
        assert!(matches!(skip, ParseSkip::Malformed(_)));
    }

    #[test]
    fn test_namespaced_elements_use_local_names() {
        let parsed = parse(
            r#"<x:lang xmlns:x="urn:demo" language="L" description="D" cultureName="en-US">
                <x:greeting>Hello</x:greeting>
            </x:lang>"#,
        )
        .unwrap();
        assert_eq!(parsed.get("lang.greeting"), Some("Hello"));
    }
}
