//! JSON language file parser.
//!
//! Identity fields (`language`, `description`, `cultureName`) are read from
//! the document root. The entire root object is flattened, identity fields
//! included, and the three identity key paths are filtered out afterwards
//! by exact case-insensitive match — an identity value can therefore never
//! leak into the entry table, while a nested key that merely shares an
//! identity name (e.g. `app.language`) survives.

use crate::flatten::flatten;
use crate::language::LocalizationLanguage;
use crate::value::Node;

use super::{
    CULTURE_NAME_KEY, DESCRIPTION_KEY, IDENTITY_KEYS, LANGUAGE_KEY, ParseSkip, ResourceParser,
    Source, identity_value,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonParser;

impl ResourceParser for JsonParser {
    fn parse(&self, source: &Source) -> Result<LocalizationLanguage, ParseSkip> {
        let root: serde_json::Value = serde_json::from_str(&source.content)
            .map_err(|error| ParseSkip::Malformed(error.to_string()))?;

        let language = identity_value(root.get(LANGUAGE_KEY).and_then(|v| v.as_str()))
            .ok_or(ParseSkip::MissingIdentity)?;
        let description = identity_value(root.get(DESCRIPTION_KEY).and_then(|v| v.as_str()))
            .ok_or(ParseSkip::MissingIdentity)?;
        let culture_id = identity_value(root.get(CULTURE_NAME_KEY).and_then(|v| v.as_str()))
            .ok_or(ParseSkip::MissingIdentity)?;

        let mut parsed = LocalizationLanguage::new(language, description, culture_id);
        let tree = Node::from(root);
        for (path, value) in flatten(&tree, "") {
            if IDENTITY_KEYS.iter().any(|key| key.eq_ignore_ascii_case(&path)) {
                continue;
            }
            parsed.entries.insert(path, value);
        }
        Ok(parsed)
    }
}
