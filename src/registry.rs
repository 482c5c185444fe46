//! Resource registry: per-culture resource sets with fallback lookup.
//!
//! The registry owns the `culture id -> LocalizationLanguage` mapping and
//! the current-culture state. All merge and lookup operations serialize on
//! one lock: `load`/`add_source` perform read-then-write merges and
//! `get_resource` reads while a concurrent merge could resize the mapping,
//! so none of them are safe to interleave.
//!
//! The central lookup contract is the three-tier fallback: requested (or
//! current) culture, then the default culture, then the key itself
//! verbatim. Missing translations are a content-authoring problem, not a
//! runtime error — they surface visibly as raw keys instead of crashing.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::RwLock;

use tracing::{debug, warn};

use crate::culture::{CultureContext, SubscriptionId};
use crate::error::{Error, Result};
use crate::language::{LanguageInfo, LocalizationLanguage};
use crate::parsers::{FormatKind, FormatParser, ResourceParser, Source};

#[derive(Debug)]
struct RegistryState {
    languages: HashMap<String, LocalizationLanguage>,
    default_culture: String,
}

/// Registry of localized resources, grouped by culture.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    state: RwLock<Option<RegistryState>>,
    culture: CultureContext,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all registry state with the given sources.
    ///
    /// Every source runs through the parser for its declared format;
    /// documents that fail identity validation or do not parse are logged
    /// and skipped, never fatal. After merging, a resource set must exist
    /// for `default_culture` or the load fails with
    /// [`Error::MissingDefaultCulture`] and the registry stays (or
    /// becomes) uninitialized.
    ///
    /// On success the current culture is initialized to the default.
    pub fn load(&self, sources: &[Source], default_culture: &str) -> Result<()> {
        let mut languages = HashMap::new();
        merge_sources(&mut languages, sources);

        let mut state = self.state.write().expect("registry lock poisoned");
        if !languages.contains_key(default_culture) {
            *state = None;
            return Err(Error::MissingDefaultCulture(default_culture.to_string()));
        }

        debug!(
            cultures = languages.len(),
            default_culture, "loaded localization resources"
        );
        *state = Some(RegistryState {
            languages,
            default_culture: default_culture.to_string(),
        });
        drop(state);

        self.culture.init(default_culture);
        Ok(())
    }

    /// Merge more sources into the existing state.
    ///
    /// Same merge semantics as [`load`](Self::load) — later sources win on
    /// key collisions, identity fields are first-writer-wins — but nothing
    /// is reset and the default culture is not revalidated. Calling before
    /// a successful `load` is an error.
    pub fn add_source(&self, sources: &[Source]) -> Result<()> {
        let mut state = self.state.write().expect("registry lock poisoned");
        let state = state.as_mut().ok_or(Error::NotInitialized)?;
        merge_sources(&mut state.languages, sources);
        Ok(())
    }

    /// Register one in-memory document.
    pub fn register_source(&self, kind: FormatKind, content: &str) -> Result<()> {
        self.add_source(&[Source::new(kind, content)])
    }

    /// Resolve `key` against `culture_override` (or the current culture),
    /// falling back to the default culture and finally to the key itself.
    pub fn get_resource(&self, key: &str, culture_override: Option<&str>) -> Result<String> {
        let state = self.state.read().expect("registry lock poisoned");
        let state = state.as_ref().ok_or(Error::NotInitialized)?;

        let culture = match culture_override {
            Some(requested) if !requested.trim().is_empty() => requested.to_string(),
            _ => self.culture.current().ok_or(Error::NotInitialized)?,
        };

        if let Some(value) = state.languages.get(&culture).and_then(|l| l.get(key)) {
            return Ok(value.to_string());
        }
        if let Some(value) = state
            .languages
            .get(&state.default_culture)
            .and_then(|l| l.get(key))
        {
            return Ok(value.to_string());
        }
        Ok(key.to_string())
    }

    /// Identity metadata of every loaded culture, for language pickers.
    /// Sorted by culture id for stable presentation.
    pub fn list_cultures(&self) -> Result<Vec<LanguageInfo>> {
        let state = self.state.read().expect("registry lock poisoned");
        let state = state.as_ref().ok_or(Error::NotInitialized)?;
        let mut infos: Vec<LanguageInfo> = state
            .languages
            .values()
            .map(LocalizationLanguage::info)
            .collect();
        infos.sort_by(|a, b| a.culture_id.cmp(&b.culture_id));
        Ok(infos)
    }

    /// The culture lookups currently resolve against.
    pub fn current_culture(&self) -> Result<String> {
        self.ensure_initialized()?;
        self.culture.current().ok_or(Error::NotInitialized)
    }

    /// The last-resort fallback culture declared at load time.
    pub fn default_culture(&self) -> Result<String> {
        let state = self.state.read().expect("registry lock poisoned");
        let state = state.as_ref().ok_or(Error::NotInitialized)?;
        Ok(state.default_culture.clone())
    }

    /// Switch the current culture. No-op (and no notification) when the
    /// value is already current; otherwise listeners fire synchronously
    /// before this returns. Returns whether a change fired.
    pub fn set_culture(&self, culture: &str) -> Result<bool> {
        self.ensure_initialized()?;
        {
            let state = self.state.read().expect("registry lock poisoned");
            if let Some(state) = state.as_ref()
                && !state.languages.contains_key(culture)
            {
                warn!(culture, "switching to a culture with no loaded resources");
            }
        }
        Ok(self.culture.set(culture))
    }

    /// Register a culture-change listener.
    pub fn subscribe(&self, listener: impl Fn(&str) + Send + Sync + 'static) -> SubscriptionId {
        self.culture.subscribe(listener)
    }

    /// Remove a culture-change listener.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.culture.unsubscribe(id)
    }

    /// The culture context, for callers that hold it independently.
    pub fn culture_context(&self) -> &CultureContext {
        &self.culture
    }

    fn ensure_initialized(&self) -> Result<()> {
        let state = self.state.read().expect("registry lock poisoned");
        if state.is_none() {
            return Err(Error::NotInitialized);
        }
        Ok(())
    }
}

/// Parse and merge sources in order: later sources win per entry key,
/// identity fields keep their first writer.
fn merge_sources(languages: &mut HashMap<String, LocalizationLanguage>, sources: &[Source]) {
    for source in sources {
        let parser = FormatParser::for_kind(source.kind);
        match parser.parse(source) {
            Ok(parsed) => {
                debug!(
                    source = source.describe(),
                    culture = %parsed.culture_id,
                    entries = parsed.entries.len(),
                    "merged localization source"
                );
                match languages.entry(parsed.culture_id.clone()) {
                    Entry::Occupied(mut slot) => slot.get_mut().merge_from(parsed),
                    Entry::Vacant(slot) => {
                        slot.insert(parsed);
                    }
                }
            }
            Err(skip) => {
                debug!(source = source.describe(), reason = %skip, "skipping source");
            }
        }
    }
}
