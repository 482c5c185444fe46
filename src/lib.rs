//! langres - localization resource engine
//!
//! langres ingests heterogeneous structured resource files (nested JSON,
//! attribute-tagged XML, flat resource tables), normalizes each into a flat
//! key-path -> translation mapping grouped by culture, and resolves lookups
//! at runtime with a deterministic fallback chain and live culture
//! switching. Resolved strings can additionally be treated as positional
//! format templates whose arguments mix static literals with values
//! supplied fresh on every render.
//!
//! ## Module Structure
//!
//! - `value`: generic document tree shared by all format adapters
//! - `flatten`: key-path derivation over the document tree
//! - `parsers`: per-format parsers (JSON / XML / flat table)
//! - `language`: per-culture resource sets and identity metadata
//! - `registry`: culture -> resource-set registry with fallback lookup
//! - `culture`: current-culture state and change notification
//! - `template`: positional substitution with static/live argument slots
//! - `binding`: reusable key + argument-slot pairings for render loops
//! - `scan`: directory ingestion feeding the registry
//! - `error`: the crate's error taxonomy

pub mod binding;
pub mod culture;
pub mod error;
pub mod flatten;
pub mod language;
pub mod parsers;
pub mod registry;
pub mod scan;
pub mod template;
pub mod value;

pub use binding::ResolutionBinding;
pub use culture::{CultureContext, SubscriptionId};
pub use error::{Error, Result};
pub use language::{LanguageInfo, LocalizationLanguage};
pub use parsers::{FormatKind, FormatParser, ParseSkip, ResourceParser, Source};
pub use registry::ResourceRegistry;
pub use template::ArgumentSlot;
pub use value::Node;
