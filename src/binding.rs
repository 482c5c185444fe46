//! Resolution bindings: a lookup key paired with an argument-slot list.
//!
//! A binding is constructed once — lookup key, optional culture override,
//! and the ordered slot list with static values captured at construction —
//! and rendered many times. Each render resolves the key through the
//! registry's fallback chain and substitutes the current live values.

use crate::error::Result;
use crate::registry::ResourceRegistry;
use crate::template::{ArgumentSlot, resolve};

/// A reusable pairing of lookup key, culture override, and argument slots.
#[derive(Debug, Clone)]
pub struct ResolutionBinding {
    key: String,
    culture: Option<String>,
    slots: Vec<ArgumentSlot>,
}

impl ResolutionBinding {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            culture: None,
            slots: Vec::new(),
        }
    }

    /// Pin this binding to a culture instead of following the current one.
    pub fn with_culture(mut self, culture: impl Into<String>) -> Self {
        self.culture = Some(culture.into());
        self
    }

    /// Append a static argument, fixed from now on.
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.slots.push(ArgumentSlot::Static(value.into()));
        self
    }

    /// Append a live argument taking position `index` of the per-render
    /// value list.
    pub fn live_arg(mut self, index: usize) -> Self {
        self.slots.push(ArgumentSlot::Live(index));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Resolve the key and substitute the arguments.
    pub fn render(&self, registry: &ResourceRegistry, live_values: &[&str]) -> Result<String> {
        let template = registry.get_resource(&self.key, self.culture.as_deref())?;
        resolve(&template, &self.slots, live_values)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::Error;
    use crate::parsers::{FormatKind, Source};

    fn registry() -> ResourceRegistry {
        let registry = ResourceRegistry::new();
        registry
            .load(
                &[
                    Source::new(
                        FormatKind::Json,
                        r#"{
                            "language": "English", "description": "US", "cultureName": "en-US",
                            "cart": "User {0} has {1} items",
                            "greeting": "Hello"
                        }"#,
                    ),
                    Source::new(
                        FormatKind::Json,
                        r#"{
                            "language": "Français", "description": "FR", "cultureName": "fr-FR",
                            "cart": "{0} a {1} articles"
                        }"#,
                    ),
                ],
                "en-US",
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_render_with_live_and_static_args() {
        let binding = ResolutionBinding::new("cart").live_arg(0).arg("5");
        let rendered = binding.render(&registry(), &["Alice"]).unwrap();
        assert_eq!(rendered, "User Alice has 5 items");
    }

    #[test]
    fn test_render_follows_current_culture() {
        let registry = registry();
        let binding = ResolutionBinding::new("cart").live_arg(0).arg("3");
        registry.set_culture("fr-FR").unwrap();
        assert_eq!(binding.render(&registry, &["Zoé"]).unwrap(), "Zoé a 3 articles");
    }

    #[test]
    fn test_culture_override_pins_the_binding() {
        let registry = registry();
        let binding = ResolutionBinding::new("cart")
            .with_culture("fr-FR")
            .live_arg(0)
            .arg("1");
        // Current culture stays en-US; the binding resolves in fr-FR anyway.
        assert_eq!(binding.render(&registry, &["Ana"]).unwrap(), "Ana a 1 articles");
    }

    #[test]
    fn test_render_missing_key_degrades_to_key() {
        let binding = ResolutionBinding::new("missing.key").live_arg(0);
        assert_eq!(binding.render(&registry(), &["x"]).unwrap(), "missing.key");
    }

    #[test]
    fn test_render_bad_live_index_fails() {
        let binding = ResolutionBinding::new("cart").live_arg(0).live_arg(2);
        let error = binding.render(&registry(), &["Alice"]).unwrap_err();
        assert_eq!(
            error,
            Error::LiveArgumentOutOfRange {
                index: 2,
                supplied: 1
            }
        );
    }
}
