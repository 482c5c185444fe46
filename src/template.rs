//! Positional template resolution with mixed static/live arguments.
//!
//! A resolved translation is treated as a positional format template
//! (`{0}`, `{1}`, …). The argument array is built from an ordered slot
//! list: a [`ArgumentSlot::Static`] slot carries a value fixed when the
//! binding was constructed, a [`ArgumentSlot::Live`] slot indexes into the
//! value list supplied fresh on every resolution.
//!
//! Substitution degrades gracefully: when a lookup missed entirely and the
//! raw key came back as the "template", it simply contains no placeholders
//! and passes through unchanged. A placeholder whose index has no argument
//! is left verbatim for the same reason. Only an out-of-range `Live` index
//! is a hard error — it means the binding was authored against the wrong
//! placeholder count.

use crate::error::{Error, Result};

/// One positional argument: fixed at binding construction, or supplied
/// per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentSlot {
    Static(String),
    Live(usize),
}

impl ArgumentSlot {
    /// Convenience constructor for a static slot.
    pub fn literal(value: impl Into<String>) -> Self {
        ArgumentSlot::Static(value.into())
    }
}

/// Build the positional argument array from `slots` and substitute it
/// into `template`.
pub fn resolve(template: &str, slots: &[ArgumentSlot], live_values: &[&str]) -> Result<String> {
    let mut arguments: Vec<&str> = Vec::with_capacity(slots.len());
    for slot in slots {
        match slot {
            ArgumentSlot::Static(value) => arguments.push(value),
            ArgumentSlot::Live(index) => {
                let value =
                    live_values
                        .get(*index)
                        .copied()
                        .ok_or(Error::LiveArgumentOutOfRange {
                            index: *index,
                            supplied: live_values.len(),
                        })?;
                arguments.push(value);
            }
        }
    }
    Ok(substitute(template, &arguments))
}

/// `{n}`-style positional substitution with `{{`/`}}` escapes.
fn substitute(template: &str, arguments: &[&str]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(position) = rest.find(['{', '}']) {
        output.push_str(&rest[..position]);
        let tail = &rest[position..];

        if let Some(after) = tail.strip_prefix("{{") {
            output.push('{');
            rest = after;
            continue;
        }
        if let Some(after) = tail.strip_prefix("}}") {
            output.push('}');
            rest = after;
            continue;
        }
        if let Some(after) = tail.strip_prefix('}') {
            // Lone closing brace; nothing to pair it with.
            output.push('}');
            rest = after;
            continue;
        }

        // An opening brace: try to read `{digits}`.
        let inner = &tail[1..];
        let digits = inner
            .bytes()
            .take_while(|byte| byte.is_ascii_digit())
            .count();
        if digits > 0 && inner.as_bytes().get(digits) == Some(&b'}') {
            let placeholder_len = digits + 2;
            let index: usize = inner[..digits].parse().unwrap_or(usize::MAX);
            match arguments.get(index) {
                Some(argument) => output.push_str(argument),
                // No argument for this position: keep the placeholder.
                None => output.push_str(&tail[..placeholder_len]),
            }
            rest = &tail[placeholder_len..];
        } else {
            // Not a positional placeholder ("{name}", "{", "{}"); verbatim.
            output.push('{');
            rest = &tail[1..];
        }
    }

    output.push_str(rest);
    output
}
