//! Minimal-span text edits for property injection.

use crate::error::Result;
use crate::resolver::Resolution;
use crate::syntax::named_children;
use serde_json::Value;
use std::ops::Range;

/// A single byte-range replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    pub range: Range<usize>,
    pub replacement: String,
}

impl Splice {
    /// Replace `range` with `replacement`.
    pub fn replace(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    /// Insert `text` at byte offset `at`.
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::replace(at..at, text)
    }

    /// Produce the edited text. Everything outside `range` is copied as is.
    pub fn apply(&self, source: &str) -> String {
        let mut out = String::with_capacity(
            source.len() - self.range.len() + self.replacement.len(),
        );
        out.push_str(&source[..self.range.start]);
        out.push_str(&self.replacement);
        out.push_str(&source[self.range.end..]);
        out
    }
}

/// `b: { c: <json> }` for segments `[b, c]`.
///
/// Built inside out, starting from the innermost segment.
pub fn property_declaration(segments: &[String], value: &Value) -> Result<String> {
    let json = serde_json::to_string(value)?;
    let declaration = segments
        .iter()
        .rev()
        .fold(None, |inner: Option<String>, segment| {
            Some(match inner {
                None => format!("{}: {}", segment, json),
                Some(inner) => format!("{}: {{ {} }}", segment, inner),
            })
        })
        .unwrap_or(json);
    Ok(declaration)
}

/// Compute the edit that makes `resolution`'s path hold `value`.
///
/// A fully resolved path has its value overwritten. Otherwise the missing
/// segments are declared on the deepest node reached: prepended to a
/// non-empty object literal, or replacing an empty literal or a non-object
/// value with a new literal. Shorthand properties and methods are rewritten
/// as a whole under their key.
pub fn plan(resolution: &Resolution, value: &Value) -> Result<Splice> {
    let node = resolution.node;
    let keyed = |replacement: String| match resolution.bare_key {
        Some(key) => format!("{}: {}", key, replacement),
        None => replacement,
    };

    if resolution.is_complete() {
        return Ok(Splice::replace(
            node.byte_range(),
            keyed(serde_json::to_string(value)?),
        ));
    }

    let declaration = property_declaration(resolution.remaining, value)?;

    let first_property = if node.kind() == "object" {
        named_children(node).into_iter().next()
    } else {
        None
    };

    let splice = match first_property {
        Some(first) => Splice::insert(first.start_byte(), format!("{}, ", declaration)),
        None => Splice::replace(node.byte_range(), keyed(format!("{{ {} }}", declaration))),
    };

    tracing::debug!(
        "Splicing {:?} with {:?}",
        splice.range,
        splice.replacement
    );

    Ok(splice)
}
