//! Dotted property path resolution over nested object literals.

use crate::syntax::{named_children, text, unparenthesized};
use tree_sitter::Node;

/// A dotted property name split into its segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    segments: Vec<String>,
}

impl PropertyPath {
    pub fn parse(dotted: &str) -> Self {
        Self {
            segments: dotted.split('.').map(str::to_string).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl std::fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// How far a path could be followed through existing properties.
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'t, 'p> {
    /// Number of segments matched.
    pub depth: usize,
    /// The deepest node reached: the matched value, or the last object
    /// literal searched when a segment was missing.
    pub node: Node<'t>,
    /// Segments that could not be resolved.
    pub remaining: &'p [String],
    /// Key of the last matched segment when `node` is a shorthand property
    /// or a method. Such a member has no separate value, so edits rewrite the
    /// whole member as `key: ...`.
    pub bare_key: Option<&'p str>,
}

impl Resolution<'_, '_> {
    pub fn is_complete(&self) -> bool {
        self.remaining.is_empty()
    }
}

/// Walk `path` down from `object` as far as existing properties allow.
///
/// Members keyed by a plain identifier match: `key: value` pairs, shorthand
/// properties (`{ base }`) and methods (`{ base() {} }`). Quoted, numeric and
/// computed keys and spreads are treated as absent. The walk stops at the
/// first missing segment or at the first matched value that is not an object
/// literal.
pub fn resolve<'t, 'p>(object: Node<'t>, source: &str, path: &'p [String]) -> Resolution<'t, 'p> {
    let mut node = object;
    let mut depth = 0;
    let mut bare_key = None;

    while depth < path.len() && node.kind() == "object" {
        match find_property(node, source, &path[depth]) {
            Some(Member::Pair(value)) => node = value,
            Some(Member::Bare(member)) => {
                node = member;
                bare_key = Some(path[depth].as_str());
            }
            None => break,
        }
        depth += 1;
    }

    tracing::debug!(
        "Resolved {} of {} segment(s), stopped at {} {:?}",
        depth,
        path.len(),
        node.kind(),
        node.byte_range()
    );

    Resolution {
        depth,
        node,
        remaining: &path[depth..],
        bare_key,
    }
}

enum Member<'t> {
    /// Value of a `key: value` pair.
    Pair(Node<'t>),
    /// A shorthand property or method, as a whole.
    Bare(Node<'t>),
}

/// First member of `object` keyed by the identifier `name`.
fn find_property<'t>(object: Node<'t>, source: &str, name: &str) -> Option<Member<'t>> {
    let is_name = |key: Node| key.kind() == "property_identifier" && text(key, source) == name;

    named_children(object)
        .into_iter()
        .find_map(|child| match child.kind() {
            "pair" => child
                .child_by_field_name("key")
                .filter(|key| is_name(*key))
                .and_then(|_| child.child_by_field_name("value"))
                .map(|value| Member::Pair(unparenthesized(value))),
            "shorthand_property_identifier" if text(child, source) == name => {
                Some(Member::Bare(child))
            }
            "method_definition" => child
                .child_by_field_name("name")
                .filter(|key| is_name(*key))
                .map(|_| Member::Bare(child)),
            _ => None,
        })
}
