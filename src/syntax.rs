//! Parser adapter over tree-sitter.
//!
//! Produces a syntax tree whose nodes carry byte ranges into the text that
//! was parsed. Trees are never reused across edits.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser, Tree};

/// Placeholder path for errors raised on in-memory text.
pub(crate) const IN_MEMORY: &str = "<source>";

/// Grammar used to parse a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLanguage {
    #[default]
    JavaScript,
    TypeScript,
    Tsx,
}

impl SourceLanguage {
    /// Pick a grammar from a file extension. Unknown extensions parse as JavaScript.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("ts") | Some("mts") | Some("cts") => SourceLanguage::TypeScript,
            Some("tsx") => SourceLanguage::Tsx,
            _ => SourceLanguage::JavaScript,
        }
    }

    fn grammar(self) -> tree_sitter::Language {
        match self {
            SourceLanguage::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            SourceLanguage::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            SourceLanguage::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLanguage::JavaScript => write!(f, "javascript"),
            SourceLanguage::TypeScript => write!(f, "typescript"),
            SourceLanguage::Tsx => write!(f, "tsx"),
        }
    }
}

impl std::str::FromStr for SourceLanguage {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "javascript" | "js" => Ok(SourceLanguage::JavaScript),
            "typescript" | "ts" => Ok(SourceLanguage::TypeScript),
            "tsx" => Ok(SourceLanguage::Tsx),
            _ => Err(format!("Unknown language: {}", s)),
        }
    }
}

/// Parse `source` and reject text that contains syntax errors.
pub fn parse(source: &str, language: SourceLanguage) -> Result<Tree> {
    let mut parser = Parser::new();
    parser.set_language(&language.grammar())?;

    let tree = parser.parse(source, None).ok_or_else(|| Error::Parse {
        path: PathBuf::from(IN_MEMORY),
        line: 1,
        column: 1,
    })?;

    let root = tree.root_node();
    if root.has_error() {
        let at = first_error(root).unwrap_or(root);
        let position = at.start_position();
        tracing::debug!(
            "Syntax error in {} source at {}:{}",
            language,
            position.row + 1,
            position.column + 1
        );
        return Err(Error::Parse {
            path: PathBuf::from(IN_MEMORY),
            line: position.row + 1,
            column: position.column + 1,
        });
    }

    Ok(tree)
}

/// Depth-first search for the first ERROR or MISSING node.
fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

/// Source text covered by `node`.
pub fn text<'s>(node: Node, source: &'s str) -> &'s str {
    &source[node.byte_range()]
}

/// Strip any `( ... )` wrapping around an expression.
pub fn unparenthesized(mut node: Node) -> Node {
    while node.kind() == "parenthesized_expression" {
        match named_children(node).into_iter().next() {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

/// Named children of `node`, skipping comments and other extras.
pub fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect()
}
