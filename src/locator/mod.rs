//! Configuration object locator.
//!
//! Build tools expose their settings through a handful of conventional
//! module shapes. Each shape is an [`ExportIdiom`]; the locator tries them in
//! a fixed order and the first structural match wins. Nothing is evaluated:
//! wrapper calls such as `defineConfig(...)` are opaque and only their first
//! argument is inspected.

pub mod exports;

use exports::{declarator_initializer, default_export_value, first_call_argument, module_exports_value};
use std::fmt;
use tree_sitter::Node;

/// How the module makes its configuration available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportConvention {
    /// `export default <expr>`
    DefaultExport,
    /// `module.exports = <expr>`
    ModuleExports,
}

/// Recognized syntactic shapes, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportIdiom {
    /// `export default { ... }`
    DefaultObject,
    /// `export default wrap({ ... })`
    DefaultWrappedObject,
    /// `const config = { ... }; export default config`
    DefaultIdentifier,
    /// `const config = wrap({ ... }); export default config`
    DefaultIdentifierWrapped,
    /// `const config = { ... }; export default wrap(config)`
    DefaultWrappedIdentifier,
    /// `module.exports = { ... }`
    ModuleObject,
    /// `module.exports = wrap({ ... })`
    ModuleWrappedObject,
    /// `const config = { ... }; module.exports = config`
    ModuleIdentifier,
    /// `const config = wrap({ ... }); module.exports = config`
    ModuleIdentifierWrapped,
    /// `const config = { ... }; module.exports = wrap(config)`
    ModuleWrappedIdentifier,
}

/// Structural shape of the exported expression, independent of convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Object,
    WrappedObject,
    Identifier,
    IdentifierWrapped,
    WrappedIdentifier,
}

impl ExportIdiom {
    /// All idioms in the order the locator tries them.
    pub const ALL: [ExportIdiom; 10] = [
        ExportIdiom::DefaultObject,
        ExportIdiom::DefaultWrappedObject,
        ExportIdiom::DefaultIdentifier,
        ExportIdiom::DefaultIdentifierWrapped,
        ExportIdiom::DefaultWrappedIdentifier,
        ExportIdiom::ModuleObject,
        ExportIdiom::ModuleWrappedObject,
        ExportIdiom::ModuleIdentifier,
        ExportIdiom::ModuleIdentifierWrapped,
        ExportIdiom::ModuleWrappedIdentifier,
    ];

    pub fn convention(self) -> ExportConvention {
        match self {
            ExportIdiom::DefaultObject
            | ExportIdiom::DefaultWrappedObject
            | ExportIdiom::DefaultIdentifier
            | ExportIdiom::DefaultIdentifierWrapped
            | ExportIdiom::DefaultWrappedIdentifier => ExportConvention::DefaultExport,
            _ => ExportConvention::ModuleExports,
        }
    }

    fn shape(self) -> Shape {
        match self {
            ExportIdiom::DefaultObject | ExportIdiom::ModuleObject => Shape::Object,
            ExportIdiom::DefaultWrappedObject | ExportIdiom::ModuleWrappedObject => {
                Shape::WrappedObject
            }
            ExportIdiom::DefaultIdentifier | ExportIdiom::ModuleIdentifier => Shape::Identifier,
            ExportIdiom::DefaultIdentifierWrapped | ExportIdiom::ModuleIdentifierWrapped => {
                Shape::IdentifierWrapped
            }
            ExportIdiom::DefaultWrappedIdentifier | ExportIdiom::ModuleWrappedIdentifier => {
                Shape::WrappedIdentifier
            }
        }
    }

    /// Whether this idiom looks through an opaque wrapper call.
    pub fn requires_wrapping_call(self) -> bool {
        !matches!(self.shape(), Shape::Object | Shape::Identifier)
    }

    /// Extract the configuration object if the module has this shape.
    pub fn extract<'t>(self, program: Node<'t>, source: &str) -> Option<Node<'t>> {
        let exported = match self.convention() {
            ExportConvention::DefaultExport => default_export_value(program)?,
            ExportConvention::ModuleExports => module_exports_value(program, source)?,
        };

        let object = match self.shape() {
            Shape::Object => Some(exported),
            Shape::WrappedObject => first_call_argument(exported),
            Shape::Identifier => resolve_identifier(program, source, exported),
            Shape::IdentifierWrapped => {
                resolve_identifier(program, source, exported).and_then(first_call_argument)
            }
            Shape::WrappedIdentifier => first_call_argument(exported)
                .and_then(|arg| resolve_identifier(program, source, arg)),
        }?;

        (object.kind() == "object").then_some(object)
    }
}

fn resolve_identifier<'t>(program: Node<'t>, source: &str, node: Node<'t>) -> Option<Node<'t>> {
    if node.kind() != "identifier" {
        return None;
    }
    declarator_initializer(program, source, crate::syntax::text(node, source))
}

impl fmt::Display for ExportIdiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let site = match self.convention() {
            ExportConvention::DefaultExport => "export default",
            ExportConvention::ModuleExports => "module.exports =",
        };
        match self.shape() {
            Shape::Object => write!(f, "{} {{ ... }}", site),
            Shape::WrappedObject => write!(f, "{} wrapper({{ ... }})", site),
            Shape::Identifier => write!(f, "{} <binding of {{ ... }}>", site),
            Shape::IdentifierWrapped => write!(f, "{} <binding of wrapper({{ ... }})>", site),
            Shape::WrappedIdentifier => write!(f, "{} wrapper(<binding of {{ ... }}>)", site),
        }
    }
}

/// A configuration object and the idiom that exposed it.
#[derive(Debug, Clone, Copy)]
pub struct Located<'t> {
    pub idiom: ExportIdiom,
    pub node: Node<'t>,
}

/// Find the configuration object of a parsed module.
///
/// Idioms that look through wrapper calls are skipped unless
/// `allow_wrapping_call` is set.
pub fn locate<'t>(program: Node<'t>, source: &str, allow_wrapping_call: bool) -> Option<Located<'t>> {
    let located = ExportIdiom::ALL
        .iter()
        .filter(|idiom| allow_wrapping_call || !idiom.requires_wrapping_call())
        .find_map(|&idiom| {
            idiom
                .extract(program, source)
                .map(|node| Located { idiom, node })
        });

    match &located {
        Some(found) => tracing::debug!(
            "Configuration object found via `{}` at bytes {:?}",
            found.idiom,
            found.node.byte_range()
        ),
        None => tracing::debug!("No export idiom matched"),
    }

    located
}
