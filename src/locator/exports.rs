//! Syntax helpers for export sites, wrapping calls and top-level bindings.

use crate::syntax::{named_children, text, unparenthesized};
use tree_sitter::Node;

/// Expression exported by the first `export default <expr>` statement,
/// with surrounding parentheses removed.
///
/// Default-exported function and class declarations carry no expression and
/// yield `None`.
pub fn default_export_value(program: Node) -> Option<Node> {
    let statement = named_children(program)
        .into_iter()
        .find(|node| node.kind() == "export_statement" && is_default_export(*node))?;
    statement.child_by_field_name("value").map(unparenthesized)
}

fn is_default_export(statement: Node) -> bool {
    let mut cursor = statement.walk();
    let found = statement
        .children(&mut cursor)
        .any(|child| child.kind() == "default");
    found
}

/// Right-hand side of the first top-level `module.exports = <expr>` statement.
pub fn module_exports_value<'t>(program: Node<'t>, source: &str) -> Option<Node<'t>> {
    named_children(program)
        .into_iter()
        .filter(|node| node.kind() == "expression_statement")
        .filter_map(|statement| statement.named_child(0))
        .filter(|expr| expr.kind() == "assignment_expression")
        .find(|assignment| {
            assignment
                .child_by_field_name("left")
                .map(|left| is_module_exports(left, source))
                .unwrap_or(false)
        })
        .and_then(|assignment| assignment.child_by_field_name("right"))
        .map(unparenthesized)
}

fn is_module_exports(node: Node, source: &str) -> bool {
    if node.kind() != "member_expression" {
        return false;
    }

    let object = match node.child_by_field_name("object") {
        Some(o) => o,
        None => return false,
    };
    let property = match node.child_by_field_name("property") {
        Some(p) => p,
        None => return false,
    };

    object.kind() == "identifier"
        && text(object, source) == "module"
        && property.kind() == "property_identifier"
        && text(property, source) == "exports"
}

/// First argument of a call expression. Further arguments are never inspected.
pub fn first_call_argument(node: Node) -> Option<Node> {
    let node = unparenthesized(node);
    if node.kind() != "call_expression" {
        return None;
    }
    let arguments = node.child_by_field_name("arguments")?;
    if arguments.kind() != "arguments" {
        // Tagged templates put a template string in the arguments slot.
        return None;
    }
    named_children(arguments).into_iter().next().map(unparenthesized)
}

/// Initializer of the first top-level declarator binding `name`.
///
/// Every declarator of every `var`, `let` and `const` statement is searched,
/// including comma-chained declarators and `export const` declarations.
pub fn declarator_initializer<'t>(program: Node<'t>, source: &str, name: &str) -> Option<Node<'t>> {
    let declarator = named_children(program)
        .into_iter()
        .filter_map(|statement| match statement.kind() {
            "lexical_declaration" | "variable_declaration" => Some(statement),
            "export_statement" => statement
                .child_by_field_name("declaration")
                .filter(|d| matches!(d.kind(), "lexical_declaration" | "variable_declaration")),
            _ => None,
        })
        .flat_map(named_children)
        .filter(|node| node.kind() == "variable_declarator")
        .find(|declarator| {
            declarator
                .child_by_field_name("name")
                .map(|id| id.kind() == "identifier" && text(id, source) == name)
                .unwrap_or(false)
        })?;

    declarator.child_by_field_name("value").map(unparenthesized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{parse, SourceLanguage};

    fn with_program<F: FnOnce(Node, &str)>(source: &str, f: F) {
        let tree = parse(source, SourceLanguage::JavaScript).unwrap();
        f(tree.root_node(), source);
    }

    #[test]
    fn test_default_export_value() {
        with_program("const a = 1\nexport default { a }", |program, source| {
            let value = default_export_value(program).unwrap();
            assert_eq!(value.kind(), "object");
            assert_eq!(text(value, source), "{ a }");
        });
    }

    #[test]
    fn test_default_export_ignores_named_exports() {
        with_program("export const a = {}\nexport { a }", |program, _| {
            assert!(default_export_value(program).is_none());
        });
    }

    #[test]
    fn test_default_export_function_has_no_value() {
        with_program("export default function config() { return {} }", |program, _| {
            assert!(default_export_value(program).is_none());
        });
    }

    #[test]
    fn test_module_exports_value() {
        with_program(
            "exports.other = 1\nmodule.exports = { a: 1 }\nmodule.exports = []",
            |program, source| {
                let value = module_exports_value(program, source).unwrap();
                assert_eq!(text(value, source), "{ a: 1 }");
            },
        );
    }

    #[test]
    fn test_module_exports_requires_exact_member() {
        with_program("module.export = {}\nmodules.exports = {}", |program, source| {
            assert!(module_exports_value(program, source).is_none());
        });
    }

    #[test]
    fn test_first_call_argument() {
        with_program("wrap({ a: 1 }, { b: 2 })", |program, source| {
            let call = program.named_child(0).unwrap().named_child(0).unwrap();
            let arg = first_call_argument(call).unwrap();
            assert_eq!(text(arg, source), "{ a: 1 }");
        });
    }

    #[test]
    fn test_parenthesized_values_are_unwrapped() {
        with_program("export default ({ a: 1 })", |program, source| {
            let value = default_export_value(program).unwrap();
            assert_eq!(text(value, source), "{ a: 1 }");
        });
        with_program("module.exports = (wrap(({ b: 2 })))", |program, source| {
            let value = module_exports_value(program, source).unwrap();
            assert_eq!(value.kind(), "call_expression");
            assert_eq!(text(first_call_argument(value).unwrap(), source), "{ b: 2 }");
        });
        with_program("const config = ({ c: 3 })", |program, source| {
            let init = declarator_initializer(program, source, "config").unwrap();
            assert_eq!(text(init, source), "{ c: 3 }");
        });
    }

    #[test]
    fn test_first_call_argument_empty_call() {
        with_program("wrap()", |program, _| {
            let call = program.named_child(0).unwrap().named_child(0).unwrap();
            assert!(first_call_argument(call).is_none());
        });
    }

    #[test]
    fn test_declarator_in_comma_chain() {
        with_program(
            "let a = 1, config = { b: 2 }\nvar other = {}",
            |program, source| {
                let init = declarator_initializer(program, source, "config").unwrap();
                assert_eq!(text(init, source), "{ b: 2 }");
                assert!(declarator_initializer(program, source, "missing").is_none());
            },
        );
    }

    #[test]
    fn test_declarator_ignores_nested_scopes() {
        with_program(
            "function f() { const config = {} }\nexport default config",
            |program, source| {
                assert!(declarator_initializer(program, source, "config").is_none());
            },
        );
    }
}
