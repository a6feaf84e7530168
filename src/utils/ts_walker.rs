//! Tree walking helpers over tree-sitter nodes

use tree_sitter::Node;

/// Whether a walk should enter the children of the visited node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Descend,
    Skip,
}

/// All children of a node, named and anonymous
pub fn children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

pub fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

pub fn children_by_field<'t>(node: Node<'t>, field: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor).collect()
}

/// Source text covered by a node. Nodes never split a UTF-8 sequence in
/// valid input, so an empty string only shows up for broken trees.
pub fn text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

pub fn field_text<'s>(node: Node<'_>, field: &str, source: &'s str) -> Option<&'s str> {
    node.child_by_field_name(field).map(|n| text(n, source))
}

/// Pre-order walk; the visitor decides whether to descend.
///
/// Iterative: stack use must not grow with tree depth (long operator chains).
pub fn walk<'t, F>(node: Node<'t>, visitor: &mut F)
where
    F: FnMut(Node<'t>) -> Visit,
{
    let mut cursor = node.walk();
    loop {
        if visitor(cursor.node()) == Visit::Descend && cursor.goto_first_child() {
            continue;
        }
        // The cursor never leaves `node`, so climbing stops at it
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

/// First ERROR or MISSING node in document order
pub fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    loop {
        let current = cursor.node();
        if current.is_error() || current.is_missing() {
            return Some(current);
        }
        if current.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return Some(node);
            }
        }
    }
}
