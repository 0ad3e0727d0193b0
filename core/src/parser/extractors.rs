//! # Extraction Logic
//!
//! Turns tree-sitter nodes into [`FieldDecl`] views.

use crate::parser::models::{FieldDecl, TagSpan};
use tree_sitter::Node;

/// Text slice of a node.
pub(crate) fn node_text<'a>(node: Node, src: &'a str) -> &'a str {
    node.utf8_text(src.as_bytes()).unwrap_or("")
}

/// The `field_declaration_list` of a `struct_type` node.
pub fn field_list(struct_node: Node) -> Option<Node> {
    let mut cursor = struct_node.walk();
    let list = struct_node
        .named_children(&mut cursor)
        .find(|n| n.kind() == "field_declaration_list");
    list
}

/// Name bound by a `type_spec` or `type_alias` node.
pub fn type_name<'a>(spec: Node, src: &'a str) -> Option<&'a str> {
    spec.child_by_field_name("name").map(|n| node_text(n, src))
}

/// Field declarations of a struct type, in declaration order.
pub fn extract_struct_fields(struct_node: Node, src: &str) -> Vec<FieldDecl> {
    let Some(list) = field_list(struct_node) else {
        return Vec::new();
    };

    let mut cursor = list.walk();
    list.named_children(&mut cursor)
        .filter(|n| n.kind() == "field_declaration")
        .map(|n| extract_field(n, src))
        .collect()
}

/// Builds the view of one `field_declaration` node.
pub fn extract_field(node: Node, src: &str) -> FieldDecl {
    let mut cursor = node.walk();
    let names = node
        .children_by_field_name("name", &mut cursor)
        .map(|n| node_text(n, src).to_string())
        .collect();

    let ty = node
        .child_by_field_name("type")
        .map(|n| node_text(n, src).to_string())
        .unwrap_or_default();

    let tag = node.child_by_field_name("tag").map(|t| TagSpan {
        start: t.start_byte(),
        end: t.end_byte(),
        text: node_text(t, src).to_string(),
    });

    FieldDecl {
        names,
        ty,
        start: node.start_byte(),
        end: node.end_byte(),
        line: node.start_position().row + 1,
        tag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_go;

    fn first_struct(parsed: &crate::parser::ParsedUnit<'_>) -> Vec<FieldDecl> {
        let root = parsed.root();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if node.kind() == "struct_type" {
                return extract_struct_fields(node, parsed.source());
            }
            let mut cursor = node.walk();
            let children: Vec<_> = node.named_children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
        Vec::new()
    }

    #[test]
    fn test_extract_fields() {
        let src = "package p\n\ntype T struct {\n\tA, B int\n\tname string `json:\"n\"`\n\t*Embedded\n}\n";
        let parsed = parse_go(src, "t.go").unwrap();
        let fields = first_struct(&parsed);
        assert_eq!(fields.len(), 3);

        assert_eq!(fields[0].names, vec!["A", "B"]);
        assert_eq!(fields[0].ty, "int");
        assert_eq!(fields[0].line, 4);
        assert!(fields[0].tag.is_none());
        assert_eq!(&src[fields[0].start..fields[0].end], "A, B int");

        let tag = fields[1].tag.as_ref().unwrap();
        assert_eq!(tag.text, "`json:\"n\"`");
        assert_eq!(&src[tag.start..tag.end], tag.text);
        assert_eq!(fields[1].end, tag.end);

        assert!(fields[2].is_embedded());
        assert_eq!(fields[2].ty, "Embedded");
    }

    #[test]
    fn test_type_name() {
        let src = "package p\ntype User struct{}\n";
        let parsed = parse_go(src, "t.go").unwrap();
        let root = parsed.root();
        let decl = root.named_child(1).unwrap();
        assert_eq!(decl.kind(), "type_declaration");
        let spec = decl.named_child(0).unwrap();
        assert_eq!(type_name(spec, src), Some("User"));
    }
}
